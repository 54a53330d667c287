//! Оценка обученной модели на тестовой выборке
//!
//! Загружает сохранённые артефакты, прогнозирует цены открытия
//! тестового периода и рисует график факт/прогноз в терминале.
//!
//! Запуск: cargo run --bin test_model --release

use btc_lstm::{PredictorConfig, PricePredictor};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = PredictorConfig::default();

    println!("=== Оценка модели {} ===\n", config.pair());

    let mut predictor = PricePredictor::new(config);
    predictor.load()?;
    predictor.test_model()?;

    Ok(())
}
