//! Обучение LSTM модели на сохранённом датасете
//!
//! Запуск: cargo run --bin train --release
//!
//! Переменные окружения:
//! - `EPOCHS` - количество эпох (по умолчанию 100)
//! - `LOOKBACK` - длина окна в днях (по умолчанию 60)

use btc_lstm::{PredictorConfig, PricePredictor};
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = PredictorConfig::default();

    if let Some(epochs) = env::var("EPOCHS").ok().and_then(|s| s.parse().ok()) {
        config.epochs = epochs;
    }
    if let Some(lookback) = env::var("LOOKBACK").ok().and_then(|s| s.parse().ok()) {
        config.lookback = lookback;
    }

    println!("=== Обучение LSTM для {} ===\n", config.pair());
    println!("Параметры:");
    println!("  Окно:         {} дней", config.lookback);
    println!("  Слои:         {} x {} нейронов", config.num_layers, config.layer_size);
    println!("  Dropout:      {}", config.dropout_rate);
    println!("  Эпохи:        {}", config.epochs);
    println!("  Размер батча: {}", config.batch_size);
    println!();

    let mut predictor = PricePredictor::new(config.clone());
    predictor.train()?;

    println!();
    println!("Модель сохранена: {}", config.model_path().display());
    println!("Процессор сохранён: {}", config.processor_path().display());

    Ok(())
}
