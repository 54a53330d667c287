//! Обновление датасета: загрузка дневной истории BTC/USDT
//! и разбиение на train/test CSV файлы
//!
//! Запуск: cargo run --bin fetch_data
//!
//! Переменные окружения:
//! - `PERCENT_TRAIN` - доля обучающей выборки (по умолчанию 0.98)
//! - `LIMIT` - количество дневных свечей (по умолчанию 2000)

use btc_lstm::{PredictorConfig, PricePredictor};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = PredictorConfig::default();

    let percent_train: f64 = env::var("PERCENT_TRAIN")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.train_fraction);
    let limit: u32 = env::var("LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.history_limit);
    let predictor = PricePredictor::new(config.clone());

    println!("=== Обновление датасета {} ===\n", config.pair());
    println!("Параметры:");
    println!("  Доля train: {}", percent_train);
    println!("  Свечей:     {}", limit);
    println!();

    match predictor.update_dataset(percent_train, limit).await {
        Ok(summary) => {
            println!("Датасет обновлён:");
            println!(
                "  Train: {} строк -> {}",
                summary.train_rows,
                summary.train_path.display()
            );
            println!(
                "  Test:  {} строк -> {}",
                summary.test_rows,
                summary.test_path.display()
            );
        }
        Err(e) => {
            println!("Ошибка обновления датасета: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
