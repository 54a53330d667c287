//! # BTC LSTM - Прогнозирование дневной цены BTC/USDT
//!
//! Библиотека для прогнозирования цены открытия следующего дня
//! с помощью стекированной LSTM и исторических данных CryptoCompare.
//!
//! ## Модули
//!
//! - `data` - Получение дневных OHLCV данных с CryptoCompare
//! - `dataset` - Разделение истории на train/test и сохранение в CSV
//! - `preprocessing` - Нормализация и скользящие окна
//! - `model` - Реализация стекированной LSTM
//! - `predictor` - Оркестратор полного пайплайна
//! - `utils` - CSV, метрики и терминальная визуализация
//!
//! ## Быстрый старт
//!
//! ```rust,no_run
//! use btc_lstm::{PredictorConfig, PricePredictor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PredictorConfig::default();
//!     let mut predictor = PricePredictor::new(config);
//!
//!     // 1. Скачиваем историю и разбиваем на train/test
//!     predictor.update_dataset(0.98, 2000).await?;
//!
//!     // 2. Обучаем модель и сохраняем артефакты
//!     predictor.train()?;
//!
//!     // 3. Строим график факт/прогноз на тестовой выборке
//!     predictor.test_model()?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod dataset;
pub mod model;
pub mod predictor;
pub mod preprocessing;
pub mod utils;

// Реэкспорт основных типов для удобства
pub use config::PredictorConfig;
pub use data::{Candle, CryptoCompareClient};
pub use dataset::{DatasetError, DatasetSummary};
pub use model::{Lstm, LstmConfig};
pub use predictor::PricePredictor;
pub use preprocessing::DataProcessor;
