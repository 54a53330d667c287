//! # Модуль модели
//!
//! Стекированная LSTM для регрессии следующего значения ряда.
//!
//! ## Пример использования
//!
//! ```rust
//! use btc_lstm::model::{Lstm, LstmConfig};
//!
//! // 4 слоя по 50 нейронов, dropout 0.2 - архитектура по умолчанию
//! let config = LstmConfig::default().with_epochs(10);
//! let lstm = Lstm::from_config(config);
//! assert_eq!(lstm.num_layers(), 4);
//! ```

mod config;
mod layers;
mod lstm;
mod optimizer;

pub use config::LstmConfig;
pub use layers::{Activation, Dense, Dropout};
pub use lstm::{Lstm, LstmCell};
pub use optimizer::Adam;
