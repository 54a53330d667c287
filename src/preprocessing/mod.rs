//! # Модуль предобработки данных
//!
//! Подготовка ценового ряда для обучения LSTM:
//! - Min-max нормализация (параметры подбираются только на train)
//! - Скользящие окна фиксированной длины
//!
//! ## Пример использования
//!
//! ```rust
//! use btc_lstm::preprocessing::DataProcessor;
//!
//! let prices: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
//!
//! // Окно в 60 шагов назад, прогноз на 1 шаг вперёд
//! let mut processor = DataProcessor::new(60);
//! processor.fit(&prices).unwrap();
//!
//! let (x, y) = processor.windows_with_targets(&prices).unwrap();
//! assert_eq!(x.shape()[0], 40); // 100 - 60
//! ```

mod normalizer;
mod processor;

pub use normalizer::MinMaxScaler;
pub use processor::DataProcessor;
