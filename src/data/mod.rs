//! # Модуль данных
//!
//! Получение дневных OHLCV данных с CryptoCompare.
//!
//! ## Пример использования
//!
//! ```rust,no_run
//! use btc_lstm::data::CryptoCompareClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CryptoCompareClient::new();
//!     let candles = client.get_daily_history("BTC", "USDT", 2000).await?;
//!     println!("Получено {} свечей", candles.len());
//!     Ok(())
//! }
//! ```

mod crypto_compare;
mod types;

pub use crypto_compare::CryptoCompareClient;
pub use types::{Candle, HistoryData, HistoryResponse, ProviderError, RawCandle};
