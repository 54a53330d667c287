//! # Вспомогательные утилиты
//!
//! Чтение/запись CSV, метрики качества и терминальная визуализация.

mod chart;
mod io;
mod metrics;

pub use chart::{print_comparison_chart, render_comparison_chart};
pub use io::{load_candles_csv, open_prices, save_candles_csv};
pub use metrics::{mae, mape, mse, r2_score, rmse};
