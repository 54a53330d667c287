//! Типы данных для работы с CryptoCompare

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки при работе с CryptoCompare API
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Ошибка HTTP запроса: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Ошибка парсинга JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Ошибка API CryptoCompare: {0}")]
    ApiError(String),

    #[error("Нет данных")]
    NoData,
}

/// Дневная свеча (OHLCV данные)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    /// Время открытия свечи (Unix timestamp в миллисекундах)
    pub timestamp: i64,

    /// Цена открытия
    pub open: f64,

    /// Максимальная цена
    pub high: f64,

    /// Минимальная цена
    pub low: f64,

    /// Цена закрытия
    pub close: f64,

    /// Объём торгов в базовой валюте
    pub volume: f64,

    /// Объём в котируемой валюте (USDT)
    pub quote_volume: f64,
}

impl Candle {
    /// Создаёт новую свечу
    pub fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        quote_volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            quote_volume,
        }
    }

    /// Возвращает время как DateTime
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or_default()
    }

    /// Рассчитывает изменение цены в процентах
    pub fn price_change_pct(&self) -> f64 {
        if self.open == 0.0 {
            0.0
        } else {
            (self.close - self.open) / self.open * 100.0
        }
    }

    /// Проверяет, является ли свеча бычьей (зелёной)
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Проверяет, является ли свеча медвежьей (красной)
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Ответ CryptoCompare на запрос дневной истории
#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "Data", default)]
    pub data: Option<HistoryData>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryData {
    #[serde(rename = "Data", default)]
    pub data: Vec<RawCandle>,
}

/// Сырая свеча из API (время в секундах)
#[derive(Debug, Deserialize)]
pub struct RawCandle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(rename = "volumefrom")]
    pub volume_from: f64,
    #[serde(rename = "volumeto")]
    pub volume_to: f64,
}

impl From<&RawCandle> for Candle {
    fn from(raw: &RawCandle) -> Self {
        Candle::new(
            raw.time * 1000,
            raw.open,
            raw.high,
            raw.low,
            raw.close,
            raw.volume_from,
            raw.volume_to,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_bullish() {
        let candle = Candle::new(0, 100.0, 110.0, 95.0, 105.0, 1000.0, 100000.0);
        assert!(candle.is_bullish());
        assert!(!candle.is_bearish());
    }

    #[test]
    fn test_price_change_pct() {
        let candle = Candle::new(0, 100.0, 115.0, 95.0, 110.0, 1000.0, 100000.0);
        assert_eq!(candle.price_change_pct(), 10.0);
    }

    #[test]
    fn test_raw_candle_conversion() {
        let raw = RawCandle {
            time: 1693440000,
            open: 26000.0,
            high: 26500.0,
            low: 25800.0,
            close: 26300.0,
            volume_from: 1200.0,
            volume_to: 31000000.0,
        };

        let candle = Candle::from(&raw);
        assert_eq!(candle.timestamp, 1693440000000);
        assert_eq!(candle.open, 26000.0);
        assert_eq!(candle.quote_volume, 31000000.0);
    }

    #[test]
    fn test_history_response_parsing() {
        let json = r#"{
            "Response": "Success",
            "Message": "",
            "Data": {
                "Data": [
                    {"time": 1693440000, "open": 26000.0, "high": 26500.0,
                     "low": 25800.0, "close": 26300.0,
                     "volumefrom": 1200.0, "volumeto": 31000000.0}
                ]
            }
        }"#;

        let response: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.response, "Success");
        let data = response.data.unwrap();
        assert_eq!(data.data.len(), 1);
        assert_eq!(data.data[0].open, 26000.0);
    }

    #[test]
    fn test_error_response_parsing() {
        let json = r#"{
            "Response": "Error",
            "Message": "There is no data for the symbol XYZ"
        }"#;

        let response: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.response, "Error");
        assert!(response.message.contains("no data"));
    }
}
