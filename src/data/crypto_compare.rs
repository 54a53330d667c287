//! Клиент для работы с CryptoCompare API
//!
//! Этот модуль предоставляет простой интерфейс для получения
//! дневной истории цен с CryptoCompare (min-api).

use super::types::{Candle, HistoryResponse, ProviderError};
use log::{debug, info};

/// Базовый URL API CryptoCompare
const CRYPTOCOMPARE_API_URL: &str = "https://min-api.cryptocompare.com";

/// Максимальное количество свечей за один запрос histoday
const MAX_LIMIT: u32 = 2000;

/// Клиент для работы с CryptoCompare API
#[derive(Debug, Clone)]
pub struct CryptoCompareClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for CryptoCompareClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoCompareClient {
    /// Создаёт новый клиент CryptoCompare
    ///
    /// # Пример
    ///
    /// ```rust
    /// use btc_lstm::data::CryptoCompareClient;
    ///
    /// let client = CryptoCompareClient::new();
    /// ```
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: CRYPTOCOMPARE_API_URL.to_string(),
        }
    }

    /// Создаёт клиент с пользовательским URL
    ///
    /// Полезно для тестирования
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Получает дневную историю OHLCV для торговой пары
    ///
    /// # Аргументы
    ///
    /// * `base_asset` - Базовый актив (например, "BTC")
    /// * `quote_asset` - Котируемый актив (например, "USDT")
    /// * `limit` - Количество последних дневных свечей (максимум 2000)
    ///
    /// Свечи возвращаются в хронологическом порядке (от старых к новым).
    ///
    /// # Пример
    ///
    /// ```rust,no_run
    /// use btc_lstm::data::CryptoCompareClient;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = CryptoCompareClient::new();
    ///     let candles = client.get_daily_history("BTC", "USDT", 2000).await.unwrap();
    ///     println!("Последняя цена открытия: {}", candles.last().unwrap().open);
    /// }
    /// ```
    pub async fn get_daily_history(
        &self,
        base_asset: &str,
        quote_asset: &str,
        limit: u32,
    ) -> Result<Vec<Candle>, ProviderError> {
        let limit = limit.min(MAX_LIMIT);

        // API возвращает limit+1 точек, поэтому запрашиваем на одну меньше
        let url = format!(
            "{}/data/v2/histoday?fsym={}&tsym={}&limit={}",
            self.base_url,
            base_asset.to_uppercase(),
            quote_asset.to_uppercase(),
            limit.saturating_sub(1)
        );

        debug!("Запрос к CryptoCompare API: {}", url);

        let response = self.client.get(&url).send().await?;
        let data: HistoryResponse = response.json().await?;

        let candles = parse_history(data)?;

        info!(
            "Получено {} дневных свечей для {}/{}",
            candles.len(),
            base_asset,
            quote_asset
        );

        Ok(candles)
    }
}

/// Разбирает конверт ответа histoday
///
/// `Response != "Success"` - ошибка API, пустые данные - `NoData`.
/// Свечи возвращаются отсортированными по времени.
fn parse_history(data: HistoryResponse) -> Result<Vec<Candle>, ProviderError> {
    if data.response != "Success" {
        return Err(ProviderError::ApiError(data.message));
    }

    let raw = data.data.ok_or(ProviderError::NoData)?;
    if raw.data.is_empty() {
        return Err(ProviderError::NoData);
    }

    let mut candles: Vec<Candle> = raw.data.iter().map(Candle::from).collect();
    candles.sort_by_key(|c| c.timestamp);

    Ok(candles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{HistoryData, RawCandle};

    fn raw_candle(time: i64, open: f64) -> RawCandle {
        RawCandle {
            time,
            open,
            high: open + 100.0,
            low: open - 100.0,
            close: open + 50.0,
            volume_from: 1000.0,
            volume_to: open * 1000.0,
        }
    }

    fn success_response(candles: Vec<RawCandle>) -> HistoryResponse {
        HistoryResponse {
            response: "Success".to_string(),
            message: String::new(),
            data: Some(HistoryData { data: candles }),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = CryptoCompareClient::new();
        assert_eq!(client.base_url, CRYPTOCOMPARE_API_URL);
    }

    #[test]
    fn test_custom_base_url() {
        let client = CryptoCompareClient::with_base_url("http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_parse_history_sorts_by_timestamp() {
        let response = success_response(vec![
            raw_candle(1693526400, 26100.0),
            raw_candle(1693440000, 26000.0),
        ]);

        let candles = parse_history(response).unwrap();

        assert_eq!(candles.len(), 2);
        assert!(candles[0].timestamp < candles[1].timestamp);
        assert_eq!(candles[0].open, 26000.0);
    }

    #[test]
    fn test_parse_history_error_envelope() {
        let response = HistoryResponse {
            response: "Error".to_string(),
            message: "limit param seems to be too big".to_string(),
            data: None,
        };

        match parse_history(response) {
            Err(ProviderError::ApiError(msg)) => assert!(msg.contains("too big")),
            other => panic!("ожидалась ApiError, получено {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_parse_history_empty_payload() {
        // Успешный конверт без свечей и конверт вовсе без Data
        assert!(matches!(
            parse_history(success_response(vec![])),
            Err(ProviderError::NoData)
        ));

        let no_data = HistoryResponse {
            response: "Success".to_string(),
            message: String::new(),
            data: None,
        };
        assert!(matches!(parse_history(no_data), Err(ProviderError::NoData)));
    }
}
