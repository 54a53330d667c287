//! Чтение и запись свечей в CSV
//!
//! Формат файла: заголовок + строки в хронологическом порядке,
//! без отдельной колонки индекса. Заголовок задаётся полями `Candle`.

use crate::data::Candle;
use std::path::Path;

/// Сохраняет свечи в CSV файл (существующий файл перезаписывается)
pub fn save_candles_csv(candles: &[Candle], path: impl AsRef<Path>) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;

    for candle in candles {
        writer.serialize(candle)?;
    }

    writer.flush()?;
    Ok(())
}

/// Загружает свечи из CSV файла
pub fn load_candles_csv(path: impl AsRef<Path>) -> Result<Vec<Candle>, csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut candles = Vec::new();

    for result in reader.deserialize() {
        let candle: Candle = result?;
        candles.push(candle);
    }

    Ok(candles)
}

/// Извлекает цены открытия из списка свечей
pub fn open_prices(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.open).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let base = 26000.0 + i as f64 * 10.0;
                Candle::new(
                    i as i64 * 86_400_000,
                    base,
                    base + 100.0,
                    base - 50.0,
                    base + 30.0,
                    1200.0,
                    base * 1200.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candles.csv");

        let candles = make_candles(10);
        save_candles_csv(&candles, &path).unwrap();

        let loaded = load_candles_csv(&path).unwrap();
        assert_eq!(loaded.len(), 10);
        assert_eq!(loaded[0].timestamp, candles[0].timestamp);
        assert_eq!(loaded[9].open, candles[9].open);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candles.csv");

        save_candles_csv(&make_candles(10), &path).unwrap();
        save_candles_csv(&make_candles(3), &path).unwrap();

        let loaded = load_candles_csv(&path).unwrap();
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn test_header_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("candles.csv");

        save_candles_csv(&make_candles(2), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(
            header,
            "timestamp,open,high,low,close,volume,quote_volume"
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_candles_csv("no_such_dir/no_such_file.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_open_prices() {
        let candles = make_candles(5);
        let opens = open_prices(&candles);
        assert_eq!(opens.len(), 5);
        assert_eq!(opens[0], 26000.0);
        assert_eq!(opens[4], 26040.0);
    }
}
