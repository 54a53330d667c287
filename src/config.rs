//! Конфигурация пайплайна прогнозирования
//!
//! Собирает в одном месте все параметры, которые раньше были бы
//! «зашиты» по коду: имена файлов, длину окна, гиперпараметры модели.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Конфигурация прогнозатора цены
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Базовый актив (например, "BTC")
    pub base_asset: String,
    /// Котируемый актив (например, "USDT")
    pub quote_asset: String,
    /// Длина окна (сколько дней назад смотрим)
    pub lookback: usize,
    /// Доля обучающей выборки (0.0 - 1.0)
    pub train_fraction: f64,
    /// Сколько последних дневных свечей запрашивать у провайдера
    pub history_limit: u32,
    /// Размер скрытого слоя LSTM
    pub layer_size: usize,
    /// Количество LSTM слоёв
    pub num_layers: usize,
    /// Вероятность dropout между слоями
    pub dropout_rate: f64,
    /// Количество эпох обучения
    pub epochs: usize,
    /// Размер батча
    pub batch_size: usize,
    /// Скорость обучения (Adam)
    pub learning_rate: f64,
    /// Каталог для CSV файлов train/test
    pub dataset_dir: PathBuf,
    /// Каталог для артефактов модели
    pub model_dir: PathBuf,
    /// Базовое имя обучающего файла
    pub train_name: String,
    /// Базовое имя тестового файла
    pub test_name: String,
    /// Базовое имя модели
    pub model_name: String,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_asset: "BTC".to_string(),
            quote_asset: "USDT".to_string(),
            lookback: 60,
            train_fraction: 0.98,
            history_limit: 2000,
            layer_size: 50,
            num_layers: 4,
            dropout_rate: 0.2,
            epochs: 100,
            batch_size: 32,
            learning_rate: 0.001,
            dataset_dir: PathBuf::from("datasets"),
            model_dir: PathBuf::from("models"),
            train_name: "btc_price_train".to_string(),
            test_name: "btc_price_test".to_string(),
            model_name: "btc_lstm".to_string(),
        }
    }
}

impl PredictorConfig {
    /// Создаёт конфигурацию с параметрами по умолчанию
    pub fn new() -> Self {
        Self::default()
    }

    /// Устанавливает длину окна
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    /// Устанавливает долю обучающей выборки
    pub fn with_train_fraction(mut self, fraction: f64) -> Self {
        self.train_fraction = fraction;
        self
    }

    /// Устанавливает количество эпох
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Устанавливает размер скрытого слоя
    pub fn with_layer_size(mut self, layer_size: usize) -> Self {
        self.layer_size = layer_size;
        self
    }

    /// Устанавливает количество LSTM слоёв
    pub fn with_num_layers(mut self, num_layers: usize) -> Self {
        self.num_layers = num_layers;
        self
    }

    /// Устанавливает каталоги для данных и моделей
    pub fn with_dirs(mut self, dataset_dir: impl Into<PathBuf>, model_dir: impl Into<PathBuf>) -> Self {
        self.dataset_dir = dataset_dir.into();
        self.model_dir = model_dir.into();
        self
    }

    /// Путь к обучающему CSV
    pub fn train_csv_path(&self) -> PathBuf {
        self.dataset_dir.join(format!("{}.csv", self.train_name))
    }

    /// Путь к тестовому CSV
    pub fn test_csv_path(&self) -> PathBuf {
        self.dataset_dir.join(format!("{}.csv", self.test_name))
    }

    /// Путь к артефакту модели
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(format!("{}.bin", self.model_name))
    }

    /// Путь к артефакту процессора данных (нормализатор + параметры окна)
    pub fn processor_path(&self) -> PathBuf {
        self.model_dir.join(format!("{}_processor.bin", self.model_name))
    }

    /// Торговая пара в виде строки (например, "BTC/USDT")
    pub fn pair(&self) -> String {
        format!("{}/{}", self.base_asset, self.quote_asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PredictorConfig::default();

        assert_eq!(config.lookback, 60);
        assert_eq!(config.train_fraction, 0.98);
        assert_eq!(config.history_limit, 2000);
        assert_eq!(config.layer_size, 50);
        assert_eq!(config.num_layers, 4);
        assert_eq!(config.dropout_rate, 0.2);
        assert_eq!(config.epochs, 100);
        assert_eq!(config.batch_size, 32);
    }

    #[test]
    fn test_config_builder() {
        let config = PredictorConfig::new()
            .with_lookback(30)
            .with_train_fraction(0.9)
            .with_epochs(10);

        assert_eq!(config.lookback, 30);
        assert_eq!(config.train_fraction, 0.9);
        assert_eq!(config.epochs, 10);
    }

    #[test]
    fn test_paths() {
        let config = PredictorConfig::default();

        assert_eq!(
            config.train_csv_path(),
            PathBuf::from("datasets/btc_price_train.csv")
        );
        assert_eq!(config.model_path(), PathBuf::from("models/btc_lstm.bin"));
        assert_eq!(
            config.processor_path(),
            PathBuf::from("models/btc_lstm_processor.bin")
        );
    }
}
