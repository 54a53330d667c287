//! Построение датасета: загрузка истории и разделение на train/test
//!
//! Обучающая выборка - строгий хронологический префикс истории,
//! тестовая - её продолжение. Оба файла полностью перезаписываются
//! при каждом обновлении.

use crate::config::PredictorConfig;
use crate::data::{Candle, CryptoCompareClient, ProviderError};
use crate::utils::save_candles_csv;
use log::{info, warn};
use std::path::PathBuf;
use thiserror::Error;

/// Ошибки при обновлении датасета
///
/// Разделяет ошибки провайдера данных и ошибки персистентности,
/// решение о повторе остаётся за вызывающим кодом.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Ошибка провайдера данных: {0}")]
    Provider(#[from] ProviderError),

    #[error("Ошибка записи CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ошибка файловой системы: {0}")]
    Io(#[from] std::io::Error),

    #[error("Недопустимая доля обучающей выборки: {0} (ожидается 0 < f < 1)")]
    InvalidFraction(f64),
}

/// Результат успешного обновления датасета
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    /// Всего свечей получено от провайдера
    pub total_rows: usize,
    /// Количество строк в обучающем файле
    pub train_rows: usize,
    /// Количество строк в тестовом файле
    pub test_rows: usize,
    /// Путь к обучающему файлу
    pub train_path: PathBuf,
    /// Путь к тестовому файлу
    pub test_path: PathBuf,
}

/// Индекс разбиения истории: floor(len * fraction)
pub fn split_index(len: usize, fraction: f64) -> usize {
    (len as f64 * fraction) as usize
}

/// Разделяет свечи на обучающий префикс и тестовый суффикс
///
/// Инвариант: `train.len() + test.len() == candles.len()`.
pub fn split_candles(
    candles: &[Candle],
    fraction: f64,
) -> Result<(&[Candle], &[Candle]), DatasetError> {
    if fraction <= 0.0 || fraction >= 1.0 {
        return Err(DatasetError::InvalidFraction(fraction));
    }

    let idx = split_index(candles.len(), fraction);
    Ok(candles.split_at(idx))
}

/// Строитель датасета: запрашивает историю и пишет train/test CSV
pub struct DatasetBuilder {
    client: CryptoCompareClient,
    config: PredictorConfig,
}

impl DatasetBuilder {
    /// Создаёт строитель с клиентом по умолчанию
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            client: CryptoCompareClient::new(),
            config,
        }
    }

    /// Создаёт строитель с заданным клиентом (для тестов)
    pub fn with_client(client: CryptoCompareClient, config: PredictorConfig) -> Self {
        Self { client, config }
    }

    /// Обновляет датасет: запрашивает `limit` последних дневных свечей
    /// и перезаписывает train/test CSV файлы
    ///
    /// При ошибке до первой записи прежние файлы остаются нетронутыми;
    /// частичная запись не откатывается.
    pub async fn update(
        &self,
        percent_train: f64,
        limit: u32,
    ) -> Result<DatasetSummary, DatasetError> {
        // Проверяем долю до обращения к сети
        if percent_train <= 0.0 || percent_train >= 1.0 {
            return Err(DatasetError::InvalidFraction(percent_train));
        }

        let candles = self
            .client
            .get_daily_history(&self.config.base_asset, &self.config.quote_asset, limit)
            .await?;

        let summary = self.update_from_candles(&candles, percent_train)?;

        info!(
            "Датасет обновлён: {} строк train, {} строк test ({})",
            summary.train_rows,
            summary.test_rows,
            self.config.pair()
        );

        Ok(summary)
    }

    /// Вариант `update` для уже полученных свечей (без обращения к сети)
    ///
    /// Используется в тестах и в сценариях с локальным источником данных.
    pub fn update_from_candles(
        &self,
        candles: &[Candle],
        percent_train: f64,
    ) -> Result<DatasetSummary, DatasetError> {
        let (train, test) = split_candles(candles, percent_train)?;

        if train.is_empty() || test.is_empty() {
            warn!(
                "Вырожденное разбиение: {} train / {} test",
                train.len(),
                test.len()
            );
        }

        std::fs::create_dir_all(&self.config.dataset_dir)?;

        let train_path = self.config.train_csv_path();
        let test_path = self.config.test_csv_path();

        save_candles_csv(train, &train_path)?;
        save_candles_csv(test, &test_path)?;

        Ok(DatasetSummary {
            total_rows: candles.len(),
            train_rows: train.len(),
            test_rows: test.len(),
            train_path,
            test_path,
        })
    }
}
