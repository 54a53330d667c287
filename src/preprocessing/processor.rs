//! Процессор данных: нормализация и скользящие окна
//!
//! Из ряда цен открытия строит окна фиксированной длины L:
//! окно i = prices[i..i+L], цель i = prices[i+L]. Нормализатор
//! обучается только на train ряде и сохраняется вместе с моделью.

use super::normalizer::MinMaxScaler;
use anyhow::{anyhow, Result};
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Процессор данных для подготовки последовательностей
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataProcessor {
    /// Длина окна (lookback)
    pub lookback: usize,
    /// Нормализатор, обученный на train ряде
    scaler: MinMaxScaler,
}

impl DataProcessor {
    /// Создаёт новый процессор
    ///
    /// # Пример
    ///
    /// ```rust
    /// use btc_lstm::preprocessing::DataProcessor;
    ///
    /// // Окно в 60 дней назад
    /// let processor = DataProcessor::new(60);
    /// ```
    pub fn new(lookback: usize) -> Self {
        Self {
            lookback,
            scaler: MinMaxScaler::new(),
        }
    }

    /// Обучен ли нормализатор
    pub fn is_fitted(&self) -> bool {
        self.scaler.is_fitted()
    }

    /// Обучает нормализатор на ряде цен (только train!)
    pub fn fit(&mut self, prices: &[f64]) -> Result<()> {
        self.scaler.fit(prices)
    }

    /// Строит обучающие пары (окно, цель)
    ///
    /// Для ряда длины N и окна L возвращает ровно N - L пар:
    /// - X: [N - L, L, 1]
    /// - y: [N - L, 1]
    pub fn windows_with_targets(&self, prices: &[f64]) -> Result<(Array3<f64>, Array2<f64>)> {
        let n = prices.len();
        if n <= self.lookback {
            return Err(anyhow!(
                "Недостаточно данных: {} цен, нужно минимум {}",
                n,
                self.lookback + 1
            ));
        }

        let scaled = self.scaler.transform(prices)?;
        let n_windows = n - self.lookback;

        let mut x = Array3::zeros((n_windows, self.lookback, 1));
        let mut y = Array2::zeros((n_windows, 1));

        for i in 0..n_windows {
            for t in 0..self.lookback {
                x[[i, t, 0]] = scaled[i + t];
            }
            y[[i, 0]] = scaled[i + self.lookback];
        }

        Ok((x, y))
    }

    /// Строит окна для инференса (без целей)
    ///
    /// Для ряда длины M возвращает M - L окон; окно i покрывает
    /// prices[i..i+L]. Чтобы получить прогноз для каждой из T тестовых
    /// точек, на вход подаются последние T + L цен объединённого ряда.
    pub fn windows(&self, prices: &[f64]) -> Result<Array3<f64>> {
        let n = prices.len();
        if n <= self.lookback {
            return Err(anyhow!(
                "Недостаточно данных: {} цен, нужно минимум {}",
                n,
                self.lookback + 1
            ));
        }

        let scaled = self.scaler.transform(prices)?;
        let n_windows = n - self.lookback;

        let mut x = Array3::zeros((n_windows, self.lookback, 1));

        for i in 0..n_windows {
            for t in 0..self.lookback {
                x[[i, t, 0]] = scaled[i + t];
            }
        }

        Ok(x)
    }

    /// Обратное преобразование нормализованных прогнозов в цены
    pub fn inverse_transform(&self, predictions: &Array2<f64>) -> Result<Vec<f64>> {
        let values: Vec<f64> = predictions.iter().cloned().collect();
        self.scaler.inverse_transform(&values)
    }

    /// Обратное преобразование одного значения
    pub fn inverse_transform_price(&self, value: f64) -> Result<f64> {
        self.scaler.inverse_transform_value(value)
    }

    /// Сохраняет процессор в файл
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let encoded = bincode::serialize(self)?;
        std::fs::write(path, encoded)?;
        Ok(())
    }

    /// Загружает процессор из файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        let processor: Self = bincode::deserialize(&data)?;
        Ok(processor)
    }
}
