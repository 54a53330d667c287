//! Min-max нормализация ценового ряда в диапазон [0, 1]
//!
//! Параметры (min/max) подбираются один раз на обучающей выборке
//! и переиспользуются для любых последующих данных.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Min-max нормализатор одномерного ценового ряда
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: Option<f64>,
    max: Option<f64>,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Создаёт необученный нормализатор
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Обучен ли нормализатор
    pub fn is_fitted(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    /// Подбирает min/max по обучающим данным
    pub fn fit(&mut self, data: &[f64]) -> Result<()> {
        if data.is_empty() {
            return Err(anyhow!("Нельзя обучить нормализатор на пустых данных"));
        }

        let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        self.min = Some(min);
        self.max = Some(max);
        Ok(())
    }

    /// Диапазон обучающих данных (max - min); вырожденный ряд даёт 1.0
    fn range(&self) -> Result<(f64, f64)> {
        let min = self
            .min
            .ok_or_else(|| anyhow!("Нормализатор не обучен. Сначала вызовите fit()"))?;
        let max = self
            .max
            .ok_or_else(|| anyhow!("Нормализатор не обучен. Сначала вызовите fit()"))?;

        let range = max - min;
        let range = if range.abs() < 1e-10 { 1.0 } else { range };
        Ok((min, range))
    }

    /// Преобразует значения в [0, 1] по параметрам обучающей выборки
    ///
    /// Значения вне обучающего диапазона выходят за [0, 1] - это ожидаемо
    /// для тестовой области и не является ошибкой.
    pub fn transform(&self, data: &[f64]) -> Result<Vec<f64>> {
        let (min, range) = self.range()?;
        Ok(data.iter().map(|&x| (x - min) / range).collect())
    }

    /// Обучает и сразу преобразует
    pub fn fit_transform(&mut self, data: &[f64]) -> Result<Vec<f64>> {
        self.fit(data)?;
        self.transform(data)
    }

    /// Обратное преобразование одного значения в ценовые единицы
    pub fn inverse_transform_value(&self, value: f64) -> Result<f64> {
        let (min, range) = self.range()?;
        Ok(value * range + min)
    }

    /// Обратное преобразование массива значений
    pub fn inverse_transform(&self, data: &[f64]) -> Result<Vec<f64>> {
        let (min, range) = self.range()?;
        Ok(data.iter().map(|&x| x * range + min).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_transform_range() {
        let mut scaler = MinMaxScaler::new();
        let data = vec![100.0, 150.0, 200.0];

        let scaled = scaler.fit_transform(&data).unwrap();

        assert_eq!(scaled, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let mut scaler = MinMaxScaler::new();
        let data = vec![26000.0, 27500.0, 25000.0, 30000.0];

        let scaled = scaler.fit_transform(&data).unwrap();
        let restored = scaler.inverse_transform(&scaled).unwrap();

        for (a, b) in data.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_transform_does_not_refit() {
        let mut scaler = MinMaxScaler::new();
        scaler.fit(&[0.0, 100.0]).unwrap();

        // Данные вне обучающего диапазона выходят за [0, 1]
        let scaled = scaler.transform(&[200.0]).unwrap();
        assert_eq!(scaled[0], 2.0);
    }

    #[test]
    fn test_unfitted_fails() {
        let scaler = MinMaxScaler::new();
        assert!(scaler.transform(&[1.0]).is_err());
        assert!(scaler.inverse_transform_value(0.5).is_err());
    }

    #[test]
    fn test_constant_series() {
        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform(&[42.0, 42.0, 42.0]).unwrap();

        // Вырожденный диапазон не приводит к делению на ноль
        assert!(scaled.iter().all(|v| v.is_finite()));
    }
}
