//! Метрики для оценки качества прогноза

/// Mean Squared Error (среднеквадратичная ошибка)
pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p) * (t - p))
        .sum::<f64>()
        / y_true.len() as f64
}

/// Root Mean Squared Error (корень из MSE)
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    mse(y_true, y_pred).sqrt()
}

/// Mean Absolute Error (средняя абсолютная ошибка)
pub fn mae(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .sum::<f64>()
        / y_true.len() as f64
}

/// Mean Absolute Percentage Error (средняя абсолютная процентная ошибка)
pub fn mape(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let mut sum = 0.0;
    for (t, p) in y_true.iter().zip(y_pred.iter()) {
        if *t != 0.0 {
            sum += ((t - p) / t).abs();
        }
    }

    sum / y_true.len() as f64 * 100.0
}

/// R² score (коэффициент детерминации)
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();

    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mse() {
        let y_true = vec![1.0, 2.0, 3.0];
        let y_pred = vec![1.1, 2.0, 2.9];

        let error = mse(&y_true, &y_pred);
        assert!((error - 0.006666666666666667).abs() < 1e-12);
    }

    #[test]
    fn test_rmse_is_sqrt_of_mse() {
        let y_true = vec![10.0, 20.0, 30.0];
        let y_pred = vec![12.0, 18.0, 33.0];

        assert!((rmse(&y_true, &y_pred) - mse(&y_true, &y_pred).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_mae() {
        let y_true = vec![1.0, 2.0, 3.0];
        let y_pred = vec![2.0, 2.0, 2.0];

        assert!((mae(&y_true, &y_pred) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mape() {
        let y_true = vec![100.0, 200.0];
        let y_pred = vec![110.0, 180.0];

        // (10% + 10%) / 2 = 10%
        assert!((mape(&y_true, &y_pred) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_r2_perfect_prediction() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0];
        let r2 = r2_score(&y_true, &y_true);
        assert!((r2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_r2_close_prediction() {
        let y_true = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y_pred = vec![1.1, 2.1, 2.9, 4.0, 5.1];

        assert!(r2_score(&y_true, &y_pred) > 0.95);
    }
}
