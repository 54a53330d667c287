//! Adam оптимизатор (Adaptive Moment Estimation)

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Adam оптимизатор для весов и смещений одного слоя
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adam {
    /// Скорость обучения
    pub learning_rate: f64,
    /// Коэффициент первого момента
    pub beta1: f64,
    /// Коэффициент второго момента
    pub beta2: f64,
    /// Сглаживание знаменателя
    pub epsilon: f64,
    #[serde(skip)]
    t: usize,
    #[serde(skip)]
    m_w: Option<Array2<f64>>,
    #[serde(skip)]
    v_w: Option<Array2<f64>>,
    #[serde(skip)]
    m_b: Option<Array1<f64>>,
    #[serde(skip)]
    v_b: Option<Array1<f64>>,
}

impl Adam {
    /// Создаёт оптимизатор со стандартными бета-коэффициентами
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            t: 0,
            m_w: None,
            v_w: None,
            m_b: None,
            v_b: None,
        }
    }

    /// Один шаг оптимизации: обновляет веса и смещения слоя
    pub fn step(
        &mut self,
        weights: &mut Array2<f64>,
        grad_w: &Array2<f64>,
        biases: &mut Array1<f64>,
        grad_b: &Array1<f64>,
    ) {
        self.t += 1;
        let t = self.t as i32;

        let bias_corr1 = 1.0 - self.beta1.powi(t);
        let bias_corr2 = 1.0 - self.beta2.powi(t);

        // Веса
        let m = self.m_w.get_or_insert_with(|| Array2::zeros(weights.dim()));
        let v = self.v_w.get_or_insert_with(|| Array2::zeros(weights.dim()));

        *m = &*m * self.beta1 + grad_w * (1.0 - self.beta1);
        *v = &*v * self.beta2 + &(grad_w * grad_w) * (1.0 - self.beta2);

        let m_hat = &*m / bias_corr1;
        let v_hat = &*v / bias_corr2;

        *weights =
            &*weights - &(&m_hat * self.learning_rate / &(v_hat.mapv(f64::sqrt) + self.epsilon));

        // Смещения
        let m = self.m_b.get_or_insert_with(|| Array1::zeros(biases.len()));
        let v = self.v_b.get_or_insert_with(|| Array1::zeros(biases.len()));

        *m = &*m * self.beta1 + grad_b * (1.0 - self.beta1);
        *v = &*v * self.beta2 + &(grad_b * grad_b) * (1.0 - self.beta2);

        let m_hat = &*m / bias_corr1;
        let v_hat = &*v / bias_corr2;

        *biases =
            &*biases - &(&m_hat * self.learning_rate / &(v_hat.mapv(f64::sqrt) + self.epsilon));
    }

    /// Сбрасывает состояние оптимизатора
    pub fn reset(&mut self) {
        self.t = 0;
        self.m_w = None;
        self.v_w = None;
        self.m_b = None;
        self.v_b = None;
    }
}
