//! Слои сети: полносвязный выходной слой и dropout

use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};

/// Функция активации
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Activation {
    /// Линейная (регрессия)
    Linear,
    /// Сигмоида
    Sigmoid,
    /// Гиперболический тангенс
    Tanh,
}

impl Activation {
    /// Применяет активацию поэлементно
    pub fn apply(&self, x: &Array1<f64>) -> Array1<f64> {
        match self {
            Activation::Linear => x.clone(),
            Activation::Sigmoid => x.mapv(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Tanh => x.mapv(|v| v.tanh()),
        }
    }
}

/// Полносвязный слой
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    /// Матрица весов [output_size, input_size]
    pub weights: Array2<f64>,
    /// Смещения [output_size]
    pub biases: Array1<f64>,
    /// Функция активации
    pub activation: Activation,
}

impl Dense {
    /// Создаёт слой с инициализацией Xavier
    pub fn new(input_size: usize, output_size: usize, activation: Activation) -> Self {
        let limit = (6.0 / (input_size + output_size) as f64).sqrt();

        Self {
            weights: Array2::random((output_size, input_size), Uniform::new(-limit, limit)),
            biases: Array1::zeros(output_size),
            activation,
        }
    }

    /// Прямой проход
    pub fn forward(&self, x: &Array1<f64>) -> Array1<f64> {
        let z = self.weights.dot(x) + &self.biases;
        self.activation.apply(&z)
    }
}

/// Inverted dropout: маска генерируется только при обучении,
/// на инференсе вход проходит без изменений
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Dropout {
    /// Вероятность обнуления нейрона
    pub rate: f64,
}

impl Dropout {
    /// Создаёт dropout слой
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Применяет dropout к вектору
    pub fn apply(&self, x: &Array1<f64>, training: bool) -> Array1<f64> {
        if !training || self.rate <= 0.0 {
            return x.clone();
        }

        let keep = 1.0 - self.rate;
        let mask =
            Array1::random(x.len(), Uniform::new(0.0, 1.0)).mapv(|v| if v < keep { 1.0 / keep } else { 0.0 });

        x * &mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_forward_shape() {
        let dense = Dense::new(50, 1, Activation::Linear);
        let x = Array1::zeros(50);

        let out = dense.forward(&x);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_sigmoid_range() {
        let act = Activation::Sigmoid;
        let x = Array1::from_vec(vec![-100.0, 0.0, 100.0]);
        let out = act.apply(&x);

        assert!(out.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!((out[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_dropout_inference_is_identity() {
        let dropout = Dropout::new(0.5);
        let x = Array1::from_vec(vec![1.0, 2.0, 3.0]);

        let out = dropout.apply(&x, false);
        assert_eq!(out, x);
    }

    #[test]
    fn test_dropout_training_zeroes_some() {
        let dropout = Dropout::new(0.5);
        let x = Array1::ones(1000);

        let out = dropout.apply(&x, true);
        let zeros = out.iter().filter(|&&v| v == 0.0).count();

        // При rate=0.5 примерно половина нейронов обнуляется
        assert!(zeros > 300 && zeros < 700);
    }
}
