//! Стекированная LSTM для прогнозирования ценового ряда
//!
//! Архитектура повторяет классический регрессор: несколько LSTM слоёв,
//! каждый сопровождается dropout, и один линейный выходной нейрон.
//! Рекуррентные веса фиксируются после случайной инициализации;
//! градиентным методом (Adam, MSE) обучается выходной слой.

use super::config::LstmConfig;
use super::layers::{Activation, Dense, Dropout};
use super::optimizer::Adam;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{s, Array1, Array2, Array3};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Веса одного вентиля: вход, рекуррентная связь, смещение
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Gate {
    w_x: Array2<f64>,
    w_h: Array2<f64>,
    b: Array1<f64>,
}

impl Gate {
    fn new(input_size: usize, hidden_size: usize, bias_init: f64) -> Self {
        let limit = (1.0 / hidden_size as f64).sqrt();

        Self {
            w_x: Array2::random((hidden_size, input_size), Uniform::new(-limit, limit)),
            w_h: Array2::random((hidden_size, hidden_size), Uniform::new(-limit, limit)),
            b: Array1::from_elem(hidden_size, bias_init),
        }
    }

    fn pre_activation(&self, x: &Array1<f64>, h: &Array1<f64>) -> Array1<f64> {
        self.w_x.dot(x) + self.w_h.dot(h) + &self.b
    }
}

/// LSTM ячейка (один слой)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LstmCell {
    /// Размер входа
    pub input_size: usize,
    /// Размер скрытого состояния
    pub hidden_size: usize,

    input_gate: Gate,
    forget_gate: Gate,
    cell_gate: Gate,
    output_gate: Gate,
}

impl LstmCell {
    /// Создаёт новую ячейку со случайной инициализацией
    pub fn new(input_size: usize, hidden_size: usize) -> Self {
        Self {
            input_size,
            hidden_size,
            input_gate: Gate::new(input_size, hidden_size, 0.0),
            // Смещение 1.0 - стандартная инициализация forget gate
            forget_gate: Gate::new(input_size, hidden_size, 1.0),
            cell_gate: Gate::new(input_size, hidden_size, 0.0),
            output_gate: Gate::new(input_size, hidden_size, 0.0),
        }
    }

    /// Прямой проход для одного временного шага
    ///
    /// Возвращает (h_next, c_next)
    pub fn forward(
        &self,
        x: &Array1<f64>,
        h_prev: &Array1<f64>,
        c_prev: &Array1<f64>,
    ) -> (Array1<f64>, Array1<f64>) {
        // i = σ(W_xi·x + W_hi·h + b_i)
        let i = sigmoid(&self.input_gate.pre_activation(x, h_prev));
        // f = σ(W_xf·x + W_hf·h + b_f)
        let f = sigmoid(&self.forget_gate.pre_activation(x, h_prev));
        // g = tanh(W_xg·x + W_hg·h + b_g)
        let g = self.cell_gate.pre_activation(x, h_prev).mapv(f64::tanh);
        // o = σ(W_xo·x + W_ho·h + b_o)
        let o = sigmoid(&self.output_gate.pre_activation(x, h_prev));

        // c' = f ⊙ c + i ⊙ g,  h' = o ⊙ tanh(c')
        let c_next = &f * c_prev + &i * &g;
        let h_next = &o * &c_next.mapv(f64::tanh);

        (h_next, c_next)
    }

    /// Нулевое начальное состояние
    pub fn init_state(&self) -> (Array1<f64>, Array1<f64>) {
        (
            Array1::zeros(self.hidden_size),
            Array1::zeros(self.hidden_size),
        )
    }
}

/// Стекированная LSTM модель
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lstm {
    /// Конфигурация модели
    pub config: LstmConfig,
    /// LSTM ячейки (по одной на слой)
    cells: Vec<LstmCell>,
    /// Dropout после каждого слоя
    dropout: Dropout,
    /// Выходной слой
    output_layer: Dense,
    /// История потерь по эпохам
    #[serde(skip)]
    pub loss_history: Vec<f64>,
}

impl Lstm {
    /// Создаёт модель из конфигурации
    pub fn from_config(config: LstmConfig) -> Self {
        let mut cells = Vec::with_capacity(config.num_layers);

        // Первый слой принимает входные признаки
        cells.push(LstmCell::new(config.input_size, config.hidden_size));

        // Последующие слои принимают выход предыдущего
        for _ in 1..config.num_layers {
            cells.push(LstmCell::new(config.hidden_size, config.hidden_size));
        }

        let dropout = Dropout::new(config.dropout);
        let output_layer = Dense::new(config.hidden_size, config.output_size, Activation::Linear);

        Self {
            config,
            cells,
            dropout,
            output_layer,
            loss_history: Vec::new(),
        }
    }

    /// Количество слоёв
    pub fn num_layers(&self) -> usize {
        self.cells.len()
    }

    /// Вход выходного слоя для каждого примера батча
    ///
    /// Dropout применяется к выходу каждого слоя, включая последний:
    /// выходной слой видит скрытое состояние уже после dropout.
    /// Рекуррентные состояния dropout не затрагивает.
    ///
    /// # Аргументы
    ///
    /// * `x` - Входные последовательности [batch, seq_len, input_size]
    ///
    /// # Возвращает
    ///
    /// Массив [batch, hidden_size]
    fn forward_hidden(&self, x: &Array3<f64>, training: bool) -> Array2<f64> {
        let batch_size = x.shape()[0];
        let seq_len = x.shape()[1];

        let mut hidden = Array2::zeros((batch_size, self.config.hidden_size));

        for b in 0..batch_size {
            let mut states: Vec<(Array1<f64>, Array1<f64>)> =
                self.cells.iter().map(|cell| cell.init_state()).collect();
            let mut readout_input = Array1::zeros(self.config.hidden_size);

            for t in 0..seq_len {
                let mut layer_input: Array1<f64> = x.slice(s![b, t, ..]).to_owned();

                for (layer_idx, cell) in self.cells.iter().enumerate() {
                    let (h_prev, c_prev) = &states[layer_idx];
                    let (h_next, c_next) = cell.forward(&layer_input, h_prev, c_prev);

                    layer_input = self.dropout.apply(&h_next, training);
                    states[layer_idx] = (h_next, c_next);
                }

                readout_input = layer_input;
            }

            hidden.row_mut(b).assign(&readout_input);
        }

        hidden
    }

    /// Прямой проход через всю сеть
    fn forward(&self, x: &Array3<f64>, training: bool) -> Array2<f64> {
        let hidden = self.forward_hidden(x, training);
        let batch_size = hidden.shape()[0];

        let mut outputs = Array2::zeros((batch_size, self.config.output_size));

        for b in 0..batch_size {
            let h = hidden.row(b).to_owned();
            let out = self.output_layer.forward(&h);
            outputs.row_mut(b).assign(&out);
        }

        outputs
    }

    /// Делает предсказание (dropout выключен)
    pub fn predict(&self, x: &Array3<f64>) -> Array2<f64> {
        self.forward(x, false)
    }

    /// MSE потеря
    pub fn compute_loss(&self, predictions: &Array2<f64>, targets: &Array2<f64>) -> f64 {
        let diff = predictions - targets;
        diff.mapv(|v| v * v).mean().unwrap_or(0.0)
    }

    /// Обучает модель
    ///
    /// Эпохи, размер батча и скорость обучения берутся из конфигурации.
    /// Обновляется только выходной слой: градиент MSE по линейному
    /// выходу считается аналитически и подаётся в Adam.
    pub fn train(&mut self, x_train: &Array3<f64>, y_train: &Array2<f64>) -> Result<()> {
        let n_samples = x_train.shape()[0];
        let batch_size = self.config.batch_size.min(n_samples);
        let epochs = self.config.epochs;

        let mut optimizer = Adam::new(self.config.learning_rate);
        self.loss_history.clear();

        let pb = ProgressBar::new(epochs as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) Loss: {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        for _epoch in 0..epochs {
            let mut epoch_loss = 0.0;
            let mut n_batches = 0;

            for batch_start in (0..n_samples).step_by(batch_size) {
                let batch_end = (batch_start + batch_size).min(n_samples);
                let n = batch_end - batch_start;

                let x_batch = x_train.slice(s![batch_start..batch_end, .., ..]).to_owned();
                let y_batch = y_train.slice(s![batch_start..batch_end, ..]).to_owned();

                let hidden = self.forward_hidden(&x_batch, true);

                // Линейный выход: pred = W·h + b
                let mut predictions = Array2::zeros((n, self.config.output_size));
                for b in 0..n {
                    let h = hidden.row(b).to_owned();
                    predictions
                        .row_mut(b)
                        .assign(&self.output_layer.forward(&h));
                }

                let loss = self.compute_loss(&predictions, &y_batch);
                epoch_loss += loss;
                n_batches += 1;

                // dL/dpred = 2(pred - y)/n; dL/dW = dpred·hᵀ, dL/db = dpred
                let dpred = (&predictions - &y_batch) * (2.0 / n as f64);

                let mut grad_w = Array2::zeros(self.output_layer.weights.dim());
                let mut grad_b = Array1::zeros(self.output_layer.biases.len());

                for b in 0..n {
                    for j in 0..self.config.output_size {
                        let d = dpred[[b, j]];
                        grad_b[j] += d;
                        for k in 0..self.config.hidden_size {
                            grad_w[[j, k]] += d * hidden[[b, k]];
                        }
                    }
                }

                optimizer.step(
                    &mut self.output_layer.weights,
                    &grad_w,
                    &mut self.output_layer.biases,
                    &grad_b,
                );
            }

            let avg_loss = epoch_loss / n_batches as f64;
            self.loss_history.push(avg_loss);

            pb.set_message(format!("{:.6}", avg_loss));
            pb.inc(1);
        }

        pb.finish_with_message("Обучение завершено");
        Ok(())
    }

    /// Оценивает модель на отложенных данных
    pub fn evaluate(&self, x_test: &Array3<f64>, y_test: &Array2<f64>) -> f64 {
        let predictions = self.predict(x_test);
        self.compute_loss(&predictions, y_test)
    }

    /// Сохраняет модель в файл
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let encoded = bincode::serialize(self)?;
        std::fs::write(path, encoded)?;
        Ok(())
    }

    /// Загружает модель из файла
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        let model: Self = bincode::deserialize(&data)?;
        Ok(model)
    }
}

fn sigmoid(x: &Array1<f64>) -> Array1<f64> {
    x.mapv(|v| 1.0 / (1.0 + (-v).exp()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> LstmConfig {
        LstmConfig::new(1, 8, 1)
            .with_layers(2)
            .with_dropout(0.2)
            .with_batch_size(4)
            .with_epochs(3)
    }

    #[test]
    fn test_cell_forward_shapes() {
        let cell = LstmCell::new(1, 8);
        let x = Array1::zeros(1);
        let (h, c) = cell.init_state();

        let (h_next, c_next) = cell.forward(&x, &h, &c);

        assert_eq!(h_next.len(), 8);
        assert_eq!(c_next.len(), 8);
    }

    #[test]
    fn test_stacked_layers_count() {
        let lstm = Lstm::from_config(LstmConfig::default());
        assert_eq!(lstm.num_layers(), 4);
    }

    #[test]
    fn test_predict_shape() {
        let lstm = Lstm::from_config(small_config());

        let x = Array3::zeros((3, 10, 1)); // batch=3, seq=10
        let out = lstm.predict(&x);

        assert_eq!(out.shape(), &[3, 1]);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let lstm = Lstm::from_config(small_config());
        let x = Array3::from_elem((2, 10, 1), 0.5);

        let a = lstm.predict(&x);
        let b = lstm.predict(&x);

        assert_eq!(a, b);
    }

    #[test]
    fn test_train_records_loss_history() {
        let mut lstm = Lstm::from_config(small_config());

        let x = Array3::from_shape_fn((20, 10, 1), |(i, t, _)| (i + t) as f64 / 30.0);
        let y = Array2::from_shape_fn((20, 1), |(i, _)| (i + 10) as f64 / 30.0);

        lstm.train(&x, &y).unwrap();

        assert_eq!(lstm.loss_history.len(), 3);
        assert!(lstm.loss_history.iter().all(|l| l.is_finite()));
        assert!(lstm.evaluate(&x, &y).is_finite());
    }

    #[test]
    fn test_readout_sees_dropped_hidden_state() {
        // При rate=1.0 dropout обнуляет вход выходного слоя: градиент
        // по весам равен нулю, обучается только смещение. Потеря на
        // одном батче не может опуститься ниже дисперсии целей.
        let config = LstmConfig::new(1, 8, 1)
            .with_layers(1)
            .with_dropout(1.0)
            .with_batch_size(64)
            .with_epochs(10);
        let mut lstm = Lstm::from_config(config);

        let n = 20;
        let x = Array3::from_shape_fn((n, 10, 1), |(i, t, _)| (i + t) as f64 / 30.0);
        let y = Array2::from_shape_fn((n, 1), |(i, _)| i as f64 / n as f64);

        let mean = y.mean().unwrap();
        let variance = y.mapv(|v| (v - mean) * (v - mean)).mean().unwrap();

        lstm.train(&x, &y).unwrap();

        let last_loss = *lstm.loss_history.last().unwrap();
        assert!(
            last_loss >= variance - 1e-9,
            "потеря {} ниже дисперсии целей {}",
            last_loss,
            variance
        );
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let lstm = Lstm::from_config(small_config());
        lstm.save(&path).unwrap();

        let loaded = Lstm::load(&path).unwrap();

        // Загруженная модель даёт те же предсказания
        let x = Array3::from_elem((2, 10, 1), 0.3);
        assert_eq!(lstm.predict(&x), loaded.predict(&x));
    }

    #[test]
    fn test_load_missing_model_fails() {
        assert!(Lstm::load("no_such_model.bin").is_err());
    }
}
