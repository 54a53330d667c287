//! Конфигурация LSTM модели

use serde::{Deserialize, Serialize};

/// Конфигурация стекированной LSTM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LstmConfig {
    /// Количество входных признаков
    pub input_size: usize,
    /// Размер скрытого слоя
    pub hidden_size: usize,
    /// Количество выходов
    pub output_size: usize,
    /// Количество LSTM слоёв
    pub num_layers: usize,
    /// Вероятность dropout после каждого слоя
    pub dropout: f64,
    /// Скорость обучения (Adam)
    pub learning_rate: f64,
    /// Размер батча
    pub batch_size: usize,
    /// Количество эпох
    pub epochs: usize,
}

impl LstmConfig {
    /// Создаёт новую конфигурацию
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        Self {
            input_size,
            hidden_size,
            output_size,
            num_layers: 1,
            dropout: 0.0,
            learning_rate: 0.001,
            batch_size: 32,
            epochs: 100,
        }
    }

    /// Устанавливает количество слоёв
    pub fn with_layers(mut self, num_layers: usize) -> Self {
        self.num_layers = num_layers;
        self
    }

    /// Устанавливает dropout
    pub fn with_dropout(mut self, dropout: f64) -> Self {
        self.dropout = dropout;
        self
    }

    /// Устанавливает скорость обучения
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    /// Устанавливает размер батча
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Устанавливает количество эпох
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }
}

impl Default for LstmConfig {
    /// Архитектура по умолчанию: 4 слоя по 50 нейронов, dropout 0.2
    fn default() -> Self {
        Self::new(1, 50, 1).with_layers(4).with_dropout(0.2)
    }
}
