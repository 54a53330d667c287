//! Оркестратор пайплайна: датасет → обучение → оценка
//!
//! Четыре операции вызываются последовательно и независимо:
//! `update_dataset` → `train` → `load` → `test_model`. Состояние между
//! вызовами живёт только на диске (CSV файлы и артефакты модели).

use crate::config::PredictorConfig;
use crate::data::CryptoCompareClient;
use crate::dataset::{DatasetBuilder, DatasetError, DatasetSummary};
use crate::model::{Lstm, LstmConfig};
use crate::preprocessing::DataProcessor;
use crate::utils::{load_candles_csv, mape, open_prices, print_comparison_chart, r2_score, rmse};
use anyhow::{anyhow, Context, Result};
use log::{error, info};

/// Прогнозатор цены открытия следующего дня
pub struct PricePredictor {
    config: PredictorConfig,
    client: CryptoCompareClient,
    model: Option<Lstm>,
    processor: Option<DataProcessor>,
}

impl PricePredictor {
    /// Создаёт прогнозатор с клиентом CryptoCompare по умолчанию
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            config,
            client: CryptoCompareClient::new(),
            model: None,
            processor: None,
        }
    }

    /// Создаёт прогнозатор с заданным клиентом (для тестов)
    pub fn with_client(client: CryptoCompareClient, config: PredictorConfig) -> Self {
        Self {
            config,
            client,
            model: None,
            processor: None,
        }
    }

    /// Конфигурация прогнозатора
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Обновляет датасет: скачивает `limit` последних дневных свечей
    /// и перезаписывает train/test CSV файлы
    ///
    /// Ошибки провайдера и записи логируются и возвращаются вызывающему;
    /// повторная попытка - на его усмотрение.
    pub async fn update_dataset(
        &self,
        percent_train: f64,
        limit: u32,
    ) -> Result<DatasetSummary, DatasetError> {
        let builder = DatasetBuilder::with_client(self.client.clone(), self.config.clone());

        match builder.update(percent_train, limit).await {
            Ok(summary) => Ok(summary),
            Err(e) => {
                error!("Не удалось обновить датасет: {}", e);
                Err(e)
            }
        }
    }

    /// Обучает модель на обучающем CSV и сохраняет артефакты
    ///
    /// Нормализатор обучается только на train ряде и сохраняется
    /// рядом с моделью, чтобы оценка использовала те же параметры.
    pub fn train(&mut self) -> Result<()> {
        let train_path = self.config.train_csv_path();
        let candles = load_candles_csv(&train_path)
            .with_context(|| format!("не удалось прочитать {}", train_path.display()))?;

        let opens = open_prices(&candles);
        info!(
            "Обучение на {} ценах открытия ({})",
            opens.len(),
            self.config.pair()
        );

        let mut processor = DataProcessor::new(self.config.lookback);
        processor.fit(&opens)?;
        let (x_train, y_train) = processor.windows_with_targets(&opens)?;

        let lstm_config = LstmConfig::new(1, self.config.layer_size, 1)
            .with_layers(self.config.num_layers)
            .with_dropout(self.config.dropout_rate)
            .with_learning_rate(self.config.learning_rate)
            .with_batch_size(self.config.batch_size)
            .with_epochs(self.config.epochs);

        let mut model = Lstm::from_config(lstm_config);
        model.train(&x_train, &y_train)?;

        if let Some(last_loss) = model.loss_history.last() {
            info!("Финальная потеря на обучении: {:.6}", last_loss);
        }

        std::fs::create_dir_all(&self.config.model_dir)?;
        model.save(self.config.model_path())?;
        processor.save(self.config.processor_path())?;

        info!(
            "Модель сохранена: {}",
            self.config.model_path().display()
        );

        self.model = Some(model);
        self.processor = Some(processor);
        Ok(())
    }

    /// Загружает сохранённые артефакты модели и процессора
    ///
    /// Отсутствующий или повреждённый артефакт - ошибка, а не no-op.
    pub fn load(&mut self) -> Result<()> {
        let model_path = self.config.model_path();
        let model = Lstm::load(&model_path)
            .with_context(|| format!("артефакт модели не найден: {}", model_path.display()))?;

        let processor_path = self.config.processor_path();
        let processor = DataProcessor::load(&processor_path).with_context(|| {
            format!(
                "артефакт процессора не найден: {}",
                processor_path.display()
            )
        })?;

        self.model = Some(model);
        self.processor = Some(processor);
        Ok(())
    }

    /// Оценивает модель на тестовой выборке и рисует график факт/прогноз
    ///
    /// Вход для каждого тестового дня - последние `lookback` цен открытия
    /// объединённого train+test ряда, непосредственно предшествующих ему.
    pub fn test_model(&self) -> Result<()> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("Модель не загружена. Вызовите load() или train()"))?;
        let processor = self
            .processor
            .as_ref()
            .ok_or_else(|| anyhow!("Процессор не загружен. Вызовите load() или train()"))?;

        let train_candles = load_candles_csv(self.config.train_csv_path())?;
        let test_candles = load_candles_csv(self.config.test_csv_path())?;

        if test_candles.is_empty() {
            return Err(anyhow!("Тестовая выборка пуста"));
        }

        let actual = open_prices(&test_candles);

        // Последние test_len + lookback цен объединённого ряда
        let mut combined = open_prices(&train_candles);
        combined.extend_from_slice(&actual);

        let needed = actual.len() + processor.lookback;
        if combined.len() < needed {
            return Err(anyhow!(
                "Недостаточно истории для оценки: {} цен, нужно {}",
                combined.len(),
                needed
            ));
        }

        let inputs = &combined[combined.len() - needed..];
        let x_test = processor.windows(inputs)?;

        let predictions = model.predict(&x_test);
        let predicted = processor.inverse_transform(&predictions)?;

        info!(
            "Оценка на {} тестовых днях ({})",
            actual.len(),
            self.config.pair()
        );

        println!("Метрики на тестовой выборке:");
        println!("  RMSE: {:.2}", rmse(&actual, &predicted));
        println!("  MAPE: {:.2}%", mape(&actual, &predicted));
        println!("  R²:   {:.4}", r2_score(&actual, &predicted));
        println!();

        let title = format!("Прогноз цены {}", self.config.pair());
        print_comparison_chart(&title, &actual, &predicted);

        Ok(())
    }
}
