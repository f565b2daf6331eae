//! Single-feature linear regression.

use crate::backend::{Backend, Tensor2D};
use crate::config::RegressionOptions;
use crate::dataset::{Dataset, InMemoryDataset};
use crate::error::{RegressionError, Result};
use crate::loss::MSELoss;
use crate::metrics::r2_score;
use crate::model::linear::{LinearModel, LinearRegressor};
use crate::model::{Fitted, InferenceModel, TrainableModel};
use crate::optimizer::{LossTrendSchedule, SGD};
use crate::preprocessing::{FittedStandardScaler, FittedTransformer, StandardScaler, Transformer};
use crate::regression::{evaluation_tensors, observation_tensor, training_tensors};
use crate::trainer::{LossHistory, Trainer};
use tracing::{debug, warn};

/// Fits `y = m·x + b` on the first feature column by full-batch gradient descent.
///
/// The feature is standardized with moments from the training data. Every epoch
/// takes one step over all rows, so `batch_size` is not used. The learning rate
/// adapts after each epoch like the classifiers': halved when the mean squared
/// error went up, grown by 5% otherwise. Extra feature columns are ignored.
///
/// ```
/// use descent_rs::backend::CpuBackend;
/// use descent_rs::config::RegressionOptions;
/// use descent_rs::regression::LinearRegression;
///
/// let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
/// let y: Vec<Vec<f64>> = x.iter().map(|r| vec![2.0 * r[0] + 1.0]).collect();
///
/// let mut model = LinearRegression::<CpuBackend>::new(&x, &y, RegressionOptions::new()).unwrap();
/// model.train().unwrap();
/// assert!(model.test(&x, &y).unwrap() > 0.99);
/// ```
#[derive(Clone, Debug)]
pub struct LinearRegression<B: Backend> {
    options: RegressionOptions,
    scaler: FittedStandardScaler<B>,
    n_features: usize,
    dataset: InMemoryDataset<B>,
    model: LinearRegressor<B>,
    history: LossHistory,
    learning_rate: f64,
}

impl<B: Backend> LinearRegression<B> {
    /// # Errors
    /// - [`RegressionError::InvalidOption`] for bad options
    /// - [`RegressionError::EmptyData`] if there are no rows
    /// - [`RegressionError::InvalidShape`] for ragged rows, a row count mismatch,
    ///   no feature columns or labels that are not a single column
    pub fn new(
        features: &[Vec<f64>],
        labels: &[Vec<f64>],
        options: RegressionOptions,
    ) -> Result<Self> {
        options.validate()?;
        let (raw, y) = training_tensors::<B>(features, labels)?;
        if raw.cols() == 0 {
            return Err(RegressionError::shape("at least one feature column", "0 columns"));
        }
        if y.cols() != 1 {
            return Err(RegressionError::shape(
                "1 label column",
                format!("{} label columns", y.cols()),
            ));
        }
        if raw.cols() > 1 {
            warn!(
                columns = raw.cols(),
                "linear regression uses the first feature column only"
            );
        }

        let x = raw.select_columns(&[0]);
        let scaler = StandardScaler::<B>::new().fit(&x)?;
        let dataset = InMemoryDataset::new(scaler.transform(&x)?, y)?;
        debug!(rows = dataset.len(), "linear regression initialized");

        Ok(Self {
            scaler,
            n_features: raw.cols(),
            dataset,
            model: LinearRegressor::new(),
            history: LossHistory::new(),
            learning_rate: options.learning_rate,
            options,
        })
    }

    /// Runs `options.iterations` full-batch epochs.
    ///
    /// Calling `train` again continues from the current line, learning rate and
    /// loss history.
    pub fn train(&mut self) -> Result<()> {
        let trainer = Trainer::builder(
            MSELoss,
            SGD::<B>::new(self.learning_rate),
            LossTrendSchedule::new().with_ceiling(self.options.learning_rate_ceiling),
        )
        .batch_size(self.dataset.len())
        .max_epochs(self.options.iterations)
        .verbose(self.options.verbose)
        .build();

        let outcome = trainer.fit_with_history(
            self.model.clone(),
            &self.dataset,
            std::mem::take(&mut self.history),
        )?;

        self.model = outcome.model;
        self.history = outcome.history;
        self.learning_rate = outcome.learning_rate;
        Ok(())
    }

    /// `m·x + b` for every observation, with `x` its standardized first column.
    pub fn predict(&self, observations: &[Vec<f64>]) -> Result<Vec<f64>> {
        let raw = observation_tensor::<B>(observations, self.n_features)?;
        self.predict_tensor(&raw)
    }

    /// Coefficient of determination of the predictions against `labels`. Empty
    /// evaluation data scores 0.
    ///
    /// # Errors
    /// - [`RegressionError::FeatureMismatch`] if the feature column count differs
    ///   from training
    /// - [`RegressionError::InvalidShape`] for ragged rows, a row count mismatch or
    ///   labels that are not a single column
    pub fn test(&self, features: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<f64> {
        let (raw, y) = evaluation_tensors::<B>(features, labels, self.n_features, 1)?;
        let predicted = self.predict_tensor(&raw)?;
        r2_score(&y.to_vec(), &predicted)
    }

    fn predict_tensor(&self, raw: &Tensor2D<B>) -> Result<Vec<f64>> {
        let x = self.scaler.transform(&raw.select_columns(&[0]))?;
        Ok(self.fitted().predict_batch(&x).to_vec())
    }

    fn fitted(&self) -> LinearModel<B, Fitted> {
        self.model.clone().into_fitted()
    }

    /// Slope on the standardized feature.
    pub fn slope(&self) -> f64 {
        self.model.slope()
    }

    pub fn intercept(&self) -> f64 {
        self.model.intercept()
    }

    pub fn loss_history(&self) -> &LossHistory {
        &self.history
    }

    /// Learning rate for the next epoch.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    pub fn scaler(&self) -> &FittedStandardScaler<B> {
        &self.scaler
    }
}
