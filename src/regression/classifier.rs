//! Softmax and logistic regression.

use crate::backend::{Backend, Tensor2D};
use crate::config::RegressionOptions;
use crate::dataset::{Dataset, InMemoryDataset};
use crate::error::Result;
use crate::loss::CrossEntropyLoss;
use crate::metrics::accuracy;
use crate::model::softmax::{SoftmaxModel, SoftmaxRegressor};
use crate::model::{Fitted, InferenceModel, TrainableModel};
use crate::optimizer::{LossTrendSchedule, SGD};
use crate::preprocessing::FeatureProcessor;
use crate::regression::{evaluation_tensors, observation_tensor, training_tensors};
use crate::trainer::{LossHistory, Trainer};
use tracing::debug;

/// Multinomial regression trained by mini-batch gradient descent.
///
/// Labels are one-hot rows of width `L`. With `L > 1` the model applies a row
/// softmax and predicts the arg-max class. With `L = 1` it is logistic regression:
/// the activation is the sigmoid and a row is class 1 when its probability reaches
/// `decision_boundary`.
///
/// The learning rate adapts after every epoch: halved when the loss went up,
/// grown by 5% otherwise.
///
/// # Example
///
/// ```
/// use descent_rs::backend::CpuBackend;
/// use descent_rs::config::RegressionOptions;
/// use descent_rs::regression::SoftmaxRegression;
///
/// let features = vec![vec![0.0], vec![1.0], vec![9.0], vec![10.0]];
/// let labels = vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 1.0]];
/// let options = RegressionOptions::new().with_iterations(50).with_batch_size(2);
///
/// let mut model = SoftmaxRegression::<CpuBackend>::new(&features, &labels, options).unwrap();
/// model.train().unwrap();
/// assert_eq!(model.predict(&[vec![0.5], vec![9.5]]).unwrap(), vec![0, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct SoftmaxRegression<B: Backend> {
    options: RegressionOptions,
    processor: FeatureProcessor<B>,
    dataset: InMemoryDataset<B>,
    model: SoftmaxRegressor<B>,
    history: LossHistory,
    learning_rate: f64,
    batches_per_epoch: usize,
}

/// Softmax regression with a single 0/1 label column.
pub type LogisticRegression<B> = SoftmaxRegression<B>;

impl<B: Backend> SoftmaxRegression<B> {
    /// Standardizes `features`, prepends the bias column and allocates zero weights of
    /// shape `(F + 1) × L`.
    ///
    /// # Errors
    /// - [`RegressionError::InvalidOption`](crate::error::RegressionError::InvalidOption) for bad options
    /// - [`RegressionError::EmptyData`](crate::error::RegressionError::EmptyData) if there are no rows
    /// - [`RegressionError::InvalidShape`](crate::error::RegressionError::InvalidShape) for ragged rows,
    ///   a row count mismatch or labels without columns
    pub fn new(
        features: &[Vec<f64>],
        labels: &[Vec<f64>],
        options: RegressionOptions,
    ) -> Result<Self> {
        options.validate()?;
        let (raw, y) = training_tensors::<B>(features, labels)?;
        let (processor, processed) = FeatureProcessor::fit(&raw)?;
        let (_, n_inputs) = processed.shape();
        let n_outputs = y.cols();
        let dataset = InMemoryDataset::new(processed, y)?;

        debug!(
            rows = dataset.len(),
            features = raw.cols(),
            classes = n_outputs,
            "softmax regression initialized"
        );

        Ok(Self {
            learning_rate: options.learning_rate,
            batches_per_epoch: dataset.batch_count(options.batch_size),
            model: SoftmaxRegressor::new(n_inputs, n_outputs),
            history: LossHistory::new(),
            options,
            processor,
            dataset,
        })
    }

    /// Runs `options.iterations` epochs.
    ///
    /// Calling `train` again continues from the current weights, learning rate and
    /// loss history.
    pub fn train(&mut self) -> Result<()> {
        let trainer = Trainer::builder(
            CrossEntropyLoss,
            SGD::<B>::new(self.learning_rate),
            LossTrendSchedule::new().with_ceiling(self.options.learning_rate_ceiling),
        )
        .batch_size(self.options.batch_size)
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
        self.batches_per_epoch = outcome.batches_per_epoch;
        Ok(())
    }

    /// Class probabilities for raw observations, one row per observation.
    ///
    /// # Errors
    /// [`RegressionError::FeatureMismatch`](crate::error::RegressionError::FeatureMismatch)
    /// if the column count differs from training.
    pub fn predict_proba(&self, observations: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        Ok(self.probabilities(observations)?.to_rows())
    }

    /// Predicted class index per observation. No observations give no predictions.
    pub fn predict(&self, observations: &[Vec<f64>]) -> Result<Vec<usize>> {
        let probabilities = self.probabilities(observations)?;
        Ok(self.classify(&probabilities))
    }

    /// Fraction of rows whose predicted class matches the label class. Empty
    /// evaluation data scores 0.
    ///
    /// # Errors
    /// - [`RegressionError::FeatureMismatch`](crate::error::RegressionError::FeatureMismatch)
    ///   if the feature column count differs from training
    /// - [`RegressionError::InvalidShape`](crate::error::RegressionError::InvalidShape)
    ///   for ragged rows, a row count mismatch or a label width other than `L`
    pub fn test(&self, features: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<f64> {
        let (_, n_outputs) = self.model.shape();
        let (raw, y) =
            evaluation_tensors::<B>(features, labels, self.processor.n_features_in(), n_outputs)?;
        let x = self.processor.process(&raw)?;
        let predicted = self.classify(&self.fitted().predict_batch(&x));
        accuracy(&self.label_classes(&y), &predicted)
    }

    fn probabilities(&self, observations: &[Vec<f64>]) -> Result<Tensor2D<B>> {
        let raw = observation_tensor::<B>(observations, self.processor.n_features_in())?;
        let x = self.processor.process(&raw)?;
        Ok(self.fitted().predict_batch(&x))
    }

    fn fitted(&self) -> SoftmaxModel<B, Fitted> {
        self.model.clone().into_fitted()
    }

    fn classify(&self, probabilities: &Tensor2D<B>) -> Vec<usize> {
        if probabilities.cols() == 1 {
            let boundary = self.options.decision_boundary;
            probabilities
                .to_vec()
                .into_iter()
                .map(|p| usize::from(p >= boundary))
                .collect()
        } else {
            probabilities.argmax_rows()
        }
    }

    fn label_classes(&self, labels: &Tensor2D<B>) -> Vec<usize> {
        if labels.cols() == 1 {
            labels
                .to_vec()
                .into_iter()
                .map(|y| usize::from(y >= 0.5))
                .collect()
        } else {
            labels.argmax_rows()
        }
    }

    /// Weight matrix, `(F + 1) × L`. Row 0 holds the bias weights.
    pub fn weights(&self) -> &Tensor2D<B> {
        self.model.weights()
    }

    /// Epoch losses, newest first.
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

    pub fn batches_per_epoch(&self) -> usize {
        self.batches_per_epoch
    }

    /// Standardized training features with the bias column, `N × (F + 1)`.
    pub fn processed_features(&self) -> &Tensor2D<B> {
        self.dataset.features()
    }

    pub fn feature_processor(&self) -> &FeatureProcessor<B> {
        &self.processor
    }
}
