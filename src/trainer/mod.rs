//! Epoch loop for mini-batch gradient descent.
//!
//! One epoch is:
//!
//! 1. a gradient step for every full batch, in row order;
//! 2. the loss of the updated model over the **whole** dataset, pushed to the front
//!    of the [`LossHistory`];
//! 3. one learning-rate adjustment by the schedule.
//!
//! There is no early stopping: `max_epochs` epochs always run.

use crate::{
    backend::{Backend, Tensor2D},
    dataset::Dataset,
    error::{RegressionError, Result},
    loss::Loss,
    model::{ParamOps, TrainableModel},
    optimizer::{LearningRateSchedule, Optimizer},
};
use std::marker::PhantomData;
use tracing::{debug, info};

pub mod history;
pub use history::LossHistory;

/// Result of a training run.
#[derive(Clone, Debug)]
pub struct TrainingOutcome<M> {
    /// Model with the final weights, still trainable.
    pub model: M,
    /// Epoch losses, newest first.
    pub history: LossHistory,
    /// Learning rate after the last adjustment.
    pub learning_rate: f64,
    /// Gradient steps taken per epoch.
    pub batches_per_epoch: usize,
}

/// Runs the training loop for a `TrainableModel`.
///
/// Built via [`TrainerBuilder`]; immutable afterwards and reusable across models of
/// the same type. The optimizer held here is a template: each `fit` works on its own
/// copy, so the adapted learning rate is reported in [`TrainingOutcome`] instead of
/// being stored.
pub struct Trainer<B, L, O, M, P, S>
where
    B: Backend,
    L: Loss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    S: LearningRateSchedule,
{
    pub(crate) batch_size: usize,
    pub(crate) max_epochs: usize,
    pub(crate) verbose: bool,
    pub(crate) loss_fn: L,
    pub(crate) optimizer: O,
    pub(crate) schedule: S,
    _phantom_backend: PhantomData<B>,
    _phantom_model: PhantomData<M>,
}

/// Fluent builder for a [`Trainer`].
///
/// Defaults:
/// - `batch_size`: 32
/// - `max_epochs`: 1000
/// - `verbose`: false
pub struct TrainerBuilder<B, L, O, M, P, S>
where
    B: Backend,
    L: Loss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    S: LearningRateSchedule,
{
    batch_size: usize,
    max_epochs: usize,
    verbose: bool,
    loss_fn: L,
    optimizer: O,
    schedule: S,
    _phantom_backend: PhantomData<B>,
    _phantom_model: PhantomData<M>,
}

impl<B, L, O, M, P, S> TrainerBuilder<B, L, O, M, P, S>
where
    B: Backend,
    L: Loss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    S: LearningRateSchedule,
{
    /// # Arguments
    /// * `loss_fn`: differentiable loss (e.g. `CrossEntropyLoss`)
    /// * `optimizer`: parameter updater carrying the initial learning rate (e.g. `SGD`)
    /// * `schedule`: per-epoch learning-rate rule (e.g. `LossTrendSchedule`)
    pub fn new(loss_fn: L, optimizer: O, schedule: S) -> Self {
        Self {
            batch_size: 32,
            max_epochs: 1000,
            verbose: false,
            loss_fn,
            optimizer,
            schedule,
            _phantom_backend: PhantomData,
            _phantom_model: PhantomData,
        }
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn max_epochs(mut self, epochs: usize) -> Self {
        self.max_epochs = epochs;
        self
    }

    /// When `true`, every epoch emits an `info` event with its loss and learning rate.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(self) -> Trainer<B, L, O, M, P, S> {
        Trainer {
            batch_size: self.batch_size,
            max_epochs: self.max_epochs,
            verbose: self.verbose,
            loss_fn: self.loss_fn,
            optimizer: self.optimizer,
            schedule: self.schedule,
            _phantom_backend: PhantomData,
            _phantom_model: PhantomData,
        }
    }
}

impl<B, L, O, M, P, S> Trainer<B, L, O, M, P, S>
where
    B: Backend,
    L: Loss<B, Prediction = Tensor2D<B>, Target = Tensor2D<B>>,
    M: TrainableModel<B, Input = Tensor2D<B>, Prediction = Tensor2D<B>, Params = P, Gradients = P>,
    O: Optimizer<B, P> + Clone,
    S: LearningRateSchedule,
    P: ParamOps<B>,
{
    /// Trains `model` on `dataset` for `max_epochs` epochs.
    ///
    /// # Errors
    /// - [`RegressionError::EmptyData`] if the dataset has no rows
    /// - [`RegressionError::InvalidOption`] if the batch size is zero
    /// - [`RegressionError::Data`] if a batch fails to load
    pub fn fit<D>(&self, model: M, dataset: &D) -> Result<TrainingOutcome<M>>
    where
        D: Dataset<B>,
    {
        self.fit_with_history(model, dataset, LossHistory::new())
    }

    /// Like [`fit`](Self::fit), but appends to an existing history so that the
    /// schedule sees the losses of earlier runs.
    pub fn fit_with_history<D>(
        &self,
        mut model: M,
        dataset: &D,
        mut history: LossHistory,
    ) -> Result<TrainingOutcome<M>>
    where
        D: Dataset<B>,
    {
        let n_total = dataset.len();
        if n_total == 0 {
            return Err(RegressionError::EmptyData(
                "cannot train on an empty dataset".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(RegressionError::InvalidOption(
                "batch_size must be at least 1".to_string(),
            ));
        }

        let batches_per_epoch = dataset.batch_count(self.batch_size);
        let mut optimizer = self.optimizer.clone();

        let (all_x, all_y) = dataset
            .get_batch(0..n_total)
            .map_err(|e| RegressionError::Data(format!("{:?}", e)))?;

        for epoch in 0..self.max_epochs {
            for batch_result in dataset.batches(self.batch_size) {
                let (batch_x, batch_y) =
                    batch_result.map_err(|e| RegressionError::Data(format!("{:?}", e)))?;
                let preds = model.forward(&batch_x);
                let grad_preds = self.loss_fn.grad_wrt_prediction(&preds, &batch_y);
                let grads = model.backward(&batch_x, &grad_preds);
                let new_params = optimizer.step(model.params(), &grads);
                model.update_params(&new_params);
            }

            let epoch_loss = self
                .loss_fn
                .loss(&model.forward(&all_x), &all_y)
                .to_f64();
            history.record(epoch_loss);

            let lr = optimizer.learning_rate();
            let next_lr = self.schedule.next_learning_rate(lr, &history);
            if next_lr != lr {
                debug!(epoch, from = lr, to = next_lr, "learning rate adjusted");
                optimizer.set_learning_rate(next_lr);
            }

            if self.verbose {
                info!(epoch, loss = epoch_loss, learning_rate = next_lr, "epoch complete");
            }
        }

        Ok(TrainingOutcome {
            model,
            history,
            learning_rate: optimizer.learning_rate(),
            batches_per_epoch,
        })
    }
}

impl<B, L, O, M, P, S> Trainer<B, L, O, M, P, S>
where
    B: Backend,
    L: Loss<B>,
    M: TrainableModel<B, Params = P, Gradients = P>,
    O: Optimizer<B, P>,
    S: LearningRateSchedule,
{
    /// Equivalent to `TrainerBuilder::new(...)`.
    pub fn builder(loss_fn: L, optimizer: O, schedule: S) -> TrainerBuilder<B, L, O, M, P, S> {
        TrainerBuilder::new(loss_fn, optimizer, schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::CpuBackend,
        dataset::InMemoryDataset,
        loss::{CrossEntropyLoss, MSELoss},
        model::linear::LinearRegressor,
        model::softmax::SoftmaxRegressor,
        model::InferenceModel,
        optimizer::{ConstantLearningRate, LossTrendSchedule, SGD},
    };

    type Cpu = CpuBackend;

    // === TrainerBuilder Tests ===

    #[test]
    fn test_trainer_builder_default_values() {
        let builder: TrainerBuilder<Cpu, _, _, LinearRegressor<Cpu>, _, _> =
            TrainerBuilder::new(MSELoss, SGD::<Cpu>::new(0.01), ConstantLearningRate);

        assert_eq!(builder.batch_size, 32);
        assert_eq!(builder.max_epochs, 1000);
        assert!(!builder.verbose);
    }

    #[test]
    fn test_trainer_builder_chaining() {
        let builder: TrainerBuilder<Cpu, _, _, LinearRegressor<Cpu>, _, _> =
            TrainerBuilder::new(MSELoss, SGD::<Cpu>::new(0.01), ConstantLearningRate)
                .batch_size(128)
                .max_epochs(250)
                .verbose(true);

        assert_eq!(builder.batch_size, 128);
        assert_eq!(builder.max_epochs, 250);
        assert!(builder.verbose);
    }

    fn line_dataset() -> InMemoryDataset<Cpu> {
        // y = 3x + 2 over x in [-1, 1)
        let x: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64 / 20.0 - 1.0]).collect();
        let y: Vec<Vec<f64>> = x.iter().map(|r| vec![3.0 * r[0] + 2.0]).collect();
        InMemoryDataset::from_rows(&x, &y).unwrap()
    }

    #[test]
    fn test_fit_linear_recovers_line() {
        let trainer = Trainer::builder(MSELoss, SGD::<Cpu>::new(0.1), ConstantLearningRate)
            .batch_size(10)
            .max_epochs(200)
            .build();

        let outcome = trainer.fit(LinearRegressor::<Cpu>::new(), &line_dataset()).unwrap();
        let model = outcome.model;
        assert!((model.slope() - 3.0).abs() < 1e-3);
        assert!((model.intercept() - 2.0).abs() < 1e-3);
        assert_eq!(outcome.batches_per_epoch, 4);
    }

    #[test]
    fn test_history_length_and_order() {
        // full-batch steps below 1/L decrease the loss every epoch
        let trainer = Trainer::builder(MSELoss, SGD::<Cpu>::new(0.05), ConstantLearningRate)
            .batch_size(40)
            .max_epochs(7)
            .build();

        let outcome = trainer.fit(LinearRegressor::<Cpu>::new(), &line_dataset()).unwrap();
        let losses = outcome.history.to_vec();
        assert_eq!(losses.len(), 7);
        // newest first, so a falling loss reads in ascending order
        for pair in losses.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_learning_rate_grows_while_loss_falls() {
        let trainer = Trainer::builder(MSELoss, SGD::<Cpu>::new(0.01), LossTrendSchedule::new())
            .batch_size(40)
            .max_epochs(3)
            .build();

        let outcome = trainer.fit(LinearRegressor::<Cpu>::new(), &line_dataset()).unwrap();
        // first epoch leaves the rate alone, the next two grow it
        assert!((outcome.learning_rate - 0.01 * 1.05 * 1.05).abs() < 1e-15);
    }

    #[test]
    fn test_learning_rate_halves_on_divergence() {
        // a step size far beyond stability makes every epoch worse
        let trainer = Trainer::builder(MSELoss, SGD::<Cpu>::new(50.0), LossTrendSchedule::new())
            .batch_size(40)
            .max_epochs(2)
            .build();

        let outcome = trainer.fit(LinearRegressor::<Cpu>::new(), &line_dataset()).unwrap();
        assert!(outcome.history.latest().unwrap() > outcome.history.previous().unwrap());
        assert_eq!(outcome.learning_rate, 25.0);
    }

    #[test]
    fn test_batch_larger_than_data_records_loss_without_steps() {
        let trainer = Trainer::builder(MSELoss, SGD::<Cpu>::new(0.1), LossTrendSchedule::new())
            .batch_size(100)
            .max_epochs(3)
            .build();

        let outcome = trainer.fit(LinearRegressor::<Cpu>::new(), &line_dataset()).unwrap();
        assert_eq!(outcome.batches_per_epoch, 0);
        assert_eq!(outcome.model.slope(), 0.0);
        assert_eq!(outcome.history.len(), 3);
        let losses = outcome.history.to_vec();
        assert_eq!(losses[0], losses[2]);
    }

    #[test]
    fn test_zero_epochs() {
        let trainer = Trainer::builder(MSELoss, SGD::<Cpu>::new(0.1), LossTrendSchedule::new())
            .max_epochs(0)
            .build();
        let outcome = trainer.fit(LinearRegressor::<Cpu>::new(), &line_dataset()).unwrap();
        assert!(outcome.history.is_empty());
        assert_eq!(outcome.learning_rate, 0.1);
    }

    #[test]
    fn test_fit_with_history_continues() {
        let trainer = Trainer::builder(MSELoss, SGD::<Cpu>::new(0.05), ConstantLearningRate)
            .batch_size(10)
            .max_epochs(2)
            .build();
        let ds = line_dataset();

        let first = trainer.fit(LinearRegressor::<Cpu>::new(), &ds).unwrap();
        let second = trainer
            .fit_with_history(first.model, &ds, first.history.clone())
            .unwrap();
        assert_eq!(second.history.len(), 4);
        assert_eq!(second.history.get(2), first.history.latest());
    }

    #[test]
    fn test_fit_empty_dataset() {
        let trainer = Trainer::builder(MSELoss, SGD::<Cpu>::new(0.1), ConstantLearningRate).build();
        let empty = InMemoryDataset::<Cpu>::new(Tensor2D::zeros(0, 1), Tensor2D::zeros(0, 1)).unwrap();
        let result = trainer.fit(LinearRegressor::<Cpu>::new(), &empty);
        assert!(matches!(result, Err(RegressionError::EmptyData(_))));
    }

    #[test]
    fn test_fit_zero_batch_size() {
        let trainer = Trainer::builder(MSELoss, SGD::<Cpu>::new(0.1), ConstantLearningRate)
            .batch_size(0)
            .build();
        let result = trainer.fit(LinearRegressor::<Cpu>::new(), &line_dataset());
        assert!(matches!(result, Err(RegressionError::InvalidOption(_))));
    }

    #[test]
    fn test_fit_softmax_separates_two_clusters() {
        // bias column + one feature, labels one-hot over two classes
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..20 {
            let v = if i % 2 == 0 { -1.0 - i as f64 / 20.0 } else { 1.0 + i as f64 / 20.0 };
            x.push(vec![1.0, v]);
            y.push(if v < 0.0 { vec![1.0, 0.0] } else { vec![0.0, 1.0] });
        }
        let ds = InMemoryDataset::<Cpu>::from_rows(&x, &y).unwrap();

        let trainer = Trainer::builder(CrossEntropyLoss, SGD::<Cpu>::new(0.5), LossTrendSchedule::new())
            .batch_size(5)
            .max_epochs(50)
            .build();
        let outcome = trainer.fit(SoftmaxRegressor::<Cpu>::new(2, 2), &ds).unwrap();

        let fitted = outcome.model.into_fitted();
        let predicted = fitted.predict_batch(ds.features()).argmax_rows();
        let expected = ds.labels().argmax_rows();
        assert_eq!(predicted, expected);
        assert!(outcome.history.latest().unwrap() < outcome.history.get(49).unwrap());
    }
}
