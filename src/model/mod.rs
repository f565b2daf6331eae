//! Trainable models and their inference counterparts.
//!
//! A model starts `Unfitted` and implements [`TrainableModel`]; after training it
//! becomes `Fitted` and implements [`InferenceModel`] only.

pub mod state;
pub use state::{Fitted, Unfitted};

pub mod linear;
pub mod softmax;

use crate::backend::{Backend, Scalar};

/// Training-side view of a model: forward pass, gradients and parameter updates.
pub trait TrainableModel<B: Backend> {
    type Input;
    type Prediction;
    type Params;
    type Gradients;
    type Output;

    fn forward(&self, input: &Self::Input) -> Self::Prediction;
    fn backward(&self, input: &Self::Input, grad_output: &Self::Prediction) -> Self::Gradients;
    fn params(&self) -> &Self::Params;
    fn update_params(&mut self, new_params: &Self::Params);

    fn into_fitted(self) -> Self::Output;
}

/// Arithmetic on parameter sets, as needed by the optimizer.
pub trait ParamOps<B: Backend>: Clone {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, scalar: Scalar<B>) -> Self;
}

/// Prediction-only view of a trained model.
pub trait InferenceModel<B: Backend> {
    type InputBatch;
    type OutputBatch;
    fn predict_batch(&self, input: &Self::InputBatch) -> Self::OutputBatch;
}
