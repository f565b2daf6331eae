//! Single-feature linear model `y = m·x + b`.
//!
//! Inputs are `n × 1` column tensors. The slope `m` and intercept `b` are backend
//! scalars, updated by the optimizer like any other parameter set.

use crate::backend::{Backend, Scalar, Tensor2D};
use crate::model::{Fitted, InferenceModel, ParamOps, TrainableModel, Unfitted};
use std::marker::PhantomData;

/// Slope and intercept.
#[derive(Clone, Copy, Debug)]
pub struct LinearParams<B: Backend> {
    pub slope: Scalar<B>,
    pub intercept: Scalar<B>,
}

impl<B: Backend> ParamOps<B> for LinearParams<B> {
    fn add(&self, other: &Self) -> Self {
        Self {
            slope: self.slope + other.slope,
            intercept: self.intercept + other.intercept,
        }
    }

    fn scale(&self, scalar: Scalar<B>) -> Self {
        Self {
            slope: self.slope * scalar,
            intercept: self.intercept * scalar,
        }
    }
}

/// A linear model with state encoded at the type level.
#[derive(Clone, Debug)]
pub struct LinearModel<B: Backend, S> {
    params: LinearParams<B>,
    _state: PhantomData<S>,
}

impl<B: Backend, S> LinearModel<B, S> {
    pub fn slope(&self) -> f64 {
        self.params.slope.to_f64()
    }

    pub fn intercept(&self) -> f64 {
        self.params.intercept.to_f64()
    }

    fn line(&self, x: &Tensor2D<B>) -> Tensor2D<B> {
        x.scale(self.params.slope).add_scalar(self.params.intercept)
    }
}

/// Alias for an unfitted linear model.
pub type LinearRegressor<B> = LinearModel<B, Unfitted>;

impl<B: Backend> LinearRegressor<B> {
    /// Model with `m = 0` and `b = 0`.
    pub fn new() -> Self {
        Self::from_params(LinearParams {
            slope: Scalar::new(0.0),
            intercept: Scalar::new(0.0),
        })
    }

    pub fn from_params(params: LinearParams<B>) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }
}

impl<B: Backend> Default for LinearRegressor<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward pass: `m·x + b`.
/// Backward pass: `∂m = Σ x∘grad`, `∂b = Σ grad`.
impl<B: Backend> TrainableModel<B> for LinearRegressor<B> {
    type Input = Tensor2D<B>;
    type Prediction = Tensor2D<B>;
    type Params = LinearParams<B>;
    type Gradients = LinearParams<B>;
    type Output = LinearModel<B, Fitted>;

    fn forward(&self, x: &Self::Input) -> Self::Prediction {
        self.line(x)
    }

    fn backward(&self, x: &Self::Input, grad_output: &Self::Prediction) -> Self::Gradients {
        LinearParams {
            slope: x.mul(grad_output).sum(),
            intercept: grad_output.sum(),
        }
    }

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn update_params(&mut self, params: &Self::Params) {
        self.params = *params;
    }

    fn into_fitted(self) -> Self::Output {
        LinearModel {
            params: self.params,
            _state: PhantomData,
        }
    }
}

impl<B: Backend> InferenceModel<B> for LinearModel<B, Fitted> {
    type InputBatch = Tensor2D<B>;
    type OutputBatch = Tensor2D<B>;

    fn predict_batch(&self, x: &Self::InputBatch) -> Self::OutputBatch {
        self.line(x)
    }
}
