//! Multinomial (softmax) regression model.
//!
//! Weights form an `(F + 1) × L` matrix applied to bias-augmented features. With
//! `L > 1` outputs the activation is a row-wise softmax; with `L = 1` it is the
//! logistic sigmoid, the two-outcome softmax written over a single score. Logistic
//! regression is therefore this model with one output column.

use crate::backend::{Backend, Scalar, Tensor2D};
use crate::model::{Fitted, InferenceModel, ParamOps, TrainableModel, Unfitted};
use std::marker::PhantomData;

/// Weight matrix of a softmax model, `(F + 1) × L`.
#[derive(Clone, Debug)]
pub struct SoftmaxParams<B: Backend> {
    pub weights: Tensor2D<B>,
}

impl<B: Backend> ParamOps<B> for SoftmaxParams<B> {
    fn add(&self, other: &Self) -> Self {
        Self {
            weights: self.weights.add(&other.weights),
        }
    }

    fn scale(&self, scalar: Scalar<B>) -> Self {
        Self {
            weights: self.weights.scale(scalar),
        }
    }
}

/// Maps raw scores to probabilities: sigmoid for one column, row softmax otherwise.
pub fn activate<B: Backend>(scores: &Tensor2D<B>) -> Tensor2D<B> {
    if scores.cols() == 1 {
        scores.sigmoid()
    } else {
        scores.softmax_rows()
    }
}

/// Softmax model with its training state in the type.
#[derive(Clone, Debug)]
pub struct SoftmaxModel<B: Backend, S> {
    params: SoftmaxParams<B>,
    _state: PhantomData<S>,
}

impl<B: Backend, S> SoftmaxModel<B, S> {
    /// `(F + 1, L)`.
    pub fn shape(&self) -> (usize, usize) {
        self.params.weights.shape()
    }

    pub fn weights(&self) -> &Tensor2D<B> {
        &self.params.weights
    }

    /// Class probabilities for bias-augmented inputs.
    fn probabilities(&self, x: &Tensor2D<B>) -> Tensor2D<B> {
        activate(&x.matmul(&self.params.weights))
    }
}

/// Alias for an unfitted softmax model.
pub type SoftmaxRegressor<B> = SoftmaxModel<B, Unfitted>;

impl<B: Backend> SoftmaxRegressor<B> {
    /// Zero-initialized model for `n_inputs` augmented columns and `n_outputs` label columns.
    pub fn new(n_inputs: usize, n_outputs: usize) -> Self {
        Self::from_params(SoftmaxParams {
            weights: Tensor2D::zeros(n_inputs, n_outputs),
        })
    }

    /// Constructs a model from explicit parameters (e.g. for a warm start).
    pub fn from_params(params: SoftmaxParams<B>) -> Self {
        Self {
            params,
            _state: PhantomData,
        }
    }
}

/// Forward pass: `activate(X · W)`.
/// Backward pass: `Xᵀ · grad`, where `grad` is the loss gradient w.r.t. the scores.
impl<B: Backend> TrainableModel<B> for SoftmaxRegressor<B> {
    type Input = Tensor2D<B>;
    type Prediction = Tensor2D<B>;
    type Params = SoftmaxParams<B>;
    type Gradients = SoftmaxParams<B>;
    type Output = SoftmaxModel<B, Fitted>;

    fn forward(&self, x: &Self::Input) -> Self::Prediction {
        self.probabilities(x)
    }

    fn backward(&self, x: &Self::Input, grad_output: &Self::Prediction) -> Self::Gradients {
        SoftmaxParams {
            weights: x.transpose().matmul(grad_output),
        }
    }

    fn params(&self) -> &Self::Params {
        &self.params
    }

    fn update_params(&mut self, params: &Self::Params) {
        self.params = params.clone();
    }

    fn into_fitted(self) -> Self::Output {
        SoftmaxModel {
            params: self.params,
            _state: PhantomData,
        }
    }
}

impl<B: Backend> InferenceModel<B> for SoftmaxModel<B, Fitted> {
    type InputBatch = Tensor2D<B>;
    type OutputBatch = Tensor2D<B>;

    fn predict_batch(&self, x: &Self::InputBatch) -> Self::OutputBatch {
        self.probabilities(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_new_zero_initialized() {
        let model = SoftmaxRegressor::<CpuBackend>::new(4, 3);
        assert_eq!(model.shape(), (4, 3));
        assert!(model.weights().to_vec().iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_zero_weights_give_uniform_probabilities() {
        let model = SoftmaxRegressor::<CpuBackend>::new(2, 4);
        let x = Tensor2D::<CpuBackend>::new(vec![1.0, 3.0, 1.0, -2.0], 2, 2);
        for p in model.forward(&x).to_vec() {
            assert!((p - 0.25).abs() < 1e-12);
        }

        let binary = SoftmaxRegressor::<CpuBackend>::new(2, 1);
        for p in binary.forward(&x).to_vec() {
            assert!((p - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_output_uses_sigmoid() {
        let params = SoftmaxParams {
            weights: Tensor2D::<CpuBackend>::new(vec![0.0, 2.0], 2, 1),
        };
        let model = SoftmaxRegressor::from_params(params);
        let x = Tensor2D::<CpuBackend>::new(vec![1.0, 1.0], 1, 2);
        let p = model.forward(&x).to_vec()[0];
        assert!((p - 1.0 / (1.0 + (-2.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_backward_is_xt_times_grad() {
        let model = SoftmaxRegressor::<CpuBackend>::new(2, 2);
        // X = [[1, 2], [1, 4]], grad = [[0.5, -0.5], [-1, 1]]
        let x = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 1.0, 4.0], 2, 2);
        let grad = Tensor2D::<CpuBackend>::new(vec![0.5, -0.5, -1.0, 1.0], 2, 2);
        let g = model.backward(&x, &grad);
        // Xᵀ·grad = [[-0.5, 0.5], [-3, 3]]
        assert_eq!(g.weights.to_vec(), vec![-0.5, 0.5, -3.0, 3.0]);
    }

    #[test]
    fn test_param_ops() {
        let p = SoftmaxParams {
            weights: Tensor2D::<CpuBackend>::new(vec![1.0, 2.0], 1, 2),
        };
        let q = p.add(&p.scale(Scalar::new(-0.5)));
        assert_eq!(q.weights.to_vec(), vec![0.5, 1.0]);
    }

    #[test]
    fn test_into_fitted_keeps_weights() {
        let params = SoftmaxParams {
            weights: Tensor2D::<CpuBackend>::new(vec![0.0, 0.0, 1.0, -1.0], 2, 2),
        };
        let trainable = SoftmaxRegressor::from_params(params);
        let x = Tensor2D::<CpuBackend>::new(vec![1.0, 3.0], 1, 2);
        let expected = trainable.forward(&x).to_vec();

        let fitted = trainable.into_fitted();
        assert_eq!(fitted.predict_batch(&x).to_vec(), expected);
    }
}
