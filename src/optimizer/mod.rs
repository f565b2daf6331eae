//! Parameter updates and learning-rate control.

use crate::backend::{Backend, Scalar};
use crate::model::ParamOps;

pub mod schedule;
pub use schedule::{ConstantLearningRate, LearningRateSchedule, LossTrendSchedule};

/// Trait for gradient-based optimizers.
///
/// Training logic (`Trainer`) is decoupled from the update rule, so any model can be
/// paired with any optimizer without dynamic dispatch.
///
/// # Type Parameters
/// * `B`: computation backend implementing [`Backend`]
/// * `P`: model parameters type
///
/// # Example
/// ```rust
/// use descent_rs::backend::{CpuBackend, Scalar};
/// use descent_rs::model::linear::LinearParams;
/// use descent_rs::optimizer::{Optimizer, SGD};
///
/// let params = LinearParams::<CpuBackend> { slope: Scalar::new(1.0), intercept: Scalar::new(0.5) };
/// let grads = LinearParams::<CpuBackend> { slope: Scalar::new(2.0), intercept: Scalar::new(-1.0) };
///
/// let sgd = SGD::<CpuBackend>::new(0.1);
/// let updated = sgd.step(&params, &grads);
/// assert!((updated.slope.to_f64() - 0.8).abs() < 1e-12);
/// assert!((updated.intercept.to_f64() - 0.6).abs() < 1e-12);
/// ```
pub trait Optimizer<B: Backend, P> {
    /// Returns updated parameters: `params - learning_rate * gradients`.
    ///
    /// Inputs are not mutated.
    fn step(&self, params: &P, gradients: &P) -> P;

    fn learning_rate(&self) -> f64;

    /// Replaces the step size used by subsequent calls to [`step`](Self::step).
    fn set_learning_rate(&mut self, learning_rate: f64);
}

/// Plain gradient descent:
/// ```text
/// θ ← θ - η · ∇L(θ)
/// ```
#[derive(Clone, Debug)]
pub struct SGD<B: Backend> {
    lr: Scalar<B>,
}

impl<B: Backend> SGD<B> {
    pub fn new(lr: f64) -> Self {
        Self {
            lr: Scalar::<B>::new(lr),
        }
    }
}

impl<B: Backend, P: ParamOps<B>> Optimizer<B, P> for SGD<B> {
    fn step(&self, params: &P, grads: &P) -> P {
        // one scale + add instead of scale + subtract
        let neg_lr = Scalar::<B>::new(0.0) - self.lr;
        params.add(&grads.scale(neg_lr))
    }

    fn learning_rate(&self) -> f64 {
        self.lr.to_f64()
    }

    fn set_learning_rate(&mut self, learning_rate: f64) {
        self.lr = Scalar::new(learning_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CpuBackend, Tensor2D};
    use crate::model::softmax::SoftmaxParams;

    #[test]
    fn test_sgd_step_on_weight_matrix() {
        let params = SoftmaxParams {
            weights: Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2),
        };
        let grads = SoftmaxParams {
            weights: Tensor2D::<CpuBackend>::new(vec![10.0, -10.0, 0.0, 5.0], 2, 2),
        };
        let sgd = SGD::<CpuBackend>::new(0.1);
        let updated = sgd.step(&params, &grads);
        let expected = [0.0, 3.0, 3.0, 3.5];
        for (u, e) in updated.weights.to_vec().iter().zip(expected.iter()) {
            assert!((u - e).abs() < 1e-12);
        }
        // inputs untouched
        assert_eq!(params.weights.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_set_learning_rate() {
        let mut sgd = SGD::<CpuBackend>::new(0.1);
        Optimizer::<CpuBackend, SoftmaxParams<CpuBackend>>::set_learning_rate(&mut sgd, 0.05);
        assert_eq!(
            Optimizer::<CpuBackend, SoftmaxParams<CpuBackend>>::learning_rate(&sgd),
            0.05
        );
    }
}
