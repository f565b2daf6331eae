//! Loss functions.
//!
//! Each loss reports a scalar value for the loss history and the gradient that the
//! model's `backward()` turns into parameter gradients.

use crate::backend::{Backend, Scalar, Tensor2D};

/// A differentiable loss used during training.
pub trait Loss<B: Backend> {
    type Prediction;
    type Target;

    /// Scalar loss value, averaged over the rows of `prediction`.
    fn loss(&self, prediction: &Self::Prediction, target: &Self::Target) -> Scalar<B>;

    /// Gradient passed to `backward()`, already divided by the row count.
    fn grad_wrt_prediction(
        &self,
        prediction: &Self::Prediction,
        target: &Self::Target,
    ) -> Self::Prediction;
}

/// Clamp added inside logarithms so that probabilities of exactly 0 or 1 stay finite.
pub const CROSS_ENTROPY_EPSILON: f64 = 1e-7;

/// Cross-entropy on activated guesses `G` (sigmoid or row softmax):
///
/// ```text
/// L = -( Σ Y∘log(G + ε) + Σ (1 - Y)∘log(1 - G + ε) ) / n
/// ```
///
/// with sums over every element and `n` the row count. For single-column labels this
/// is the usual binary cross-entropy.
///
/// The gradient is taken with respect to the pre-activation scores, where the
/// activation and the loss combine into `(G - Y) / n`.
///
/// ```
/// use descent_rs::backend::{CpuBackend, Tensor2D};
/// use descent_rs::loss::{CrossEntropyLoss, Loss};
///
/// let guesses = Tensor2D::<CpuBackend>::new(vec![0.5, 0.5], 2, 1);
/// let labels = Tensor2D::<CpuBackend>::new(vec![1.0, 0.0], 2, 1);
/// let loss = Loss::<CpuBackend>::loss(&CrossEntropyLoss, &guesses, &labels).to_f64();
/// assert!((loss - 2f64.ln()).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CrossEntropyLoss;

impl<B: Backend> Loss<B> for CrossEntropyLoss {
    type Prediction = Tensor2D<B>;
    type Target = Tensor2D<B>;

    fn loss(&self, guesses: &Self::Prediction, labels: &Self::Target) -> Scalar<B> {
        let eps = Scalar::<B>::new(CROSS_ENTROPY_EPSILON);
        let one = Scalar::<B>::new(1.0);
        let neg_one = Scalar::<B>::new(-1.0);

        let positive = labels.mul(&guesses.add_scalar(eps).log()).sum();

        // 1 - Y and 1 - G + ε
        let inv_labels = labels.scale(neg_one).add_scalar(one);
        let inv_guesses = guesses.scale(neg_one).add_scalar(one + eps);
        let negative = inv_labels.mul(&inv_guesses.log()).sum();

        let n = Scalar::<B>::new(guesses.rows() as f64);
        (Scalar::<B>::new(0.0) - (positive + negative)) / n
    }

    fn grad_wrt_prediction(
        &self,
        guesses: &Self::Prediction,
        labels: &Self::Target,
    ) -> Self::Prediction {
        let n = Scalar::<B>::new(1.0 / guesses.rows() as f64);
        guesses.sub(labels).scale(n)
    }
}

/// Mean Squared Error: `L = (1/n) * Σ(pred_i - target_i)^2`
///
/// Gradient w.r.t. prediction: `∂L/∂pred = 2 (pred - target) / n`
#[derive(Clone, Copy, Debug, Default)]
pub struct MSELoss;

impl<B: Backend> Loss<B> for MSELoss {
    type Prediction = Tensor2D<B>;
    type Target = Tensor2D<B>;

    fn loss(&self, pred: &Self::Prediction, target: &Self::Target) -> Scalar<B> {
        let diff = pred.sub(target);
        diff.mul(&diff).mean()
    }

    fn grad_wrt_prediction(&self, pred: &Self::Prediction, target: &Self::Target) -> Tensor2D<B> {
        let n = Scalar::<B>::new(2.0 / pred.rows() as f64);
        pred.sub(target).scale(n)
    }
}
