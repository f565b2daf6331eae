//! Bias-column augmentation.

use crate::backend::{Backend, Tensor2D};
use crate::error::Result;

/// Returns `[1 | x]`: a column of ones followed by the columns of `x`.
///
/// The leading column lets the first weight row act as the intercept.
///
/// ```
/// use descent_rs::backend::{CpuBackend, Tensor2D};
/// use descent_rs::preprocessing::prepend_bias_column;
///
/// let x = Tensor2D::<CpuBackend>::from_rows(&[vec![2.0, 3.0], vec![4.0, 5.0]]).unwrap();
/// let augmented = prepend_bias_column(&x).unwrap();
/// assert_eq!(augmented.to_rows(), vec![vec![1.0, 2.0, 3.0], vec![1.0, 4.0, 5.0]]);
/// ```
pub fn prepend_bias_column<B: Backend>(x: &Tensor2D<B>) -> Result<Tensor2D<B>> {
    let ones = Tensor2D::ones(x.rows(), 1);
    Tensor2D::hcat(&[&ones, x])
}
