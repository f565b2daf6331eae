//! Regression engines.
//!
//! Each engine owns its training data, fitted preprocessing and weights, and follows
//! the same contract:
//!
//! - `new(features, labels, options)`: validate, standardize, allocate zero weights
//! - `train()`: run `options.iterations` epochs
//! - `predict(observations)`: reuse the training standardization
//! - `test(features, labels)`: accuracy for classifiers, R² for linear regression
//!
//! Empty observations are not an error: `predict(&[])` returns no predictions and
//! `test(&[], &[])` scores 0, the convention of [`crate::metrics`] for empty input.
//!
//! | Engine | Labels | Activation | Loss |
//! |--------|--------|------------|------|
//! | [`SoftmaxRegression`] | one-hot, `L > 1` columns | row softmax | cross-entropy |
//! | [`LogisticRegression`] | one 0/1 column | sigmoid | cross-entropy |
//! | [`LinearRegression`] | one numeric column | identity | mean squared error |

pub mod classifier;
pub mod linear;

pub use classifier::{LogisticRegression, SoftmaxRegression};
pub use linear::LinearRegression;

use crate::backend::{Backend, Tensor2D};
use crate::error::{RegressionError, Result};

/// Converts training rows, checking that features and labels line up.
pub(crate) fn training_tensors<B: Backend>(
    features: &[Vec<f64>],
    labels: &[Vec<f64>],
) -> Result<(Tensor2D<B>, Tensor2D<B>)> {
    if features.is_empty() {
        return Err(RegressionError::EmptyData(
            "training features have no rows".to_string(),
        ));
    }
    let x = Tensor2D::from_rows(features)?;
    let y = Tensor2D::from_rows(labels)?;
    if x.rows() != y.rows() {
        return Err(RegressionError::shape(
            format!("{} label rows", x.rows()),
            format!("{} label rows", y.rows()),
        ));
    }
    if y.cols() == 0 {
        return Err(RegressionError::shape(
            "at least one label column",
            "0 label columns",
        ));
    }
    Ok((x, y))
}

/// Converts prediction rows, which must have the training column count.
pub(crate) fn observation_tensor<B: Backend>(
    rows: &[Vec<f64>],
    n_features: usize,
) -> Result<Tensor2D<B>> {
    if rows.is_empty() {
        return Ok(Tensor2D::zeros(0, n_features));
    }
    let t = Tensor2D::from_rows(rows)?;
    if t.cols() != n_features {
        return Err(RegressionError::FeatureMismatch {
            expected_features: n_features,
            got_features: t.cols(),
        });
    }
    Ok(t)
}

/// Converts evaluation rows. Features must have the training column count and labels
/// the training label width. Empty input yields `0 × n` tensors.
pub(crate) fn evaluation_tensors<B: Backend>(
    features: &[Vec<f64>],
    labels: &[Vec<f64>],
    n_features: usize,
    n_labels: usize,
) -> Result<(Tensor2D<B>, Tensor2D<B>)> {
    let x = observation_tensor::<B>(features, n_features)?;
    let y = if labels.is_empty() {
        Tensor2D::zeros(0, n_labels)
    } else {
        Tensor2D::from_rows(labels)?
    };
    if y.cols() != n_labels {
        return Err(RegressionError::shape(
            format!("{} label columns", n_labels),
            format!("{} label columns", y.cols()),
        ));
    }
    if x.rows() != y.rows() {
        return Err(RegressionError::shape(
            format!("{} label rows", x.rows()),
            format!("{} label rows", y.rows()),
        ));
    }
    Ok((x, y))
}
