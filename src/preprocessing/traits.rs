//! Core traits for preprocessing transformers.
//!
//! - [`Transformer`]: unfitted state; learns parameters from training data.
//! - [`FittedTransformer`]: immutable learned state, reused for every later transform.

use crate::backend::Backend;
use crate::error::Result;

/// Trait for unfitted transformers.
///
/// # Type Parameters
/// - `B`: The backend used for computation.
/// - `Input`: Input data type (typically `Tensor2D<B>`).
/// - `Output`: Output data type (typically `Tensor2D<B>`).
/// - `Fitted`: The corresponding fitted transformer type.
pub trait Transformer<B: Backend>: Clone {
    /// Input data type for transformation.
    type Input;
    /// Output data type after transformation.
    type Output;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<B, Input = Self::Input, Output = Self::Output>;

    /// Learns parameters (e.g. column moments) from `data`.
    ///
    /// # Errors
    /// Returns [`RegressionError::EmptyData`](crate::error::RegressionError::EmptyData)
    /// if `data` has no rows.
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted>;

    /// Fits on `data` and transforms it in one step.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output> {
        self.fit(data)?.transform(data)
    }
}

/// Trait for fitted transformers.
///
/// Learned parameters never change after fitting, so transforming test or
/// prediction data cannot leak into them.
pub trait FittedTransformer<B: Backend>: Clone {
    /// Input data type for transformation.
    type Input;
    /// Output data type after transformation.
    type Output;

    /// Transforms data using the learned parameters.
    ///
    /// # Errors
    /// Returns [`RegressionError::FeatureMismatch`](crate::error::RegressionError::FeatureMismatch)
    /// if the column count differs from the one seen during fit.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output>;

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;
}
