//! Feature preprocessing for the regression engines.
//!
//! Raw features go through two steps before they reach a model:
//!
//! 1. [`StandardScaler`]: z-score each column with moments learned once from the
//!    training data.
//! 2. [`prepend_bias_column`]: add a leading column of ones.
//!
//! [`FeatureProcessor`] bundles both so that training, prediction and evaluation
//! data all go through exactly the same transform.
//!
//! # Example
//!
//! ```
//! use descent_rs::backend::{CpuBackend, Tensor2D};
//! use descent_rs::preprocessing::FeatureProcessor;
//!
//! let raw = Tensor2D::<CpuBackend>::from_rows(&[
//!     vec![1.0, 10.0, 0.5],
//!     vec![2.0, 20.0, 0.5],
//!     vec![3.0, 30.0, 0.5],
//! ]).unwrap();
//!
//! let (processor, augmented) = FeatureProcessor::fit(&raw).unwrap();
//! assert_eq!(augmented.shape(), (3, 4));
//!
//! let new_rows = Tensor2D::<CpuBackend>::from_rows(&[vec![2.0, 20.0, 0.5]]).unwrap();
//! assert_eq!(processor.process(&new_rows).unwrap().to_vec(), vec![1.0, 0.0, 0.0, 0.0]);
//! ```

pub mod augment;
pub mod scaling;
pub mod traits;

pub use augment::prepend_bias_column;
pub use scaling::{FittedStandardScaler, StandardScaler};
pub use traits::{FittedTransformer, Transformer};

use crate::backend::{Backend, Tensor2D};
use crate::error::Result;

/// Fitted standardization followed by bias augmentation.
#[derive(Clone, Debug)]
pub struct FeatureProcessor<B: Backend> {
    scaler: FittedStandardScaler<B>,
}

impl<B: Backend> FeatureProcessor<B> {
    /// Learns the standardization moments from `raw` and returns the processor
    /// together with the processed training matrix (`N × (F + 1)`).
    pub fn fit(raw: &Tensor2D<B>) -> Result<(Self, Tensor2D<B>)> {
        let scaler = StandardScaler::new().fit(raw)?;
        let processor = Self { scaler };
        let augmented = processor.process(raw)?;
        Ok((processor, augmented))
    }

    /// Standardizes `raw` with the cached moments and prepends the bias column.
    ///
    /// # Errors
    /// [`RegressionError::FeatureMismatch`](crate::error::RegressionError::FeatureMismatch)
    /// if `raw` does not have the training column count.
    pub fn process(&self, raw: &Tensor2D<B>) -> Result<Tensor2D<B>> {
        let standardized = self.scaler.transform(raw)?;
        prepend_bias_column(&standardized)
    }

    pub fn scaler(&self) -> &FittedStandardScaler<B> {
        &self.scaler
    }

    /// Raw feature count `F`.
    pub fn n_features_in(&self) -> usize {
        self.scaler.n_features_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;
    use crate::error::RegressionError;

    #[test]
    fn test_fit_then_process_matches_training_matrix() {
        let raw = Tensor2D::<CpuBackend>::from_rows(&[
            vec![1.0, -3.0],
            vec![4.0, 0.0],
            vec![7.0, 9.0],
        ])
        .unwrap();
        let (processor, augmented) = FeatureProcessor::fit(&raw).unwrap();
        assert_eq!(processor.process(&raw).unwrap().to_vec(), augmented.to_vec());
        assert_eq!(processor.n_features_in(), 2);
    }

    #[test]
    fn test_process_is_idempotent_on_parameters() {
        let raw = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0], vec![3.0]]).unwrap();
        let (processor, _) = FeatureProcessor::fit(&raw).unwrap();
        let mean_before = processor.scaler().mean().to_vec();

        let other = Tensor2D::<CpuBackend>::from_rows(&[vec![1000.0]]).unwrap();
        let first = processor.process(&other).unwrap().to_vec();
        let second = processor.process(&other).unwrap().to_vec();

        assert_eq!(first, second);
        assert_eq!(processor.scaler().mean().to_vec(), mean_before);
    }

    #[test]
    fn test_process_rejects_wrong_width() {
        let raw = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let (processor, _) = FeatureProcessor::fit(&raw).unwrap();
        let wrong = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert!(matches!(
            processor.process(&wrong),
            Err(RegressionError::FeatureMismatch { .. })
        ));
    }
}
