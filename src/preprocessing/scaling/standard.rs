//! Standard Scaler (Z-score normalization).
//!
//! The standard score of a sample `x` is
//! ```text
//! z = (x - u) / sqrt(v)
//! ```
//! where `u` is the column mean of the training samples and `v` their population
//! variance (divisor N). Columns with zero variance use `v = 1`, so constant
//! features map to zero instead of `NaN`.
//!
//! # Example
//! ```
//! use descent_rs::backend::{CpuBackend, Tensor2D};
//! use descent_rs::preprocessing::{FittedTransformer, StandardScaler, Transformer};
//!
//! let train = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 5.0], vec![3.0, 5.0]]).unwrap();
//! let fitted = StandardScaler::<CpuBackend>::new().fit(&train).unwrap();
//!
//! let scaled = fitted.transform(&train).unwrap();
//! assert_eq!(scaled.to_rows(), vec![vec![-1.0, 0.0], vec![1.0, 0.0]]);
//! ```

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::{RegressionError, Result};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use std::marker::PhantomData;

/// StandardScaler transformer (unfitted).
#[derive(Clone, Debug)]
pub struct StandardScaler<B: Backend> {
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for StandardScaler<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> StandardScaler<B> {
    pub fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<B: Backend> Transformer<B> for StandardScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Fitted = FittedStandardScaler<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted> {
        let (rows, cols) = data.shape();

        if rows == 0 {
            return Err(RegressionError::EmptyData(
                "cannot fit StandardScaler on empty data".to_string(),
            ));
        }

        let mean = data.col_mean();

        // constant columns would divide by zero
        let variance: Vec<f64> = data
            .col_var(0)
            .to_vec()
            .into_iter()
            .map(|v| if v == 0.0 { 1.0 } else { v })
            .collect();
        let variance = Tensor1D::new(variance);
        let std = variance.sqrt();

        Ok(FittedStandardScaler {
            mean,
            variance,
            std,
            n_features: cols,
        })
    }
}

/// Fitted StandardScaler holding the training moments.
#[derive(Clone, Debug)]
pub struct FittedStandardScaler<B: Backend> {
    mean: Tensor1D<B>,
    variance: Tensor1D<B>,
    std: Tensor1D<B>,
    n_features: usize,
}

impl<B: Backend> FittedStandardScaler<B> {
    /// Mean of each feature.
    pub fn mean(&self) -> &Tensor1D<B> {
        &self.mean
    }

    /// Population variance of each feature, with zeros replaced by 1.
    pub fn variance(&self) -> &Tensor1D<B> {
        &self.variance
    }

    /// Square root of [`variance`](Self::variance).
    pub fn std(&self) -> &Tensor1D<B> {
        &self.std
    }
}

impl<B: Backend> FittedTransformer<B> for FittedStandardScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output> {
        let cols = data.cols();
        if cols != self.n_features {
            return Err(RegressionError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }

        Ok(data.sub_row(&self.mean).div_row(&self.std))
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}
