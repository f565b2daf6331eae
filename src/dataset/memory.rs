use crate::backend::{Backend, Tensor2D};
use crate::dataset::Dataset;
use crate::error::{RegressionError, Result};
use std::ops::Range;

/// Features and labels held as backend tensors with matching row counts.
#[derive(Clone, Debug)]
pub struct InMemoryDataset<B: Backend> {
    x: Tensor2D<B>,
    y: Tensor2D<B>,
}

impl<B: Backend> InMemoryDataset<B> {
    /// # Errors
    /// [`RegressionError::InvalidShape`] if `x` and `y` have different row counts.
    pub fn new(x: Tensor2D<B>, y: Tensor2D<B>) -> Result<Self> {
        if x.rows() != y.rows() {
            return Err(RegressionError::shape(
                format!("{} label rows", x.rows()),
                format!("{} label rows", y.rows()),
            ));
        }
        Ok(Self { x, y })
    }

    /// Builds a dataset from row slices.
    ///
    /// # Errors
    /// [`RegressionError::InvalidShape`] for ragged rows or mismatched row counts.
    pub fn from_rows(x: &[Vec<f64>], y: &[Vec<f64>]) -> Result<Self> {
        Self::new(Tensor2D::from_rows(x)?, Tensor2D::from_rows(y)?)
    }

    pub fn features(&self) -> &Tensor2D<B> {
        &self.x
    }

    pub fn labels(&self) -> &Tensor2D<B> {
        &self.y
    }
}

impl<B: Backend> Dataset<B> for InMemoryDataset<B> {
    type Error = std::convert::Infallible;

    fn len(&self) -> usize {
        self.x.rows()
    }

    fn get_batch(
        &self,
        range: Range<usize>,
    ) -> std::result::Result<(Tensor2D<B>, Tensor2D<B>), Self::Error> {
        Ok((self.x.slice_rows(range.clone()), self.y.slice_rows(range)))
    }
}
