//! Mini-batch access to training data.
//!
//! An epoch visits `floor(N / batch_size)` contiguous batches in row order. The
//! trailing `N mod batch_size` rows are never part of a gradient step; they still
//! count toward the per-epoch loss, which the trainer computes over the full data.

use crate::backend::{Backend, Tensor2D};
use std::{fmt::Debug, ops::Range};

pub mod memory;
pub use self::memory::InMemoryDataset;

/// Row-addressable source of `(features, labels)` pairs.
pub trait Dataset<B: Backend> {
    type Error: Debug;

    /// Total number of rows.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of full batches of `batch_size` rows. Zero when `batch_size` is zero.
    fn batch_count(&self, batch_size: usize) -> usize {
        if batch_size == 0 {
            return 0;
        }
        self.len() / batch_size
    }

    /// Iterator over the full batches, in order.
    fn batches(&self, batch_size: usize) -> DatasetBatchIter<'_, B, Self>
    where
        Self: Sized,
    {
        DatasetBatchIter {
            dataset: self,
            batch_size,
            index: 0,
            count: self.batch_count(batch_size),
            _backend: std::marker::PhantomData,
        }
    }

    /// Rows `range` of features and labels.
    fn get_batch(&self, range: Range<usize>) -> Result<(Tensor2D<B>, Tensor2D<B>), Self::Error>;
}

/// Iterator over the full batches of a [`Dataset`].
pub struct DatasetBatchIter<'a, B: Backend, D: ?Sized> {
    dataset: &'a D,
    batch_size: usize,
    index: usize,
    count: usize,
    _backend: std::marker::PhantomData<B>,
}

impl<B: Backend, D: Dataset<B>> Iterator for DatasetBatchIter<'_, B, D> {
    type Item = Result<(Tensor2D<B>, Tensor2D<B>), D::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let start = self.index * self.batch_size;
        self.index += 1;
        Some(self.dataset.get_batch(start..start + self.batch_size))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl<B: Backend, D: Dataset<B>> ExactSizeIterator for DatasetBatchIter<'_, B, D> {}
