use super::scalar::Scalar;
use super::tensor1d::Tensor1D;
use crate::backend::Backend;
use crate::error::{RegressionError, Result};
use std::marker::PhantomData;
use std::ops::Range;

/// Backend-typed 2D tensor in row-major order.
///
/// Feature matrices, label matrices and weight matrices are all `Tensor2D`.
/// Every method delegates to the backend; shape checks that depend on user input
/// live in the engines, so the panics documented on [`Backend`] only fire on
/// internal misuse.
#[derive(Clone)]
pub struct Tensor2D<B: Backend> {
    pub(crate) data: B::Tensor2D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor2D<B> {
    /// Builds a tensor from row-major data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        Self::from_raw(B::from_vec_2d(data, rows, cols))
    }

    /// Builds a tensor from a slice of rows.
    ///
    /// An empty slice yields a `0 × 0` tensor.
    ///
    /// # Errors
    /// Returns [`RegressionError::InvalidShape`] if rows differ in length.
    ///
    /// ```
    /// use descent_rs::backend::{CpuBackend, Tensor2D};
    ///
    /// let t = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(t.shape(), (2, 2));
    /// assert!(Tensor2D::<CpuBackend>::from_rows(&[vec![1.0], vec![2.0, 3.0]]).is_err());
    /// ```
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(RegressionError::shape(
                format!("rows of length {}", cols),
                format!("row of length {}", bad.len()),
            ));
        }
        let data: Vec<f64> = rows.iter().flat_map(|r| r.iter()).copied().collect();
        Ok(Self::new(data, rows.len(), cols))
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_raw(B::zeros_2d(rows, cols))
    }

    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::from_raw(B::ones_2d(rows, cols))
    }

    pub(crate) fn from_raw(data: B::Tensor2D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::from_raw(B::add_2d(&self.data, &other.data))
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self::from_raw(B::sub_2d(&self.data, &other.data))
    }

    /// Element-wise (Hadamard) product.
    pub fn mul(&self, other: &Self) -> Self {
        Self::from_raw(B::mul_2d(&self.data, &other.data))
    }

    pub fn scale(&self, a: Scalar<B>) -> Self {
        Self::from_raw(B::mul_scalar_2d(&self.data, &a.data))
    }

    pub fn add_scalar(&self, a: Scalar<B>) -> Self {
        Self::from_raw(B::add_scalar_2d(&self.data, &a.data))
    }

    pub fn log(&self) -> Self {
        Self::from_raw(B::log_2d(&self.data))
    }

    pub fn sigmoid(&self) -> Self {
        Self::from_raw(B::sigmoid_2d(&self.data))
    }

    /// Row-wise softmax.
    pub fn softmax_rows(&self) -> Self {
        Self::from_raw(B::softmax_rows_2d(&self.data))
    }

    pub fn sum(&self) -> Scalar<B> {
        Scalar {
            data: B::sum_all_2d(&self.data),
            backend: PhantomData,
        }
    }

    pub fn mean(&self) -> Scalar<B> {
        Scalar {
            data: B::mean_all_2d(&self.data),
            backend: PhantomData,
        }
    }

    /// Matrix product `self · other`.
    pub fn matmul(&self, other: &Self) -> Self {
        Self::from_raw(B::matmul(&self.data, &other.data))
    }

    pub fn transpose(&self) -> Self {
        Self::from_raw(B::transpose(&self.data))
    }

    pub fn shape(&self) -> (usize, usize) {
        B::shape(&self.data)
    }

    pub fn rows(&self) -> usize {
        self.shape().0
    }

    pub fn cols(&self) -> usize {
        self.shape().1
    }

    /// Row-major copy of the values.
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_2d(&self.data)
    }

    /// Values split into rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        let cols = self.cols();
        if cols == 0 {
            return vec![Vec::new(); self.rows()];
        }
        self.to_vec().chunks(cols).map(<[f64]>::to_vec).collect()
    }

    pub fn col_mean(&self) -> Tensor1D<B> {
        Tensor1D::from_raw(B::col_mean_2d(&self.data))
    }

    /// Per-column variance with `ddof` delta degrees of freedom.
    pub fn col_var(&self, ddof: usize) -> Tensor1D<B> {
        Tensor1D::from_raw(B::col_var_2d(&self.data, ddof))
    }

    /// Subtracts `v[j]` from every element of column `j`.
    pub fn sub_row(&self, v: &Tensor1D<B>) -> Self {
        Self::from_raw(B::broadcast_sub_1d_to_2d_rows(&self.data, &v.data))
    }

    /// Divides every element of column `j` by `v[j]`.
    pub fn div_row(&self, v: &Tensor1D<B>) -> Self {
        Self::from_raw(B::broadcast_div_1d_to_2d_rows(&self.data, &v.data))
    }

    /// Places the columns of `parts` side by side.
    pub fn hcat(parts: &[&Self]) -> Result<Self> {
        let raw: Vec<B::Tensor2D> = parts.iter().map(|t| t.data.clone()).collect();
        B::hcat_2d(&raw).map(Self::from_raw)
    }

    pub fn select_columns(&self, columns: &[usize]) -> Self {
        Self::from_raw(B::select_columns_2d(&self.data, columns))
    }

    /// Copies rows `range` into a new tensor.
    pub fn slice_rows(&self, range: Range<usize>) -> Self {
        Self::from_raw(B::slice_rows_2d(&self.data, range))
    }

    /// Column index of each row's maximum.
    pub fn argmax_rows(&self) -> Vec<usize> {
        B::argmax_rows_2d(&self.data)
    }
}

impl<B: Backend> std::fmt::Debug for Tensor2D<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tensor2D")
            .field("shape", &self.shape())
            .field("data", &self.to_vec())
            .finish()
    }
}
