//! # Backend Abstraction
//!
//! This module provides a trait-based abstraction over the numeric library that
//! performs the matrix work of training: matrix products, row-wise softmax, column
//! moments and row slicing.
//!
//! ## Design Philosophy
//!
//! - **Minimal trait surface**: only the operations the training engine needs.
//! - **Zero-cost generics**: the backend is chosen at compile time via type parameters.
//! - **Type-safe tensor handling**: each backend defines its own tensor types wrapped by
//!   [`Tensor1D`] and [`Tensor2D`], so tensors of different backends never mix.
//! - **Feature-gated implementations**: `cpu` (default, pure Rust) and `ndarray`.
//!
//! ## Available Backends
//!
//! | Backend          | Feature   | Use Case                          |
//! |------------------|-----------|-----------------------------------|
//! | `CpuBackend`     | `cpu`     | Default, pure-Rust implementation |
//! | `NdarrayBackend` | `ndarray` | Interop with `ndarray` ecosystem  |
//!
//! ## Example
//!
//! ```rust
//! use descent_rs::backend::{CpuBackend, Tensor2D};
//!
//! let x: Tensor2D<CpuBackend> = Tensor2D::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
//! let w: Tensor2D<CpuBackend> = Tensor2D::new(vec![1.0, 0.0, 0.0, 1.0], 2, 2);
//! assert_eq!(x.matmul(&w).to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
//! ```

use crate::error::RegressionError;
use std::ops::Range;

#[cfg(feature = "cpu")]
pub mod cpu;
#[cfg(feature = "cpu")]
/// Pure-Rust CPU backend implementation with zero external dependencies.
pub use cpu::{CpuBackend, CpuTensor2D};

#[cfg(feature = "ndarray")]
mod ndarray_backend;
#[cfg(feature = "ndarray")]
/// Backend backed by the `ndarray` crate for ecosystem interoperability.
pub use ndarray_backend::{NdarrayBackend, NdarrayTensor2D};

/// Scalar value representation and arithmetic operations.
pub mod scalar;
/// One-dimensional tensor abstraction.
pub mod tensor1d;
/// Two-dimensional tensor abstraction.
pub mod tensor2d;

pub use scalar::{Scalar, ScalarOps};
pub use tensor1d::Tensor1D;
pub use tensor2d::Tensor2D;

/// Abstraction over tensor storage and the numeric operations of training.
///
/// # Safety Guarantees
///
/// - Shape-sensitive operations (`matmul`, element-wise binary ops, broadcasts)
///   validate shapes and panic on mismatch. The engines validate user input before
///   it reaches the backend, so these panics indicate a bug rather than bad data.
/// - Tensor types are `Clone + Send + Sync`.
pub trait Backend: Clone + Copy + 'static {
    /// Scalar type supporting arithmetic operations.
    type Scalar: ScalarOps + Clone;

    /// One-dimensional tensor type.
    type Tensor1D: Clone + Send + Sync;

    /// Two-dimensional tensor type.
    type Tensor2D: Clone + Send + Sync;

    // --- Constructors ---

    /// Creates a 1D tensor filled with zeros of given length.
    fn zeros_1d(len: usize) -> Self::Tensor1D;

    /// Creates a 2D tensor filled with zeros of given dimensions.
    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D;

    /// Creates a 2D tensor filled with ones of given dimensions.
    fn ones_2d(rows: usize, cols: usize) -> Self::Tensor2D;

    /// Constructs a 1D tensor from owned data.
    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D;

    /// Constructs a 2D tensor from row-major ordered data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D;

    // --- Element-wise operations (2D) ---

    /// Element-wise addition of two 2D tensors.
    ///
    /// # Panics
    /// If tensors have different shapes.
    fn add_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Element-wise subtraction of two 2D tensors.
    ///
    /// # Panics
    /// If tensors have different shapes.
    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Element-wise multiplication of two 2D tensors.
    ///
    /// # Panics
    /// If tensors have different shapes.
    fn mul_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Multiplies each element of 2D tensor by a scalar.
    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D;

    /// Adds a scalar to each element of 2D tensor.
    fn add_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D;

    /// Element-wise natural logarithm. Non-positive inputs yield `-inf`/`NaN`.
    fn log_2d(x: &Self::Tensor2D) -> Self::Tensor2D;

    /// Element-wise sigmoid function: 1 / (1 + e^(-x)).
    fn sigmoid_2d(x: &Self::Tensor2D) -> Self::Tensor2D;

    /// Softmax over each row. Every output row sums to 1.
    fn softmax_rows_2d(x: &Self::Tensor2D) -> Self::Tensor2D;

    // --- Reduction operations ---

    /// Computes the sum of all elements in a 1D tensor.
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar;

    /// Computes the sum of all elements in a 2D tensor.
    fn sum_all_2d(t: &Self::Tensor2D) -> Self::Scalar;

    /// Computes the arithmetic mean of all elements in a 2D tensor.
    fn mean_all_2d(t: &Self::Tensor2D) -> Self::Scalar;

    // --- Scalar operations ---

    /// Creates a backend-specific scalar from an f64 value.
    fn scalar_f64(value: f64) -> Self::Scalar;

    // --- Data access ---

    /// Converts a 1D tensor to a Vec of f64 values.
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64>;

    /// Converts a 2D tensor to a row-major Vec of f64 values.
    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<f64>;

    /// Returns the number of elements in a 1D tensor.
    fn len_1d(t: &Self::Tensor1D) -> usize;

    /// Returns the shape of a 2D tensor as (rows, cols).
    fn shape(t: &Self::Tensor2D) -> (usize, usize);

    // --- Linear algebra ---

    /// Matrix product `A · B` of an (m × k) and a (k × n) matrix.
    ///
    /// # Panics
    /// If `A.cols() != B.rows()`.
    fn matmul(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Returns the transpose of a 2D tensor.
    fn transpose(t: &Self::Tensor2D) -> Self::Tensor2D;

    // --- Column-wise operations (for preprocessing) ---

    /// Computes the mean of each column (axis 0).
    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    /// Computes the variance of each column.
    ///
    /// # Arguments
    /// * `ddof` - Delta degrees of freedom (0 for population variance)
    fn col_var_2d(t: &Self::Tensor2D, ddof: usize) -> Self::Tensor1D;

    /// Result[i, j] = t[i, j] - v[j]
    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// Result[i, j] = t[i, j] / v[j]
    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// Sqrt of all elements in a 1D tensor.
    fn sqrt_1d(t: &Self::Tensor1D) -> Self::Tensor1D;

    // --- Row and column manipulation ---

    /// Horizontally concatenate 2D tensors (stack columns side by side).
    ///
    /// # Errors
    /// Returns [`RegressionError::InvalidShape`] if the tensors have different row
    /// counts, and [`RegressionError::EmptyData`] for an empty slice.
    fn hcat_2d(tensors: &[Self::Tensor2D]) -> Result<Self::Tensor2D, RegressionError>;

    /// Extract specific columns from a 2D tensor, preserving row order.
    ///
    /// # Panics
    /// If any column index is out of bounds.
    fn select_columns_2d(t: &Self::Tensor2D, columns: &[usize]) -> Self::Tensor2D;

    /// Copies the contiguous rows `range` into a new tensor.
    ///
    /// # Panics
    /// If `range.end` exceeds the row count.
    fn slice_rows_2d(t: &Self::Tensor2D, range: Range<usize>) -> Self::Tensor2D;

    /// Index of the largest element of each row. Ties resolve to the first index.
    fn argmax_rows_2d(t: &Self::Tensor2D) -> Vec<usize>;
}
