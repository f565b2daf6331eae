use super::Backend;
use crate::error::RegressionError;
use ndarray::{s, Array1, Array2, Axis};
use std::ops::Range;

/// CPU tensor backend built on the `ndarray` crate.
///
/// # Type mappings
/// - `Scalar`: `f64`
/// - `Tensor1D`: `ndarray::Array1<f64>`
/// - `Tensor2D`: [`NdarrayTensor2D`] wrapper around `ndarray::Array2<f64>`
///
/// `sigmoid` and `softmax` are computed in numerically stable form, so extreme
/// logits (±1000) produce finite probabilities.
#[derive(Clone, Debug, Copy)]
pub struct NdarrayBackend;

/// Wrapper type for 2D tensors using ndarray's `Array2<f64>`.
///
/// ```
/// use descent_rs::backend::NdarrayTensor2D;
///
/// let tensor = NdarrayTensor2D::from(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]][..]);
/// assert_eq!(tensor.0.shape(), &[2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct NdarrayTensor2D(pub Array2<f64>);

impl From<&[Vec<f64>]> for NdarrayTensor2D {
    /// # Panics
    /// Panics if rows have inconsistent lengths.
    fn from(x: &[Vec<f64>]) -> Self {
        let rows = x.len();
        if rows == 0 {
            return NdarrayTensor2D(Array2::zeros((0, 0)));
        }
        let cols = x[0].len();
        assert!(x.iter().all(|r| r.len() == cols), "All rows must have same length");
        NdarrayTensor2D(Array2::from_shape_fn((rows, cols), |(i, j)| x[i][j]))
    }
}

impl Backend for NdarrayBackend {
    type Scalar = f64;
    type Tensor1D = Array1<f64>;
    type Tensor2D = NdarrayTensor2D;

    fn zeros_1d(len: usize) -> Self::Tensor1D {
        Array1::zeros(len)
    }

    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        NdarrayTensor2D(Array2::zeros((rows, cols)))
    }

    fn ones_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        NdarrayTensor2D(Array2::ones((rows, cols)))
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        Array1::from_vec(data)
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        assert_eq!(data.len(), rows * cols, "Inconsistent shape");
        NdarrayTensor2D(Array2::from_shape_fn((rows, cols), |(i, j)| {
            data[i * cols + j]
        }))
    }

    fn add_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        assert_eq!(a.0.dim(), b.0.dim(), "Shapes must match");
        NdarrayTensor2D(&a.0 + &b.0)
    }

    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        assert_eq!(a.0.dim(), b.0.dim(), "Shapes must match");
        NdarrayTensor2D(&a.0 - &b.0)
    }

    fn mul_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        assert_eq!(a.0.dim(), b.0.dim(), "Shapes must match");
        NdarrayTensor2D(&a.0 * &b.0)
    }

    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 * *s)
    }

    fn add_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 + *s)
    }

    fn log_2d(x: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(x.0.mapv(f64::ln))
    }

    fn sigmoid_2d(x: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(x.0.mapv(|z| {
            if z >= 0.0 {
                1.0 / (1.0 + (-z).exp())
            } else {
                let ez = z.exp();
                ez / (1.0 + ez)
            }
        }))
    }

    fn softmax_rows_2d(x: &Self::Tensor2D) -> Self::Tensor2D {
        let mut out = x.0.clone();
        for mut row in out.rows_mut() {
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            row.mapv_inplace(|v| (v - max).exp());
            let total = row.sum();
            row.mapv_inplace(|v| v / total);
        }
        NdarrayTensor2D(out)
    }

    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.sum()
    }

    fn sum_all_2d(t: &Self::Tensor2D) -> Self::Scalar {
        t.0.sum()
    }

    fn mean_all_2d(t: &Self::Tensor2D) -> Self::Scalar {
        t.0.mean().unwrap_or(f64::NAN)
    }

    fn scalar_f64(value: f64) -> Self::Scalar {
        value
    }

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.to_vec()
    }

    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<f64> {
        t.0.iter().copied().collect()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        t.0.dim()
    }

    fn matmul(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        let (m, k) = a.0.dim();
        let (k2, n) = b.0.dim();
        assert_eq!(k, k2, "Matmul dimension mismatch: ({}, {}) · ({}, {})", m, k, k2, n);
        NdarrayTensor2D(a.0.dot(&b.0))
    }

    fn transpose(t: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(t.0.t().to_owned())
    }

    // --- Column-wise operations ---

    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(t.0.ncols()))
    }

    fn col_var_2d(t: &Self::Tensor2D, ddof: usize) -> Self::Tensor1D {
        if t.0.nrows() <= ddof {
            return Array1::zeros(t.0.ncols());
        }
        t.0.var_axis(Axis(0), ddof as f64)
    }

    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        assert_eq!(t.0.ncols(), v.len(), "Broadcast length mismatch");
        NdarrayTensor2D(&t.0 - &v.view().insert_axis(Axis(0)))
    }

    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        assert_eq!(t.0.ncols(), v.len(), "Broadcast length mismatch");
        NdarrayTensor2D(&t.0 / &v.view().insert_axis(Axis(0)))
    }

    fn sqrt_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.mapv(f64::sqrt)
    }

    // --- Row and column manipulation ---

    fn hcat_2d(tensors: &[Self::Tensor2D]) -> Result<Self::Tensor2D, RegressionError> {
        let first = tensors.first().ok_or_else(|| {
            RegressionError::EmptyData("cannot concatenate an empty list of tensors".into())
        })?;
        let rows = first.0.nrows();
        for t in tensors {
            if t.0.nrows() != rows {
                return Err(RegressionError::shape(
                    format!("({}, ?)", rows),
                    format!("({}, ?)", t.0.nrows()),
                ));
            }
        }

        let total_cols: usize = tensors.iter().map(|t| t.0.ncols()).sum();
        let mut result = Array2::zeros((rows, total_cols));
        let mut col_offset = 0;
        for t in tensors {
            let ncols = t.0.ncols();
            result
                .slice_mut(s![.., col_offset..col_offset + ncols])
                .assign(&t.0);
            col_offset += ncols;
        }
        Ok(NdarrayTensor2D(result))
    }

    fn select_columns_2d(t: &Self::Tensor2D, columns: &[usize]) -> Self::Tensor2D {
        let ncols = t.0.ncols();
        for &col in columns {
            assert!(col < ncols, "Column index {} out of bounds ({} columns)", col, ncols);
        }
        NdarrayTensor2D(t.0.select(Axis(1), columns))
    }

    fn slice_rows_2d(t: &Self::Tensor2D, range: Range<usize>) -> Self::Tensor2D {
        assert!(
            range.start <= range.end && range.end <= t.0.nrows(),
            "Row range {:?} out of bounds ({} rows)",
            range,
            t.0.nrows()
        );
        NdarrayTensor2D(t.0.slice(s![range, ..]).to_owned())
    }

    fn argmax_rows_2d(t: &Self::Tensor2D) -> Vec<usize> {
        t.0.rows()
            .into_iter()
            .map(|row| {
                let mut best = 0;
                for (j, &v) in row.iter().enumerate() {
                    if v > row[best] {
                        best = j;
                    }
                }
                best
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn tensor2d_from(data: &[Vec<f64>]) -> NdarrayTensor2D {
        NdarrayTensor2D::from(data)
    }

    #[test]
    fn test_from_vec_2d_row_major() {
        let t = NdarrayBackend::from_vec_2d(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        assert_eq!(t.0, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_matmul() {
        let a = tensor2d_from(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = tensor2d_from(&[vec![5.0], vec![6.0]]);
        let c = NdarrayBackend::matmul(&a, &b);
        assert_eq!(c.0, array![[17.0], [39.0]]);
    }

    #[test]
    fn test_softmax_rows() {
        let t = tensor2d_from(&[vec![1000.0, 1000.0], vec![0.0, f64::ln(3.0)]]);
        let s = NdarrayBackend::softmax_rows_2d(&t);
        assert!((s.0[[0, 0]] - 0.5).abs() < 1e-12);
        assert!((s.0[[1, 0]] - 0.25).abs() < 1e-12);
        assert!((s.0[[1, 1]] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_population_variance() {
        let t = tensor2d_from(&[vec![0.0], vec![0.0], vec![1.0]]);
        let var = NdarrayBackend::col_var_2d(&t, 0);
        assert!((var[0] - 2.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_hcat_and_slice() {
        let ones = NdarrayBackend::ones_2d(3, 1);
        let x = tensor2d_from(&[vec![2.0], vec![3.0], vec![4.0]]);
        let joined = NdarrayBackend::hcat_2d(&[ones, x]).unwrap();
        assert_eq!(joined.0, array![[1.0, 2.0], [1.0, 3.0], [1.0, 4.0]]);

        let tail = NdarrayBackend::slice_rows_2d(&joined, 1..3);
        assert_eq!(tail.0, array![[1.0, 3.0], [1.0, 4.0]]);
    }

    #[test]
    fn test_argmax_rows() {
        let t = tensor2d_from(&[vec![0.2, 0.3, 0.5], vec![0.9, 0.05, 0.05]]);
        assert_eq!(NdarrayBackend::argmax_rows_2d(&t), vec![2, 0]);
    }

    #[cfg(feature = "cpu")]
    #[test]
    fn test_matches_cpu_backend() {
        use crate::backend::CpuBackend;

        let data = vec![0.5, -1.0, 2.0, 3.0, 0.0, -2.5];
        let cpu = CpuBackend::softmax_rows_2d(&CpuBackend::from_vec_2d(data.clone(), 2, 3));
        let nd = NdarrayBackend::softmax_rows_2d(&NdarrayBackend::from_vec_2d(data, 2, 3));
        for (a, b) in CpuBackend::to_vec_2d(&cpu)
            .iter()
            .zip(NdarrayBackend::to_vec_2d(&nd).iter())
        {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
