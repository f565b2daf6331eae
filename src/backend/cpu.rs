use super::Backend;
use crate::error::RegressionError;
use std::ops::Range;

/// Pure-Rust backend storing tensors as flat `Vec<f64>` buffers.
#[derive(Clone, Debug, Copy)]
pub struct CpuBackend;

/// Row-major 2D buffer: `(data, rows, cols)`.
#[derive(Debug, Clone)]
pub struct CpuTensor2D(pub Vec<f64>, pub usize, pub usize);

impl CpuTensor2D {
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "Inconsistent shape");
        Self(data, rows, cols)
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.0[row * self.2 + col]
    }

    fn zip_with(&self, other: &Self, op: impl Fn(f64, f64) -> f64) -> Self {
        assert_eq!(
            (self.1, self.2),
            (other.1, other.2),
            "Shapes must match"
        );
        let data = self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| op(a, b))
            .collect();
        CpuTensor2D::new(data, self.1, self.2)
    }

    fn map(&self, op: impl Fn(f64) -> f64) -> Self {
        CpuTensor2D::new(self.0.iter().map(|&x| op(x)).collect(), self.1, self.2)
    }
}

impl From<&[Vec<f64>]> for CpuTensor2D {
    fn from(x: &[Vec<f64>]) -> Self {
        if x.is_empty() {
            return CpuTensor2D::new(Vec::new(), 0, 0);
        }
        let rows = x.len();
        let cols = x[0].len();
        assert!(
            x.iter().all(|row| row.len() == cols),
            "All rows must have same length"
        );
        let data: Vec<f64> = x.iter().flat_map(|row| row.iter()).copied().collect();
        CpuTensor2D::new(data, rows, cols)
    }
}

fn stable_sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}

impl Backend for CpuBackend {
    type Scalar = f64;
    type Tensor1D = Vec<f64>;
    type Tensor2D = CpuTensor2D;

    // --- Constructors ---
    fn zeros_1d(len: usize) -> Self::Tensor1D {
        vec![0.; len]
    }

    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(vec![0.; rows * cols], rows, cols)
    }

    fn ones_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(vec![1.; rows * cols], rows, cols)
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        data
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(data, rows, cols)
    }

    // --- Element-wise ops ---
    fn add_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a.zip_with(b, |x, y| x + y)
    }

    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a.zip_with(b, |x, y| x - y)
    }

    fn mul_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a.zip_with(b, |x, y| x * y)
    }

    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        t.map(|x| x * s)
    }

    fn add_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        t.map(|x| x + s)
    }

    fn log_2d(x: &Self::Tensor2D) -> Self::Tensor2D {
        x.map(f64::ln)
    }

    fn sigmoid_2d(x: &Self::Tensor2D) -> Self::Tensor2D {
        x.map(stable_sigmoid)
    }

    fn softmax_rows_2d(x: &Self::Tensor2D) -> Self::Tensor2D {
        let (rows, cols) = (x.1, x.2);
        let mut out = Vec::with_capacity(rows * cols);
        for row in x.0.chunks(cols.max(1)).take(rows) {
            // shift by the row max so exp() cannot overflow
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let exps: Vec<f64> = row.iter().map(|&v| (v - max).exp()).collect();
            let total: f64 = exps.iter().sum();
            out.extend(exps.into_iter().map(|e| e / total));
        }
        CpuTensor2D::new(out, rows, cols)
    }

    // --- Reductions ---
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.iter().sum::<f64>()
    }

    fn sum_all_2d(t: &Self::Tensor2D) -> Self::Scalar {
        t.0.iter().sum::<f64>()
    }

    fn mean_all_2d(t: &Self::Tensor2D) -> Self::Scalar {
        t.0.iter().sum::<f64>() / t.0.len() as f64
    }

    fn scalar_f64(value: f64) -> Self::Scalar {
        value
    }

    // --- Access ---
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.clone()
    }

    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<f64> {
        t.0.clone()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        (t.1, t.2)
    }

    // --- Linear algebra ---
    fn matmul(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        let (m, k) = (a.1, a.2);
        let (k2, n) = (b.1, b.2);
        assert_eq!(k, k2, "Matmul dimension mismatch: ({}, {}) · ({}, {})", m, k, k2, n);

        let mut out = vec![0.0; m * n];
        for i in 0..m {
            for p in 0..k {
                let a_ip = a.at(i, p);
                if a_ip == 0.0 {
                    continue;
                }
                let b_row = &b.0[p * n..(p + 1) * n];
                let out_row = &mut out[i * n..(i + 1) * n];
                for (o, &b_pj) in out_row.iter_mut().zip(b_row.iter()) {
                    *o += a_ip * b_pj;
                }
            }
        }
        CpuTensor2D::new(out, m, n)
    }

    fn transpose(t: &Self::Tensor2D) -> Self::Tensor2D {
        let (rows, cols) = (t.1, t.2);
        let mut out = vec![0.0; rows * cols];
        for i in 0..rows {
            for j in 0..cols {
                out[j * rows + i] = t.at(i, j);
            }
        }
        CpuTensor2D::new(out, cols, rows)
    }

    // --- Column-wise ---
    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        let (rows, cols) = (t.1, t.2);
        if rows == 0 {
            return vec![0.0; cols];
        }
        let mut sums = vec![0.0; cols];
        for row in t.0.chunks(cols.max(1)).take(rows) {
            for (s, &v) in sums.iter_mut().zip(row.iter()) {
                *s += v;
            }
        }
        sums.into_iter().map(|s| s / rows as f64).collect()
    }

    fn col_var_2d(t: &Self::Tensor2D, ddof: usize) -> Self::Tensor1D {
        let (rows, cols) = (t.1, t.2);
        if rows <= ddof {
            return vec![0.0; cols];
        }
        let means = Self::col_mean_2d(t);
        let mut sq = vec![0.0; cols];
        for row in t.0.chunks(cols.max(1)).take(rows) {
            for ((s, &v), &m) in sq.iter_mut().zip(row.iter()).zip(means.iter()) {
                let d = v - m;
                *s += d * d;
            }
        }
        let divisor = (rows - ddof) as f64;
        sq.into_iter().map(|s| s / divisor).collect()
    }

    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        assert_eq!(t.2, v.len(), "Broadcast length mismatch");
        let data = t
            .0
            .iter()
            .enumerate()
            .map(|(i, &x)| x - v[i % t.2])
            .collect();
        CpuTensor2D::new(data, t.1, t.2)
    }

    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        assert_eq!(t.2, v.len(), "Broadcast length mismatch");
        let data = t
            .0
            .iter()
            .enumerate()
            .map(|(i, &x)| x / v[i % t.2])
            .collect();
        CpuTensor2D::new(data, t.1, t.2)
    }

    fn sqrt_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.iter().map(|x| x.sqrt()).collect()
    }

    // --- Row and column manipulation ---
    fn hcat_2d(tensors: &[Self::Tensor2D]) -> Result<Self::Tensor2D, RegressionError> {
        let first = tensors.first().ok_or_else(|| {
            RegressionError::EmptyData("cannot concatenate an empty list of tensors".into())
        })?;
        let rows = first.1;
        if let Some(bad) = tensors.iter().find(|t| t.1 != rows) {
            return Err(RegressionError::shape(
                format!("({}, ?)", rows),
                format!("({}, ?)", bad.1),
            ));
        }

        let total_cols: usize = tensors.iter().map(|t| t.2).sum();
        let mut data = Vec::with_capacity(rows * total_cols);
        for r in 0..rows {
            for t in tensors {
                data.extend_from_slice(&t.0[r * t.2..(r + 1) * t.2]);
            }
        }
        Ok(CpuTensor2D::new(data, rows, total_cols))
    }

    fn select_columns_2d(t: &Self::Tensor2D, columns: &[usize]) -> Self::Tensor2D {
        for &col in columns {
            assert!(col < t.2, "Column index {} out of bounds ({} columns)", col, t.2);
        }
        let mut data = Vec::with_capacity(t.1 * columns.len());
        for r in 0..t.1 {
            data.extend(columns.iter().map(|&c| t.at(r, c)));
        }
        CpuTensor2D::new(data, t.1, columns.len())
    }

    fn slice_rows_2d(t: &Self::Tensor2D, range: Range<usize>) -> Self::Tensor2D {
        assert!(
            range.start <= range.end && range.end <= t.1,
            "Row range {:?} out of bounds ({} rows)",
            range,
            t.1
        );
        let data = t.0[range.start * t.2..range.end * t.2].to_vec();
        CpuTensor2D::new(data, range.len(), t.2)
    }

    fn argmax_rows_2d(t: &Self::Tensor2D) -> Vec<usize> {
        (0..t.1)
            .map(|r| {
                let row = &t.0[r * t.2..(r + 1) * t.2];
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
