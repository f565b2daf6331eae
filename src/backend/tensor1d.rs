use super::scalar::Scalar;
use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 1D tensor.
///
/// Holds per-column statistics such as the means and deviations of a fitted
/// scaler. The phantom backend tag keeps tensors of different backends apart at
/// compile time.
#[cfg_attr(
    all(feature = "cpu", feature = "ndarray"),
    doc = r#"
```compile_fail
use descent_rs::backend::{CpuBackend, NdarrayBackend, Tensor1D};

let cpu: Tensor1D<CpuBackend> = Tensor1D::zeros(3);
let nd: Tensor1D<NdarrayBackend> = Tensor1D::zeros(3);
let _ = cpu.sum() + nd.sum(); // mismatched backends
```

The same program compiles once both tensors share a backend:

```
use descent_rs::backend::{CpuBackend, NdarrayBackend, Tensor1D};

let cpu: Tensor1D<CpuBackend> = Tensor1D::zeros(3);
let other: Tensor1D<CpuBackend> = Tensor1D::zeros(3);
let _ = cpu.sum() + other.sum();
let _nd: Tensor1D<NdarrayBackend> = Tensor1D::zeros(3);
```
"#
)]
///
/// # Example
/// ```
/// use descent_rs::backend::{CpuBackend, Tensor1D};
///
/// let x: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 4.0, 9.0]);
/// assert_eq!(x.sqrt().to_vec(), vec![1.0, 2.0, 3.0]);
/// assert_eq!(x.len(), 3);
/// ```
#[derive(Clone)]
pub struct Tensor1D<B: Backend> {
    pub(crate) data: B::Tensor1D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor1D<B> {
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: B::from_vec_1d(data),
            backend: PhantomData,
        }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            data: B::zeros_1d(len),
            backend: PhantomData,
        }
    }

    pub(crate) fn from_raw(data: B::Tensor1D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Element-wise square root.
    pub fn sqrt(&self) -> Self {
        Self::from_raw(B::sqrt_1d(&self.data))
    }

    pub fn sum(&self) -> Scalar<B> {
        Scalar {
            data: B::sum_all_1d(&self.data),
            backend: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        B::len_1d(&self.data)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_1d(&self.data)
    }
}

impl<B: Backend> std::fmt::Debug for Tensor1D<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Tensor1D").field(&self.to_vec()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_zeros() {
        let t = Tensor1D::<CpuBackend>::zeros(4);
        assert_eq!(t.to_vec(), vec![0.0; 4]);
        assert!(!t.is_empty());
        assert!(Tensor1D::<CpuBackend>::zeros(0).is_empty());
    }

    #[test]
    fn test_sum() {
        let t = Tensor1D::<CpuBackend>::new(vec![0.5, 1.5, 2.0]);
        assert_eq!(t.sum().to_f64(), 4.0);
    }

    #[test]
    fn test_debug_lists_values() {
        let t = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0]);
        assert_eq!(format!("{:?}", t), "Tensor1D([1.0, 2.0])");
    }
}
