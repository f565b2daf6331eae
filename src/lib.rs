//! # descent-rs
//!
//! Linear, logistic and softmax regression trained by gradient descent, on top of
//! pluggable numeric backends.
//!
//! ## Core Design Principles
//!
//! - **Fit once, transform many**: standardization moments are learned from the
//!   training features and reused, unchanged, for every later prediction.
//! - **Stateful Type Safety**: models carry their training state in the type system
//!   (`Unfitted` vs `Fitted`).
//! - **Training/Inference Separation**: losses, optimizers, schedules and the
//!   trainer live outside the models.
//! - **Backend Agnosticism**: the `Backend` trait abstracts the tensor math; a pure
//!   Rust CPU backend is the default and an `ndarray` backend sits behind a feature.
//!
//! ## Quick Start
//!
//! ```rust
//! use descent_rs::backend::CpuBackend;
//! use descent_rs::config::RegressionOptions;
//! use descent_rs::regression::LogisticRegression;
//!
//! let features = vec![vec![1.0, 1.0], vec![2.0, 1.5], vec![8.0, 9.0], vec![9.0, 8.5]];
//! let labels = vec![vec![0.0], vec![0.0], vec![1.0], vec![1.0]];
//! let options = RegressionOptions::new().with_iterations(100).with_batch_size(2);
//!
//! let mut model = LogisticRegression::<CpuBackend>::new(&features, &labels, options).unwrap();
//! model.train().unwrap();
//!
//! assert_eq!(model.predict(&[vec![1.5, 1.0], vec![8.5, 9.0]]).unwrap(), vec![0, 1]);
//! assert_eq!(model.loss_history().len(), 100);
//! ```
//!
//! ## Module Structure
//!
//! - `backend`: tensor abstractions and computation primitives (`Tensor1D`, `Tensor2D`)
//! - `preprocessing`: standardization and bias augmentation
//! - `dataset`: in-memory datasets and fixed-size batching
//! - `model`: softmax and linear models with stateful type parameters
//! - `loss`: cross-entropy and mean squared error
//! - `optimizer`: SGD and learning-rate schedules
//! - `trainer`: the epoch loop and loss history
//! - `regression`: ready-to-use engines combining all of the above
//! - `metrics`, `config`, `error`

pub mod backend;

/// Training options.
pub mod config;

/// Data loading utilities and dataset abstractions.
pub mod dataset;

/// Error type shared by the crate.
pub mod error;

/// Differentiable loss functions for model training.
pub mod loss;

/// Accuracy, mean squared error and R².
pub mod metrics;

/// Regression models with compile-time state safety.
pub mod model;

/// Parameter updates and learning-rate schedules.
pub mod optimizer;

/// Feature standardization and bias augmentation.
pub mod preprocessing;

/// Linear, logistic and softmax regression engines.
pub mod regression;

/// Epoch loop orchestration.
pub mod trainer;

pub use backend::{Backend, ScalarOps, Tensor1D, Tensor2D};
#[cfg(feature = "cpu")]
pub use backend::CpuBackend;
pub use config::RegressionOptions;
pub use error::{RegressionError, Result};
pub use regression::{LinearRegression, LogisticRegression, SoftmaxRegression};
