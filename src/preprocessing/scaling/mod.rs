//! Scaling transformers for feature normalization.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`StandardScaler`] | Z-score normalization with population variance |

pub mod standard;

pub use standard::{FittedStandardScaler, StandardScaler};
