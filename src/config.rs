//! Training options shared by all regression engines.
//!
//! Options can be built fluently or parsed from a JSON document that uses the
//! camelCase keys `learningRate`, `iterations`, `batchSize` and `decisionBoundary`.
//! Missing keys fall back to the defaults below.
//!
//! ```rust
//! use descent_rs::config::RegressionOptions;
//!
//! let opts = RegressionOptions::from_json(r#"{ "learningRate": 0.5, "batchSize": 50 }"#).unwrap();
//! assert_eq!(opts.learning_rate, 0.5);
//! assert_eq!(opts.iterations, 1000);
//! ```

use crate::error::{RegressionError, Result};
use serde::{Deserialize, Serialize};

/// Hyperparameters for one training run.
///
/// Defaults:
/// - `learning_rate`: 0.1
/// - `iterations`: 1000
/// - `batch_size`: 32
/// - `decision_boundary`: 0.5
/// - `verbose`: false
/// - `learning_rate_ceiling`: none (growth is unbounded)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegressionOptions {
    /// Initial step size. Adjusted after every epoch by the loss-trend schedule.
    pub learning_rate: f64,
    /// Number of epochs.
    pub iterations: usize,
    /// Rows per gradient step.
    pub batch_size: usize,
    /// Probability threshold for the positive class when labels have one column.
    pub decision_boundary: f64,
    /// Emit one `info` event per epoch.
    pub verbose: bool,
    /// Upper bound for the adapted learning rate.
    pub learning_rate_ceiling: Option<f64>,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            iterations: 1000,
            batch_size: 32,
            decision_boundary: 0.5,
            verbose: false,
            learning_rate_ceiling: None,
        }
    }
}

impl RegressionOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON. Unknown keys are ignored, missing keys take defaults.
    pub fn from_json(document: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(document)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_decision_boundary(mut self, decision_boundary: f64) -> Self {
        self.decision_boundary = decision_boundary;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Clamps the adapted learning rate to `ceiling`.
    pub fn with_learning_rate_ceiling(mut self, ceiling: f64) -> Self {
        self.learning_rate_ceiling = Some(ceiling);
        self
    }

    /// Checks option ranges.
    ///
    /// # Errors
    /// Returns [`RegressionError::InvalidOption`] if:
    /// - `batch_size` is zero
    /// - `learning_rate` is not a finite positive number
    /// - `decision_boundary` is outside `[0, 1]`
    /// - `learning_rate_ceiling` is set and not a finite positive number
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(RegressionError::InvalidOption(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(RegressionError::InvalidOption(format!(
                "learning_rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.decision_boundary) {
            return Err(RegressionError::InvalidOption(format!(
                "decision_boundary must lie in [0, 1], got {}",
                self.decision_boundary
            )));
        }
        if let Some(ceiling) = self.learning_rate_ceiling {
            if !ceiling.is_finite() || ceiling <= 0.0 {
                return Err(RegressionError::InvalidOption(format!(
                    "learning_rate_ceiling must be finite and positive, got {}",
                    ceiling
                )));
            }
        }
        Ok(())
    }
}
