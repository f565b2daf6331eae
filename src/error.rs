//! Error types for training and evaluation.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Errors raised by engines, preprocessing and option validation.
///
/// Numeric degeneracies (zero variance, `log(0)`) are not errors: they are patched in
/// place. Only malformed inputs and invalid options surface here.
#[derive(Debug, Error)]
pub enum RegressionError {
    /// Empty data provided where non-empty was required.
    #[error("empty data: {0}")]
    EmptyData(String),

    /// Shape mismatch between expected and actual dimensions.
    #[error("invalid shape: expected {expected}, got {got}")]
    InvalidShape {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        got: String,
    },

    /// Column count differs from the one seen during fitting.
    #[error("feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        /// Features seen during fit.
        expected_features: usize,
        /// Features in the offending input.
        got_features: usize,
    },

    /// Invalid training option.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// A dataset failed to produce a batch.
    #[error("data error: {0}")]
    Data(String),

    /// Options document could not be parsed.
    #[error("invalid options document: {0}")]
    Options(#[from] serde_json::Error),
}

impl RegressionError {
    pub(crate) fn shape(expected: impl Into<String>, got: impl Into<String>) -> Self {
        RegressionError::InvalidShape {
            expected: expected.into(),
            got: got.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_shape() {
        let err = RegressionError::shape("(2, 3)", "(3, 2)");
        assert_eq!(err.to_string(), "invalid shape: expected (2, 3), got (3, 2)");
    }

    #[test]
    fn test_error_display_feature_mismatch() {
        let err = RegressionError::FeatureMismatch {
            expected_features: 5,
            got_features: 3,
        };
        assert!(err.to_string().contains("expected 5 features, got 3"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: RegressionError = parse.unwrap_err().into();
        assert!(matches!(err, RegressionError::Options(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = RegressionError::InvalidOption("batch_size".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
