//! Evaluation metrics for the regression engines.

use crate::error::{RegressionError, Result};

fn check_lengths(y_true: usize, y_pred: usize) -> Result<()> {
    if y_true != y_pred {
        return Err(RegressionError::shape(
            format!("{} predictions", y_true),
            format!("{} predictions", y_pred),
        ));
    }
    Ok(())
}

/// Fraction of positions where `y_pred` equals `y_true`.
///
/// Empty inputs score 0.
///
/// ```
/// use descent_rs::metrics::accuracy;
///
/// assert_eq!(accuracy(&[0, 1, 2, 1], &[0, 1, 1, 1]).unwrap(), 0.75);
/// ```
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    if y_true.is_empty() {
        return Ok(0.0);
    }
    let hits = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(hits as f64 / y_true.len() as f64)
}

/// Mean squared error: `mean((y_true - y_pred)^2)`.
pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    if y_true.is_empty() {
        return Ok(0.0);
    }
    let sum_sq: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();
    Ok(sum_sq / y_true.len() as f64)
}

/// Coefficient of determination.
///
/// R² = 1 - (SS_res / SS_tot)
///
/// where:
/// - SS_res = sum((y_true - y_pred)^2)
/// - SS_tot = sum((y_true - mean(y_true))^2)
///
/// When every `y_true` is equal (SS_tot = 0) the score is 1 for a perfect fit and
/// 0 otherwise. Values below 0 mean the model is worse than predicting the mean.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    if y_true.is_empty() {
        return Ok(0.0);
    }

    let mean_true = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Ok(1.0 - ss_res / ss_tot)
}
