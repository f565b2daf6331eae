//! Per-epoch loss record.

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::VecDeque;

/// Epoch losses, newest first.
///
/// Index 0 is the most recent epoch, index 1 the one before it, and so on. The
/// learning-rate schedule compares these two entries.
///
/// ```
/// use descent_rs::trainer::LossHistory;
///
/// let mut history = LossHistory::new();
/// history.record(0.9);
/// history.record(0.7);
/// assert_eq!(history.latest(), Some(0.7));
/// assert_eq!(history.previous(), Some(0.9));
/// assert_eq!(history.chronological(), vec![0.9, 0.7]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LossHistory {
    values: VecDeque<f64>,
}

impl LossHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `loss` to the front.
    pub fn record(&mut self, loss: f64) {
        self.values.push_front(loss);
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.front().copied()
    }

    pub fn previous(&self) -> Option<f64> {
        self.values.get(1).copied()
    }

    /// Loss `index` epochs back from the latest.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Oldest first.
    pub fn chronological(&self) -> Vec<f64> {
        self.values.iter().rev().copied().collect()
    }

    /// Chart document for a plotting sink: `{"x": [losses, oldest first]}`.
    pub fn plot_payload(&self) -> Value {
        json!({ "x": self.chronological() })
    }
}
