//! Epoch-level learning-rate adaptation.

use crate::trainer::LossHistory;

/// Decides the learning rate for the next epoch from the loss history.
pub trait LearningRateSchedule {
    /// `current` is the rate used in the epoch that produced `history.latest()`.
    fn next_learning_rate(&self, current: f64, history: &LossHistory) -> f64;
}

/// Keeps the learning rate fixed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantLearningRate;

impl LearningRateSchedule for ConstantLearningRate {
    fn next_learning_rate(&self, current: f64, _history: &LossHistory) -> f64 {
        current
    }
}

/// Reacts to the direction of the last two epoch losses.
///
/// - fewer than two losses: unchanged
/// - latest loss greater than the previous one: multiplied by `decay` (0.5)
/// - otherwise: multiplied by `growth` (1.05), clamped to `ceiling` when one is set
///
/// Growth is unbounded unless a ceiling is configured.
///
/// ```
/// use descent_rs::optimizer::{LearningRateSchedule, LossTrendSchedule};
/// use descent_rs::trainer::LossHistory;
///
/// let schedule = LossTrendSchedule::new();
/// let mut history = LossHistory::new();
/// history.record(1.0);
/// history.record(2.0); // got worse
/// assert_eq!(schedule.next_learning_rate(0.4, &history), 0.2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LossTrendSchedule {
    decay: f64,
    growth: f64,
    ceiling: Option<f64>,
}

impl Default for LossTrendSchedule {
    fn default() -> Self {
        Self {
            decay: 0.5,
            growth: 1.05,
            ceiling: None,
        }
    }
}

impl LossTrendSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound for grown rates.
    pub fn with_ceiling(mut self, ceiling: Option<f64>) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub fn ceiling(&self) -> Option<f64> {
        self.ceiling
    }
}

impl LearningRateSchedule for LossTrendSchedule {
    fn next_learning_rate(&self, current: f64, history: &LossHistory) -> f64 {
        let (Some(latest), Some(previous)) = (history.latest(), history.previous()) else {
            return current;
        };

        if latest > previous {
            current * self.decay
        } else {
            let grown = current * self.growth;
            match self.ceiling {
                Some(ceiling) => grown.min(ceiling),
                None => grown,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(newest_first: &[f64]) -> LossHistory {
        let mut h = LossHistory::new();
        for &loss in newest_first.iter().rev() {
            h.record(loss);
        }
        h
    }

    #[test]
    fn test_single_loss_keeps_rate() {
        let s = LossTrendSchedule::new();
        assert_eq!(s.next_learning_rate(0.1, &history(&[0.7])), 0.1);
        assert_eq!(s.next_learning_rate(0.1, &LossHistory::new()), 0.1);
    }

    #[test]
    fn test_worse_loss_halves() {
        let s = LossTrendSchedule::new();
        assert_eq!(s.next_learning_rate(0.1, &history(&[0.8, 0.7])), 0.05);
    }

    #[test]
    fn test_better_or_equal_loss_grows() {
        let s = LossTrendSchedule::new();
        let better = s.next_learning_rate(0.1, &history(&[0.6, 0.7]));
        assert!((better - 0.105).abs() < 1e-15);
        let equal = s.next_learning_rate(0.1, &history(&[0.7, 0.7]));
        assert!((equal - 0.105).abs() < 1e-15);
    }

    #[test]
    fn test_only_two_latest_matter() {
        let s = LossTrendSchedule::new();
        // older spike is ignored
        let lr = s.next_learning_rate(1.0, &history(&[0.5, 0.6, 100.0]));
        assert!((lr - 1.05).abs() < 1e-15);
    }

    #[test]
    fn test_unbounded_growth_by_default() {
        let s = LossTrendSchedule::new();
        let improving = history(&[0.1, 0.2]);
        let mut lr = 1.0;
        for _ in 0..100 {
            lr = s.next_learning_rate(lr, &improving);
        }
        assert!((lr - 1.05f64.powi(100)).abs() < 1e-6);
        assert!(lr > 100.0);
    }

    #[test]
    fn test_ceiling_clamps_growth() {
        let s = LossTrendSchedule::new().with_ceiling(Some(0.2));
        let improving = history(&[0.1, 0.2]);
        let mut lr = 0.1;
        for _ in 0..50 {
            lr = s.next_learning_rate(lr, &improving);
        }
        assert_eq!(lr, 0.2);
        // decay still applies under a ceiling
        assert_eq!(s.next_learning_rate(lr, &history(&[0.3, 0.2])), 0.1);
    }

    #[test]
    fn test_constant_schedule() {
        let s = ConstantLearningRate;
        assert_eq!(s.next_learning_rate(0.3, &history(&[9.0, 1.0])), 0.3);
    }
}
