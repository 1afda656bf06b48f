//! Weighted scoring over displayable scenarios.
use crate::suite::Suite;
use std::time::Duration;

/// Weighted score: successful weight over total weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub sum: u64,
    pub max: u64,
}

impl Score {
    /// Percentage in `0..=100`, or `None` when no weight was counted.
    pub fn percent(&self) -> Option<f64> {
        if self.max == 0 {
            return None;
        }
        Some(100.0 * self.sum as f64 / self.max as f64)
    }
}

/// Aggregate result of a suite run.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub score: Score,
    pub elapsed: Duration,
}

impl SuiteSummary {
    /// Score eligible displayable scenarios. Anything not successful counts as
    /// failed, including scenarios that never ran.
    pub fn from_suite(suite: &Suite, elapsed: Duration) -> Self {
        let mut score = Score::default();
        let mut total = 0;
        let mut failed = 0;

        for (_, scenario) in suite.scenarios() {
            if !scenario.is_eligible() || !scenario.displayable {
                continue;
            }
            total += 1;
            let weight = u64::from(scenario.weight);
            score.max += weight;
            if scenario.outcome.is_success() {
                score.sum += weight;
            } else {
                failed += 1;
            }
        }

        Self {
            total,
            successful: total - failed,
            failed,
            score,
            elapsed,
        }
    }
}
