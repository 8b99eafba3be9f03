//! Personal baselines
//!
//! A baseline is the mean and population standard deviation of an
//! individual's own history (for example 30 days of RMSSD or resting heart
//! rate). Zero and negative samples mean "not measured" and are dropped. With
//! fewer than two usable samples there is no baseline at all.

use crate::stats::{mean, population_std_dev};
use crate::types::Baseline;
use tracing::debug;

/// Minimum number of positive samples needed for a baseline
pub const MIN_BASELINE_SAMPLES: usize = 2;

/// Estimator for personal baselines
pub struct BaselineEstimator;

impl BaselineEstimator {
    /// Estimate a baseline from a historical series.
    ///
    /// Order of the samples does not matter.
    pub fn estimate(samples: &[f64]) -> Option<Baseline> {
        let positive: Vec<f64> = samples
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
            .collect();

        if positive.len() < MIN_BASELINE_SAMPLES {
            debug!(
                usable = positive.len(),
                total = samples.len(),
                "not enough positive samples for a baseline"
            );
            return None;
        }

        Some(Baseline {
            mean: mean(&positive)?,
            std_dev: population_std_dev(&positive)?,
        })
    }
}

impl Baseline {
    /// Deviation from the baseline mean as a percentage
    pub fn deviation_pct(&self, value: f64) -> Option<f64> {
        if self.mean > 0.0 {
            Some(((value - self.mean) / self.mean) * 100.0)
        } else {
            None
        }
    }

    /// Number of standard deviations `value` sits from the mean
    pub fn z_score(&self, value: f64) -> Option<f64> {
        if self.std_dev > 0.0 {
            Some((value - self.mean) / self.std_dev)
        } else {
            None
        }
    }
}
