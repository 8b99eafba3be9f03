//! Daily strain
//!
//! Strain is a 0-21 measure of cardiovascular load for a day, approximated
//! from active minutes and calories burned.

use crate::config::ScoringConfig;
use crate::stats::round_to;
use crate::types::{ActivitySummary, DailyHeartRateRecord, StrainResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound of the strain scale
pub const MAX_STRAIN: f64 = 21.0;

/// Strain points per hour of fairly/very active time
const POINTS_PER_ACTIVE_HOUR: f64 = 4.0;

/// Strain points per 2000 kcal burned
const POINTS_PER_2000_KCAL: f64 = 6.0;

/// Scorer for daily strain
pub struct StrainScorer;

impl StrainScorer {
    /// Score one day.
    ///
    /// Both records are required; if either is missing the zero result is
    /// returned. Average heart rate is approximated by resting heart rate,
    /// since a whole-day average is not part of the daily summary.
    pub fn score(
        heart_rate: Option<&DailyHeartRateRecord>,
        activity: Option<&ActivitySummary>,
        config: &ScoringConfig,
    ) -> StrainResult {
        let (heart_rate, activity) = match (heart_rate, activity) {
            (Some(hr), Some(act)) => (hr, act),
            (hr, act) => {
                debug!(
                    has_heart_rate = hr.is_some(),
                    has_activity = act.is_some(),
                    "strain inputs incomplete, returning zero strain"
                );
                return StrainResult::default();
            }
        };

        let active_minutes = activity.very_active_minutes + activity.fairly_active_minutes;
        let raw = (active_minutes / 60.0) * POINTS_PER_ACTIVE_HOUR
            + (activity.calories_out / 2000.0) * POINTS_PER_2000_KCAL;
        let score = round_to(raw.clamp(0.0, MAX_STRAIN), 1);

        StrainResult {
            score,
            active_hours: round_to(
                (active_minutes + activity.lightly_active_minutes) / 60.0,
                1,
            ),
            calories: activity.calories_out,
            average_heart_rate_bpm: heart_rate.resting_heart_rate_bpm.unwrap_or(0.0),
            max_heart_rate_bpm: config.strain.max_heart_rate_bpm,
            zones: heart_rate.zones.clone(),
        }
    }
}

/// Recommended strain band for the day, driven by recovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainTarget {
    pub min: f64,
    pub max: f64,
    pub label: String,
    /// Short coaching verb: Build, Maintain or Recover
    pub coach: String,
}

impl StrainTarget {
    /// Band for a recovery score: >= 67 high, >= 34 moderate, else rest
    pub fn for_recovery(recovery_score: u8) -> Self {
        let (min, max, label, coach) = if recovery_score >= 67 {
            (14.0, 18.0, "High Strain", "Build")
        } else if recovery_score >= 34 {
            (10.0, 14.0, "Moderate Strain", "Maintain")
        } else {
            (0.0, 10.0, "Rest / Active Recovery", "Recover")
        };

        Self {
            min,
            max,
            label: label.to_string(),
            coach: coach.to_string(),
        }
    }

    /// Whether a strain score falls within the band
    pub fn contains(&self, strain: f64) -> bool {
        strain >= self.min && strain <= self.max
    }
}
