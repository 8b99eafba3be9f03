//! Recommended sleep for the coming night

use crate::config::SleepNeedConfig;
use crate::strain::MAX_STRAIN;
use crate::types::SleepNeed;

/// Estimator for tonight's sleep need
pub struct SleepNeedEstimator;

impl SleepNeedEstimator {
    /// `baseline + (strain / 21) * max_strain_bonus + debt`
    ///
    /// Strain is read on its 0-21 scale and debt cannot be negative.
    pub fn estimate(strain_score: f64, debt_hours: f64, config: &SleepNeedConfig) -> SleepNeed {
        let strain = strain_score.clamp(0.0, MAX_STRAIN);
        let hours = config.baseline_hours
            + (strain / MAX_STRAIN) * config.max_strain_bonus_hours
            + debt_hours.max(0.0);

        SleepNeed {
            hours,
            formatted: format_hours(hours),
        }
    }
}

/// Format decimal hours as "Hh Mm" (whole hours, rounded minutes)
pub fn format_hours(hours: f64) -> String {
    let hours = hours.max(0.0);
    let mut h = hours.floor() as u64;
    let mut m = ((hours - h as f64) * 60.0).round() as u64;
    if m == 60 {
        h += 1;
        m = 0;
    }
    format!("{h}h {m}m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_need_with_strain_and_debt() {
        let need = SleepNeedEstimator::estimate(14.0, 1.0, &SleepNeedConfig::default());
        assert!((need.hours - 9.5).abs() < 1e-9);
        assert_eq!(need.formatted, "9h 30m");
    }

    #[test]
    fn test_rested_and_idle() {
        let need = SleepNeedEstimator::estimate(0.0, 0.0, &SleepNeedConfig::default());
        assert_eq!(need.hours, 7.5);
        assert_eq!(need.formatted, "7h 30m");
    }

    #[test]
    fn test_max_strain_bonus() {
        let need = SleepNeedEstimator::estimate(21.0, 2.0, &SleepNeedConfig::default());
        assert!((need.hours - 11.0).abs() < 1e-9);
        assert_eq!(need.formatted, "11h 0m");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(8.25), "8h 15m");
        assert_eq!(format_hours(7.0), "7h 0m");
        // 59.7 minutes rounds up into the next hour
        assert_eq!(format_hours(7.995), "8h 0m");
    }
}
