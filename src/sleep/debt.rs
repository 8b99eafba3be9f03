//! Accumulated sleep debt

use super::main_sleep_sessions;
use crate::config::SleepDebtConfig;
use crate::stats::round_to;
use crate::types::SleepSession;

/// Tracker for the sleep deficit over a trailing window
pub struct SleepDebtTracker;

impl SleepDebtTracker {
    /// Debt in hours over the most recent `config.window` sessions.
    ///
    /// Only main sleep counts when sessions are flagged. Each night adds
    /// `need - slept`; nights of long sleep pay debt back.
    /// The total is clamped to `[0, cap]` once, after summing, and rounded to
    /// one decimal.
    pub fn debt(history: &[SleepSession], config: &SleepDebtConfig) -> f64 {
        let mut recent = main_sleep_sessions(history);
        // Stable sort keeps caller order for sessions on the same date
        recent.sort_by(|a, b| a.date.cmp(&b.date));

        let skip = recent.len().saturating_sub(config.window);
        let total: f64 = recent[skip..]
            .iter()
            .map(|s| config.baseline_need_hours - s.minutes_asleep / 60.0)
            .sum();

        round_to(total.clamp(0.0, config.cap_hours.max(0.0)), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn night(date: &str, hours: f64) -> SleepSession {
        SleepSession {
            date: date.to_string(),
            minutes_asleep: hours * 60.0,
            is_main_sleep: true,
            ..Default::default()
        }
    }

    fn week(hours: &[f64]) -> Vec<SleepSession> {
        hours
            .iter()
            .enumerate()
            .map(|(i, h)| night(&format!("2024-01-{:02}", i + 1), *h))
            .collect()
    }

    #[test]
    fn test_modest_debt() {
        // 0.5 h short on three nights, on target otherwise
        let history = week(&[7.5, 8.0, 7.5, 8.0, 7.5, 8.0, 8.0]);
        assert_eq!(SleepDebtTracker::debt(&history, &SleepDebtConfig::default()), 1.5);
    }

    #[test]
    fn test_debt_is_capped() {
        let history = week(&[3.0, 4.0, 2.0, 5.0, 3.0, 4.0, 1.0]);
        assert_eq!(SleepDebtTracker::debt(&history, &SleepDebtConfig::default()), 2.0);
    }

    #[test]
    fn test_oversleeping_never_goes_negative() {
        let history = week(&[11.0, 10.0, 12.0, 9.5, 10.0, 11.0, 10.5]);
        assert_eq!(SleepDebtTracker::debt(&history, &SleepDebtConfig::default()), 0.0);
    }

    #[test]
    fn test_payback_offsets_debt_before_clamping() {
        // +3 h, +3 h, -4.5 h → 1.5 h; per-entry clamping would give 2.0
        let history = week(&[5.0, 5.0, 12.5]);
        assert_eq!(SleepDebtTracker::debt(&history, &SleepDebtConfig::default()), 1.5);
    }

    #[test]
    fn test_only_most_recent_window_counts() {
        let mut history = week(&[8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0]);
        // An old terrible night outside the window
        history.push(night("2023-12-20", 0.0));
        assert_eq!(SleepDebtTracker::debt(&history, &SleepDebtConfig::default()), 0.0);

        let config = SleepDebtConfig {
            window: 8,
            ..Default::default()
        };
        assert_eq!(SleepDebtTracker::debt(&history, &config), 2.0);
    }

    #[test]
    fn test_unordered_history() {
        let mut history = week(&[7.0, 7.0, 7.0]);
        history.reverse();
        let config = SleepDebtConfig {
            window: 2,
            ..Default::default()
        };
        assert_eq!(SleepDebtTracker::debt(&history, &config), 2.0);
        assert_eq!(SleepDebtTracker::debt(&[], &config), 0.0);
    }

    #[test]
    fn test_configurable_cap() {
        let history = week(&[4.0, 4.0]);
        let config = SleepDebtConfig {
            cap_hours: 10.0,
            ..Default::default()
        };
        assert_eq!(SleepDebtTracker::debt(&history, &config), 8.0);
    }

    #[test]
    fn test_naps_do_not_count_as_nights() {
        let mut history = week(&[8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0]);
        history.push(SleepSession {
            date: "2024-01-07".to_string(),
            minutes_asleep: 30.0,
            is_main_sleep: false,
            ..Default::default()
        });
        assert_eq!(SleepDebtTracker::debt(&history, &SleepDebtConfig::default()), 0.0);
    }

    #[test]
    fn test_unflagged_history_counts_every_session() {
        let history: Vec<SleepSession> = week(&[7.0, 7.0])
            .into_iter()
            .map(|s| SleepSession {
                is_main_sleep: false,
                ..s
            })
            .collect();
        assert_eq!(SleepDebtTracker::debt(&history, &SleepDebtConfig::default()), 2.0);
    }
}
