//! Sleep consistency across nights
//!
//! Bed and wake times are measured in minutes since the preceding local noon,
//! so 23:30 and 00:30 are an hour apart instead of wrapping around midnight.
//! The score falls as the spread of those offsets grows.

use super::main_sleep_sessions;
use crate::stats::population_std_dev;
use crate::types::SleepSession;
use chrono::{DateTime, NaiveDateTime, Timelike};
use tracing::debug;

/// Score given when there is not enough history to judge
pub const PERFECT_CONSISTENCY: u8 = 100;

/// Points lost per minute of combined bed/wake standard deviation
const PENALTY_PER_MINUTE: f64 = 0.3;

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;
const NOON_MINUTES: f64 = 12.0 * 60.0;

/// Scorer for bed/wake timing regularity
pub struct SleepConsistencyScorer;

impl SleepConsistencyScorer {
    /// Score 0-100 over a sleep history.
    ///
    /// Naps are ignored when main sleep is flagged. Sessions whose start or
    /// end time cannot be parsed are skipped. With fewer than two usable
    /// sessions the score is 100.
    pub fn score(history: &[SleepSession]) -> u8 {
        let (bed_offsets, wake_offsets): (Vec<f64>, Vec<f64>) = main_sleep_sessions(history)
            .into_iter()
            .filter_map(|session| {
                let start = session.start_time.as_deref().and_then(parse_wall_clock);
                let end = session.end_time.as_deref().and_then(parse_wall_clock);
                match (start, end) {
                    (Some(start), Some(end)) => {
                        Some((minutes_since_noon(&start), minutes_since_noon(&end)))
                    }
                    _ => {
                        debug!(date = %session.date, "skipping session with unparsable times");
                        None
                    }
                }
            })
            .unzip();

        if bed_offsets.len() < 2 {
            return PERFECT_CONSISTENCY;
        }

        let bed_sd = finite_or_zero(population_std_dev(&bed_offsets));
        let wake_sd = finite_or_zero(population_std_dev(&wake_offsets));

        let score = (100.0 - PENALTY_PER_MINUTE * (bed_sd + wake_sd)).clamp(0.0, 100.0);
        score.round() as u8
    }
}

/// Parse a session timestamp as local wall-clock time.
///
/// Accepts RFC 3339 (the offset is kept as the local clock) and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` or `YYYY-MM-DD HH:MM:SS[.fff]`.
pub fn parse_wall_clock(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

fn minutes_since_noon(time: &NaiveDateTime) -> f64 {
    let minutes = time.hour() as f64 * 60.0 + time.minute() as f64 + time.second() as f64 / 60.0
        - NOON_MINUTES;
    if time.hour() < 12 {
        minutes + MINUTES_PER_DAY
    } else {
        minutes
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
