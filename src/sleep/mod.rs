//! Sleep scoring
//!
//! Per-night performance, multi-night consistency and debt, and the
//! recommended sleep duration for the coming night.

mod consistency;
mod debt;
mod need;
mod score;

pub use consistency::{parse_wall_clock, SleepConsistencyScorer};
pub use debt::SleepDebtTracker;
pub use need::{format_hours, SleepNeedEstimator};
pub use score::SleepScorer;

use crate::types::SleepSession;

/// Sessions that represent a night's sleep.
///
/// Naps are dropped whenever at least one session is flagged as main sleep;
/// a history with no flags at all is taken as-is.
pub(crate) fn main_sleep_sessions(history: &[SleepSession]) -> Vec<&SleepSession> {
    if history.iter().any(|s| s.is_main_sleep) {
        history.iter().filter(|s| s.is_main_sleep).collect()
    } else {
        history.iter().collect()
    }
}
