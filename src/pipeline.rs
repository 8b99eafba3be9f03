//! Pipeline orchestration
//!
//! Composes every scorer into a single daily report. Scorers stay pure; this
//! module only decides which inputs feed which scorer.
//!
//! Stages:
//! 1. VendorPayloadAdapter - parse vendor JSON into `DailyInputs`
//! 2. BaselineEstimator - HRV and RHR baselines from history
//! 3. StrainScorer, SleepScorer, SleepConsistencyScorer, SleepDebtTracker
//! 4. RecoveryScorer - sleep efficiency, HRV and RHR against baselines
//! 5. SleepNeedEstimator and StrainTarget

use crate::adapters::{FitbitAdapter, VendorPayloadAdapter};
use crate::baseline::BaselineEstimator;
use crate::config::ScoringConfig;
use crate::error::ScoreError;
use crate::recovery::{RecoveryInputs, RecoveryScorer};
use crate::sleep::{SleepConsistencyScorer, SleepDebtTracker, SleepNeedEstimator, SleepScorer};
use crate::stats::round_to;
use crate::strain::{StrainScorer, StrainTarget};
use crate::types::{Baseline, DailyInputs, RecoveryResult, SleepNeed, SleepResult, StrainResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything computed for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: Option<String>,
    pub strain: StrainResult,
    pub sleep: SleepResult,
    pub recovery: RecoveryResult,
    /// Bed/wake regularity over the sleep history (0-100)
    pub sleep_consistency: u8,
    pub sleep_debt_hours: f64,
    pub sleep_need: SleepNeed,
    pub strain_target: StrainTarget,
    pub hrv_baseline: Option<Baseline>,
    pub rhr_baseline: Option<Baseline>,
    /// Today's HRV relative to its baseline mean (%)
    pub hrv_deviation_pct: Option<f64>,
    /// Today's resting heart rate relative to its baseline mean (%)
    pub rhr_deviation_pct: Option<f64>,
}

impl DailyReport {
    /// Serialize the report to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String, ScoreError> {
        let encoded = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        encoded.map_err(|e| ScoreError::EncodingError(e.to_string()))
    }
}

/// Score one day from its inputs.
///
/// Consistency and debt use `sleep_history`, falling back to the night's own
/// sessions when no history was supplied. Sleep need is driven by the day's
/// strain.
pub fn score_day(inputs: &DailyInputs, config: &ScoringConfig) -> DailyReport {
    let hrv_history: Vec<f64> = inputs.hrv_history.iter().map(|s| s.daily_rmssd_ms).collect();
    let hrv_baseline = BaselineEstimator::estimate(&hrv_history);
    let rhr_baseline = BaselineEstimator::estimate(&inputs.resting_heart_rate_history);

    let strain = StrainScorer::score(
        inputs.heart_rate.as_ref(),
        inputs.activity.as_ref(),
        config,
    );
    let sleep = SleepScorer::score(&inputs.sleep);

    let history = if inputs.sleep_history.is_empty() {
        &inputs.sleep
    } else {
        &inputs.sleep_history
    };
    let sleep_consistency = SleepConsistencyScorer::score(history);
    let sleep_debt_hours = SleepDebtTracker::debt(history, &config.sleep_debt);

    let resting_heart_rate_bpm = inputs
        .heart_rate
        .as_ref()
        .and_then(|hr| hr.resting_heart_rate_bpm);

    let recovery_inputs = RecoveryInputs {
        hrv: inputs.hrv.clone(),
        spo2: inputs.spo2.clone(),
        breathing_rate: inputs.breathing_rate.clone(),
        skin_temp: inputs.skin_temp.clone(),
        resting_heart_rate_bpm,
        hrv_baseline,
        rhr_baseline,
        ..Default::default()
    }
    .with_sleep(&sleep);
    let recovery = RecoveryScorer::score(&recovery_inputs, config);

    let sleep_need =
        SleepNeedEstimator::estimate(strain.score, sleep_debt_hours, &config.sleep_need);
    let strain_target = StrainTarget::for_recovery(recovery.score);

    let hrv_deviation_pct = deviation(
        hrv_baseline,
        inputs.hrv.as_ref().map(|s| s.daily_rmssd_ms),
    );
    let rhr_deviation_pct = deviation(rhr_baseline, resting_heart_rate_bpm);

    debug!(
        date = inputs.date.as_deref().unwrap_or("unknown"),
        strain = strain.score,
        recovery = recovery.score,
        sleep = sleep.score,
        "scored day"
    );

    DailyReport {
        date: inputs.date.clone(),
        strain,
        sleep,
        recovery,
        sleep_consistency,
        sleep_debt_hours,
        sleep_need,
        strain_target,
        hrv_baseline,
        rhr_baseline,
        hrv_deviation_pct,
        rhr_deviation_pct,
    }
}

fn deviation(baseline: Option<Baseline>, value: Option<f64>) -> Option<f64> {
    let value = value.filter(|v| *v > 0.0)?;
    baseline?.deviation_pct(value).map(|pct| round_to(pct, 1))
}

/// Convert a raw Fitbit bundle to a daily report JSON string.
///
/// # Example
/// ```ignore
/// let report_json = fitbit_to_daily_report(bundle_json)?;
/// ```
pub fn fitbit_to_daily_report(raw_json: String) -> Result<String, ScoreError> {
    fitbit_to_daily_report_with_config(raw_json, &ScoringConfig::default())
}

/// Convert a raw Fitbit bundle to a daily report using a custom configuration
pub fn fitbit_to_daily_report_with_config(
    raw_json: String,
    config: &ScoringConfig,
) -> Result<String, ScoreError> {
    let report = process_vendor_payload(&FitbitAdapter, &raw_json, config)?;
    report.to_json(false)
}

/// Parse a vendor payload and score the day it describes
pub fn process_vendor_payload(
    adapter: &dyn VendorPayloadAdapter,
    raw_json: &str,
    config: &ScoringConfig,
) -> Result<DailyReport, ScoreError> {
    config.validate()?;
    let inputs = adapter.parse(raw_json)?;
    Ok(score_day(&inputs, config))
}
