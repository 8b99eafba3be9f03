//! Scoring configuration
//!
//! Every tunable constant used by the scorers lives here with its default.
//! All sections use `#[serde(default)]`, so a partial JSON document only
//! overrides the keys it names.

use crate::error::ScoreError;
use serde::{Deserialize, Serialize};

/// Default maximum heart rate reported on strain results (bpm)
pub const DEFAULT_MAX_HEART_RATE_BPM: f64 = 190.0;

/// Default nightly sleep need used for debt accounting (hours)
pub const DEFAULT_DEBT_BASELINE_NEED_HOURS: f64 = 8.0;

/// Default number of most-recent sessions counted toward sleep debt
pub const DEFAULT_DEBT_WINDOW: usize = 7;

/// Default upper bound on accumulated sleep debt (hours)
pub const DEFAULT_DEBT_CAP_HOURS: f64 = 2.0;

/// Default baseline sleep need for the sleep-need recommendation (hours)
pub const DEFAULT_NEED_BASELINE_HOURS: f64 = 7.5;

/// Default extra sleep granted at maximum strain (hours)
pub const DEFAULT_MAX_STRAIN_BONUS_HOURS: f64 = 1.5;

/// Top-level configuration for all scorers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub strain: StrainConfig,
    pub recovery: RecoveryConfig,
    pub sleep_debt: SleepDebtConfig,
    pub sleep_need: SleepNeedConfig,
}

/// Strain scorer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrainConfig {
    /// Maximum heart rate; replace with a personalized value when known
    pub max_heart_rate_bpm: f64,
}

impl Default for StrainConfig {
    fn default() -> Self {
        Self {
            max_heart_rate_bpm: DEFAULT_MAX_HEART_RATE_BPM,
        }
    }
}

/// Recovery scorer weights and static references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    pub sleep_weight: f64,
    pub hrv_weight: f64,
    pub rhr_weight: f64,
    /// HRV that scores 100 when no personal baseline exists (ms)
    pub hrv_reference_ms: f64,
    /// RHR that scores 100 when no personal baseline exists (bpm)
    pub rhr_reference_bpm: f64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            sleep_weight: 0.4,
            hrv_weight: 0.4,
            rhr_weight: 0.2,
            hrv_reference_ms: 80.0,
            rhr_reference_bpm: 40.0,
        }
    }
}

/// Sleep debt accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepDebtConfig {
    pub baseline_need_hours: f64,
    /// Number of most-recent sessions considered
    pub window: usize,
    pub cap_hours: f64,
}

impl Default for SleepDebtConfig {
    fn default() -> Self {
        Self {
            baseline_need_hours: DEFAULT_DEBT_BASELINE_NEED_HOURS,
            window: DEFAULT_DEBT_WINDOW,
            cap_hours: DEFAULT_DEBT_CAP_HOURS,
        }
    }
}

/// Sleep need recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepNeedConfig {
    pub baseline_hours: f64,
    pub max_strain_bonus_hours: f64,
}

impl Default for SleepNeedConfig {
    fn default() -> Self {
        Self {
            baseline_hours: DEFAULT_NEED_BASELINE_HOURS,
            max_strain_bonus_hours: DEFAULT_MAX_STRAIN_BONUS_HOURS,
        }
    }
}

impl ScoringConfig {
    /// Load and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        let config: ScoringConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ScoreError> {
        serde_json::to_string_pretty(self).map_err(|e| ScoreError::EncodingError(e.to_string()))
    }

    /// Reject settings that would make a scorer meaningless
    pub fn validate(&self) -> Result<(), ScoreError> {
        let r = &self.recovery;
        let weights = [
            ("recovery.sleep_weight", r.sleep_weight),
            ("recovery.hrv_weight", r.hrv_weight),
            ("recovery.rhr_weight", r.rhr_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoreError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {weight}"
                )));
            }
        }
        if r.sleep_weight + r.hrv_weight + r.rhr_weight <= 0.0 {
            return Err(ScoreError::InvalidConfig(
                "at least one recovery weight must be positive".to_string(),
            ));
        }
        if r.hrv_reference_ms <= 0.0 {
            return Err(ScoreError::InvalidConfig(
                "recovery.hrv_reference_ms must be positive".to_string(),
            ));
        }
        if self.strain.max_heart_rate_bpm <= 0.0 {
            return Err(ScoreError::InvalidConfig(
                "strain.max_heart_rate_bpm must be positive".to_string(),
            ));
        }
        if self.sleep_debt.window == 0 {
            return Err(ScoreError::InvalidConfig(
                "sleep_debt.window must be at least 1".to_string(),
            ));
        }
        if self.sleep_debt.cap_hours < 0.0 {
            return Err(ScoreError::InvalidConfig(
                "sleep_debt.cap_hours must not be negative".to_string(),
            ));
        }
        if self.sleep_need.baseline_hours < 0.0 || self.sleep_need.max_strain_bonus_hours < 0.0 {
            return Err(ScoreError::InvalidConfig(
                "sleep_need hours must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
