//! Daily recovery
//!
//! Recovery blends three signals on a 0-100 scale:
//!
//! | Signal | Weight | Component score |
//! |---|---|---|
//! | Sleep efficiency | 0.4 | efficiency as-is |
//! | HRV (RMSSD) | 0.4 | higher is better |
//! | Resting heart rate | 0.2 | lower is better |
//!
//! HRV and RHR are judged against a personal baseline when one is supplied,
//! otherwise against static references. A signal that is missing (or zero)
//! drops out and the remaining weights are renormalized. SpO2, breathing rate
//! and skin temperature are reported alongside but do not affect the score.

use crate::composite::{weighted_average, WeightedComponent};
use crate::config::{RecoveryConfig, ScoringConfig};
use crate::stats::round_to;
use crate::types::{
    Baseline, BaselinesUsed, BreathingRateSample, HrvSample, RecoveryResult, SkinTempSample,
    SleepResult, Spo2Sample,
};

/// Everything recovery can draw on for one day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecoveryInputs {
    /// Sleep efficiency of the main session (0-100)
    pub sleep_efficiency: Option<f64>,
    pub hrv: Option<HrvSample>,
    pub spo2: Option<Spo2Sample>,
    pub breathing_rate: Option<BreathingRateSample>,
    pub skin_temp: Option<SkinTempSample>,
    pub resting_heart_rate_bpm: Option<f64>,
    pub hrv_baseline: Option<Baseline>,
    pub rhr_baseline: Option<Baseline>,
}

impl RecoveryInputs {
    /// Take sleep efficiency from a scored night
    pub fn with_sleep(mut self, sleep: &SleepResult) -> Self {
        self.sleep_efficiency = Some(sleep.score);
        self
    }
}

/// Scorer for daily recovery
pub struct RecoveryScorer;

impl RecoveryScorer {
    pub fn score(inputs: &RecoveryInputs, config: &ScoringConfig) -> RecoveryResult {
        let weights = &config.recovery;
        let hrv = inputs.hrv.as_ref().map(|s| s.daily_rmssd_ms);
        let rhr = inputs.resting_heart_rate_bpm;

        let components = [
            WeightedComponent::from_reading(weights.sleep_weight, inputs.sleep_efficiency, |e| {
                e.clamp(0.0, 100.0)
            }),
            WeightedComponent::from_reading(weights.hrv_weight, hrv, |v| {
                hrv_component(v, inputs.hrv_baseline.as_ref(), weights)
            }),
            WeightedComponent::from_reading(weights.rhr_weight, rhr, |v| {
                rhr_component(v, inputs.rhr_baseline.as_ref(), weights)
            }),
        ];

        // Halves round up even after float error in the blend
        let score = weighted_average(&components)
            .map(|s| round_to(s, 9).round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0);

        RecoveryResult {
            score,
            hrv: hrv.unwrap_or(0.0),
            resting_heart_rate: rhr.unwrap_or(0.0),
            respiratory_rate: inputs
                .breathing_rate
                .as_ref()
                .map_or(0.0, |b| b.breaths_per_minute),
            spo2: inputs.spo2.as_ref().map_or(0.0, |s| s.avg_percent),
            skin_temp_deviation: inputs
                .skin_temp
                .as_ref()
                .map_or(0.0, |t| t.nightly_relative_c),
            baselines_used: BaselinesUsed {
                hrv: components[1].present && inputs.hrv_baseline.is_some(),
                rhr: components[2].present && inputs.rhr_baseline.is_some(),
            },
        }
    }
}

/// HRV component: full marks from one sd below the mean upward, falling
/// linearly to zero at three sd below.
fn hrv_component(hrv: f64, baseline: Option<&Baseline>, config: &RecoveryConfig) -> f64 {
    match baseline {
        Some(b) => {
            let full = b.mean - b.std_dev;
            let zero = b.mean - 3.0 * b.std_dev;
            if hrv >= full {
                100.0
            } else if full > zero {
                ((hrv - zero) / (full - zero) * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            }
        }
        None => (hrv / config.hrv_reference_ms * 100.0).clamp(0.0, 100.0),
    }
}

/// RHR component: full marks up to one sd above the mean, falling linearly
/// to zero at three sd above.
fn rhr_component(rhr: f64, baseline: Option<&Baseline>, config: &RecoveryConfig) -> f64 {
    match baseline {
        Some(b) => {
            let full = b.mean + b.std_dev;
            let zero = b.mean + 3.0 * b.std_dev;
            if rhr <= full {
                100.0
            } else if zero > full {
                ((zero - rhr) / (zero - full) * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            }
        }
        None => (100.0 - (rhr - config.rhr_reference_bpm)).clamp(0.0, 100.0),
    }
}
