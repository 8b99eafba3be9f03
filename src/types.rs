//! Core types for wearscore
//!
//! Input records mirror what a wearable data provider reports for a day. Every
//! record is independently optional at the call site; absence is modelled with
//! `Option` (or an empty history) and never as an error.
//!
//! Result types are plain value objects built fresh on every call.

use serde::{Deserialize, Serialize};

/// One heart-rate zone with the minutes spent inside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateZoneSample {
    pub name: String,
    pub min_bpm: f64,
    pub max_bpm: f64,
    pub minutes_in_zone: f64,
}

/// Daily heart-rate summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyHeartRateRecord {
    /// Date this record represents (YYYY-MM-DD)
    pub date: String,
    /// Resting heart rate (bpm); absent when the device did not compute one
    pub resting_heart_rate_bpm: Option<f64>,
    /// Zones in provider order
    #[serde(default)]
    pub zones: Vec<HeartRateZoneSample>,
}

/// Daily activity summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitySummary {
    pub date: String,
    pub very_active_minutes: f64,
    pub fairly_active_minutes: f64,
    pub lightly_active_minutes: f64,
    pub calories_out: f64,
    pub steps: u32,
}

/// Raw per-stage minutes as a provider reports them, before the stage model is
/// known. Fields are `None` when the provider omitted the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSummary {
    pub deep: Option<f64>,
    pub light: Option<f64>,
    pub rem: Option<f64>,
    pub wake: Option<f64>,
    pub asleep: Option<f64>,
    pub restless: Option<f64>,
    pub awake: Option<f64>,
}

/// Stage breakdown of a sleep session, in minutes.
///
/// Devices with stage detection report deep/light/REM/wake; older devices only
/// report asleep/restless/awake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum SleepStageBreakdown {
    Stages {
        deep_minutes: f64,
        light_minutes: f64,
        rem_minutes: f64,
        wake_minutes: f64,
    },
    Classic {
        asleep_minutes: f64,
        restless_minutes: f64,
        awake_minutes: f64,
    },
}

impl Default for SleepStageBreakdown {
    fn default() -> Self {
        SleepStageBreakdown::Classic {
            asleep_minutes: 0.0,
            restless_minutes: 0.0,
            awake_minutes: 0.0,
        }
    }
}

impl SleepStageBreakdown {
    /// Resolve the stage model from a raw summary.
    ///
    /// A positive deep, light or REM value selects `Stages`. Otherwise an
    /// `asleep` key selects `Classic`. A summary with neither resolves to an
    /// empty `Classic` breakdown.
    pub fn resolve(summary: &StageSummary) -> Self {
        let positive = |v: Option<f64>| v.is_some_and(|m| m > 0.0);

        if positive(summary.deep) || positive(summary.light) || positive(summary.rem) {
            return SleepStageBreakdown::Stages {
                deep_minutes: summary.deep.unwrap_or(0.0),
                light_minutes: summary.light.unwrap_or(0.0),
                rem_minutes: summary.rem.unwrap_or(0.0),
                wake_minutes: summary.wake.unwrap_or(0.0),
            };
        }

        if summary.asleep.is_some() {
            return SleepStageBreakdown::Classic {
                asleep_minutes: summary.asleep.unwrap_or(0.0),
                restless_minutes: summary.restless.unwrap_or(0.0),
                awake_minutes: summary.awake.unwrap_or(0.0),
            };
        }

        SleepStageBreakdown::default()
    }
}

/// One recorded sleep session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepSession {
    /// Date the provider assigns the session to (YYYY-MM-DD)
    pub date: String,
    /// Wall-clock start, RFC 3339 or naive `YYYY-MM-DDTHH:MM:SS[.fff]`
    pub start_time: Option<String>,
    /// Wall-clock end, same formats as `start_time`
    pub end_time: Option<String>,
    pub minutes_asleep: f64,
    pub time_in_bed_minutes: f64,
    /// Provider sleep efficiency (0-100)
    pub efficiency: f64,
    pub stages: SleepStageBreakdown,
    pub is_main_sleep: bool,
}

/// Daily heart-rate-variability sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrvSample {
    pub date: String,
    pub daily_rmssd_ms: f64,
}

/// Daily blood-oxygen sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spo2Sample {
    pub date: String,
    pub avg_percent: f64,
}

/// Nightly breathing-rate sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingRateSample {
    pub date: String,
    pub breaths_per_minute: f64,
}

/// Nightly skin temperature relative to the personal norm (celsius)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinTempSample {
    pub date: String,
    pub nightly_relative_c: f64,
}

/// Personal reference computed from historical samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub mean: f64,
    pub std_dev: f64,
}

/// Daily strain (0-21)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrainResult {
    pub score: f64,
    pub active_hours: f64,
    pub calories: f64,
    pub average_heart_rate_bpm: f64,
    pub max_heart_rate_bpm: f64,
    pub zones: Vec<HeartRateZoneSample>,
}

/// Which recovery components were normalized against a personal baseline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselinesUsed {
    pub hrv: bool,
    pub rhr: bool,
}

/// Daily recovery (0-100) with the raw vitals it was built from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryResult {
    pub score: u8,
    pub hrv: f64,
    pub resting_heart_rate: f64,
    pub respiratory_rate: f64,
    pub spo2: f64,
    pub skin_temp_deviation: f64,
    pub baselines_used: BaselinesUsed,
}

/// Stage durations in hours
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageHours {
    pub deep: f64,
    pub light: f64,
    pub rem: f64,
    pub awake: f64,
}

/// Deep + REM sleep
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RestorativeSleep {
    pub hours: f64,
    pub percentage_of_sleep: f64,
}

/// Sleep performance for the main session of a night
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepResult {
    /// Sleep performance (0-100), the session efficiency
    pub score: f64,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub total_sleep_hours: f64,
    pub time_in_bed_hours: f64,
    pub stage_hours: StageHours,
    pub restorative: RestorativeSleep,
}

/// Recommended sleep for the coming night
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepNeed {
    pub hours: f64,
    /// "Hh Mm"
    pub formatted: String,
}

/// Every record available for scoring one day.
///
/// Produced by a vendor adapter or built directly by the caller. Any field may
/// be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyInputs {
    /// Day being scored (YYYY-MM-DD)
    pub date: Option<String>,
    pub heart_rate: Option<DailyHeartRateRecord>,
    pub activity: Option<ActivitySummary>,
    /// Sessions recorded for the night being scored
    pub sleep: Vec<SleepSession>,
    /// Recent nights for consistency and debt
    pub sleep_history: Vec<SleepSession>,
    pub hrv: Option<HrvSample>,
    /// Past daily RMSSD values for the HRV baseline
    pub hrv_history: Vec<HrvSample>,
    /// Past resting heart rates (bpm) for the RHR baseline
    pub resting_heart_rate_history: Vec<f64>,
    pub spo2: Option<Spo2Sample>,
    pub breathing_rate: Option<BreathingRateSample>,
    pub skin_temp: Option<SkinTempSample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_stage_model() {
        let summary = StageSummary {
            deep: Some(90.0),
            light: Some(240.0),
            rem: Some(100.0),
            wake: Some(40.0),
            ..Default::default()
        };

        assert_eq!(
            SleepStageBreakdown::resolve(&summary),
            SleepStageBreakdown::Stages {
                deep_minutes: 90.0,
                light_minutes: 240.0,
                rem_minutes: 100.0,
                wake_minutes: 40.0,
            }
        );
    }

    #[test]
    fn test_resolve_classic_model() {
        // Zeroed stage keys alongside classic keys still resolve to classic
        let summary = StageSummary {
            deep: Some(0.0),
            light: Some(0.0),
            asleep: Some(300.0),
            restless: Some(20.0),
            awake: Some(10.0),
            ..Default::default()
        };

        assert_eq!(
            SleepStageBreakdown::resolve(&summary),
            SleepStageBreakdown::Classic {
                asleep_minutes: 300.0,
                restless_minutes: 20.0,
                awake_minutes: 10.0,
            }
        );
    }

    #[test]
    fn test_resolve_empty_summary() {
        assert_eq!(
            SleepStageBreakdown::resolve(&StageSummary::default()),
            SleepStageBreakdown::default()
        );
    }

    #[test]
    fn test_stage_breakdown_serialization_is_tagged() {
        let json = serde_json::to_value(SleepStageBreakdown::default()).unwrap();
        assert_eq!(json["model"], "classic");
        assert_eq!(json["asleep_minutes"], 0.0);
    }
}
