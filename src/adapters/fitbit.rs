//! Fitbit vendor adapter
//!
//! Parses a bundle of Fitbit Web API response bodies and maps them to typed
//! daily inputs. The bundle is a JSON object whose keys hold raw responses:
//!
//! | Key | Endpoint |
//! |---|---|
//! | `heart` | `activities/heart/date/{date}/1d` |
//! | `activity` | `activities/date/{date}` |
//! | `sleep` | `sleep/date/{date}` (v1.2) |
//! | `sleep_history` | `sleep/date/{start}/{end}` (v1.2) |
//! | `hrv`, `hrv_history` | `hrv/date/...` |
//! | `rhr_history` | `activities/heart/date/{start}/{end}` |
//! | `spo2` | `spo2/date/{date}` |
//! | `br` | `br/date/{date}` |
//! | `temp` | `temp/skin/date/{date}` |
//!
//! Every key is optional. A response whose shape does not match is treated as
//! missing; only a bundle that is not a JSON object is an error.

use crate::error::ScoreError;
use crate::types::{
    ActivitySummary, BreathingRateSample, DailyHeartRateRecord, DailyInputs, HeartRateZoneSample,
    HrvSample, SkinTempSample, SleepSession, SleepStageBreakdown, Spo2Sample, StageSummary,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::VendorPayloadAdapter;

/// Fitbit payload adapter
pub struct FitbitAdapter;

impl VendorPayloadAdapter for FitbitAdapter {
    fn parse(&self, raw_json: &str) -> Result<DailyInputs, ScoreError> {
        let value: Value = serde_json::from_str(raw_json)?;
        if !value.is_object() {
            return Err(ScoreError::ParseError(
                "Fitbit bundle must be a JSON object".to_string(),
            ));
        }
        let bundle: FitbitBundle = serde_json::from_value(value)?;

        let heart: Option<FitbitHeartResponse> = decode("heart", bundle.heart);
        let heart_rate = heart
            .and_then(|h| h.activities_heart.into_iter().next())
            .map(convert_heart_day);

        let date = bundle
            .date
            .or_else(|| heart_rate.as_ref().map(|h| h.date.clone()));

        let activity = decode::<FitbitActivityResponse>("activity", bundle.activity)
            .and_then(|a| a.summary)
            .map(|s| convert_activity(s, date.clone().unwrap_or_default()));

        let sleep = decode::<FitbitSleepResponse>("sleep", bundle.sleep)
            .map(|s| s.sleep.into_iter().map(convert_sleep).collect())
            .unwrap_or_default();

        let sleep_history = decode::<FitbitSleepResponse>("sleep_history", bundle.sleep_history)
            .map(|s| s.sleep.into_iter().map(convert_sleep).collect())
            .unwrap_or_default();

        let hrv = decode::<FitbitHrvResponse>("hrv", bundle.hrv)
            .and_then(|h| h.hrv.into_iter().next())
            .map(convert_hrv);

        let hrv_history = decode::<FitbitHrvResponse>("hrv_history", bundle.hrv_history)
            .map(|h| h.hrv.into_iter().map(convert_hrv).collect())
            .unwrap_or_default();

        let resting_heart_rate_history =
            decode::<FitbitHeartResponse>("rhr_history", bundle.rhr_history)
                .map(|h| {
                    h.activities_heart
                        .into_iter()
                        .filter_map(|day| day.value.resting_heart_rate)
                        .collect()
                })
                .unwrap_or_default();

        let spo2 = decode::<FitbitSpo2Response>("spo2", bundle.spo2).and_then(|s| {
            s.value.and_then(|v| v.avg).map(|avg| Spo2Sample {
                date: s.date_time.unwrap_or_default(),
                avg_percent: avg,
            })
        });

        let breathing_rate = decode::<FitbitBreathingResponse>("br", bundle.br)
            .and_then(|b| b.br.into_iter().next())
            .and_then(|entry| {
                entry
                    .value
                    .breathing_rate
                    .map(|rate| BreathingRateSample {
                        date: entry.date_time,
                        breaths_per_minute: rate,
                    })
            });

        let skin_temp = decode::<FitbitSkinTempResponse>("temp", bundle.temp)
            .and_then(|t| t.temp_skin.into_iter().next())
            .and_then(|entry| {
                entry
                    .value
                    .nightly_relative
                    .map(|relative| SkinTempSample {
                        date: entry.date_time,
                        nightly_relative_c: relative,
                    })
            });

        Ok(DailyInputs {
            date,
            heart_rate,
            activity,
            sleep,
            sleep_history,
            hrv,
            hrv_history,
            resting_heart_rate_history,
            spo2,
            breathing_rate,
            skin_temp,
        })
    }
}

/// Decode one sub-response, treating a shape mismatch as missing data
fn decode<T: DeserializeOwned>(key: &str, value: Option<Value>) -> Option<T> {
    let value = value.filter(|v| !v.is_null())?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!(key, error = %e, "ignoring malformed Fitbit response");
            None
        }
    }
}

fn convert_heart_day(day: FitbitHeartDay) -> DailyHeartRateRecord {
    DailyHeartRateRecord {
        date: day.date_time,
        resting_heart_rate_bpm: day.value.resting_heart_rate.filter(|r| *r > 0.0),
        zones: day
            .value
            .heart_rate_zones
            .into_iter()
            .map(|z| HeartRateZoneSample {
                name: z.name,
                min_bpm: z.min,
                max_bpm: z.max,
                minutes_in_zone: z.minutes,
            })
            .collect(),
    }
}

fn convert_activity(summary: FitbitActivitySummary, date: String) -> ActivitySummary {
    ActivitySummary {
        date,
        very_active_minutes: summary.very_active_minutes,
        fairly_active_minutes: summary.fairly_active_minutes,
        lightly_active_minutes: summary.lightly_active_minutes,
        calories_out: summary.calories_out,
        steps: summary.steps,
    }
}

fn convert_sleep(log: FitbitSleepLog) -> SleepSession {
    let summary = log.levels.map(|l| l.summary).unwrap_or_default();
    let minutes = |level: Option<FitbitLevel>| level.map(|l| l.minutes);
    let stages = SleepStageBreakdown::resolve(&StageSummary {
        deep: minutes(summary.deep),
        light: minutes(summary.light),
        rem: minutes(summary.rem),
        wake: minutes(summary.wake),
        asleep: minutes(summary.asleep),
        restless: minutes(summary.restless),
        awake: minutes(summary.awake),
    });

    SleepSession {
        date: log.date_of_sleep,
        start_time: log.start_time,
        end_time: log.end_time,
        minutes_asleep: log.minutes_asleep,
        time_in_bed_minutes: log.time_in_bed,
        efficiency: log.efficiency,
        stages,
        is_main_sleep: log.is_main_sleep,
    }
}

fn convert_hrv(entry: FitbitHrvEntry) -> HrvSample {
    HrvSample {
        date: entry.date_time,
        daily_rmssd_ms: entry.value.daily_rmssd.unwrap_or(0.0),
    }
}

// Bundle and Fitbit API response structures

#[derive(Debug, Deserialize)]
struct FitbitBundle {
    date: Option<String>,
    heart: Option<Value>,
    activity: Option<Value>,
    sleep: Option<Value>,
    sleep_history: Option<Value>,
    hrv: Option<Value>,
    hrv_history: Option<Value>,
    rhr_history: Option<Value>,
    spo2: Option<Value>,
    br: Option<Value>,
    temp: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct FitbitHeartResponse {
    #[serde(rename = "activities-heart", default)]
    activities_heart: Vec<FitbitHeartDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitHeartDay {
    #[serde(default)]
    date_time: String,
    #[serde(default)]
    value: FitbitHeartValue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitHeartValue {
    resting_heart_rate: Option<f64>,
    #[serde(default)]
    heart_rate_zones: Vec<FitbitHeartRateZone>,
}

#[derive(Debug, Deserialize)]
struct FitbitHeartRateZone {
    #[serde(default)]
    name: String,
    #[serde(default)]
    min: f64,
    #[serde(default)]
    max: f64,
    #[serde(default)]
    minutes: f64,
}

#[derive(Debug, Deserialize)]
struct FitbitActivityResponse {
    summary: Option<FitbitActivitySummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FitbitActivitySummary {
    very_active_minutes: f64,
    fairly_active_minutes: f64,
    lightly_active_minutes: f64,
    calories_out: f64,
    steps: u32,
}

#[derive(Debug, Deserialize)]
struct FitbitSleepResponse {
    #[serde(default)]
    sleep: Vec<FitbitSleepLog>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitSleepLog {
    #[serde(default)]
    date_of_sleep: String,
    start_time: Option<String>,
    end_time: Option<String>,
    #[serde(default)]
    minutes_asleep: f64,
    #[serde(default)]
    time_in_bed: f64,
    #[serde(default)]
    efficiency: f64,
    #[serde(default)]
    is_main_sleep: bool,
    levels: Option<FitbitSleepLevels>,
}

#[derive(Debug, Deserialize)]
struct FitbitSleepLevels {
    #[serde(default)]
    summary: FitbitLevelSummary,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FitbitLevelSummary {
    deep: Option<FitbitLevel>,
    light: Option<FitbitLevel>,
    rem: Option<FitbitLevel>,
    wake: Option<FitbitLevel>,
    asleep: Option<FitbitLevel>,
    restless: Option<FitbitLevel>,
    awake: Option<FitbitLevel>,
}

#[derive(Debug, Deserialize)]
struct FitbitLevel {
    #[serde(default)]
    minutes: f64,
}

#[derive(Debug, Deserialize)]
struct FitbitHrvResponse {
    #[serde(default)]
    hrv: Vec<FitbitHrvEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitHrvEntry {
    #[serde(default)]
    date_time: String,
    value: FitbitHrvValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitHrvValue {
    daily_rmssd: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitSpo2Response {
    date_time: Option<String>,
    value: Option<FitbitSpo2Value>,
}

#[derive(Debug, Deserialize)]
struct FitbitSpo2Value {
    avg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FitbitBreathingResponse {
    #[serde(default)]
    br: Vec<FitbitBreathingEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitBreathingEntry {
    #[serde(default)]
    date_time: String,
    value: FitbitBreathingValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitBreathingValue {
    breathing_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitSkinTempResponse {
    #[serde(default)]
    temp_skin: Vec<FitbitSkinTempEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitSkinTempEntry {
    #[serde(default)]
    date_time: String,
    value: FitbitSkinTempValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FitbitSkinTempValue {
    nightly_relative: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fitbit_bundle() {
        let json = r#"{
            "heart": {
                "activities-heart": [{
                    "dateTime": "2024-01-15",
                    "value": {
                        "restingHeartRate": 58,
                        "heartRateZones": [
                            {"name": "Out of Range", "min": 30, "max": 98, "minutes": 1180},
                            {"name": "Fat Burn", "min": 98, "max": 137, "minutes": 45}
                        ]
                    }
                }]
            },
            "activity": {
                "summary": {
                    "veryActiveMinutes": 25,
                    "fairlyActiveMinutes": 35,
                    "lightlyActiveMinutes": 180,
                    "caloriesOut": 2450,
                    "steps": 10432
                }
            },
            "sleep": {
                "sleep": [{
                    "dateOfSleep": "2024-01-15",
                    "startTime": "2024-01-14T23:12:30.000",
                    "endTime": "2024-01-15T07:01:30.000",
                    "minutesAsleep": 421,
                    "timeInBed": 469,
                    "efficiency": 92,
                    "isMainSleep": true,
                    "levels": {
                        "summary": {
                            "deep": {"count": 4, "minutes": 82},
                            "light": {"count": 28, "minutes": 241},
                            "rem": {"count": 7, "minutes": 98},
                            "wake": {"count": 30, "minutes": 48}
                        }
                    }
                }]
            },
            "hrv": {"hrv": [{"dateTime": "2024-01-15", "value": {"dailyRmssd": 41.7, "deepRmssd": 45.2}}]},
            "spo2": {"dateTime": "2024-01-15", "value": {"avg": 96.1, "min": 93.0, "max": 98.9}},
            "br": {"br": [{"dateTime": "2024-01-15", "value": {"breathingRate": 15.2}}]},
            "temp": {"tempSkin": [{"dateTime": "2024-01-15", "value": {"nightlyRelative": -0.4}}]}
        }"#;

        let inputs = FitbitAdapter.parse(json).unwrap();

        assert_eq!(inputs.date.as_deref(), Some("2024-01-15"));
        let heart = inputs.heart_rate.unwrap();
        assert_eq!(heart.resting_heart_rate_bpm, Some(58.0));
        assert_eq!(heart.zones.len(), 2);
        assert_eq!(heart.zones[1].minutes_in_zone, 45.0);

        let activity = inputs.activity.unwrap();
        assert_eq!(activity.date, "2024-01-15");
        assert_eq!(activity.very_active_minutes, 25.0);
        assert_eq!(activity.steps, 10432);

        assert_eq!(inputs.sleep.len(), 1);
        assert_eq!(
            inputs.sleep[0].stages,
            SleepStageBreakdown::Stages {
                deep_minutes: 82.0,
                light_minutes: 241.0,
                rem_minutes: 98.0,
                wake_minutes: 48.0,
            }
        );
        assert!(inputs.sleep[0].is_main_sleep);

        assert_eq!(inputs.hrv.unwrap().daily_rmssd_ms, 41.7);
        assert_eq!(inputs.spo2.unwrap().avg_percent, 96.1);
        assert_eq!(inputs.breathing_rate.unwrap().breaths_per_minute, 15.2);
        assert_eq!(inputs.skin_temp.unwrap().nightly_relative_c, -0.4);
    }

    #[test]
    fn test_classic_sleep_log() {
        let json = r#"{
            "sleep": {
                "sleep": [{
                    "dateOfSleep": "2024-01-15",
                    "minutesAsleep": 300,
                    "timeInBed": 330,
                    "efficiency": 90,
                    "isMainSleep": true,
                    "levels": {
                        "summary": {
                            "asleep": {"count": 0, "minutes": 300},
                            "restless": {"count": 9, "minutes": 20},
                            "awake": {"count": 2, "minutes": 10}
                        }
                    }
                }]
            }
        }"#;

        let inputs = FitbitAdapter.parse(json).unwrap();
        assert_eq!(
            inputs.sleep[0].stages,
            SleepStageBreakdown::Classic {
                asleep_minutes: 300.0,
                restless_minutes: 20.0,
                awake_minutes: 10.0,
            }
        );
    }

    #[test]
    fn test_history_series() {
        let json = r#"{
            "hrv_history": {"hrv": [
                {"dateTime": "2024-01-13", "value": {"dailyRmssd": 40.0}},
                {"dateTime": "2024-01-14", "value": {"dailyRmssd": 44.0}}
            ]},
            "rhr_history": {"activities-heart": [
                {"dateTime": "2024-01-13", "value": {"restingHeartRate": 57}},
                {"dateTime": "2024-01-14", "value": {"heartRateZones": []}},
                {"dateTime": "2024-01-15", "value": {"restingHeartRate": 59}}
            ]}
        }"#;

        let inputs = FitbitAdapter.parse(json).unwrap();
        assert_eq!(inputs.hrv_history.len(), 2);
        assert_eq!(inputs.resting_heart_rate_history, vec![57.0, 59.0]);
    }

    #[test]
    fn test_missing_and_malformed_parts_are_absent() {
        let json = r#"{
            "heart": null,
            "activity": {"summary": "not an object"},
            "hrv": {"hrv": []}
        }"#;

        let inputs = FitbitAdapter.parse(json).unwrap();
        assert_eq!(inputs, DailyInputs::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            FitbitAdapter.parse("not valid json"),
            Err(ScoreError::JsonError(_))
        ));
        assert!(matches!(
            FitbitAdapter.parse("[1, 2]"),
            Err(ScoreError::ParseError(_))
        ));
    }
}
