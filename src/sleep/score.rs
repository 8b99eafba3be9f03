//! Sleep performance for a single night

use crate::stats::round_to;
use crate::types::{RestorativeSleep, SleepResult, SleepSession, SleepStageBreakdown, StageHours};

/// Scorer for the main sleep session of a night
pub struct SleepScorer;

/// Stage minutes on the four-stage scale used for scoring
struct ScoringStages {
    deep: f64,
    light: f64,
    rem: f64,
    awake: f64,
}

impl From<&SleepStageBreakdown> for ScoringStages {
    fn from(stages: &SleepStageBreakdown) -> Self {
        match *stages {
            SleepStageBreakdown::Stages {
                deep_minutes,
                light_minutes,
                rem_minutes,
                wake_minutes,
            } => ScoringStages {
                deep: deep_minutes,
                light: light_minutes,
                rem: rem_minutes,
                awake: wake_minutes,
            },
            // Classic devices cannot tell deep or REM apart: all sleep counts
            // as light and restless time counts as awake.
            SleepStageBreakdown::Classic {
                asleep_minutes,
                restless_minutes,
                awake_minutes,
            } => ScoringStages {
                deep: 0.0,
                light: asleep_minutes,
                rem: 0.0,
                awake: awake_minutes + restless_minutes,
            },
        }
    }
}

impl SleepScorer {
    /// Score the night's sessions.
    ///
    /// The session flagged as main sleep is used, falling back to the first
    /// one. An empty slice yields the zero result.
    pub fn score(sessions: &[SleepSession]) -> SleepResult {
        let Some(main) = sessions
            .iter()
            .find(|s| s.is_main_sleep)
            .or_else(|| sessions.first())
        else {
            return SleepResult::default();
        };

        let stages = ScoringStages::from(&main.stages);
        let restorative_minutes = stages.deep + stages.rem;
        let percentage_of_sleep = if main.minutes_asleep > 0.0 {
            (100.0 * restorative_minutes / main.minutes_asleep).round()
        } else {
            0.0
        };

        SleepResult {
            score: main.efficiency.clamp(0.0, 100.0),
            start_time: main.start_time.clone(),
            end_time: main.end_time.clone(),
            total_sleep_hours: minutes_to_hours(main.minutes_asleep),
            time_in_bed_hours: minutes_to_hours(main.time_in_bed_minutes),
            stage_hours: StageHours {
                deep: minutes_to_hours(stages.deep),
                light: minutes_to_hours(stages.light),
                rem: minutes_to_hours(stages.rem),
                awake: minutes_to_hours(stages.awake),
            },
            restorative: RestorativeSleep {
                hours: minutes_to_hours(restorative_minutes),
                percentage_of_sleep,
            },
        }
    }
}

fn minutes_to_hours(minutes: f64) -> f64 {
    round_to(minutes / 60.0, 1)
}
