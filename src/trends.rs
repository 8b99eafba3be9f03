//! Weekly summary over daily reports

use crate::pipeline::DailyReport;
use crate::stats::{mean, round_to};
use serde::{Deserialize, Serialize};

/// A single day's value, tagged with its date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayValue {
    pub date: Option<String>,
    pub value: f64,
}

/// Averages and standout days over a run of daily reports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub days: usize,
    /// Mean strain, one decimal
    pub average_strain: Option<f64>,
    /// Mean sleep score, rounded
    pub average_sleep_score: Option<f64>,
    /// Mean recovery, rounded
    pub average_recovery: Option<f64>,
    pub best_recovery: Option<DayValue>,
    pub highest_strain: Option<DayValue>,
    /// Night with the least total sleep (hours), among nights with data
    pub lowest_sleep: Option<DayValue>,
}

impl WeeklySummary {
    /// Summarize reports in the order given; ties go to the earliest report
    pub fn from_reports(reports: &[DailyReport]) -> Self {
        let strain: Vec<f64> = reports.iter().map(|r| r.strain.score).collect();
        let sleep: Vec<f64> = reports.iter().map(|r| r.sleep.score).collect();
        let recovery: Vec<f64> = reports.iter().map(|r| f64::from(r.recovery.score)).collect();

        Self {
            days: reports.len(),
            average_strain: mean(&strain).map(|m| round_to(m, 1)),
            average_sleep_score: mean(&sleep).map(f64::round),
            average_recovery: mean(&recovery).map(f64::round),
            best_recovery: pick(reports, |r| f64::from(r.recovery.score), |a, b| a > b),
            highest_strain: pick(reports, |r| r.strain.score, |a, b| a > b),
            // Nights without sleep data are not short nights
            lowest_sleep: pick(
                reports.iter().filter(|r| r.sleep.total_sleep_hours > 0.0),
                |r| r.sleep.total_sleep_hours,
                |a, b| a < b,
            ),
        }
    }
}

fn pick<'a>(
    reports: impl IntoIterator<Item = &'a DailyReport>,
    value: impl Fn(&DailyReport) -> f64,
    better: impl Fn(f64, f64) -> bool,
) -> Option<DayValue> {
    let mut best: Option<DayValue> = None;
    for report in reports {
        let v = value(report);
        if best.as_ref().map_or(true, |b| better(v, b.value)) {
            best = Some(DayValue {
                date: report.date.clone(),
                value: v,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::pipeline::score_day;
    use crate::types::DailyInputs;
    use pretty_assertions::assert_eq;

    fn report(date: &str, strain: f64, sleep_score: f64, sleep_hours: f64, recovery: u8) -> DailyReport {
        let mut report = score_day(&DailyInputs::default(), &ScoringConfig::default());
        report.date = Some(date.to_string());
        report.strain.score = strain;
        report.sleep.score = sleep_score;
        report.sleep.total_sleep_hours = sleep_hours;
        report.recovery.score = recovery;
        report
    }

    #[test]
    fn test_weekly_summary() {
        let reports = vec![
            report("2024-01-15", 12.4, 88.0, 7.5, 71),
            report("2024-01-16", 16.8, 79.0, 6.2, 54),
            report("2024-01-17", 8.1, 92.0, 8.1, 90),
        ];

        let summary = WeeklySummary::from_reports(&reports);

        assert_eq!(summary.days, 3);
        // (12.4 + 16.8 + 8.1) / 3 = 12.433
        assert_eq!(summary.average_strain, Some(12.4));
        // 259 / 3 = 86.33
        assert_eq!(summary.average_sleep_score, Some(86.0));
        // 215 / 3 = 71.67
        assert_eq!(summary.average_recovery, Some(72.0));
        assert_eq!(
            summary.best_recovery,
            Some(DayValue {
                date: Some("2024-01-17".to_string()),
                value: 90.0
            })
        );
        assert_eq!(
            summary.highest_strain.map(|d| d.date),
            Some(Some("2024-01-16".to_string()))
        );
        assert_eq!(
            summary.lowest_sleep,
            Some(DayValue {
                date: Some("2024-01-16".to_string()),
                value: 6.2
            })
        );
    }

    #[test]
    fn test_ties_go_to_earliest() {
        let reports = vec![
            report("2024-01-15", 10.0, 80.0, 7.0, 60),
            report("2024-01-16", 10.0, 80.0, 7.0, 60),
        ];
        let summary = WeeklySummary::from_reports(&reports);
        assert_eq!(
            summary.best_recovery.and_then(|d| d.date).as_deref(),
            Some("2024-01-15")
        );
    }

    #[test]
    fn test_lowest_sleep_skips_days_without_sleep() {
        let reports = vec![
            report("2024-01-15", 10.0, 85.0, 7.2, 70),
            report("2024-01-16", 9.0, 0.0, 0.0, 55),
            report("2024-01-17", 11.0, 80.0, 6.4, 65),
        ];
        let summary = WeeklySummary::from_reports(&reports);
        assert_eq!(
            summary.lowest_sleep,
            Some(DayValue {
                date: Some("2024-01-17".to_string()),
                value: 6.4
            })
        );

        let no_sleep = vec![report("2024-01-16", 9.0, 0.0, 0.0, 55)];
        assert_eq!(WeeklySummary::from_reports(&no_sleep).lowest_sleep, None);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(WeeklySummary::from_reports(&[]), WeeklySummary::default());
    }
}
