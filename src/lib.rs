//! wearscore - Daily strain, sleep and recovery scores from wearable data
//!
//! wearscore turns one day of raw wearable records into bounded, comparable
//! scores through a deterministic pipeline: vendor adaptation → personal
//! baselines → component scorers → daily report.
//!
//! ## Scorers
//!
//! - **Strain** (0-21): cardiovascular load from active minutes and calories
//! - **Sleep** (0-100): stage breakdown, efficiency and restorative share
//! - **Sleep consistency** (0-100), **sleep debt** and **sleep need**
//! - **Recovery** (0-100): sleep efficiency, HRV and resting heart rate,
//!   judged against personal baselines when history is available
//!
//! Every scorer is a pure function. Missing inputs never fail; they resolve
//! to the zero result of the scorer.

pub mod adapters;
pub mod baseline;
pub mod composite;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod recovery;
pub mod sleep;
pub mod stats;
pub mod strain;
pub mod trends;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use baseline::BaselineEstimator;
pub use config::ScoringConfig;
pub use error::ScoreError;
pub use pipeline::{fitbit_to_daily_report, score_day, DailyReport};
pub use recovery::{RecoveryInputs, RecoveryScorer};
pub use sleep::{SleepConsistencyScorer, SleepDebtTracker, SleepNeedEstimator, SleepScorer};
pub use strain::{StrainScorer, StrainTarget};
pub use trends::WeeklySummary;

/// Library version
pub const WEARSCORE_VERSION: &str = env!("CARGO_PKG_VERSION");
