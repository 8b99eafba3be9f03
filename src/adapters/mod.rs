//! Vendor payload adapters
//!
//! Adapters parse raw vendor JSON and map it to the typed daily inputs the
//! scorers consume.

mod fitbit;

pub use fitbit::FitbitAdapter;

use crate::error::ScoreError;
use crate::types::DailyInputs;

/// Trait for vendor payload adapters
pub trait VendorPayloadAdapter {
    /// Parse raw JSON into one day's inputs
    fn parse(&self, raw_json: &str) -> Result<DailyInputs, ScoreError>;
}
