//! Error types for wearscore
//!
//! Scorers never fail: missing data resolves to defined defaults. Errors only
//! arise at the edges, when decoding vendor payloads or configuration.

use thiserror::Error;

/// Errors raised by adapters, configuration loading and encoding
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Failed to parse vendor payload: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
