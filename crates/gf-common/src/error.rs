//! Error types for the glucose forecast engine.
//!
//! The estimation core is total and never produces these. They come from the
//! layers that host it: configuration loading, reading ingestion, and I/O.

use thiserror::Error;

/// Result type alias for glucose forecast operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the glucose forecast engine.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid parameter profile: {0}")]
    InvalidProfile(String),

    #[error("unknown device preset: {0}")]
    UnknownDevice(String),

    // Input errors (20-29)
    #[error("invalid reading at index {index}: value {value}")]
    InvalidReading { index: usize, value: f64 },

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidProfile(_) => 11,
            Error::UnknownDevice(_) => 12,
            Error::InvalidReading { .. } => 20,
            Error::InvalidTimestamp(_) => 21,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}
