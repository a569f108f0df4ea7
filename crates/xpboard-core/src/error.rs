//! Error types for xpboard-core
//!
//! Two families: [`CoreError`] for ingestion/config/export failures, and
//! [`ChartError`] for degenerate chart states that degrade to a placeholder.

use std::path::PathBuf;
use thiserror::Error;
use xpboard_types::Placeholder;

/// Core error type for xpboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON payload: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse config in {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("GraphQL errors: {}", messages.join("; "))]
    Graphql { messages: Vec<String> },

    #[error("Response is missing the `data` object")]
    MissingData,

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Degenerate states detected while scaling a series
///
/// All variants are recoverable: the chart renders a placeholder and the
/// pipeline keeps going.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ChartError {
    #[error("no qualifying records")]
    EmptySeries,

    #[error("every aggregated value is zero")]
    AllZero,

    #[error("viewport too small: usable area {width}x{height}")]
    ViewportTooSmall { width: f64, height: f64 },
}

impl ChartError {
    pub fn placeholder(&self) -> Placeholder {
        match self {
            ChartError::EmptySeries => Placeholder::NoData,
            ChartError::AllZero => Placeholder::AllZero,
            ChartError::ViewportTooSmall { .. } => Placeholder::ViewportTooSmall,
        }
    }
}

/// Tally of what ingestion had to skip or repair
///
/// Lets a payload with a few bad rows still render instead of failing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    /// Rows dropped because their type did not fit the collection
    pub skipped: usize,
    /// Rows whose amount was missing or malformed and became 0
    pub coerced_amounts: usize,
    /// Rows whose timestamp could not be parsed
    pub bad_timestamps: usize,
}

impl IngestReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_warnings(&self) -> bool {
        self.skipped > 0 || self.coerced_amounts > 0 || self.bad_timestamps > 0
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: IngestReport) {
        self.accepted += other.accepted;
        self.skipped += other.skipped;
        self.coerced_amounts += other.coerced_amounts;
        self.bad_timestamps += other.bad_timestamps;
    }
}
