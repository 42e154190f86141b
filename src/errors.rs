//! Typed error hierarchy for the kanban board.
//!
//! - `LoadError` - board loader failures (fetch, parse, unknown status)
//! - `CatalogError` - task file loading and validation failures

use thiserror::Error;

/// Errors from one board load pass.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid board URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to parse task list: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Task {index} has unknown status '{status}'")]
    UnknownStatus { index: usize, status: String },
}

/// Errors from reading and validating a task file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read task file at {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse task file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Task {index}: invalid status '{value}'")]
    InvalidStatus { index: usize, value: String },

    #[error("Task {index}: invalid priority '{value}'")]
    InvalidPriority { index: usize, value: String },

    #[error("Task {index}: progress {value} is outside 0-100")]
    InvalidProgress { index: usize, value: u32 },
}
