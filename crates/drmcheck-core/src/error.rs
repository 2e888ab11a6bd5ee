//! Error types for DRM Check Core

use thiserror::Error;

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Audit error types
#[derive(Error, Debug)]
pub enum Error {
    // Manifest errors
    #[error("Failed to fetch manifest: {0}")]
    ManifestFetch(String),

    #[error("Invalid manifest URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP {status} for url ({url})")]
    HttpStatus { url: String, status: u16 },

    // Network errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Connection timeout: {url}")]
    ConnectionTimeout { url: String },

    // Input errors
    #[error("Missing required column '{column}' in row {row}")]
    MissingColumn { column: String, row: usize },

    #[error("Input contains no rows")]
    EmptyInput,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Progress errors
    #[error("Progress overflow: all {total} units already completed")]
    ProgressOverflow { total: usize },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if this error belongs to a single URL fetch.
    ///
    /// Transport errors are recorded inside a [`Verdict`](crate::Verdict) and
    /// never abort a run.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::ManifestFetch(_)
                | Error::InvalidUrl { .. }
                | Error::HttpStatus { .. }
                | Error::Network(_)
                | Error::ConnectionTimeout { .. }
        )
    }

    /// Returns the error code for logs and reports
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::ManifestFetch(_) => "MANIFEST_FETCH",
            Error::InvalidUrl { .. } => "INVALID_URL",
            Error::HttpStatus { .. } => "HTTP_STATUS",
            Error::Network(_) => "NETWORK",
            Error::ConnectionTimeout { .. } => "TIMEOUT",
            Error::MissingColumn { .. } => "MISSING_COLUMN",
            Error::EmptyInput => "EMPTY_INPUT",
            Error::Csv(_) => "CSV",
            Error::Serialization(_) => "SERIALIZATION",
            Error::ProgressOverflow { .. } => "PROGRESS_OVERFLOW",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Internal(_) => "INTERNAL",
            Error::Io(_) => "IO",
        }
    }
}
