//! Error types for apptbook.

use thiserror::Error;

/// Errors that can occur in appointment book operations.
#[derive(Error, Debug)]
pub enum ApptBookError {
    #[error("Invalid date/time '{input}': {reason}")]
    Format { input: String, reason: String },

    #[error("No appointment book for owner: {0}")]
    NotFound(String),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApptBookError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        ApptBookError::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for apptbook operations.
pub type ApptBookResult<T> = Result<T, ApptBookError>;
