//! Error types for report generation.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writing into the output buffer failed.
    #[error("formatting error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<ReportError> for sr_common::Error {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::JsonError(e) => sr_common::Error::Json(e),
            other => sr_common::Error::Render(other.to_string()),
        }
    }
}
