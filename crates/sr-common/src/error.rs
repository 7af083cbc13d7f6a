//! Error types for score review.
//!
//! Errors carry:
//! - Stable error codes for machine parsing
//! - Category classification for exit-code mapping
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Missing Input Column
//!   Reason: required column 'payout_rate' not found in input header
//!   Fix: Export the evaluation results with the full column set.
//! ```
//!
//! Missing combinations and missing metric values are not errors: they are
//! represented as `Option::None` in the analysis results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for score review operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Analysis configuration errors.
    Config,
    /// Input dataset errors (missing file, header problems).
    Input,
    /// Report rendering errors.
    Report,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Report => write!(f, "report"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for score review.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid analysis config: {0}")]
    InvalidConfig(String),

    // Input errors (20-29)
    #[error("input file not found: {path}")]
    InputNotFound { path: String },

    #[error("required column '{column}' not found in input header")]
    MissingColumn { column: String },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    // Report errors (40-49)
    #[error("report rendering failed: {0}")]
    Render(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 40-49: Report errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidConfig(_) => 11,
            Error::InputNotFound { .. } => 20,
            Error::MissingColumn { .. } => 21,
            Error::MalformedInput(_) => 22,
            Error::Render(_) => 40,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and exit-code mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidConfig(_) => ErrorCategory::Config,
            Error::InputNotFound { .. } | Error::MissingColumn { .. } | Error::MalformedInput(_) => {
                ErrorCategory::Input
            }
            Error::Render(_) => ErrorCategory::Report,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => "Check the config path given with --config or SCORE_REVIEW_CONFIG.",
            Error::InvalidConfig(_) => {
                "Fix the reported field in analysis.json, or delete the file to use built-in defaults."
            }
            Error::InputNotFound { .. } => "Check the path to the evaluation results CSV.",
            Error::MissingColumn { .. } => {
                "Export the evaluation results with the full column set (target_hole, target_machine, evaluation_days, ...)."
            }
            Error::MalformedInput(_) => "Check that the input is a comma-separated file with a header row.",
            Error::Render(_) => "Retry with --format json to inspect the report data.",
            Error::Io(_) => "Check disk space and permissions for the input and output paths.",
            Error::Json(_) => "Invalid JSON. Check syntax with 'jq . <file>'.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidConfig(_) => "Invalid Analysis Configuration",
            Error::InputNotFound { .. } => "Input Not Found",
            Error::MissingColumn { .. } => "Missing Input Column",
            Error::MalformedInput(_) => "Malformed Input",
            Error::Render(_) => "Report Rendering Failed",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Remediation hint.
    pub remediation: String,

    /// Additional structured context (e.g., file path, column).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InputNotFound { path } => {
                context.insert("path".to_string(), serde_json::json!(path));
            }
            Error::MissingColumn { column } => {
                context.insert("column".to_string(), serde_json::json!(column));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            remediation: err.remediation().to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(Error::Config("test".into()).code(), 10);
        assert_eq!(
            Error::MissingColumn {
                column: "payout_rate".into()
            }
            .code(),
            21
        );
        assert_eq!(Error::Render("x".into()).code(), 40);
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            Error::InputNotFound { path: "a.csv".into() }.category(),
            ErrorCategory::Input
        );
        assert_eq!(
            Error::InvalidConfig("bad".into()).category(),
            ErrorCategory::Config
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(Error::from(io).category(), ErrorCategory::Io);
    }

    #[test]
    fn test_structured_error_context() {
        let err = Error::MissingColumn {
            column: "win_rate".into(),
        };
        let structured = StructuredError::from(&err);
        assert_eq!(structured.code, 21);
        assert_eq!(structured.context["column"], "win_rate");
        assert!(structured.to_json().contains("\"category\":\"input\""));
    }

    #[test]
    fn test_format_error_human_plain() {
        let err = Error::InputNotFound {
            path: "missing.csv".into(),
        };
        let text = format_error_human(&err, false);
        assert!(text.starts_with("✗ Input Not Found"));
        assert!(text.contains("Reason: input file not found: missing.csv"));
        assert!(text.contains("Fix:"));
        assert!(!text.contains("\x1b["));
    }
}
