//! Exit codes for the score-review CLI.
//!
//! Exit code ranges:
//! - 0: report produced
//! - 10-19: user/environment errors (recoverable by user action)
//! - 20-29: internal and I/O errors

use sr_common::{Error, ErrorCategory};

/// Exit codes for score-review.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Report produced (possibly empty)
    Clean = 0,

    /// Invalid or missing arguments
    ArgsError = 10,

    /// Analysis config missing, unreadable, or invalid
    ConfigError = 11,

    /// Input dataset missing or unusable
    InputError = 12,

    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InputError => "ERR_INPUT",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }

    /// Exit code for a failed run.
    pub fn from_error(err: &Error) -> Self {
        match err.category() {
            ErrorCategory::Config => ExitCode::ConfigError,
            ErrorCategory::Input => ExitCode::InputError,
            ErrorCategory::Report => ExitCode::InternalError,
            ErrorCategory::Io => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Clean.as_i32(), 0);
        assert_eq!(ExitCode::ArgsError.as_i32(), 10);
        assert_eq!(ExitCode::ConfigError.as_i32(), 11);
        assert_eq!(ExitCode::InputError.as_i32(), 12);
        assert_eq!(ExitCode::InternalError.as_i32(), 20);
        assert_eq!(ExitCode::IoError.as_i32(), 21);
    }

    #[test]
    fn test_from_error() {
        let missing = Error::InputNotFound {
            path: "x.csv".to_string(),
        };
        assert_eq!(ExitCode::from_error(&missing), ExitCode::InputError);
        assert_eq!(
            ExitCode::from_error(&Error::InvalidConfig("bad".to_string())),
            ExitCode::ConfigError
        );
        assert_eq!(
            ExitCode::from_error(&Error::Render("x".to_string())),
            ExitCode::InternalError
        );
        let io = Error::Io(std::io::Error::other("disk"));
        assert_eq!(ExitCode::from_error(&io), ExitCode::IoError);
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::InputError.to_string(), "ERR_INPUT (12)");
    }
}
