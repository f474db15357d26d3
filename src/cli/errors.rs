//! CLI-specific error types
//!
//! All CLI errors are FATAL: the process exits non-zero.

use std::fmt;
use std::io;

use crate::protocol::SessionError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (script, output, stdout)
    IoError,
    /// Script line could not be parsed
    ParseError,
    /// Registry diagnostics failed
    InvariantViolation,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "RIDE_CLI_CONFIG_ERROR",
            Self::IoError => "RIDE_CLI_IO_ERROR",
            Self::ParseError => "RIDE_CLI_PARSE_ERROR",
            Self::InvariantViolation => "RIDE_CLI_INVARIANT_VIOLATION",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ParseError, msg)
    }

    /// Invariant violation
    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvariantViolation, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Io(_) => Self::io_error(e.to_string()),
            SessionError::Parse { .. } => Self::parse_error(e.to_string()),
            SessionError::Invariant { .. } => Self::invariant_violation(e.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ProtocolError;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("bad level");
        assert_eq!(err.to_string(), "RIDE_CLI_CONFIG_ERROR: bad level");
    }

    #[test]
    fn test_session_error_mapping() {
        let err: CliError = SessionError::Parse {
            line: 3,
            source: ProtocolError::Malformed("Insert".into()),
        }
        .into();
        assert_eq!(err.code(), &CliErrorCode::ParseError);
        assert!(err.message().contains("line 3"));

        let err: CliError = SessionError::Io(io::Error::new(io::ErrorKind::Other, "closed")).into();
        assert_eq!(err.code_str(), "RIDE_CLI_IO_ERROR");
    }
}
