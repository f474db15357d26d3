//! Protocol and session errors

use std::io;

use thiserror::Error;

use crate::index::IndexError;

/// Result type for session runs
pub type SessionResult<T> = Result<T, SessionError>;

/// A single line that could not be turned into a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Malformed command syntax: {0}")]
    Malformed(String),

    #[error("{command} expects {expected} argument(s), got {found}")]
    WrongArity {
        command: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("Invalid integer argument '{value}' for {command}")]
    InvalidNumber { command: &'static str, value: String },

    #[error("Line is not valid UTF-8 (bad byte at offset {valid_up_to})")]
    InvalidEncoding { valid_up_to: usize },
}

/// Failures that stop a session run
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ProtocolError,
    },

    #[error("after line {line}: {source}")]
    Invariant {
        line: usize,
        #[source]
        source: IndexError,
    },
}

impl SessionError {
    /// Input line number the failure is attached to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            SessionError::Io(_) => None,
            SessionError::Parse { line, .. } | SessionError::Invariant { line, .. } => Some(*line),
        }
    }
}
