//! Index error types
//!
//! Error codes:
//! - RIDE_TREE_INVARIANT (FATAL)
//! - RIDE_HEAP_INVARIANT (FATAL)
//! - RIDE_INDEX_DIVERGENCE (FATAL)
//!
//! These are only produced by the `verify()` diagnostics. Normal index
//! operations cannot fail.

use std::fmt;

/// Severity levels for index errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// System must halt immediately
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// Red-black tree shape or coloring is broken
    RideTreeInvariant,
    /// Heap order or position map is broken
    RideHeapInvariant,
    /// Attribute table and indexes disagree on the id set
    RideIndexDivergence,
}

impl IndexErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::RideTreeInvariant => "RIDE_TREE_INVARIANT",
            IndexErrorCode::RideHeapInvariant => "RIDE_HEAP_INVARIANT",
            IndexErrorCode::RideIndexDivergence => "RIDE_INDEX_DIVERGENCE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal // A broken index is a defect, never recoverable
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug)]
pub struct IndexError {
    /// Error code
    code: IndexErrorCode,
    /// Human-readable message
    message: String,
    /// Ride id involved, if any
    ride_id: Option<u64>,
}

impl IndexError {
    /// Create a tree invariant error
    pub fn tree(reason: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::RideTreeInvariant,
            message: reason.into(),
            ride_id: None,
        }
    }

    /// Create a tree invariant error pinned to a ride id
    pub fn tree_at(ride_id: u64, reason: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::RideTreeInvariant,
            message: format!("Ride {}: {}", ride_id, reason.into()),
            ride_id: Some(ride_id),
        }
    }

    /// Create a heap invariant error pinned to a ride id
    pub fn heap_at(ride_id: u64, reason: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::RideHeapInvariant,
            message: format!("Ride {}: {}", ride_id, reason.into()),
            ride_id: Some(ride_id),
        }
    }

    /// Create a heap invariant error
    pub fn heap(reason: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::RideHeapInvariant,
            message: reason.into(),
            ride_id: None,
        }
    }

    /// Create a divergence error for the id sets as a whole
    pub fn diverged(reason: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::RideIndexDivergence,
            message: reason.into(),
            ride_id: None,
        }
    }

    /// Create a divergence error pinned to a ride id
    pub fn divergence(ride_id: u64, reason: impl Into<String>) -> Self {
        Self {
            code: IndexErrorCode::RideIndexDivergence,
            message: format!("Ride {}: {}", ride_id, reason.into()),
            ride_id: Some(ride_id),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the ride id if applicable
    pub fn ride_id(&self) -> Option<u64> {
        self.ride_id
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for IndexError {}

/// Result type for index diagnostics
pub type IndexResult<T> = Result<T, IndexError>;
