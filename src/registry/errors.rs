//! Registry error types
//!
//! Error codes:
//! - RIDE_DUPLICATE_KEY (ERROR): the insert is refused, state is unchanged
//!
//! Whether a duplicate ends a command batch is the caller's decision.
//!
//! Unknown ids and an empty queue are not errors; they surface as `None`
//! or `UpdateOutcome::Missing`.

use std::fmt;

use crate::ride::RideId;

/// Registry error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryErrorCode {
    /// Insert of an id that is already tracked
    DuplicateKey,
}

impl RegistryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            RegistryErrorCode::DuplicateKey => "RIDE_DUPLICATE_KEY",
        }
    }
}

impl fmt::Display for RegistryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Registry error with the offending ride id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryError {
    code: RegistryErrorCode,
    ride_id: RideId,
}

impl RegistryError {
    /// Create a duplicate key error
    pub fn duplicate_key(ride_id: RideId) -> Self {
        Self {
            code: RegistryErrorCode::DuplicateKey,
            ride_id,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> RegistryErrorCode {
        self.code
    }

    /// Returns the ride id the operation was rejected for
    pub fn ride_id(&self) -> RideId {
        self.ride_id
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            RegistryErrorCode::DuplicateKey => write!(
                f,
                "[ERROR] {}: ride {} is already registered",
                self.code, self.ride_id
            ),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
