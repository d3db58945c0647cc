//! Error taxonomy for the ranch core.
//!
//! Every fallible operation in this crate returns [`Result`] with this
//! error type. The variants map one-to-one onto the outcomes the HTTP
//! layer needs to distinguish:
//!
//! - **Validation**: malformed or out-of-policy input (bad coordinates,
//!   unknown municipality, non-positive area, bad rotation quantity)
//! - **NotFound**: unknown ranch or pasture id
//! - **Authorization**: mutation attempted by a non-owner
//! - **Conflict**: blocked by existing state (herd still present, occupied
//!   pasture removal, concurrent modification)
//! - **CapacityExceeded / RestPeriodViolation**: rotation policy failures
//! - **Timeout**: an external dependency missed its deadline
//! - **Storage**: underlying persistence failure
//!
//! Validation and authorization errors always surface to the caller
//! unmodified. The statistics aggregator is the single place where errors
//! are locally recovered (degraded to defaults and logged).

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::PastureId;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for all ranch core operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Input failed validation (bad coordinates, municipality, quantity, ...)
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// Entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Requesting user is not allowed to perform the operation
    #[error("not authorized: {reason}")]
    Authorization { reason: String },

    /// Operation blocked by existing state
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Rotation would overfill the destination pasture
    #[error(
        "pasture {pasture} cannot take {requested} more head: capacity {capacity}, currently {current}"
    )]
    CapacityExceeded {
        pasture: PastureId,
        requested: u32,
        capacity: u32,
        current: u32,
    },

    /// Destination pasture is still inside its mandated rest period
    #[error("pasture {pasture} is resting since {resting_since} ({rest_days} day minimum)")]
    RestPeriodViolation {
        pasture: PastureId,
        rest_days: u32,
        resting_since: DateTime<Utc>,
    },

    /// External dependency did not respond within its deadline
    #[error("timed out waiting for {operation}")]
    Timeout { operation: String },

    /// Underlying persistence failure
    #[error("storage error: {reason}")]
    Storage { reason: String },
}

impl Error {
    /// Create a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Create a not-found error for a named entity kind.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Create an authorization error.
    pub fn authorization(reason: impl Into<String>) -> Self {
        Self::Authorization {
            reason: reason.into(),
        }
    }

    /// Create a conflict error.
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    /// Create a timeout error naming the operation that missed its deadline.
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Create a storage error.
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::Storage {
            reason: reason.into(),
        }
    }

    /// Whether this error represents a missing entity.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error is transient (retryable by the caller).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Storage { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("ranch", "r-42");
        assert_eq!(err.to_string(), "ranch not found: r-42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_display() {
        let err = Error::validation("areaHectares must be positive");
        assert_eq!(
            err.to_string(),
            "validation failed: areaHectares must be positive"
        );
    }

    #[test]
    fn test_transient_classification() {
        assert!(Error::timeout("count_animals").is_transient());
        assert!(Error::storage("connection reset").is_transient());
        assert!(!Error::validation("bad input").is_transient());
        assert!(!Error::authorization("not the owner").is_transient());
    }
}
