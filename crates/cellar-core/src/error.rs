//! Error types for the cellar engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::PlanStatus;

/// Error type for all cellar operations.
///
/// Pure scoring and composition never produce these for business reasons
/// (empty pools, ties, missing profiles). Only plan transitions that break an
/// invariant and store failures do.
#[derive(Error, Debug)]
pub enum CellarError {
    /// The backing store failed or could not be reached
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Evening plan not found for the given ID
    #[error("Evening plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Wine not found for the given ID
    #[error("Wine with ID {id} not found")]
    WineNotFound { id: u64 },
    /// Cursor or queue consistency violation
    #[error("Invalid position {index}: queue has {len} slots")]
    InvalidPosition { index: usize, len: usize },
    /// Attempted to open more bottles than are in stock
    #[error("Insufficient quantity for wine {item_id}: requested {requested}, available {available}")]
    InsufficientQuantity {
        item_id: u64,
        requested: u32,
        available: u32,
    },
    /// Write against a stale plan version
    #[error("Plan {plan_id} was modified concurrently (expected version {expected}, found {actual})")]
    Conflict {
        plan_id: u64,
        expected: u64,
        actual: u64,
    },
    /// Transition attempted on a plan that is no longer active
    #[error("Plan {plan_id} is {status} and cannot change")]
    InvalidTransition { plan_id: u64, status: PlanStatus },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating store errors with optional context.
pub struct StoreErrorBuilder {
    message: String,
}

impl StoreErrorBuilder {
    /// Create a new store error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> CellarError {
        CellarError::StoreUnavailable {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CellarError {
        CellarError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CellarError {
    /// Creates a builder for store errors.
    pub fn store(message: impl Into<String>) -> StoreErrorBuilder {
        StoreErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Whether the caller should re-fetch state and retry rather than give up.
    ///
    /// Conflicts and stock shortfalls mean the caller's view is stale; store
    /// failures are transient by assumption.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CellarError::Conflict { .. }
                | CellarError::InsufficientQuantity { .. }
                | CellarError::StoreUnavailable { .. }
        )
    }
}

/// Specialized extension trait for store-related Results.
pub trait StoreResultExt<T> {
    /// Map store errors with a message.
    fn store_context(self, message: &str) -> Result<T>;
}

impl<T> StoreResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn store_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CellarError::store(message).with_source(e))
    }
}

/// Result type alias for cellar operations
pub type Result<T> = std::result::Result<T, CellarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        let conflict = CellarError::Conflict {
            plan_id: 1,
            expected: 2,
            actual: 3,
        };
        assert!(conflict.is_retryable());

        let short = CellarError::InsufficientQuantity {
            item_id: 4,
            requested: 3,
            available: 1,
        };
        assert!(short.is_retryable());

        let position = CellarError::InvalidPosition { index: 9, len: 3 };
        assert!(!position.is_retryable());

        let terminal = CellarError::InvalidTransition {
            plan_id: 1,
            status: PlanStatus::Completed,
        };
        assert!(!terminal.is_retryable());
    }

    #[test]
    fn test_error_messages() {
        let err = CellarError::invalid_input("lineup").with_reason("must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'lineup': must not be empty"
        );

        let err = CellarError::InvalidTransition {
            plan_id: 7,
            status: PlanStatus::Cancelled,
        };
        assert_eq!(err.to_string(), "Plan 7 is cancelled and cannot change");
    }

    #[test]
    fn test_store_context() {
        let res: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = res.store_context("Failed to load plan").unwrap_err();
        assert!(matches!(err, CellarError::StoreUnavailable { .. }));
        assert!(err.to_string().contains("Failed to load plan"));
    }
}
