//! Error types for Stocktrack Core
//!
//! This module defines all error types used throughout the Stocktrack core engine.
//! We use `thiserror` for ergonomic error definitions with automatic Display/Error implementations.
//!
//! Snapshot read problems are deliberately absent here: a corrupt snapshot is
//! reported as a [`StorageWarning`](crate::storage::StorageWarning) alongside an
//! empty collection, never as an error.

use thiserror::Error;

use crate::inventory::ItemId;

/// Result type alias for Stocktrack operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Main error type for Stocktrack operations
#[derive(Error, Debug)]
pub enum StockError {
    /// Bad user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No inventory record carries the requested id
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// Every item id up to `u64::MAX` has been handed out
    #[error("No item ids left after {0}")]
    IdsExhausted(ItemId),

    /// Username already registered
    #[error("Username already exists: {0}")]
    Conflict(String),

    /// Login or authorization failure
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Argument outside the accepted vocabulary (e.g. an unknown search field)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        source: Box<StockError>,
    },
}

/// Errors caused by user-supplied values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a positive number.")]
    NotANumber { field: &'static str, input: String },

    #[error("{field} must be a positive number.")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a whole number, got {value}")]
    NotWhole { field: &'static str, value: f64 },

    #[error("Item name must not be empty")]
    EmptyName,

    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Passwords do not match!")]
    PasswordMismatch,

    #[error("Unknown role '{0}', expected admin or viewer")]
    UnknownRole(String),
}

/// Errors related to login and access control
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username not found: {0}")]
    UnknownUser(String),

    #[error("Incorrect password!")]
    IncorrectPassword,

    #[error("Access denied: {action} requires the {required} role")]
    AccessDenied {
        action: &'static str,
        required: crate::types::Role,
    },
}

impl StockError {
    /// Add context to an error
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Strip any context layers and return the underlying error
    pub fn root(&self) -> &StockError {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether this error came from writing a snapshot (fatal for the operation)
    pub fn is_storage(&self) -> bool {
        matches!(self.root(), Self::Io(_) | Self::Serialization(_))
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add lazy context to a Result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err = StockError::NotFound(ItemId::new(7));
        let err = err.context("Failed to edit item");

        assert!(err.to_string().contains("Failed to edit item"));
        assert!(err.to_string().contains('7'));
        assert!(matches!(err.root(), StockError::NotFound(id) if id.get() == 7));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(ValidationError::EmptyName.into());
        let result = result.context("Add item failed");

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Add item failed"));
    }

    #[test]
    fn test_validation_message_matches_prompt_wording() {
        let err = ValidationError::Negative {
            field: "Quantity",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "Quantity must be a positive number.");
    }

    #[test]
    fn test_storage_classification() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = StockError::from(io).context("saving inventory snapshot");
        assert!(err.is_storage());
        assert!(!StockError::Conflict("bob".into()).is_storage());
    }
}
