//! Error types for usersync.
//!
//! This module defines the `SyncError` enum which represents every failure
//! a storage adapter can report.

use thiserror::Error;

/// The main error type for usersync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A database operation failed.
    #[error("Database error: {message}")]
    DatabaseError { message: String },

    /// The requested record was not found.
    #[error("Record not found: {entity} with {key}={value}")]
    NotFound {
        entity: String,
        key: String,
        value: String,
    },

    /// A unique constraint was violated (e.g., a user id delivered twice).
    #[error("Duplicate entry: {entity} with {field}={value} already exists")]
    DuplicateEntry {
        entity: String,
        field: String,
        value: String,
    },
}

impl SyncError {
    /// Creates a new database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::DatabaseError {
            message: message.into(),
        }
    }

    /// Creates a new not found error.
    pub fn not_found(
        entity: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a new duplicate entry error.
    pub fn duplicate(
        entity: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::DuplicateEntry {
            entity: entity.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

/// A Result type alias using SyncError.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SyncError::duplicate("user", "id", "user_1");
        assert_eq!(
            err.to_string(),
            "Duplicate entry: user with id=user_1 already exists"
        );

        let err = SyncError::not_found("user", "id", "user_2");
        assert_eq!(err.to_string(), "Record not found: user with id=user_2");
    }
}
