//! Store error types.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint hit: a row with this key already exists. The
    /// constraint, not any pre-check, is the integrity backstop for racing
    /// inserts.
    #[error("{entity_type} already exists: {key}")]
    AlreadyExists {
        entity_type: &'static str,
        key: String,
    },

    /// Foreign key constraint violation, e.g. an appointment referencing a
    /// nonexistent user.
    #[error("Foreign key constraint violation: {0}")]
    ForeignKeyViolation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored timestamp could not be parsed.
    #[error("Timestamp decode error: {0}")]
    Decode(#[from] chrono::ParseError),
}

impl StoreError {
    /// Creates an already exists error.
    pub fn already_exists(entity_type: &'static str, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type,
            key: key.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Maps constraint violations on insert to their store error variants.
pub(crate) fn map_insert_error(e: sqlx::Error, entity_type: &'static str, key: &str) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::already_exists(entity_type, key)
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            StoreError::ForeignKeyViolation(db.message().to_string())
        }
        _ => StoreError::Database(e),
    }
}
