//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Hashing failed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// The stored hash could not be parsed.
    #[error("Invalid password hash")]
    InvalidHash,
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(e: bcrypt::BcryptError) -> Self {
        match e {
            bcrypt::BcryptError::InvalidHash(_) => AuthError::InvalidHash,
            other => AuthError::Hashing(other.to_string()),
        }
    }
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
