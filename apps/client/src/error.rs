//! Client errors.

use thiserror::Error;

/// Errors produced by [`crate::BookingClient`] and [`crate::SessionStore`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with an error body.
    #[error("API error {code} (HTTP {status}): {message}")]
    Api {
        status: u16,
        /// One of the [`api_protocol::error_codes`] constants.
        code: String,
        message: String,
    },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Session storage error: {0}")]
    Session(#[from] std::io::Error),
}

impl ClientError {
    /// Returns the wire error code if this is an [`ClientError::Api`] error.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
