//! Wire error body and error codes.

use serde::{Deserialize, Serialize};

/// String error codes carried in error responses.
pub mod error_codes {
    /// A required field is absent or empty (HTTP 400).
    pub const MISSING_FIELD: &str = "MISSING_FIELD";
    /// A user with this email already exists (HTTP 400).
    pub const DUPLICATE_USER: &str = "DUPLICATE_USER";
    /// Unknown email or wrong password, deliberately indistinguishable
    /// (HTTP 401).
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    /// A referenced row does not exist, e.g. booking for an unknown user
    /// (HTTP 400).
    pub const INVALID_REFERENCE: &str = "INVALID_REFERENCE";
    /// The addressed resource does not exist (HTTP 404).
    pub const NOT_FOUND: &str = "NOT_FOUND";
    /// Store or unexpected failure; detail stays server-side (HTTP 500).
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Error object carried in every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// One of the [`error_codes`] constants.
    pub code: String,
    /// Human-readable message. Never contains store internals.
    pub message: String,
}

/// Top-level error body: `{"error": {"code", "message"}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_round_trip() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":{"code":"DUPLICATE_USER","message":"User already exists"}}"#)
                .unwrap();
        assert_eq!(body.error.code, error_codes::DUPLICATE_USER);
        assert_eq!(body.error.message, "User already exists");
    }
}
