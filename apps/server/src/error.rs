//! Server error types.

use api_protocol::{ApiError, ApiErrorBody, error_codes};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use booking_store::StoreError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A required field is absent or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A user with this email already exists.
    #[error("User already exists")]
    DuplicateUser,

    /// Unknown email or wrong password. Deliberately carries no detail so
    /// the two cases cannot be told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A referenced row does not exist.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Store(StoreError),

    /// Password hashing error.
    #[error("Auth error: {0}")]
    Auth(#[from] auth::AuthError),
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        match e {
            // The unique constraint is the backstop for racing
            // registrations; its violation is a duplicate user, not an
            // internal error.
            StoreError::AlreadyExists {
                entity_type: "user",
                ..
            } => ServerError::DuplicateUser,
            StoreError::ForeignKeyViolation(detail) => ServerError::InvalidReference(detail),
            other => ServerError::Store(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ServerError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                error_codes::MISSING_FIELD,
                format!("{field} is required"),
            ),
            ServerError::DuplicateUser => (
                StatusCode::BAD_REQUEST,
                error_codes::DUPLICATE_USER,
                "User already exists".to_string(),
            ),
            ServerError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                error_codes::INVALID_CREDENTIALS,
                "Invalid credentials".to_string(),
            ),
            ServerError::InvalidReference(detail) => {
                tracing::warn!(detail = %detail, "Rejected insert referencing a missing row");
                (
                    StatusCode::BAD_REQUEST,
                    error_codes::INVALID_REFERENCE,
                    "Referenced user does not exist".to_string(),
                )
            }
            ServerError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg.clone())
            }
            // Store internals are logged, never returned to the client.
            ServerError::Store(e) => {
                tracing::error!(error = %e, "Store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Auth(e) => {
                tracing::error!(error = %e, "Password hashing failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ApiErrorBody {
            error: ApiError {
                code: error_code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
