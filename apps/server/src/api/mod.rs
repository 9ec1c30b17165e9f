//! API endpoints.

pub mod appointments;
pub mod auth;
pub mod health;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use booking_store::BookingStore;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: BookingStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // Auth endpoints
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Appointment endpoints
        .route("/api/appointments", post(appointments::create_appointment))
        .route(
            "/api/appointments/:id",
            get(appointments::list_appointments)
                .put(appointments::update_appointment_status)
                .delete(appointments::delete_appointment),
        )
        // Health check
        .route("/api/health", get(health::health_check))
}

/// Returns the trimmed value, or `MissingField` when absent or empty.
pub(crate) fn require<'a>(value: &'a str, field: &'static str) -> ServerResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ServerError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// Normalizes an optional field: absent and empty both become `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
