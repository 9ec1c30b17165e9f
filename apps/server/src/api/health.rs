//! Health check endpoint.

use std::sync::Arc;

use api_protocol::HealthResponse;
use axum::{Json, extract::State};
use booking_store::BookingStore;

use crate::state::AppState;

/// Probes store connectivity. Never fails: always HTTP 200 with a status
/// field, `"degraded"` when the store does not answer.
pub async fn health_check<S: BookingStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<HealthResponse> {
    let database = match state.store.ping().await {
        Ok(()) => match state.store.backing_file() {
            Some(path) if !path.exists() => "not found",
            _ => "connected",
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health probe failed");
            "disconnected"
        }
    };

    let status = if database == "connected" { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
    })
}
