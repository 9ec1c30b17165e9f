//! Authentication API endpoints.

use std::sync::Arc;

use api_protocol::{AuthResponse, LoginRequest, RegisterRequest};
use axum::{Json, extract::State, http::StatusCode};
use booking_store::BookingStore;
use entities::NewUser;

use crate::api::require;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Registers a new user.
///
/// The email pre-check answers the common case; the store's unique
/// constraint decides racing registrations (see `From<StoreError>`).
pub async fn register<S: BookingStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<RegisterRequest>,
) -> ServerResult<(StatusCode, Json<AuthResponse>)> {
    let email = require(&request.email, "email")?;
    let password = require(&request.password, "password")?;
    let full_name = require(&request.full_name, "fullName")?;
    let phone = require(&request.phone, "phone")?;

    if state.store.get_user_by_email(email).await?.is_some() {
        return Err(ServerError::DuplicateUser);
    }

    let password_hash = auth::hash_password(password)?;

    let user = state
        .store
        .create_user(NewUser {
            email: email.to_string(),
            password_hash,
            full_name: full_name.to_string(),
            phone: phone.to_string(),
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            user: user.public(),
        }),
    ))
}

/// Logs a user in by credential check.
///
/// Unknown email and wrong password produce the identical response, so the
/// endpoint cannot be used to enumerate accounts.
pub async fn login<S: BookingStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<AuthResponse>> {
    let email = require(&request.email, "email")?;
    let password = require(&request.password, "password")?;

    let user = state
        .store
        .get_user_by_email(email)
        .await?
        .ok_or(ServerError::InvalidCredentials)?;

    if !auth::verify_password(password, &user.password_hash)? {
        return Err(ServerError::InvalidCredentials);
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        success: true,
        user: user.public(),
    }))
}
