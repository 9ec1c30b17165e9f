//! Appointment API endpoints.
//!
//! No ownership check is performed anywhere here: any caller may list or
//! mutate any user's appointments by id. This mirrors the documented
//! limitation of the API contract.

use std::sync::Arc;

use api_protocol::{CreateAppointmentRequest, SuccessResponse, UpdateAppointmentStatusRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use booking_store::BookingStore;
use entities::{Appointment, NewAppointment};

use crate::api::{optional, require};
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Lists a user's appointments, most recent first.
pub async fn list_appointments<S: BookingStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(user_id): Path<i64>,
) -> ServerResult<Json<Vec<Appointment>>> {
    let appointments = state.store.list_appointments(user_id).await?;
    Ok(Json(appointments))
}

/// Books a new appointment. The stored status is always `"pending"`;
/// anything the client sends for it is ignored.
pub async fn create_appointment<S: BookingStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> ServerResult<(StatusCode, Json<Appointment>)> {
    let user_id = request.user_id.ok_or(ServerError::MissingField("userId"))?;
    let patient_name = require(&request.patient_name, "patientName")?;
    let phone = require(&request.phone, "phone")?;
    let specialty = require(&request.specialty, "specialty")?;
    let date = require(&request.date, "date")?;
    let time = require(&request.time, "time")?;

    let appointment = state
        .store
        .create_appointment(NewAppointment {
            user_id,
            patient_name: patient_name.to_string(),
            phone: phone.to_string(),
            email: optional(request.email),
            specialty: specialty.to_string(),
            doctor: optional(request.doctor),
            date: date.to_string(),
            time: time.to_string(),
            symptoms: optional(request.symptoms),
        })
        .await?;

    tracing::info!(
        appointment_id = appointment.id,
        user_id = appointment.user_id,
        "Appointment created"
    );

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Sets the status of an appointment.
pub async fn update_appointment_status<S: BookingStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateAppointmentStatusRequest>,
) -> ServerResult<Json<Appointment>> {
    let status = require(&request.status, "status")?;

    let appointment = state
        .store
        .update_appointment_status(id, status)
        .await?
        .ok_or_else(|| ServerError::NotFound("Appointment not found".to_string()))?;

    tracing::info!(appointment_id = id, status = %appointment.status, "Appointment status updated");

    Ok(Json(appointment))
}

/// Deletes an appointment. Idempotent: a missing id still reports success.
pub async fn delete_appointment<S: BookingStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<i64>,
) -> ServerResult<Json<SuccessResponse>> {
    state.store.delete_appointment(id).await?;

    tracing::info!(appointment_id = id, "Appointment deleted");

    Ok(Json(SuccessResponse { success: true }))
}
