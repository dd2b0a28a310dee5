//! Appointment endpoints
//!
//! Patients request appointments; the admin workflow confirms or cancels
//! them and reads the dashboard aggregation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::*;
use crate::ApiState;
use care_common::EntityId;
use care_forms::{FieldValue, FormsError};
use care_intake::forms::physician_options;
use care_scheduling::forms::request_form;
use care_scheduling::RequestAppointmentCommand;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", post(create_appointment))
        .route("/:id", get(get_appointment).patch(update_appointment))
}

pub fn admin_router() -> Router<Arc<ApiState>> {
    Router::new().route("/appointments/recent", get(recent_appointments))
}

/// Request an appointment
#[utoipa::path(
    post,
    path = "/api/v1/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment requested", body = AppointmentResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AppointmentResponse>>), ApiError> {
    let mut form = request_form(physician_options()).controller();
    form.change("physician", FieldValue::choice(request.physician.clone()))?;
    form.change("schedule", FieldValue::Date(request.schedule.naive_utc()))?;
    form.change("reason", FieldValue::text(request.reason.clone()))?;
    if let Some(note) = &request.note {
        form.change("note", FieldValue::text(note.clone()))?;
    }
    if let Err(e) = form.begin_submit() {
        return Err(match e {
            FormsError::Invalid => ApiError::validation(
                "Appointment form has validation errors",
                form.errors().clone(),
            ),
            other => other.into(),
        });
    }

    let appointment = state
        .appointments
        .request_appointment(RequestAppointmentCommand {
            user_id: EntityId::from_string(request.user_id),
            patient_id: EntityId::from_string(request.patient_id),
            physician: request.physician,
            schedule: request.schedule,
            reason: request.reason,
            note: request.note,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AppointmentResponse::from(&appointment))),
    ))
}

/// Get an appointment
#[utoipa::path(
    get,
    path = "/api/v1/appointments/{id}",
    params(("id" = String, Path,)),
    responses(
        (status = 200, description = "Appointment", body = AppointmentResponse),
        (status = 404, description = "Unknown appointment", body = ErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AppointmentResponse>>, ApiError> {
    let appointment = state.appointments.get(&EntityId::from_string(id)).await?;
    Ok(Json(ApiResponse::success(AppointmentResponse::from(
        &appointment,
    ))))
}

/// Confirm or cancel an appointment (admin workflow)
#[utoipa::path(
    patch,
    path = "/api/v1/appointments/{id}",
    params(("id" = String, Path,)),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Updated appointment", body = AppointmentResponse),
        (status = 404, description = "Unknown appointment", body = ErrorResponse),
        (status = 409, description = "Invalid status transition", body = ErrorResponse),
        (status = 422, description = "Missing cancellation reason", body = ErrorResponse)
    ),
    tag = "appointments"
)]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<ApiResponse<AppointmentResponse>>, ApiError> {
    let id = EntityId::from_string(id);
    let appointment = match request.action {
        AppointmentAction::Schedule => {
            state
                .appointments
                .confirm(&id, request.schedule, request.physician)
                .await?
        }
        AppointmentAction::Cancel => {
            let reason = request
                .cancellation_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| {
                    ApiError::validation(
                        "A cancellation reason is required",
                        HashMap::from([(
                            "cancellationReason".to_string(),
                            "This field is required".to_string(),
                        )]),
                    )
                })?;
            state.appointments.cancel(&id, reason).await?
        }
    };

    Ok(Json(ApiResponse::success(AppointmentResponse::from(
        &appointment,
    ))))
}

/// Admin dashboard: recent appointments with status counts
#[utoipa::path(
    get,
    path = "/api/v1/admin/appointments/recent",
    responses(
        (status = 200, description = "Recent appointments", body = RecentAppointmentsResponse)
    ),
    tag = "admin"
)]
pub async fn recent_appointments(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ApiResponse<RecentAppointmentsResponse>>, ApiError> {
    let recent = state.appointments.recent().await?;
    Ok(Json(ApiResponse::success(
        RecentAppointmentsResponse::from(&recent),
    )))
}
