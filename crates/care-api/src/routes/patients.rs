//! Patient endpoints
//!
//! Registration runs the full form pipeline server-side: the submitted
//! values go through the registration form controller (normalization +
//! schema validation + the submission guard) before the typed command
//! reaches the registration service.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

use crate::models::*;
use crate::ApiState;
use care_common::{emit_view_metric, EntityId};
use care_forms::{FieldValue, FileAttachment, FormsError};
use care_intake::forms::{physician_options, registration_form};
use care_intake::RegisterPatientCommand;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", post(register_patient))
        .route("/:user_id", get(get_patient))
        .route("/:user_id/new-appointment", get(new_appointment_context))
}

/// Register a patient
#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = RegisterPatientRequest,
    responses(
        (status = 201, description = "Patient registered", body = RegisteredResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 502, description = "Record store unavailable", body = ErrorResponse)
    ),
    tag = "patients"
)]
pub async fn register_patient(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredResponse>>), ApiError> {
    let user_id = EntityId::from_string(request.user_id.clone());

    let mut form = registration_form().controller();
    for (name, value) in field_values(&request) {
        form.change(&name, value)?;
    }

    let values = match form.begin_submit() {
        Ok(values) => values,
        Err(FormsError::Invalid) => {
            return Err(ApiError::validation(
                "Registration form has validation errors",
                form.errors().clone(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let command = RegisterPatientCommand::from_values(user_id, &values)?;
    match state.registration.register(command).await {
        Ok(registered) => {
            form.finish_submit(Ok(()));
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(RegisteredResponse {
                    patient_id: registered.patient_id.to_string(),
                    redirect: registered.redirect.path,
                })),
            ))
        }
        Err(e) => {
            form.finish_submit(Err(e.to_string()));
            Err(e.into())
        }
    }
}

/// Get the patient registered by a user
#[utoipa::path(
    get,
    path = "/api/v1/patients/{user_id}",
    params(("user_id" = String, Path,)),
    responses(
        (status = 200, description = "Patient record", body = PatientResponse),
        (status = 404, description = "No patient for this user", body = ErrorResponse)
    ),
    tag = "patients"
)]
pub async fn get_patient(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<PatientResponse>>, ApiError> {
    let patient = state
        .registration
        .lookup(&EntityId::from_string(user_id))
        .await?;
    Ok(Json(ApiResponse::success(PatientResponse::from(&patient))))
}

/// New-appointment page context
#[utoipa::path(
    get,
    path = "/api/v1/patients/{user_id}/new-appointment",
    params(("user_id" = String, Path,)),
    responses(
        (status = 200, description = "Context for booking an appointment", body = NewAppointmentContext),
        (status = 404, description = "No patient for this user", body = ErrorResponse)
    ),
    tag = "patients"
)]
pub async fn new_appointment_context(
    State(state): State<Arc<ApiState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<NewAppointmentContext>>, ApiError> {
    let patient = state
        .registration
        .lookup(&EntityId::from_string(user_id))
        .await?;

    // Best-effort page-view metric; never blocks or fails this request.
    emit_view_metric(state.telemetry.clone(), "new-appointment", patient.name());

    Ok(Json(ApiResponse::success(NewAppointmentContext {
        patient: PatientResponse::from(&patient),
        physicians: physician_options()
            .into_iter()
            .map(|o| PhysicianOption {
                value: o.value,
                label: o.label,
            })
            .collect(),
    })))
}

fn field_values(request: &RegisterPatientRequest) -> Vec<(String, FieldValue)> {
    let mut values = vec![
        ("name".into(), FieldValue::text(request.name.clone())),
        ("email".into(), FieldValue::text(request.email.clone())),
        ("phone".into(), FieldValue::text(request.phone.clone())),
        (
            "birthDate".into(),
            FieldValue::Date(request.birth_date.and_time(chrono::NaiveTime::MIN)),
        ),
        ("gender".into(), FieldValue::choice(request.gender.clone())),
        ("address".into(), FieldValue::text(request.address.clone())),
        (
            "occupation".into(),
            FieldValue::text(request.occupation.clone()),
        ),
        (
            "emergencyContactName".into(),
            FieldValue::text(request.emergency_contact_name.clone()),
        ),
        (
            "emergencyContactNumber".into(),
            FieldValue::text(request.emergency_contact_number.clone()),
        ),
        (
            "primaryPhysician".into(),
            FieldValue::choice(request.primary_physician.clone()),
        ),
        (
            "insuranceProvider".into(),
            FieldValue::text(request.insurance_provider.clone()),
        ),
        (
            "insurancePolicyNumber".into(),
            FieldValue::text(request.insurance_policy_number.clone()),
        ),
        (
            "treatmentConsent".into(),
            FieldValue::Bool(request.treatment_consent),
        ),
        (
            "disclosureConsent".into(),
            FieldValue::Bool(request.disclosure_consent),
        ),
        (
            "privacyConsent".into(),
            FieldValue::Bool(request.privacy_consent),
        ),
    ];

    let optional_text = [
        ("allergies", &request.allergies),
        ("currentMedication", &request.current_medication),
        ("familyMedicalHistory", &request.family_medical_history),
        ("pastMedicalHistory", &request.past_medical_history),
        ("identificationNumber", &request.identification_number),
    ];
    for (name, value) in optional_text {
        if let Some(value) = value {
            values.push((name.into(), FieldValue::text(value.clone())));
        }
    }
    if let Some(id_type) = &request.identification_type {
        values.push((
            "identificationType".into(),
            FieldValue::choice(id_type.clone()),
        ));
    }
    if let Some(document) = &request.identification_document {
        values.push((
            "identificationDocument".into(),
            FieldValue::Files(vec![FileAttachment::new(
                document.file_name.clone(),
                document.content_type.clone(),
                document.bytes.clone(),
            )]),
        ));
    }

    values
}
