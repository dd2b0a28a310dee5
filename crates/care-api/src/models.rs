//! API models

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use care_intake::{IntakeError, Patient};
use care_scheduling::{Appointment, RecentAppointments, SchedulingError};

/// Standard API response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Error payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Per-field validation messages, when the error came from the form
    /// schema.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, String>,
}

/// API error, mapped onto status codes and the error envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{message}")]
    Validation {
        message: String,
        fields: HashMap<String, String>,
    },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>, fields: HashMap<String, String>) -> Self {
        Self::Validation {
            message: message.into(),
            fields,
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::NotFound => Self::NotFound("Patient not found"),
            IntakeError::MissingField(_)
            | IntakeError::InvalidField { .. }
            | IntakeError::Patient(_) => Self::validation(e.to_string(), HashMap::new()),
            IntakeError::Storage(_) | IntakeError::Repository(_) => Self::Upstream(e.to_string()),
        }
    }
}

impl From<SchedulingError> for ApiError {
    fn from(e: SchedulingError) -> Self {
        match e {
            SchedulingError::NotFound => Self::NotFound("Appointment not found"),
            SchedulingError::Appointment(_) => Self::Conflict(e.to_string()),
            SchedulingError::Repository(_) => Self::Upstream(e.to_string()),
        }
    }
}

impl From<care_forms::FormsError> for ApiError {
    fn from(e: care_forms::FormsError) -> Self {
        match e {
            care_forms::FormsError::SubmissionInFlight => Self::Conflict(e.to_string()),
            other => Self::validation(other.to_string(), HashMap::new()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        };
        let fields = match self {
            Self::Validation { ref fields, .. } => fields.clone(),
            _ => HashMap::new(),
        };
        let body = ApiResponse::<()>::error(ErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
            fields,
        });
        (status, Json(body)).into_response()
    }
}

// ============ Patients ============

/// Patient registration request; field names mirror the web form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatientRequest {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub address: String,
    pub occupation: String,
    pub emergency_contact_name: String,
    pub emergency_contact_number: String,
    pub primary_physician: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub current_medication: Option<String>,
    #[serde(default)]
    pub family_medical_history: Option<String>,
    #[serde(default)]
    pub past_medical_history: Option<String>,
    #[serde(default)]
    pub identification_type: Option<String>,
    #[serde(default)]
    pub identification_number: Option<String>,
    #[serde(default)]
    pub identification_document: Option<DocumentUpload>,
    #[serde(default)]
    pub treatment_consent: bool,
    #[serde(default)]
    pub disclosure_consent: bool,
    #[serde(default)]
    pub privacy_consent: bool,
}

/// Scanned identification document attached to a registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Created registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredResponse {
    pub patient_id: String,
    /// Where the client navigates next.
    pub redirect: String,
}

/// Patient record view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub primary_physician: String,
    pub insurance_provider: String,
    pub identification_document_url: Option<String>,
}

impl From<&Patient> for PatientResponse {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id().to_string(),
            user_id: patient.user_id().to_string(),
            name: patient.name().to_string(),
            email: patient.email().to_string(),
            phone: patient.phone().to_string(),
            birth_date: patient.birth_date(),
            gender: patient.gender().to_string(),
            primary_physician: patient.primary_physician().to_string(),
            insurance_provider: patient.insurance_provider().to_string(),
            identification_document_url: patient
                .identification_document()
                .map(|d| d.url.clone()),
        }
    }
}

/// Context for the new-appointment page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointmentContext {
    pub patient: PatientResponse,
    pub physicians: Vec<PhysicianOption>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PhysicianOption {
    pub value: String,
    pub label: String,
}

// ============ Appointments ============

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub user_id: String,
    pub patient_id: String,
    pub physician: String,
    pub schedule: DateTime<Utc>,
    pub reason: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Admin status update: confirm or cancel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub action: AppointmentAction,
    #[serde(default)]
    pub schedule: Option<DateTime<Utc>>,
    #[serde(default)]
    pub physician: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentAction {
    Schedule,
    Cancel,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub id: String,
    pub user_id: String,
    pub patient_id: String,
    pub physician: String,
    pub schedule: DateTime<Utc>,
    pub reason: String,
    pub note: Option<String>,
    pub status: String,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Appointment> for AppointmentResponse {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id().to_string(),
            user_id: appointment.user_id().to_string(),
            patient_id: appointment.patient_id().to_string(),
            physician: appointment.physician().to_string(),
            schedule: appointment.schedule(),
            reason: appointment.reason().to_string(),
            note: appointment.note().map(str::to_string),
            status: appointment.status().as_str().to_string(),
            cancellation_reason: appointment.cancellation_reason().map(str::to_string),
            created_at: appointment.created_at(),
        }
    }
}

/// Dashboard stat cards plus the recent list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentAppointmentsResponse {
    pub total_count: u64,
    pub scheduled_count: u64,
    pub pending_count: u64,
    pub cancelled_count: u64,
    pub documents: Vec<AppointmentResponse>,
}

impl From<&RecentAppointments> for RecentAppointmentsResponse {
    fn from(recent: &RecentAppointments) -> Self {
        Self {
            total_count: recent.total_count,
            scheduled_count: recent.scheduled_count,
            pending_count: recent.pending_count,
            cancelled_count: recent.cancelled_count,
            documents: recent.documents.iter().map(AppointmentResponse::from).collect(),
        }
    }
}
