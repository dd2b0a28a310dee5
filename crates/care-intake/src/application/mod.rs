//! Application layer
//!
//! Orchestrates the registration use case: assemble a typed command from a
//! validated form-value snapshot, run the one document branch, persist the
//! patient exactly once, and hand back the navigation target.

use std::sync::Arc;

use crate::domain::aggregates::{Gender, Patient, PatientProfile};
use crate::ports::{FileStore, PatientRepository, RepositoryError, StorageError, UploadPayload};
use care_common::{Email, EntityId, Phone};
use care_forms::{FieldValue, FormValues};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("field '{field}' is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
    #[error("patient not found")]
    NotFound,
    #[error(transparent)]
    Patient(#[from] crate::domain::aggregates::PatientError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Where the caller goes after a successful step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub path: String,
}

impl Navigation {
    pub fn new_appointment(user_id: &EntityId) -> Self {
        Self {
            path: format!("/patients/{user_id}/new-appointment"),
        }
    }
}

/// Outcome of a successful registration.
#[derive(Clone, Debug)]
pub struct Registered {
    pub patient_id: EntityId,
    pub redirect: Navigation,
}

/// A registration request, typed and ready for the domain.
#[derive(Clone, Debug)]
pub struct RegisterPatientCommand {
    pub profile: PatientProfile,
    pub identification_document: Option<UploadPayload>,
}

impl RegisterPatientCommand {
    /// Assemble the command from a validated form-value snapshot.
    ///
    /// The schema has already run; this is shape extraction, and any
    /// mismatch left over is reported per field rather than panicking.
    pub fn from_values(user_id: EntityId, values: &FormValues) -> Result<Self, IntakeError> {
        let gender_raw = require_choice(values, "gender")?;
        let profile = PatientProfile {
            user_id,
            name: require_text(values, "name")?,
            birth_date: require_date(values, "birthDate")?,
            gender: Gender::parse(&gender_raw)?,
            email: parse_email(values, "email")?,
            phone: require_phone(values, "phone")?,
            address: require_text(values, "address")?,
            occupation: require_text(values, "occupation")?,
            emergency_contact_name: require_text(values, "emergencyContactName")?,
            emergency_contact_number: require_phone(values, "emergencyContactNumber")?,
            primary_physician: require_choice(values, "primaryPhysician")?,
            insurance_provider: require_text(values, "insuranceProvider")?,
            insurance_policy_number: require_text(values, "insurancePolicyNumber")?,
            allergies: optional_text(values, "allergies")?,
            current_medication: optional_text(values, "currentMedication")?,
            family_medical_history: optional_text(values, "familyMedicalHistory")?,
            past_medical_history: optional_text(values, "pastMedicalHistory")?,
            identification_type: optional_choice(values, "identificationType")?,
            identification_number: optional_text(values, "identificationNumber")?,
            treatment_consent: flag(values, "treatmentConsent")?,
            disclosure_consent: flag(values, "disclosureConsent")?,
            privacy_consent: flag(values, "privacyConsent")?,
        };

        Ok(Self {
            profile,
            identification_document: document(values),
        })
    }
}

/// Registration workflow (the submission handler).
pub struct RegistrationService {
    patients: Arc<dyn PatientRepository>,
    files: Arc<dyn FileStore>,
}

impl RegistrationService {
    pub fn new(patients: Arc<dyn PatientRepository>, files: Arc<dyn FileStore>) -> Self {
        Self { patients, files }
    }

    /// Register a patient.
    ///
    /// One conditional branch: a present identification document is uploaded
    /// and referenced; an absent one leaves the payload file-free. The
    /// record store is called exactly once, with no retry; a failure is
    /// logged and returned so the caller can surface it.
    pub async fn register(
        &self,
        command: RegisterPatientCommand,
    ) -> Result<Registered, IntakeError> {
        let RegisterPatientCommand {
            profile,
            identification_document,
        } = command;

        let document = match identification_document {
            Some(payload) => {
                tracing::debug!(file = %payload.file_name, "uploading identification document");
                Some(self.files.upload(payload).await?)
            }
            None => None,
        };

        let user_id = profile.user_id.clone();
        let mut patient = Patient::register(profile, document)?;

        let patient_id = self.patients.create(&patient).await.map_err(|e| {
            tracing::error!(user = %user_id, error = %e, "patient registration failed");
            e
        })?;

        for event in patient.take_events() {
            tracing::debug!(?event, "domain event");
        }
        tracing::info!(patient = %patient_id, user = %user_id, "patient registered");

        Ok(Registered {
            patient_id,
            redirect: Navigation::new_appointment(&user_id),
        })
    }

    /// Look up the patient a user registered as (the appointment entry
    /// point).
    pub async fn lookup(&self, user_id: &EntityId) -> Result<Patient, IntakeError> {
        self.patients
            .find_by_user(user_id)
            .await?
            .ok_or(IntakeError::NotFound)
    }
}

// =============================================================================
// Value extraction
// =============================================================================

fn require_text(values: &FormValues, field: &'static str) -> Result<String, IntakeError> {
    match values.get(field) {
        Some(FieldValue::Text(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        None | Some(FieldValue::Empty) | Some(FieldValue::Text(_)) => {
            Err(IntakeError::MissingField(field))
        }
        Some(other) => Err(shape_error(field, "text", other)),
    }
}

fn optional_text(values: &FormValues, field: &'static str) -> Result<Option<String>, IntakeError> {
    match values.get(field) {
        Some(FieldValue::Text(s)) if !s.trim().is_empty() => Ok(Some(s.trim().to_string())),
        None | Some(FieldValue::Empty) | Some(FieldValue::Text(_)) => Ok(None),
        Some(other) => Err(shape_error(field, "text", other)),
    }
}

fn parse_email(values: &FormValues, field: &'static str) -> Result<Email, IntakeError> {
    let raw = require_text(values, field)?;
    Email::new(raw).map_err(|e| IntakeError::InvalidField {
        field,
        reason: e.to_string(),
    })
}

fn require_phone(values: &FormValues, field: &'static str) -> Result<Phone, IntakeError> {
    match values.get(field) {
        Some(FieldValue::Phone(s)) => Phone::from_e164(s).map_err(|e| IntakeError::InvalidField {
            field,
            reason: e.to_string(),
        }),
        None | Some(FieldValue::Empty) => Err(IntakeError::MissingField(field)),
        Some(other) => Err(shape_error(field, "a phone number", other)),
    }
}

fn require_date(values: &FormValues, field: &'static str) -> Result<NaiveDate, IntakeError> {
    match values.get(field) {
        Some(FieldValue::Date(dt)) => Ok(dt.date()),
        None | Some(FieldValue::Empty) => Err(IntakeError::MissingField(field)),
        Some(other) => Err(shape_error(field, "a date", other)),
    }
}

fn require_choice(values: &FormValues, field: &'static str) -> Result<String, IntakeError> {
    match values.get(field) {
        Some(FieldValue::Choice(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        None | Some(FieldValue::Empty) | Some(FieldValue::Choice(_)) => {
            Err(IntakeError::MissingField(field))
        }
        Some(other) => Err(shape_error(field, "a selection", other)),
    }
}

fn optional_choice(
    values: &FormValues,
    field: &'static str,
) -> Result<Option<String>, IntakeError> {
    match values.get(field) {
        Some(FieldValue::Choice(s)) if !s.trim().is_empty() => Ok(Some(s.trim().to_string())),
        None | Some(FieldValue::Empty) | Some(FieldValue::Choice(_)) => Ok(None),
        Some(other) => Err(shape_error(field, "a selection", other)),
    }
}

fn flag(values: &FormValues, field: &'static str) -> Result<bool, IntakeError> {
    match values.get(field) {
        Some(FieldValue::Bool(b)) => Ok(*b),
        None | Some(FieldValue::Empty) => Ok(false),
        Some(other) => Err(shape_error(field, "a boolean", other)),
    }
}

/// The single document branch: first attached file or nothing.
fn document(values: &FormValues) -> Option<UploadPayload> {
    match values.get("identificationDocument") {
        Some(FieldValue::Files(files)) => files.first().map(|f| UploadPayload {
            blob_file: f.bytes.clone(),
            file_name: f.file_name.clone(),
            content_type: f.content_type.clone(),
        }),
        _ => None,
    }
}

fn shape_error(field: &'static str, expected: &str, found: &FieldValue) -> IntakeError {
    IntakeError::InvalidField {
        field,
        reason: format!("expected {expected}, got {}", found.kind_name()),
    }
}
