//! Patient Aggregate
//!
//! Flat record assembled once at registration and immutable afterwards.
//! Consent invariants are enforced at construction; a record without all
//! three consents cannot exist.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::events::{DomainEvent, PatientEvent};
use care_common::{Email, EntityId, Phone};

/// Patient aggregate root.
#[derive(Clone, Debug)]
pub struct Patient {
    id: EntityId,
    user_id: EntityId,
    // Identity
    name: String,
    birth_date: NaiveDate,
    gender: Gender,
    // Contact
    email: Email,
    phone: Phone,
    address: String,
    occupation: String,
    emergency_contact_name: String,
    emergency_contact_number: Phone,
    // Medical
    primary_physician: String,
    insurance_provider: String,
    insurance_policy_number: String,
    allergies: Option<String>,
    current_medication: Option<String>,
    family_medical_history: Option<String>,
    past_medical_history: Option<String>,
    // Identification
    identification_type: Option<String>,
    identification_number: Option<String>,
    identification_document: Option<DocumentRef>,
    // Consent
    treatment_consent: bool,
    disclosure_consent: bool,
    privacy_consent: bool,
    registered_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

/// Everything a registration provides, already typed and validated at the
/// field level. The aggregate adds the cross-field consent invariants.
#[derive(Clone, Debug)]
pub struct PatientProfile {
    pub user_id: EntityId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub email: Email,
    pub phone: Phone,
    pub address: String,
    pub occupation: String,
    pub emergency_contact_name: String,
    pub emergency_contact_number: Phone,
    pub primary_physician: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    pub allergies: Option<String>,
    pub current_medication: Option<String>,
    pub family_medical_history: Option<String>,
    pub past_medical_history: Option<String>,
    pub identification_type: Option<String>,
    pub identification_number: Option<String>,
    pub treatment_consent: bool,
    pub disclosure_consent: bool,
    pub privacy_consent: bool,
}

impl Patient {
    /// Register a new patient (factory method).
    pub fn register(
        profile: PatientProfile,
        identification_document: Option<DocumentRef>,
    ) -> Result<Self, PatientError> {
        if !profile.treatment_consent {
            return Err(PatientError::MissingConsent("treatment"));
        }
        if !profile.disclosure_consent {
            return Err(PatientError::MissingConsent("disclosure"));
        }
        if !profile.privacy_consent {
            return Err(PatientError::MissingConsent("privacy"));
        }

        let now = Utc::now();
        let id = EntityId::new();

        let mut patient = Self {
            id: id.clone(),
            user_id: profile.user_id.clone(),
            name: profile.name,
            birth_date: profile.birth_date,
            gender: profile.gender,
            email: profile.email,
            phone: profile.phone,
            address: profile.address,
            occupation: profile.occupation,
            emergency_contact_name: profile.emergency_contact_name,
            emergency_contact_number: profile.emergency_contact_number,
            primary_physician: profile.primary_physician,
            insurance_provider: profile.insurance_provider,
            insurance_policy_number: profile.insurance_policy_number,
            allergies: profile.allergies,
            current_medication: profile.current_medication,
            family_medical_history: profile.family_medical_history,
            past_medical_history: profile.past_medical_history,
            identification_type: profile.identification_type,
            identification_number: profile.identification_number,
            identification_document,
            treatment_consent: profile.treatment_consent,
            disclosure_consent: profile.disclosure_consent,
            privacy_consent: profile.privacy_consent,
            registered_at: now,
            events: vec![],
        };

        patient.events.push(DomainEvent::Patient(PatientEvent::Registered {
            patient_id: id,
            user_id: profile.user_id,
            registered_at: now,
        }));

        Ok(patient)
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn user_id(&self) -> &EntityId { &self.user_id }
    pub fn name(&self) -> &str { &self.name }
    pub fn birth_date(&self) -> NaiveDate { self.birth_date }
    pub fn gender(&self) -> &Gender { &self.gender }
    pub fn email(&self) -> &Email { &self.email }
    pub fn phone(&self) -> &Phone { &self.phone }
    pub fn address(&self) -> &str { &self.address }
    pub fn occupation(&self) -> &str { &self.occupation }
    pub fn emergency_contact_name(&self) -> &str { &self.emergency_contact_name }
    pub fn emergency_contact_number(&self) -> &Phone { &self.emergency_contact_number }
    pub fn primary_physician(&self) -> &str { &self.primary_physician }
    pub fn insurance_provider(&self) -> &str { &self.insurance_provider }
    pub fn insurance_policy_number(&self) -> &str { &self.insurance_policy_number }
    pub fn allergies(&self) -> Option<&str> { self.allergies.as_deref() }
    pub fn current_medication(&self) -> Option<&str> { self.current_medication.as_deref() }
    pub fn family_medical_history(&self) -> Option<&str> { self.family_medical_history.as_deref() }
    pub fn past_medical_history(&self) -> Option<&str> { self.past_medical_history.as_deref() }
    pub fn identification_type(&self) -> Option<&str> { self.identification_type.as_deref() }
    pub fn identification_number(&self) -> Option<&str> { self.identification_number.as_deref() }
    pub fn identification_document(&self) -> Option<&DocumentRef> {
        self.identification_document.as_ref()
    }
    pub fn registered_at(&self) -> DateTime<Utc> { self.registered_at }

    /// Get and clear accumulated domain events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Reference to a stored identification document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: EntityId,
    pub url: String,
    pub file_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Result<Self, PatientError> {
        match value.to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(PatientError::UnknownGender(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientError {
    #[error("{0} consent is required to register")]
    MissingConsent(&'static str),
    #[error("unknown gender: {0}")]
    UnknownGender(String),
}
