//! Intake domain events

use care_common::EntityId;
use chrono::{DateTime, Utc};

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Patient(PatientEvent),
}

#[derive(Clone, Debug)]
pub enum PatientEvent {
    Registered {
        patient_id: EntityId,
        user_id: EntityId,
        registered_at: DateTime<Utc>,
    },
}
