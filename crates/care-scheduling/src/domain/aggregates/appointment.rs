//! Appointment Aggregate
//!
//! Status workflow: requested appointments start Pending; an administrator
//! confirms them (Scheduled) or cancels them with a reason (Cancelled). A
//! cancelled appointment may be re-confirmed, which clears the reason.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::{AppointmentEvent, DomainEvent};
use care_common::EntityId;

#[derive(Clone, Debug)]
pub struct Appointment {
    id: EntityId,
    user_id: EntityId,
    patient_id: EntityId,
    physician: String,
    schedule: DateTime<Utc>,
    reason: String,
    note: Option<String>,
    status: AppointmentStatus,
    cancellation_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Scheduled,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Appointment {
    /// Request a new appointment (patient-facing; starts Pending).
    pub fn request(
        user_id: EntityId,
        patient_id: EntityId,
        physician: impl Into<String>,
        schedule: DateTime<Utc>,
        reason: impl Into<String>,
        note: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let id = EntityId::new();

        let mut appointment = Self {
            id: id.clone(),
            user_id,
            patient_id,
            physician: physician.into(),
            schedule,
            reason: reason.into(),
            note,
            status: AppointmentStatus::Pending,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
            events: vec![],
        };
        appointment.raise_event(DomainEvent::Appointment(AppointmentEvent::Requested {
            appointment_id: id,
        }));
        appointment
    }

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn user_id(&self) -> &EntityId { &self.user_id }
    pub fn patient_id(&self) -> &EntityId { &self.patient_id }
    pub fn physician(&self) -> &str { &self.physician }
    pub fn schedule(&self) -> DateTime<Utc> { self.schedule }
    pub fn reason(&self) -> &str { &self.reason }
    pub fn note(&self) -> Option<&str> { self.note.as_deref() }
    pub fn status(&self) -> &AppointmentStatus { &self.status }
    pub fn cancellation_reason(&self) -> Option<&str> { self.cancellation_reason.as_deref() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    /// Confirm the appointment, optionally moving it or reassigning the
    /// physician.
    pub fn confirm(
        &mut self,
        schedule: Option<DateTime<Utc>>,
        physician: Option<String>,
    ) -> Result<(), AppointmentError> {
        if self.status == AppointmentStatus::Scheduled {
            return Err(AppointmentError::AlreadyScheduled);
        }
        if let Some(schedule) = schedule {
            self.schedule = schedule;
        }
        if let Some(physician) = physician {
            self.physician = physician;
        }
        self.status = AppointmentStatus::Scheduled;
        self.cancellation_reason = None;
        self.touch();
        self.raise_event(DomainEvent::Appointment(AppointmentEvent::Scheduled {
            appointment_id: self.id.clone(),
        }));
        Ok(())
    }

    /// Cancel the appointment. A reason is mandatory.
    pub fn cancel(&mut self, reason: impl Into<String>) -> Result<(), AppointmentError> {
        if self.status == AppointmentStatus::Cancelled {
            return Err(AppointmentError::AlreadyCancelled);
        }
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(AppointmentError::ReasonRequired);
        }
        self.status = AppointmentStatus::Cancelled;
        self.cancellation_reason = Some(reason.clone());
        self.touch();
        self.raise_event(DomainEvent::Appointment(AppointmentEvent::Cancelled {
            appointment_id: self.id.clone(),
            reason,
        }));
        Ok(())
    }

    /// Get and clear accumulated domain events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    #[error("appointment is already scheduled")]
    AlreadyScheduled,
    #[error("appointment is already cancelled")]
    AlreadyCancelled,
    #[error("a cancellation reason is required")]
    ReasonRequired,
}
