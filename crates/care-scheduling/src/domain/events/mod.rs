//! Scheduling domain events

use care_common::EntityId;

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Appointment(AppointmentEvent),
}

#[derive(Clone, Debug)]
pub enum AppointmentEvent {
    Requested { appointment_id: EntityId },
    Scheduled { appointment_id: EntityId },
    Cancelled { appointment_id: EntityId, reason: String },
}
