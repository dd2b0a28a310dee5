//! Outbound ports

use async_trait::async_trait;

use crate::domain::aggregates::Appointment;
use care_common::EntityId;

/// Appointment store.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert or update an appointment.
    async fn save(&self, appointment: &Appointment) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Appointment>, RepositoryError>;

    /// All appointments, newest first.
    async fn list_recent(&self) -> Result<Vec<Appointment>, RepositoryError>;
}

/// SMS collaborator. Delivery is best-effort; the workflow never depends on
/// it succeeding.
#[async_trait]
pub trait SmsNotifier: Send + Sync {
    async fn send(&self, user_id: &EntityId, body: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("sms delivery failed: {0}")]
pub struct NotifyError(pub String);
