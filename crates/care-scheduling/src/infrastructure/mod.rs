//! In-memory infrastructure

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;

use crate::domain::aggregates::Appointment;
use crate::ports::{AppointmentRepository, NotifyError, RepositoryError, SmsNotifier};
use care_common::EntityId;

/// In-memory appointment store.
#[derive(Default)]
pub struct InMemoryAppointmentRepository {
    appointments: DashMap<String, Appointment>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn save(&self, appointment: &Appointment) -> Result<(), RepositoryError> {
        self.appointments
            .insert(appointment.id().to_string(), appointment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Appointment>, RepositoryError> {
        Ok(self.appointments.get(id.as_str()).map(|a| a.value().clone()))
    }

    async fn list_recent(&self) -> Result<Vec<Appointment>, RepositoryError> {
        let mut all: Vec<Appointment> = self
            .appointments
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(all)
    }
}

/// Notifier that remembers every message, for tests.
#[derive(Default)]
pub struct RecordingSmsNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSmsNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SmsNotifier for RecordingSmsNotifier {
    async fn send(&self, user_id: &EntityId, body: &str) -> Result<(), NotifyError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((user_id.to_string(), body.to_string()));
        }
        Ok(())
    }
}

/// Notifier that only logs; the default when no SMS gateway is wired.
#[derive(Default)]
pub struct LogSmsNotifier;

#[async_trait]
impl SmsNotifier for LogSmsNotifier {
    async fn send(&self, user_id: &EntityId, body: &str) -> Result<(), NotifyError> {
        tracing::info!(user = %user_id, body = %body, "sms notification");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn appointment(user: &str, offset_minutes: i64) -> Appointment {
        // Creation timestamps are assigned by the aggregate; order arrival
        // through distinct schedules and rely on insertion ids for lookup.
        Appointment::request(
            EntityId::from_string(user),
            EntityId::from_string("patient_1"),
            "John Green",
            Utc::now() + Duration::minutes(offset_minutes),
            "check-up",
            None,
        )
    }

    #[tokio::test]
    async fn save_and_find() {
        let repo = InMemoryAppointmentRepository::new();
        let appointment = appointment("user_1", 0);
        repo.save(&appointment).await.unwrap();

        let found = repo.find_by_id(appointment.id()).await.unwrap().unwrap();
        assert_eq!(found.id(), appointment.id());

        assert!(repo
            .find_by_id(&EntityId::from_string("ghost"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn list_recent_is_newest_first() {
        let repo = InMemoryAppointmentRepository::new();
        let first = appointment("user_1", 0);
        repo.save(&first).await.unwrap();
        let second = appointment("user_2", 5);
        repo.save(&second).await.unwrap();

        let recent = repo.list_recent().await.unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].created_at() >= recent[1].created_at());
    }
}
