//! Application layer
//!
//! Appointment use cases: patients request, administrators confirm or
//! cancel, the dashboard reads the recent list with per-status counts.
//! Confirmation and cancellation notify the patient over SMS; a delivery
//! failure is logged and never fails the workflow.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::aggregates::{Appointment, AppointmentError, AppointmentStatus};
use crate::ports::{AppointmentRepository, RepositoryError, SmsNotifier};
use care_common::EntityId;

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("appointment not found")]
    NotFound,
    #[error(transparent)]
    Appointment(#[from] AppointmentError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A patient's appointment request.
#[derive(Clone, Debug)]
pub struct RequestAppointmentCommand {
    pub user_id: EntityId,
    pub patient_id: EntityId,
    pub physician: String,
    pub schedule: DateTime<Utc>,
    pub reason: String,
    pub note: Option<String>,
}

/// Admin dashboard view of the recent appointment list.
#[derive(Clone, Debug, Default)]
pub struct RecentAppointments {
    pub total_count: u64,
    pub scheduled_count: u64,
    pub pending_count: u64,
    pub cancelled_count: u64,
    pub documents: Vec<Appointment>,
}

/// Appointment workflow service.
pub struct AppointmentService {
    appointments: Arc<dyn AppointmentRepository>,
    sms: Arc<dyn SmsNotifier>,
}

impl AppointmentService {
    pub fn new(appointments: Arc<dyn AppointmentRepository>, sms: Arc<dyn SmsNotifier>) -> Self {
        Self { appointments, sms }
    }

    pub async fn request_appointment(
        &self,
        command: RequestAppointmentCommand,
    ) -> Result<Appointment, SchedulingError> {
        let mut appointment = Appointment::request(
            command.user_id,
            command.patient_id,
            command.physician,
            command.schedule,
            command.reason,
            command.note,
        );
        self.appointments.save(&appointment).await?;

        for event in appointment.take_events() {
            tracing::debug!(?event, "domain event");
        }
        tracing::info!(appointment = %appointment.id(), "appointment requested");
        Ok(appointment)
    }

    /// Confirm a pending (or previously cancelled) appointment and notify
    /// the patient.
    pub async fn confirm(
        &self,
        id: &EntityId,
        schedule: Option<DateTime<Utc>>,
        physician: Option<String>,
    ) -> Result<Appointment, SchedulingError> {
        let mut appointment = self.load(id).await?;
        appointment.confirm(schedule, physician)?;
        self.appointments.save(&appointment).await?;

        for event in appointment.take_events() {
            tracing::debug!(?event, "domain event");
        }
        tracing::info!(appointment = %appointment.id(), "appointment confirmed");

        self.notify(
            appointment.user_id().clone(),
            format!(
                "Greetings from OpenCare. Your appointment is confirmed for {} with Dr. {}.",
                format_schedule(appointment.schedule()),
                appointment.physician()
            ),
        )
        .await;

        Ok(appointment)
    }

    /// Cancel an appointment with a reason and notify the patient.
    pub async fn cancel(
        &self,
        id: &EntityId,
        reason: impl Into<String>,
    ) -> Result<Appointment, SchedulingError> {
        let mut appointment = self.load(id).await?;
        appointment.cancel(reason)?;
        self.appointments.save(&appointment).await?;

        for event in appointment.take_events() {
            tracing::debug!(?event, "domain event");
        }
        tracing::info!(appointment = %appointment.id(), "appointment cancelled");

        let reason = appointment
            .cancellation_reason()
            .unwrap_or_default()
            .to_string();
        self.notify(
            appointment.user_id().clone(),
            format!(
                "Greetings from OpenCare. We regret to inform you that your appointment for {} is cancelled. Reason: {}",
                format_schedule(appointment.schedule()),
                reason
            ),
        )
        .await;

        Ok(appointment)
    }

    pub async fn get(&self, id: &EntityId) -> Result<Appointment, SchedulingError> {
        self.load(id).await
    }

    /// Recent appointments, newest first, with per-status counts for the
    /// dashboard stat cards.
    pub async fn recent(&self) -> Result<RecentAppointments, SchedulingError> {
        let documents = self.appointments.list_recent().await?;
        let mut view = RecentAppointments {
            total_count: documents.len() as u64,
            ..RecentAppointments::default()
        };
        for appointment in &documents {
            match appointment.status() {
                AppointmentStatus::Scheduled => view.scheduled_count += 1,
                AppointmentStatus::Pending => view.pending_count += 1,
                AppointmentStatus::Cancelled => view.cancelled_count += 1,
            }
        }
        view.documents = documents;
        Ok(view)
    }

    async fn load(&self, id: &EntityId) -> Result<Appointment, SchedulingError> {
        self.appointments
            .find_by_id(id)
            .await?
            .ok_or(SchedulingError::NotFound)
    }

    async fn notify(&self, user_id: EntityId, body: String) {
        if let Err(e) = self.sms.send(&user_id, &body).await {
            tracing::warn!(user = %user_id, error = %e, "sms notification failed");
        }
    }
}

fn format_schedule(schedule: DateTime<Utc>) -> String {
    schedule.format("%b %e, %Y at %l:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{InMemoryAppointmentRepository, RecordingSmsNotifier};
    use crate::ports::NotifyError;
    use async_trait::async_trait;
    use chrono::TimeZone;

    fn command(user: &str) -> RequestAppointmentCommand {
        RequestAppointmentCommand {
            user_id: EntityId::from_string(user),
            patient_id: EntityId::from_string("patient_1"),
            physician: "John Green".into(),
            schedule: Utc.with_ymd_and_hms(2026, 9, 1, 14, 30, 0).unwrap(),
            reason: "Annual check-up".into(),
            note: Some("Prefer afternoons".into()),
        }
    }

    fn service(
        repo: Arc<InMemoryAppointmentRepository>,
        sms: Arc<RecordingSmsNotifier>,
    ) -> AppointmentService {
        AppointmentService::new(repo, sms)
    }

    #[tokio::test]
    async fn requested_appointments_start_pending() {
        let repo = Arc::new(InMemoryAppointmentRepository::new());
        let sms = Arc::new(RecordingSmsNotifier::new());
        let svc = service(repo.clone(), sms.clone());

        let appointment = svc.request_appointment(command("user_1")).await.unwrap();
        assert_eq!(appointment.status(), &AppointmentStatus::Pending);
        // Requesting alone sends nothing.
        assert!(sms.sent().is_empty());
    }

    #[tokio::test]
    async fn confirm_notifies_the_patient() {
        let repo = Arc::new(InMemoryAppointmentRepository::new());
        let sms = Arc::new(RecordingSmsNotifier::new());
        let svc = service(repo.clone(), sms.clone());

        let appointment = svc.request_appointment(command("user_1")).await.unwrap();
        let confirmed = svc.confirm(appointment.id(), None, None).await.unwrap();

        assert_eq!(confirmed.status(), &AppointmentStatus::Scheduled);
        let sent = sms.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "user_1");
        assert!(sent[0].1.contains("confirmed"));
        assert!(sent[0].1.contains("Dr. John Green"));
    }

    #[tokio::test]
    async fn cancel_notifies_with_the_reason() {
        let repo = Arc::new(InMemoryAppointmentRepository::new());
        let sms = Arc::new(RecordingSmsNotifier::new());
        let svc = service(repo.clone(), sms.clone());

        let appointment = svc.request_appointment(command("user_1")).await.unwrap();
        let cancelled = svc
            .cancel(appointment.id(), "Physician unavailable")
            .await
            .unwrap();

        assert_eq!(cancelled.status(), &AppointmentStatus::Cancelled);
        let sent = sms.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("cancelled"));
        assert!(sent[0].1.contains("Physician unavailable"));
    }

    struct FailingSms;

    #[async_trait]
    impl SmsNotifier for FailingSms {
        async fn send(&self, _user_id: &EntityId, _body: &str) -> Result<(), NotifyError> {
            Err(NotifyError("gateway timeout".into()))
        }
    }

    #[tokio::test]
    async fn sms_failure_never_fails_the_workflow() {
        let repo = Arc::new(InMemoryAppointmentRepository::new());
        let svc = AppointmentService::new(repo.clone(), Arc::new(FailingSms));

        let appointment = svc.request_appointment(command("user_1")).await.unwrap();
        let confirmed = svc.confirm(appointment.id(), None, None).await.unwrap();
        assert_eq!(confirmed.status(), &AppointmentStatus::Scheduled);
    }

    #[tokio::test]
    async fn unknown_appointment_is_not_found() {
        let svc = service(
            Arc::new(InMemoryAppointmentRepository::new()),
            Arc::new(RecordingSmsNotifier::new()),
        );
        let err = svc
            .confirm(&EntityId::from_string("ghost"), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulingError::NotFound));
    }

    #[tokio::test]
    async fn recent_counts_partition_by_status() {
        let repo = Arc::new(InMemoryAppointmentRepository::new());
        let sms = Arc::new(RecordingSmsNotifier::new());
        let svc = service(repo.clone(), sms.clone());

        let a = svc.request_appointment(command("user_1")).await.unwrap();
        let b = svc.request_appointment(command("user_2")).await.unwrap();
        svc.request_appointment(command("user_3")).await.unwrap();

        svc.confirm(a.id(), None, None).await.unwrap();
        svc.cancel(b.id(), "Double booked").await.unwrap();

        let recent = svc.recent().await.unwrap();
        assert_eq!(recent.total_count, 3);
        assert_eq!(recent.scheduled_count, 1);
        assert_eq!(recent.pending_count, 1);
        assert_eq!(recent.cancelled_count, 1);
        assert_eq!(recent.documents.len(), 3);
        assert_eq!(
            recent.total_count,
            recent.scheduled_count + recent.pending_count + recent.cancelled_count
        );
    }
}
