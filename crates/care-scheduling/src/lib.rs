//! OpenCare appointment scheduling
//!
//! The physician-facing half of the platform: patients request
//! appointments, administrators confirm or cancel them, and the admin
//! dashboard aggregates the recent list with per-status counts. Patient
//! notifications go out through the SMS port as best-effort messages.

pub mod application;
pub mod domain;
pub mod forms;
pub mod infrastructure;
pub mod ports;

pub use application::{
    AppointmentService, RecentAppointments, RequestAppointmentCommand, SchedulingError,
};
pub use domain::aggregates::{Appointment, AppointmentError, AppointmentStatus};
pub use domain::events::{AppointmentEvent, DomainEvent};
pub use ports::{AppointmentRepository, NotifyError, RepositoryError, SmsNotifier};
