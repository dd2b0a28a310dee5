//! Aggregates

pub mod appointment;

pub use appointment::{Appointment, AppointmentError, AppointmentStatus};
