//! Aggregates

pub mod patient;

pub use patient::{DocumentRef, Gender, Patient, PatientError, PatientProfile};
