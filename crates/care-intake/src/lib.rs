//! OpenCare patient intake
//!
//! The patient-facing half of the platform: the multi-section registration
//! form, the Patient aggregate it produces, and the registration workflow
//! that hands a validated record to the persistence collaborator.
//!
//! ## Architecture
//!
//! - **Domain**: `Patient` aggregate with consent invariants, domain events
//! - **Application**: `RegistrationService` orchestration (the submission
//!   handler), typed command assembly from form values
//! - **Ports**: outbound interfaces for the record store and file storage
//! - **Infrastructure**: in-memory implementations for tests and local runs
//! - **Forms**: the declarative registration form definition

pub mod application;
pub mod domain;
pub mod forms;
pub mod infrastructure;
pub mod ports;

pub use application::{
    IntakeError, Navigation, RegisterPatientCommand, Registered, RegistrationService,
};
pub use domain::aggregates::{DocumentRef, Gender, Patient, PatientError, PatientProfile};
pub use domain::events::{DomainEvent, PatientEvent};
pub use ports::{FileStore, PatientRepository, RepositoryError, StorageError, UploadPayload};
