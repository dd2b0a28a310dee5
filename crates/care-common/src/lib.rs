//! OpenCare shared kernel
//!
//! Value objects and boundary utilities used across the intake, scheduling
//! and API crates:
//!
//! - Validated domain primitives ([`EntityId`], [`Email`], [`Phone`],
//!   [`CountryCode`])
//! - The best-effort telemetry boundary ([`telemetry`])

pub mod country;
pub mod email;
pub mod ids;
pub mod phone;
pub mod telemetry;

pub use country::CountryCode;
pub use email::{Email, EmailError};
pub use ids::EntityId;
pub use phone::{Phone, PhoneError};
pub use telemetry::{emit_view_metric, TelemetryError, TelemetrySink};
