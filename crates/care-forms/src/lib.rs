//! OpenCare form engine
//!
//! Declarative form fields with a typed renderer and an owning controller:
//!
//! - [`FieldDescriptor`] / [`FieldKind`]: static per-field configuration as
//!   a tagged union; variant-specific options live on the variant.
//! - [`FieldValue`]: what a field can hold between renders.
//! - [`render_field`]: pure mapping from descriptor + current value to one
//!   rendered control, wrapped with the shared label and error slots.
//! - [`FormController`]: owns all mutable form state (values, errors,
//!   submission lifecycle) for one mounted form; edits flow back through
//!   [`FormController::change`].
//! - [`FormSchema`] / [`FieldRules`]: per-field validation applied by the
//!   controller, never by the renderer.

pub mod controller;
pub mod field;
pub mod render;
pub mod rules;
pub mod value;

pub use controller::{FormController, FormDefinition, FormState, FormValues};
pub use field::{CustomRenderer, FieldDescriptor, FieldKind, FieldView, SelectOption};
pub use render::{render_control, render_field, Control, RenderedField, DEFAULT_DATE_FORMAT};
pub use rules::{FieldRules, FormSchema};
pub use value::{FieldValue, FileAttachment};

use thiserror::Error;

/// Form engine errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormsError {
    /// A change or render referenced a field the form does not declare.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The stored value's shape does not match the field kind. The renderer
    /// fails loudly here instead of silently rendering nothing.
    #[error("field '{field}' holds {found}, expected {expected}")]
    ValueMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Submission was attempted while validation errors are outstanding.
    #[error("form has validation errors")]
    Invalid,

    /// Submission was attempted while another one is still pending.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}

pub type Result<T> = std::result::Result<T, FormsError>;
