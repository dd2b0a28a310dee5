//! Form controller
//!
//! Owns all mutable state for one mounted form: the value per field, the
//! validation errors, and the submission lifecycle. Renderers only ever see
//! a per-pass borrow of this state; edits come back through [`FormController::change`]
//! and are applied in call order.

use crate::field::{FieldDescriptor, FieldKind, FieldView};
use crate::render::{render_field, RenderedField};
use crate::rules::FormSchema;
use crate::value::FieldValue;
use crate::{FormsError, Result};
use care_common::{CountryCode, Phone};
use std::collections::{HashMap, HashSet};

/// Snapshot of every field value, handed out by [`FormController::begin_submit`].
pub type FormValues = HashMap<String, FieldValue>;

/// A reusable form: descriptors, schema and default values. Cheap to clone;
/// one controller is spun up per mount.
#[derive(Clone, Debug, Default)]
pub struct FormDefinition {
    pub fields: Vec<FieldDescriptor>,
    pub schema: FormSchema,
    pub defaults: FormValues,
}

impl FormDefinition {
    pub fn new(fields: Vec<FieldDescriptor>, schema: FormSchema) -> Self {
        Self {
            fields,
            schema,
            defaults: FormValues::new(),
        }
    }

    pub fn default_value(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.defaults.insert(name.into(), value);
        self
    }

    pub fn controller(&self) -> FormController {
        FormController::new(self.clone())
    }
}

/// Form-wide mutable state. Exclusively owned by the controller for the
/// lifetime of one mounted form.
#[derive(Clone, Debug, Default)]
pub struct FormState {
    pub values: FormValues,
    pub errors: HashMap<String, String>,
    pub touched: HashSet<String>,
    pub is_submitting: bool,
    pub submit_error: Option<String>,
}

/// Owns field values, validation errors and the submission lifecycle for one
/// mounted form.
pub struct FormController {
    definition: FormDefinition,
    state: FormState,
}

impl FormController {
    pub fn new(definition: FormDefinition) -> Self {
        let values = definition.defaults.clone();
        Self {
            definition,
            state: FormState {
                values,
                ..FormState::default()
            },
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.definition.fields
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn value(&self, name: &str) -> &FieldValue {
        static EMPTY: FieldValue = FieldValue::Empty;
        self.state.values.get(name).unwrap_or(&EMPTY)
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.state.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.state.submit_error.as_deref()
    }

    fn descriptor(&self, name: &str) -> Result<&FieldDescriptor> {
        self.definition
            .fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| FormsError::UnknownField(name.to_string()))
    }

    /// Apply one edit. Edits are applied in the order they arrive.
    ///
    /// Phone fields normalize their input here: empty clears the field,
    /// normalizable input becomes E.164, anything else is retained as typed
    /// (validation is deferred to the schema, not this path).
    pub fn change(&mut self, name: &str, value: FieldValue) -> Result<()> {
        let descriptor = self.descriptor(name)?;
        let value = match (&descriptor.kind, value) {
            (FieldKind::Phone { default_country }, FieldValue::Text(raw))
            | (FieldKind::Phone { default_country }, FieldValue::Phone(raw)) => {
                normalize_phone(&raw, default_country)
            }
            (_, value) => value,
        };
        self.state.values.insert(name.to_string(), value);

        // Fields that already show an error revalidate live so the message
        // clears as soon as the input is fixed.
        if self.state.errors.contains_key(name) {
            self.revalidate(name);
        }
        Ok(())
    }

    /// Mark a field as visited and validate it.
    pub fn blur(&mut self, name: &str) -> Result<()> {
        self.descriptor(name)?;
        self.state.touched.insert(name.to_string());
        self.revalidate(name);
        Ok(())
    }

    fn revalidate(&mut self, name: &str) {
        let value = self
            .state
            .values
            .get(name)
            .cloned()
            .unwrap_or(FieldValue::Empty);
        match self.definition.schema.validate_field(name, &value) {
            Some(message) => {
                self.state.errors.insert(name.to_string(), message);
            }
            None => {
                self.state.errors.remove(name);
            }
        }
    }

    /// Run the whole schema; returns true when the form is clean.
    pub fn validate_all(&mut self) -> bool {
        self.state.errors = self.definition.schema.validate(&self.state.values);
        self.state.errors.is_empty()
    }

    /// Render every field in declaration order with current values and
    /// errors bound.
    pub fn render(&self) -> Result<Vec<RenderedField>> {
        self.definition
            .fields
            .iter()
            .map(|descriptor| {
                let value = self
                    .state
                    .values
                    .get(&descriptor.name)
                    .unwrap_or(&FieldValue::Empty);
                render_field(
                    descriptor,
                    FieldView {
                        name: &descriptor.name,
                        value,
                    },
                    self.state.errors.get(&descriptor.name).map(String::as_str),
                )
            })
            .collect()
    }

    /// Start a submission: validates everything and flips the in-flight
    /// flag. A second call before [`Self::finish_submit`] is rejected, so at
    /// most one remote dispatch can be issued per submission.
    pub fn begin_submit(&mut self) -> Result<FormValues> {
        if self.state.is_submitting {
            return Err(FormsError::SubmissionInFlight);
        }
        if !self.validate_all() {
            tracing::debug!(errors = ?self.state.errors, "form validation failed");
            return Err(FormsError::Invalid);
        }
        self.state.is_submitting = true;
        self.state.submit_error = None;
        Ok(self.state.values.clone())
    }

    /// Finish a submission. Always clears the in-flight flag; a failure is
    /// stored as a user-visible message instead of being swallowed.
    pub fn finish_submit(&mut self, outcome: std::result::Result<(), String>) {
        self.state.is_submitting = false;
        self.state.submit_error = outcome.err();
        if let Some(message) = &self.state.submit_error {
            tracing::warn!(error = %message, "submission failed");
        }
    }
}

fn normalize_phone(raw: &str, default_country: &CountryCode) -> FieldValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldValue::Empty;
    }
    match Phone::parse(trimmed, default_country) {
        Ok(phone) => FieldValue::Phone(phone.as_e164().to_string()),
        // Partial or unparseable input stays as typed; the schema decides
        // whether it blocks submission.
        Err(_) => FieldValue::Phone(raw.to_string()),
    }
}
