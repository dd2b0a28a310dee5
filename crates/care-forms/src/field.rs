//! Field descriptors
//!
//! Static per-field configuration. A form declares one descriptor per field,
//! once; descriptors are immutable afterwards and the renderer never mutates
//! them.

use crate::render::Control;
use crate::value::FieldValue;
use care_common::CountryCode;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied renderer for widgets outside the fixed variant set
/// (radio groups, file pickers). Receives the borrowed per-render view of
/// the field and returns the control to show.
pub type CustomRenderer = Arc<dyn Fn(FieldView<'_>) -> Control + Send + Sync>;

/// One render pass's borrow of controller-owned field state.
///
/// Never stored: it lives for a single `render` call. Edits flow back
/// through `FormController::change` under the same `name`.
#[derive(Clone, Copy)]
pub struct FieldView<'a> {
    pub name: &'a str,
    pub value: &'a FieldValue,
}

/// The field variant, with variant-specific configuration on the variant
/// itself so no option can be supplied for a field kind it does not apply to.
#[derive(Clone)]
pub enum FieldKind {
    /// Single-line text; raw string value.
    Text,
    /// Multi-line text.
    Textarea,
    /// International phone input; national input is normalized against the
    /// default country.
    Phone { default_country: CountryCode },
    /// Boolean toggle; the field label becomes the inline caption.
    Checkbox,
    /// Date selection, optionally with a time-of-day sub-control. A missing
    /// format falls back to `MM/DD/YYYY`.
    Date {
        format: Option<String>,
        include_time: bool,
    },
    /// Dropdown over caller-supplied options; the selected value is emitted
    /// verbatim and the option domain is opaque to the renderer.
    Select { options: Vec<SelectOption> },
    /// Fully caller-rendered widget.
    Custom { render: CustomRenderer },
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "Text"),
            Self::Textarea => write!(f, "Textarea"),
            Self::Phone { default_country } => {
                write!(f, "Phone({default_country})")
            }
            Self::Checkbox => write!(f, "Checkbox"),
            Self::Date {
                format,
                include_time,
            } => write!(f, "Date({format:?}, time={include_time})"),
            Self::Select { options } => write!(f, "Select({} options)", options.len()),
            Self::Custom { .. } => write!(f, "Custom"),
        }
    }
}

/// One option of a dropdown or radio group.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Static configuration of one form field.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub icon: Option<String>,
    pub disabled: bool,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    fn with_kind(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: None,
            placeholder: None,
            icon: None,
            disabled: false,
            kind,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Text)
    }

    pub fn textarea(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Textarea)
    }

    pub fn phone(name: impl Into<String>, default_country: CountryCode) -> Self {
        Self::with_kind(name, FieldKind::Phone { default_country })
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Checkbox)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            FieldKind::Date {
                format: None,
                include_time: false,
            },
        )
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self::with_kind(name, FieldKind::Select { options })
    }

    pub fn custom(
        name: impl Into<String>,
        render: impl Fn(FieldView<'_>) -> Control + Send + Sync + 'static,
    ) -> Self {
        Self::with_kind(
            name,
            FieldKind::Custom {
                render: Arc::new(render),
            },
        )
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Set the date display format. No effect on non-date fields.
    pub fn date_format(mut self, value: impl Into<String>) -> Self {
        if let FieldKind::Date { format, .. } = &mut self.kind {
            *format = Some(value.into());
        }
        self
    }

    /// Enable the time-of-day sub-control. No effect on non-date fields.
    pub fn with_time(mut self) -> Self {
        if let FieldKind::Date { include_time, .. } = &mut self.kind {
            *include_time = true;
        }
        self
    }
}
