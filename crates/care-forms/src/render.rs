//! Field rendering
//!
//! Pure mapping from a descriptor plus the current value to exactly one
//! control. No validation happens here; error display and the shared label
//! belong to the field wrapper, applied uniformly except that checkboxes
//! carry their label inline.

use crate::field::{FieldDescriptor, FieldKind, FieldView, SelectOption};
use crate::value::{FieldValue, FileAttachment};
use crate::{FormsError, Result};
use care_common::CountryCode;
use chrono::NaiveDateTime;

/// Display pattern used when a date field declares none.
pub const DEFAULT_DATE_FORMAT: &str = "MM/DD/YYYY";

/// The rendering vocabulary: every control a field (or a custom renderer)
/// can produce.
#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    TextInput {
        value: String,
        placeholder: Option<String>,
        icon: Option<String>,
    },
    TextArea {
        value: String,
        placeholder: Option<String>,
        disabled: bool,
    },
    /// `value` is E.164 once normalized, the retained raw input otherwise,
    /// `None` while empty.
    PhoneInput {
        value: Option<String>,
        default_country: CountryCode,
        placeholder: Option<String>,
    },
    DatePicker {
        value: Option<NaiveDateTime>,
        format: String,
        show_time: bool,
    },
    Dropdown {
        selected: Option<String>,
        placeholder: Option<String>,
        options: Vec<SelectOption>,
    },
    Checkbox {
        checked: bool,
        caption: Option<String>,
    },
    RadioGroup {
        selected: Option<String>,
        options: Vec<SelectOption>,
    },
    FileDrop {
        files: Vec<FileAttachment>,
    },
}

/// One field as the surrounding form shows it: the control plus the shared
/// label and error slots.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedField {
    pub name: String,
    /// Shared label slot; always `None` for checkboxes, whose label renders
    /// inline as the caption.
    pub label: Option<String>,
    pub control: Control,
    pub error: Option<String>,
}

/// Render the control for one field from its descriptor and current value.
pub fn render_control(descriptor: &FieldDescriptor, view: FieldView<'_>) -> Result<Control> {
    let mismatch = |expected: &'static str| FormsError::ValueMismatch {
        field: descriptor.name.clone(),
        expected,
        found: view.value.kind_name(),
    };

    match &descriptor.kind {
        FieldKind::Text => {
            let value = match view.value {
                FieldValue::Empty => String::new(),
                FieldValue::Text(s) => s.clone(),
                _ => return Err(mismatch("text")),
            };
            Ok(Control::TextInput {
                value,
                placeholder: descriptor.placeholder.clone(),
                icon: descriptor.icon.clone(),
            })
        }
        FieldKind::Textarea => {
            let value = match view.value {
                FieldValue::Empty => String::new(),
                FieldValue::Text(s) => s.clone(),
                _ => return Err(mismatch("text")),
            };
            Ok(Control::TextArea {
                value,
                placeholder: descriptor.placeholder.clone(),
                disabled: descriptor.disabled,
            })
        }
        FieldKind::Phone { default_country } => {
            let value = match view.value {
                FieldValue::Empty => None,
                FieldValue::Phone(s) => Some(s.clone()),
                _ => return Err(mismatch("a phone number")),
            };
            Ok(Control::PhoneInput {
                value,
                default_country: default_country.clone(),
                placeholder: descriptor.placeholder.clone(),
            })
        }
        FieldKind::Checkbox => {
            let checked = match view.value {
                FieldValue::Empty => false,
                FieldValue::Bool(b) => *b,
                _ => return Err(mismatch("a boolean")),
            };
            Ok(Control::Checkbox {
                checked,
                caption: descriptor.label.clone(),
            })
        }
        FieldKind::Date {
            format,
            include_time,
        } => {
            let value = match view.value {
                FieldValue::Empty => None,
                FieldValue::Date(d) => Some(*d),
                _ => return Err(mismatch("a date")),
            };
            Ok(Control::DatePicker {
                value,
                format: format
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
                show_time: *include_time,
            })
        }
        FieldKind::Select { options } => {
            let selected = match view.value {
                FieldValue::Empty => None,
                FieldValue::Choice(s) => Some(s.clone()),
                _ => return Err(mismatch("a selection")),
            };
            Ok(Control::Dropdown {
                selected,
                placeholder: descriptor.placeholder.clone(),
                options: options.clone(),
            })
        }
        FieldKind::Custom { render } => Ok(render(view)),
    }
}

/// Render one field with its wrapper: shared label (suppressed for
/// checkboxes) and the inline error slot.
pub fn render_field(
    descriptor: &FieldDescriptor,
    view: FieldView<'_>,
    error: Option<&str>,
) -> Result<RenderedField> {
    let control = render_control(descriptor, view)?;
    let label = match descriptor.kind {
        FieldKind::Checkbox => None,
        _ => descriptor.label.clone(),
    };
    Ok(RenderedField {
        name: descriptor.name.clone(),
        label,
        control,
        error: error.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn view<'a>(name: &'a str, value: &'a FieldValue) -> FieldView<'a> {
        FieldView { name, value }
    }

    #[test]
    fn text_binds_raw_string() {
        let field = FieldDescriptor::text("name")
            .placeholder("ex: John Doe")
            .icon("user");
        let value = FieldValue::text("Ada");
        let control = render_control(&field, view("name", &value)).unwrap();
        assert_eq!(
            control,
            Control::TextInput {
                value: "Ada".into(),
                placeholder: Some("ex: John Doe".into()),
                icon: Some("user".into()),
            }
        );
    }

    #[test]
    fn textarea_respects_disabled() {
        let field = FieldDescriptor::textarea("allergies").disabled();
        let control = render_control(&field, view("allergies", &FieldValue::Empty)).unwrap();
        assert_eq!(
            control,
            Control::TextArea {
                value: String::new(),
                placeholder: None,
                disabled: true,
            }
        );
    }

    #[test]
    fn phone_emits_none_while_empty() {
        let field = FieldDescriptor::phone("phone", CountryCode::RU);
        let control = render_control(&field, view("phone", &FieldValue::Empty)).unwrap();
        assert_eq!(
            control,
            Control::PhoneInput {
                value: None,
                default_country: CountryCode::RU,
                placeholder: None,
            }
        );
    }

    #[test]
    fn date_defaults_pattern_and_no_time() {
        // Scenario: no format, no prior value.
        let field = FieldDescriptor::date("birthDate");
        let control = render_control(&field, view("birthDate", &FieldValue::Empty)).unwrap();
        assert_eq!(
            control,
            Control::DatePicker {
                value: None,
                format: "MM/DD/YYYY".into(),
                show_time: false,
            }
        );
    }

    #[test]
    fn date_with_time_and_value() {
        let field = FieldDescriptor::date("schedule").with_time();
        let when = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let value = FieldValue::Date(when);
        let control = render_control(&field, view("schedule", &value)).unwrap();
        assert_eq!(
            control,
            Control::DatePicker {
                value: Some(when),
                format: "MM/DD/YYYY".into(),
                show_time: true,
            }
        );
    }

    #[test]
    fn select_passes_options_through_and_emits_verbatim() {
        let options = vec![
            SelectOption::new("dr-green", "Dr. Green"),
            SelectOption::new("dr-cruz", "Dr. Cruz"),
        ];
        let field = FieldDescriptor::select("primaryPhysician", options.clone())
            .placeholder("Select a physician");
        let value = FieldValue::choice("dr-cruz");
        let control = render_control(&field, view("primaryPhysician", &value)).unwrap();
        assert_eq!(
            control,
            Control::Dropdown {
                selected: Some("dr-cruz".into()),
                placeholder: Some("Select a physician".into()),
                options,
            }
        );
    }

    #[test]
    fn checkbox_caption_is_the_label_and_wrapper_label_is_suppressed() {
        let field = FieldDescriptor::checkbox("privacyConsent").label("I agree to the policy");
        let value = FieldValue::Bool(true);
        let rendered = render_field(&field, view("privacyConsent", &value), None).unwrap();

        assert_eq!(rendered.label, None);
        assert_eq!(
            rendered.control,
            Control::Checkbox {
                checked: true,
                caption: Some("I agree to the policy".into()),
            }
        );
    }

    #[test]
    fn non_checkbox_fields_render_the_shared_label() {
        let field = FieldDescriptor::text("name").label("Full name");
        let rendered = render_field(&field, view("name", &FieldValue::Empty), None).unwrap();
        assert_eq!(rendered.label.as_deref(), Some("Full name"));
    }

    #[test]
    fn custom_delegates_to_the_caller() {
        let field = FieldDescriptor::custom("gender", |view| Control::RadioGroup {
            selected: view.value.as_choice().map(str::to_string),
            options: vec![
                SelectOption::new("male", "male"),
                SelectOption::new("female", "female"),
            ],
        });
        let value = FieldValue::choice("female");
        let control = render_control(&field, view("gender", &value)).unwrap();
        match control {
            Control::RadioGroup { selected, options } => {
                assert_eq!(selected.as_deref(), Some("female"));
                assert_eq!(options.len(), 2);
            }
            other => panic!("unexpected control: {other:?}"),
        }
    }

    #[test]
    fn shape_mismatch_fails_loudly() {
        let field = FieldDescriptor::date("birthDate");
        let value = FieldValue::text("not a date");
        let err = render_control(&field, view("birthDate", &value)).unwrap_err();
        assert_eq!(
            err,
            FormsError::ValueMismatch {
                field: "birthDate".into(),
                expected: "a date",
                found: "text",
            }
        );
    }

    #[test]
    fn error_slot_is_attached_by_the_wrapper() {
        let field = FieldDescriptor::text("email").label("Email");
        let rendered = render_field(
            &field,
            view("email", &FieldValue::Empty),
            Some("Invalid email address"),
        )
        .unwrap();
        assert_eq!(rendered.error.as_deref(), Some("Invalid email address"));
    }
}
