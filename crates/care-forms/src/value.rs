//! Field values

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Everything a form field can hold between renders.
///
/// `Empty` stands in for both "never set" and "cleared"; each control maps
/// it to its own notion of absence (empty string, unchecked, no date).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    #[default]
    Empty,
    /// Raw text, no transformation.
    Text(String),
    /// Phone state: E.164 once normalizable, otherwise retained as typed.
    Phone(String),
    Bool(bool),
    Date(NaiveDateTime),
    /// Opaque selected value (dropdowns, radio groups).
    Choice(String),
    Files(Vec<FileAttachment>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn choice(value: impl Into<String>) -> Self {
        Self::Choice(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) | Self::Phone(s) | Self::Choice(s) => s.trim().is_empty(),
            Self::Files(files) => files.is_empty(),
            Self::Bool(_) | Self::Date(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_phone(&self) -> Option<&str> {
        match self {
            Self::Phone(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Choice(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_files(&self) -> Option<&[FileAttachment]> {
        match self {
            Self::Files(f) => Some(f),
            _ => None,
        }
    }

    /// Human-readable shape name, used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Empty => "nothing",
            Self::Text(_) => "text",
            Self::Phone(_) => "a phone number",
            Self::Bool(_) => "a boolean",
            Self::Date(_) => "a date",
            Self::Choice(_) => "a selection",
            Self::Files(_) => "files",
        }
    }
}

/// An uploaded file as held in form state before submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::text("   ").is_empty());
        assert!(FieldValue::Files(vec![]).is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
        assert!(!FieldValue::text("x").is_empty());
    }

    #[test]
    fn accessors_are_shape_strict() {
        let v = FieldValue::text("hello");
        assert_eq!(v.as_text(), Some("hello"));
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.as_choice(), None);
    }
}
