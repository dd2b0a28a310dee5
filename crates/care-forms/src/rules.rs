//! Validation rules
//!
//! The schema layer the surrounding form applies per field. Rules never run
//! inside the renderer; the controller evaluates them on blur-revalidation
//! and before submission, and surfaces messages through the field wrapper's
//! error slot.

use crate::value::FieldValue;
use care_common::Email;
use regex::Regex;
use std::collections::HashMap;

/// Validation rules for one field.
///
/// `message` overrides whichever default message a failing rule would
/// produce.
#[derive(Clone, Debug, Default)]
pub struct FieldRules {
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub email: bool,
    pub phone: bool,
    pub must_accept: bool,
    pub pattern: Option<String>,
    pub message: Option<String>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_len(mut self, n: usize) -> Self {
        self.min_len = Some(n);
        self
    }

    pub fn max_len(mut self, n: usize) -> Self {
        self.max_len = Some(n);
        self
    }

    /// Require a structurally valid e-mail address.
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Require an E.164 phone number (`+` and 10-15 digits).
    pub fn phone(mut self) -> Self {
        self.phone = true;
        self
    }

    /// Require the boolean to be checked (consent fields).
    pub fn must_accept(mut self) -> Self {
        self.must_accept = true;
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// First violated rule's message, if any.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        if self.must_accept && value.as_bool() != Some(true) {
            return Some(self.fail("You must accept to continue"));
        }

        if value.is_empty() {
            if self.required {
                return Some(self.fail("This field is required"));
            }
            return None;
        }

        let text = match value {
            FieldValue::Text(s) | FieldValue::Phone(s) | FieldValue::Choice(s) => Some(s.as_str()),
            _ => None,
        };

        if let Some(s) = text {
            if let Some(n) = self.min_len {
                if s.chars().count() < n {
                    return Some(self.fail(&format!("Must be at least {n} characters")));
                }
            }
            if let Some(n) = self.max_len {
                if s.chars().count() > n {
                    return Some(self.fail(&format!("Must be at most {n} characters")));
                }
            }
            if self.email && Email::new(s).is_err() {
                return Some(self.fail("Invalid email address"));
            }
            if self.phone && !is_e164(s) {
                return Some(self.fail("Invalid phone number"));
            }
            if let Some(pattern) = &self.pattern {
                // An uncompilable pattern counts as a failed rule rather
                // than silently passing.
                let matched = Regex::new(pattern)
                    .map(|re| re.is_match(s))
                    .unwrap_or(false);
                if !matched {
                    return Some(self.fail("Invalid format"));
                }
            }
        }

        None
    }

    fn fail(&self, default: &str) -> String {
        self.message.clone().unwrap_or_else(|| default.to_string())
    }
}

fn is_e164(s: &str) -> bool {
    match s.strip_prefix('+') {
        Some(digits) => {
            (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Per-field rules for a whole form, keyed by field name.
#[derive(Clone, Debug, Default)]
pub struct FormSchema {
    rules: HashMap<String, FieldRules>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
        self.rules.insert(name.into(), rules);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldRules> {
        self.rules.get(name)
    }

    /// Validate one field's current value.
    pub fn validate_field(&self, name: &str, value: &FieldValue) -> Option<String> {
        self.rules.get(name).and_then(|r| r.check(value))
    }

    /// Validate every field with rules; returns the message per failing field.
    pub fn validate(&self, values: &HashMap<String, FieldValue>) -> HashMap<String, String> {
        let mut errors = HashMap::new();
        for (name, rules) in &self.rules {
            let value = values.get(name).cloned().unwrap_or_default();
            if let Some(message) = rules.check(&value) {
                errors.insert(name.clone(), message);
            }
        }
        errors
    }
}
