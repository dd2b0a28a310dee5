//! Phone value object
//!
//! E.164-first: the canonical stored form is `+<calling code><subscriber>`.
//! National input is normalized against a default country's calling code.

use crate::country::CountryCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated phone number stored in E.164 form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    /// Parse an international number (`+79261234567`, `+1 (868) 579-9831`).
    ///
    /// Formatting characters (spaces, dashes, dots, parentheses) are
    /// stripped; the digit count must land in the E.164 envelope.
    pub fn from_e164(value: &str) -> Result<Self, PhoneError> {
        let value = value.trim();
        let Some(rest) = value.strip_prefix('+') else {
            return Err(PhoneError::MissingPlus);
        };

        let digits = strip_formatting(rest)?;
        if !(8..=15).contains(&digits.len()) {
            return Err(PhoneError::InvalidLength);
        }

        Ok(Self(format!("+{digits}")))
    }

    /// Build from nationally-formatted digits and a default country.
    ///
    /// `5551234567` with country `RU` becomes `+75551234567`.
    pub fn from_national(value: &str, country: &CountryCode) -> Result<Self, PhoneError> {
        let digits = strip_formatting(value.trim())?;
        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        let code = country
            .calling_code()
            .ok_or_else(|| PhoneError::UnknownCallingCode(country.code().to_string()))?;

        let candidate = format!("+{code}{digits}");
        Self::from_e164(&candidate)
    }

    /// Parse either form: international if the input starts with `+`,
    /// national against `country` otherwise.
    pub fn parse(value: &str, country: &CountryCode) -> Result<Self, PhoneError> {
        if value.trim().starts_with('+') {
            Self::from_e164(value)
        } else {
            Self::from_national(value, country)
        }
    }

    /// Canonical E.164 form, including the leading `+`.
    pub fn as_e164(&self) -> &str {
        &self.0
    }
}

fn strip_formatting(value: &str) -> Result<String, PhoneError> {
    let mut digits = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return Err(PhoneError::InvalidCharacters),
        }
    }
    Ok(digits)
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneError {
    #[error("phone number cannot be empty")]
    Empty,
    #[error("international numbers must start with '+'")]
    MissingPlus,
    #[error("phone number has an invalid length")]
    InvalidLength,
    #[error("phone number contains invalid characters")]
    InvalidCharacters,
    #[error("no calling code known for country {0}")]
    UnknownCallingCode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_international() {
        let phone = Phone::from_e164("+1 (868) 579-9831").unwrap();
        assert_eq!(phone.as_e164(), "+18685799831");
    }

    #[test]
    fn normalizes_national_against_default_country() {
        let phone = Phone::from_national("5551234567", &CountryCode::RU).unwrap();
        assert_eq!(phone.as_e164(), "+75551234567");
    }

    #[test]
    fn parse_dispatches_on_leading_plus() {
        let intl = Phone::parse("+49 30 901820", &CountryCode::US).unwrap();
        assert_eq!(intl.as_e164(), "+4930901820");

        let national = Phone::parse("(555) 123-4567", &CountryCode::US).unwrap();
        assert_eq!(national.as_e164(), "+15551234567");
    }

    #[test]
    fn rejects_letters_and_bad_lengths() {
        assert_eq!(
            Phone::from_e164("+1555CALLNOW"),
            Err(PhoneError::InvalidCharacters)
        );
        assert_eq!(Phone::from_e164("+12345"), Err(PhoneError::InvalidLength));
        assert_eq!(
            Phone::from_national("", &CountryCode::US),
            Err(PhoneError::Empty)
        );
    }

    #[test]
    fn unknown_country_cannot_normalize() {
        let err = Phone::from_national("5551234567", &CountryCode::Other("ZZ".into()));
        assert_eq!(err, Err(PhoneError::UnknownCallingCode("ZZ".into())));
    }
}
