//! Country codes
//!
//! ISO 3166-1 alpha-2 codes with the E.164 calling-code table needed to
//! normalize nationally-formatted phone input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 3166-1 alpha-2 country code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountryCode {
    US,
    GB,
    CA,
    AU,
    DE,
    FR,
    RU,
    NG,
    IN,
    JP,
    BR,
    TT,
    Other(String),
}

impl CountryCode {
    pub fn code(&self) -> &str {
        match self {
            Self::US => "US",
            Self::GB => "GB",
            Self::CA => "CA",
            Self::AU => "AU",
            Self::DE => "DE",
            Self::FR => "FR",
            Self::RU => "RU",
            Self::NG => "NG",
            Self::IN => "IN",
            Self::JP => "JP",
            Self::BR => "BR",
            Self::TT => "TT",
            Self::Other(c) => c,
        }
    }

    /// E.164 country calling code, without the leading `+`.
    ///
    /// `Other` countries have no known calling code; national input for them
    /// cannot be normalized and is retained as typed.
    pub fn calling_code(&self) -> Option<&'static str> {
        match self {
            Self::US | Self::CA => Some("1"),
            Self::GB => Some("44"),
            Self::AU => Some("61"),
            Self::DE => Some("49"),
            Self::FR => Some("33"),
            Self::RU => Some("7"),
            Self::NG => Some("234"),
            Self::IN => Some("91"),
            Self::JP => Some("81"),
            Self::BR => Some("55"),
            Self::TT => Some("1868"),
            Self::Other(_) => None,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.to_uppercase().as_str() {
            "US" => Self::US,
            "GB" => Self::GB,
            "CA" => Self::CA,
            "AU" => Self::AU,
            "DE" => Self::DE,
            "FR" => Self::FR,
            "RU" => Self::RU,
            "NG" => Self::NG,
            "IN" => Self::IN,
            "JP" => Self::JP,
            "BR" => Self::BR,
            "TT" => Self::TT,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self::US
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
