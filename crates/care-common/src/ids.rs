//! Entity identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for domain entities.
///
/// Backed by a v4 UUID when generated locally; external identifiers (for
/// example the user id minted by the auth collaborator) are carried as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn external_ids_round_trip() {
        let id = EntityId::from_string("user_42");
        assert_eq!(id.as_str(), "user_42");
        assert_eq!(id.to_string(), "user_42");
    }
}
