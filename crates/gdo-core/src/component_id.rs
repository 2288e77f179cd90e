//! Declaration identity used to reference roots and entities across a document

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for invalid component IDs
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComponentIdError {
    #[error("id cannot be empty")]
    Empty,

    #[error("id '{0}' must start with a letter or underscore")]
    InvalidStart(String),

    #[error("id '{0}' contains invalid characters (must be alphanumeric with underscores)")]
    InvalidChars(String),
}

/// Identity of a declaration (e.g., "garage_door", "gdo_motion")
///
/// IDs follow the C-identifier rule of the host configuration language:
/// a letter or underscore followed by letters, digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentId(String);

impl ComponentId {
    /// Create a new ComponentId, validating the identifier rules
    pub fn new(id: impl Into<String>) -> Result<Self, ComponentIdError> {
        let id = id.into();
        let mut chars = id.chars();

        let Some(first) = chars.next() else {
            return Err(ComponentIdError::Empty);
        };
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(ComponentIdError::InvalidStart(id));
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ComponentIdError::InvalidChars(id));
        }

        Ok(Self(id))
    }

    /// Build a generated id from parts, normalizing separators to underscores
    ///
    /// Used for declarations that omit `id`. The result is always valid.
    pub fn generated(parts: &[&str], index: usize) -> Self {
        let mut id = String::new();
        for part in parts {
            for c in part.chars() {
                if c.is_ascii_alphanumeric() {
                    id.push(c.to_ascii_lowercase());
                } else if !id.ends_with('_') {
                    id.push('_');
                }
            }
            if !id.ends_with('_') {
                id.push('_');
            }
        }
        id.push_str(&index.to_string());
        if !id.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            id.insert(0, '_');
        }
        Self(id)
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ComponentId {
    type Err = ComponentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ComponentId {
    type Error = ComponentIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ComponentId> for String {
    fn from(id: ComponentId) -> String {
        id.0
    }
}

impl AsRef<str> for ComponentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(ComponentId::new("garage_door").is_ok());
        assert!(ComponentId::new("_private").is_ok());
        assert!(ComponentId::new("GDO1").is_ok());
    }

    #[test]
    fn test_invalid_ids() {
        assert_eq!(ComponentId::new(""), Err(ComponentIdError::Empty));
        assert!(matches!(
            ComponentId::new("1gdo"),
            Err(ComponentIdError::InvalidStart(_))
        ));
        assert!(matches!(
            ComponentId::new("garage-door"),
            Err(ComponentIdError::InvalidChars(_))
        ));
        assert!(matches!(
            ComponentId::new("garage.door"),
            Err(ComponentIdError::InvalidChars(_))
        ));
    }

    #[test]
    fn test_generated_ids_are_valid() {
        let id = ComponentId::generated(&["binary_sensor", "wireless_remote"], 0);
        assert_eq!(id.as_str(), "binary_sensor_wireless_remote_0");
        assert!(ComponentId::new(id.as_str()).is_ok());

        let id = ComponentId::generated(&["select", "security+1.0"], 3);
        assert_eq!(id.as_str(), "select_security_1_0_3");
    }

    #[test]
    fn test_serde_roundtrip() {
        let id: ComponentId = serde_json::from_str("\"my_gdo\"").unwrap();
        assert_eq!(id.as_str(), "my_gdo");
        assert!(serde_json::from_str::<ComponentId>("\"my-gdo\"").is_err());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"my_gdo\"");
    }
}
