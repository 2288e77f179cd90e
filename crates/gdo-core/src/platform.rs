//! Entity platforms and their metadata
//!
//! A platform is one pluggable sub-entity category of the garage door opener
//! (binary_sensor, cover, ...). Six platforms are multi-purpose and select
//! their variant with a `type` key; the remaining four have a single variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entity platform (the "kind" an entity declaration belongs to)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    BinarySensor,
    Button,
    Cover,
    Light,
    Lock,
    Number,
    Select,
    Sensor,
    Switch,
    TextSensor,
}

impl Platform {
    /// Every platform, in document order
    pub const ALL: &'static [Platform] = &[
        Platform::BinarySensor,
        Platform::Button,
        Platform::Cover,
        Platform::Light,
        Platform::Lock,
        Platform::Number,
        Platform::Select,
        Platform::Sensor,
        Platform::Switch,
        Platform::TextSensor,
    ];

    /// Top-level document key for this platform
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::BinarySensor => "binary_sensor",
            Platform::Button => "button",
            Platform::Cover => "cover",
            Platform::Light => "light",
            Platform::Lock => "lock",
            Platform::Number => "number",
            Platform::Select => "select",
            Platform::Sensor => "sensor",
            Platform::Switch => "switch",
            Platform::TextSensor => "text_sensor",
        }
    }

    /// Whether declarations of this platform carry a `type` discriminant
    pub fn is_tagged(self) -> bool {
        !matches!(
            self,
            Platform::Cover | Platform::Light | Platform::Lock | Platform::Select
        )
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown platform '{}'", s))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    /// Explicitly uncategorized (primary entity)
    None,
    /// Configuration entity
    Config,
    /// Diagnostic entity
    Diagnostic,
}

impl EntityCategory {
    pub const ALL: &'static [EntityCategory] = &[
        EntityCategory::None,
        EntityCategory::Config,
        EntityCategory::Diagnostic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityCategory::None => "none",
            EntityCategory::Config => "config",
            EntityCategory::Diagnostic => "diagnostic",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_roundtrip() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), *platform);
        }
        assert!("climate".parse::<Platform>().is_err());
    }

    #[test]
    fn test_tagged_platforms() {
        let tagged: Vec<_> = Platform::ALL.iter().filter(|p| p.is_tagged()).collect();
        assert_eq!(tagged.len(), 6);
        assert!(!Platform::Cover.is_tagged());
        assert!(Platform::Sensor.is_tagged());
    }

    #[test]
    fn test_entity_category_deserialize() {
        let cat: EntityCategory = serde_yaml::from_str("diagnostic").unwrap();
        assert_eq!(cat, EntityCategory::Diagnostic);
        let cat: EntityCategory = serde_yaml::from_str("none").unwrap();
        assert_eq!(cat, EntityCategory::None);
        assert!(serde_yaml::from_str::<EntityCategory>("hidden").is_err());
    }
}
