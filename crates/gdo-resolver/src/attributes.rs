//! Typed attribute bag shared by all entity kinds
//!
//! Built from a declaration after defaults were merged, so every value here
//! is either user-supplied or a variant default. Keys a kind does not accept
//! were already rejected by its schema, so absent keys simply stay `None`.

use crate::error::ResolveResult;
use crate::schema::{ClosedSet, Fields};
use crate::value;
use gdo_core::{EntityCategory, TimePeriod};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Measurement,
    Total,
    TotalIncreasing,
}

impl ClosedSet for StateClass {
    const ALL: &'static [Self] = &[
        StateClass::Measurement,
        StateClass::Total,
        StateClass::TotalIncreasing,
    ];

    fn as_str(self) -> &'static str {
        match self {
            StateClass::Measurement => "measurement",
            StateClass::Total => "total",
            StateClass::TotalIncreasing => "total_increasing",
        }
    }
}

/// Front-end presentation of a number entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberMode {
    Auto,
    Box,
    Slider,
}

impl ClosedSet for NumberMode {
    const ALL: &'static [Self] = &[NumberMode::Auto, NumberMode::Box, NumberMode::Slider];

    fn as_str(self) -> &'static str {
        match self {
            NumberMode::Auto => "auto",
            NumberMode::Box => "box",
            NumberMode::Slider => "slider",
        }
    }
}

/// Initial state of a switch or light after boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestoreMode {
    RestoreDefaultOff,
    RestoreDefaultOn,
    AlwaysOff,
    AlwaysOn,
    RestoreInvertedDefaultOff,
    RestoreInvertedDefaultOn,
    RestoreAndOff,
    RestoreAndOn,
    Disabled,
}

impl ClosedSet for RestoreMode {
    const ALL: &'static [Self] = &[
        RestoreMode::RestoreDefaultOff,
        RestoreMode::RestoreDefaultOn,
        RestoreMode::AlwaysOff,
        RestoreMode::AlwaysOn,
        RestoreMode::RestoreInvertedDefaultOff,
        RestoreMode::RestoreInvertedDefaultOn,
        RestoreMode::RestoreAndOff,
        RestoreMode::RestoreAndOn,
        RestoreMode::Disabled,
    ];

    fn as_str(self) -> &'static str {
        match self {
            RestoreMode::RestoreDefaultOff => "RESTORE_DEFAULT_OFF",
            RestoreMode::RestoreDefaultOn => "RESTORE_DEFAULT_ON",
            RestoreMode::AlwaysOff => "ALWAYS_OFF",
            RestoreMode::AlwaysOn => "ALWAYS_ON",
            RestoreMode::RestoreInvertedDefaultOff => "RESTORE_INVERTED_DEFAULT_OFF",
            RestoreMode::RestoreInvertedDefaultOn => "RESTORE_INVERTED_DEFAULT_ON",
            RestoreMode::RestoreAndOff => "RESTORE_AND_OFF",
            RestoreMode::RestoreAndOn => "RESTORE_AND_ON",
            RestoreMode::Disabled => "DISABLED",
        }
    }
}

/// The merged attribute bag of one entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityAttributes {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "value::scalar_option"
    )]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "value::icon_option"
    )]
    pub icon: Option<String>,
    #[serde(deserialize_with = "value::flag")]
    pub internal: bool,
    #[serde(deserialize_with = "value::flag")]
    pub disabled_by_default: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "value::closed_option"
    )]
    pub entity_category: Option<EntityCategory>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "value::scalar_option"
    )]
    pub device_class: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "value::scalar_option"
    )]
    pub unit_of_measurement: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "value::closed_option"
    )]
    pub state_class: Option<StateClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_decimals: Option<i32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "value::flag_option"
    )]
    pub force_update: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "value::closed_option"
    )]
    pub mode: Option<NumberMode>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "value::closed_option"
    )]
    pub restore_mode: Option<RestoreMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_transition_length: Option<TimePeriod>,
}

impl EntityAttributes {
    /// Read the bag from a merged declaration; keys it does not know are
    /// left for the kind traits
    pub fn from_fields(fields: &Fields<'_>) -> ResolveResult<Self> {
        fields.deserialize()
    }

    /// Whether the entity is shown on dashboards without user action
    pub fn visible_by_default(&self) -> bool {
        !self.internal && !self.disabled_by_default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use serde_yaml::Mapping;

    fn attributes(yaml: &str) -> ResolveResult<EntityAttributes> {
        let map: Mapping = serde_yaml::from_str(yaml).unwrap();
        EntityAttributes::from_fields(&Fields::new(&map, "sensor[0]"))
    }

    #[test]
    fn test_full_bag() {
        let attrs = attributes(
            r#"
name: Openings
icon: mdi:counter
entity_category: diagnostic
unit_of_measurement: cycles
state_class: TOTAL_INCREASING
accuracy_decimals: 0
force_update: on
"#,
        )
        .unwrap();

        assert_eq!(attrs.name.as_deref(), Some("Openings"));
        assert_eq!(attrs.entity_category, Some(EntityCategory::Diagnostic));
        assert_eq!(attrs.state_class, Some(StateClass::TotalIncreasing));
        assert_eq!(attrs.accuracy_decimals, Some(0));
        assert_eq!(attrs.force_update, Some(true));
        assert!(attrs.visible_by_default());
    }

    #[test]
    fn test_restore_mode_case_insensitive() {
        let attrs = attributes("restore_mode: always_off\n").unwrap();
        assert_eq!(attrs.restore_mode, Some(RestoreMode::AlwaysOff));
        assert!(attributes("restore_mode: sometimes\n").is_err());
    }

    #[test]
    fn test_wrong_types() {
        let err = attributes("accuracy_decimals: lots\n").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "sensor[0].accuracy_decimals"
        ));
        let err = attributes("name: Door\ndisabled_by_default: [true]\n").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "sensor[0].disabled_by_default"
        ));
    }

    #[test]
    fn test_bad_option_reports_key_and_legal_values() {
        let err = attributes("name: Openings\nstate_class: rising\n").unwrap_err();
        match err {
            ResolveError::SchemaValidation { path, reason } => {
                assert_eq!(path, "sensor[0].state_class");
                assert!(reason.contains("'measurement', 'total', 'total_increasing'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_foreign_keys_are_left_alone() {
        let attrs = attributes("name: Door\nsecplus_gdo_id: gdo\ntype: openings\n").unwrap();
        assert_eq!(attrs.name.as_deref(), Some("Door"));
    }

    #[test]
    fn test_serialize_skips_unset() {
        let attrs = attributes("name: Door\n").unwrap();
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json["name"], "Door");
        assert_eq!(json["disabled_by_default"], false);
        assert!(json.get("icon").is_none());
    }
}
