//! Configuration keys and typed field access over raw declarations
//!
//! [`Fields`] wraps serde over a raw mapping so every type error is reported
//! with its full path (e.g. `sensor[2].accuracy_decimals`).

use crate::error::{ResolveError, ResolveResult};
use crate::value::{Closed, Flag, Scalar};
use gdo_core::{ComponentId, EntityCategory, Platform, CONF_SECPLUS_GDO_ID};
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

pub const CONF_ID: &str = "id";
pub const CONF_TYPE: &str = "type";
pub const CONF_NAME: &str = "name";
pub const CONF_ICON: &str = "icon";
pub const CONF_INTERNAL: &str = "internal";
pub const CONF_DISABLED_BY_DEFAULT: &str = "disabled_by_default";
pub const CONF_ENTITY_CATEGORY: &str = "entity_category";
pub const CONF_DEVICE_CLASS: &str = "device_class";
pub const CONF_UNIT_OF_MEASUREMENT: &str = "unit_of_measurement";
pub const CONF_STATE_CLASS: &str = "state_class";
pub const CONF_ACCURACY_DECIMALS: &str = "accuracy_decimals";
pub const CONF_FORCE_UPDATE: &str = "force_update";
pub const CONF_MODE: &str = "mode";
pub const CONF_RESTORE_MODE: &str = "restore_mode";
pub const CONF_DEFAULT_TRANSITION_LENGTH: &str = "default_transition_length";
pub const CONF_OUTPUT_ID: &str = "output_id";
pub const CONF_INITIAL_OPTION: &str = "initial_option";
pub const CONF_PRE_CLOSE_WARNING_DURATION: &str = "pre_close_warning_duration";
pub const CONF_PRE_CLOSE_WARNING_START: &str = "pre_close_warning_start";
pub const CONF_PRE_CLOSE_WARNING_END: &str = "pre_close_warning_end";

pub const ENTITY_CATEGORY_CONFIG: &str = "config";
pub const ENTITY_CATEGORY_DIAGNOSTIC: &str = "diagnostic";

/// Keys every entity declaration accepts regardless of its platform
pub const ENTITY_BASE_SCHEMA: &[&str] = &[
    CONF_ID,
    CONF_NAME,
    CONF_ICON,
    CONF_INTERNAL,
    CONF_DISABLED_BY_DEFAULT,
    CONF_ENTITY_CATEGORY,
    CONF_SECPLUS_GDO_ID,
];

/// Keys the host reads from every entity (MQTT and web server exposure)
pub const HOST_BASE_SCHEMA: &[&str] = &[
    "mqtt_id",
    "web_server",
    "web_server_id",
    "retain",
    "discovery",
    "availability",
    "state_topic",
    "command_topic",
    "command_retain",
    "qos",
    "subscribe_qos",
];

/// Keys owned by the host's platform schema: filters and trigger automations
///
/// They are accepted and carried through untouched; resolving them is the
/// host's job.
pub fn host_schema(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::BinarySensor => &[
            "filters",
            "publish_initial_state",
            "trigger_on_initial_state",
            "on_press",
            "on_release",
            "on_click",
            "on_double_click",
            "on_multi_click",
            "on_state",
            "on_state_change",
        ],
        Platform::Button => &["on_press"],
        Platform::Cover => &[
            "on_open",
            "on_opening",
            "on_closed",
            "on_closing",
            "on_idle",
            "position_command_topic",
            "position_state_topic",
            "tilt_command_topic",
            "tilt_state_topic",
        ],
        Platform::Light => &[
            "effects",
            "gamma_correct",
            "flash_transition_length",
            "on_turn_on",
            "on_turn_off",
            "on_state",
        ],
        Platform::Lock => &["on_lock", "on_unlock"],
        Platform::Number => &["on_value", "on_value_range"],
        Platform::Select => &["on_value"],
        Platform::Sensor => &[
            "filters",
            "expire_after",
            "on_value",
            "on_raw_value",
            "on_value_range",
        ],
        Platform::Switch => &["inverted", "on_turn_on", "on_turn_off", "on_state"],
        Platform::TextSensor => &["filters", "on_value", "on_raw_value"],
    }
}

/// Whether `key` belongs to the host rather than the resolver
pub fn is_host_key(platform: Platform, key: &str) -> bool {
    HOST_BASE_SCHEMA.contains(&key) || host_schema(platform).contains(&key)
}

/// A closed set of values named in configuration documents
pub trait ClosedSet: Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn legal_values() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }

    fn lookup(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(value))
    }
}

impl ClosedSet for EntityCategory {
    const ALL: &'static [Self] = EntityCategory::ALL;

    fn as_str(self) -> &'static str {
        EntityCategory::as_str(self)
    }
}

/// Join a parent path and a key
pub fn field_path(path: &str, key: &str) -> String {
    format!("{}.{}", path, key)
}

/// Typed, path-aware reader over a raw declaration
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Mapping,
    path: &'a str,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Mapping, path: &'a str) -> Self {
        Self { map, path }
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    pub fn mapping(&self) -> &'a Mapping {
        self.map
    }

    /// Path of a key below this declaration
    pub fn key_path(&self, key: &str) -> String {
        field_path(self.path, key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key)
    }

    /// Reject keys that are not part of any of the given schemas
    pub fn check_keys(&self, schemas: &[&[&str]]) -> ResolveResult<()> {
        for key in self.map.keys() {
            let Some(name) = key.as_str() else {
                return Err(ResolveError::schema(
                    self.path,
                    format!("keys must be strings, found {:?}", key),
                ));
            };
            if !schemas.iter().any(|schema| schema.contains(&name)) {
                return Err(ResolveError::schema(
                    self.key_path(name),
                    "extra keys not allowed",
                ));
            }
        }
        Ok(())
    }

    /// Deserialize a key with serde, mapping errors onto the key's path
    pub fn parse<T: DeserializeOwned>(&self, key: &str) -> ResolveResult<Option<T>> {
        self.raw(key)
            .map(|value| {
                serde_yaml::from_value(value.clone())
                    .map_err(|e| ResolveError::schema(self.key_path(key), e.to_string()))
            })
            .transpose()
    }

    /// Deserialize the whole declaration into a type whose fields all default
    ///
    /// A failure is pinned to the first key that fails on its own.
    pub fn deserialize<T: DeserializeOwned + Default>(&self) -> ResolveResult<T> {
        serde_yaml::from_value(Value::Mapping(self.map.clone())).map_err(|error| {
            let culprit = self.map.iter().find_map(|(key, value)| {
                let mut single = Mapping::new();
                single.insert(key.clone(), value.clone());
                serde_yaml::from_value::<T>(Value::Mapping(single))
                    .err()
                    .map(|e| (key, e))
            });
            match culprit {
                Some((key, e)) => ResolveError::schema(
                    self.key_path(key.as_str().unwrap_or_default()),
                    e.to_string(),
                ),
                None => ResolveError::schema(self.path, error.to_string()),
            }
        })
    }

    /// A scalar rendered as a string (numbers and booleans are accepted)
    pub fn string(&self, key: &str) -> ResolveResult<Option<String>> {
        Ok(self.parse::<Scalar>(key)?.map(|scalar| scalar.0))
    }

    pub fn boolean(&self, key: &str) -> ResolveResult<Option<bool>> {
        Ok(self.parse::<Flag>(key)?.map(|flag| flag.0))
    }

    pub fn option<T: ClosedSet>(&self, key: &str) -> ResolveResult<Option<T>> {
        Ok(self.parse::<Closed<T>>(key)?.map(|closed| closed.0))
    }

    /// A declaration id
    pub fn id(&self, key: &str) -> ResolveResult<Option<ComponentId>> {
        self.string(key)?
            .map(|s| {
                ComponentId::new(s)
                    .map_err(|e| ResolveError::schema(self.key_path(key), e.to_string()))
            })
            .transpose()
    }

    /// Error for a required key that is absent
    pub fn required(&self, key: &str) -> ResolveError {
        ResolveError::schema(self.key_path(key), "required key not provided")
    }
}

/// Short type description of a YAML value for error messages
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_check_keys() {
        let map = mapping("name: Door\nicon: mdi:garage\n");
        let fields = Fields::new(&map, "cover[0]");
        assert!(fields.check_keys(&[ENTITY_BASE_SCHEMA]).is_ok());

        let map = mapping("name: Door\nspeed: 3\n");
        let fields = Fields::new(&map, "cover[0]");
        let err = fields.check_keys(&[ENTITY_BASE_SCHEMA]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "cover[0].speed"
        ));
    }

    #[test]
    fn test_boolean_forms() {
        let map = mapping("a: true\nb: 'off'\nc: Yes\nd: 1\ne: maybe\n");
        let fields = Fields::new(&map, "root");
        assert_eq!(fields.boolean("a").unwrap(), Some(true));
        assert_eq!(fields.boolean("b").unwrap(), Some(false));
        assert_eq!(fields.boolean("c").unwrap(), Some(true));
        assert!(fields.boolean("d").is_err());
        assert!(fields.boolean("e").is_err());
        assert_eq!(fields.boolean("missing").unwrap(), None);
    }

    #[test]
    fn test_string_accepts_scalars() {
        let map = mapping("a: text\nb: 42\nc: [1]\n");
        let fields = Fields::new(&map, "root");
        assert_eq!(fields.string("a").unwrap().as_deref(), Some("text"));
        assert_eq!(fields.string("b").unwrap().as_deref(), Some("42"));
        let err = fields.string("c").unwrap_err();
        assert!(err.to_string().contains("root.c"));
    }

    #[test]
    fn test_option_lists_legal_values() {
        let map = mapping("a: Diagnostic\nb: hidden\n");
        let fields = Fields::new(&map, "sensor[0]");
        assert_eq!(
            fields.option::<EntityCategory>("a").unwrap(),
            Some(EntityCategory::Diagnostic)
        );
        let err = fields.option::<EntityCategory>("b").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { ref path, ref reason }
                if path == "sensor[0].b" && reason.contains("'none', 'config', 'diagnostic'")
        ));
    }

    #[test]
    fn test_parse_reports_path() {
        let map = mapping("accuracy_decimals: many\n");
        let fields = Fields::new(&map, "sensor[0]");
        let err = fields.parse::<i32>(CONF_ACCURACY_DECIMALS).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "sensor[0].accuracy_decimals"
        ));
    }
}
