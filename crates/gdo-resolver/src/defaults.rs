//! Per-variant attribute defaults
//!
//! Each entity variant owns a static slice of [`AttributeDefault`]s. Merging
//! is a pure key-presence check: a key the user wrote is never replaced, even
//! when its value is `false`, `0` or an empty string.

use serde_yaml::{Mapping, Value};

/// A default attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Str(&'static str),
    Bool(bool),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Str(s) => Value::String(s.to_string()),
            DefaultValue::Bool(b) => Value::Bool(b),
        }
    }
}

/// One entry of a variant's defaults table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDefault {
    pub key: &'static str,
    pub value: DefaultValue,
}

impl AttributeDefault {
    pub const fn text(key: &'static str, value: &'static str) -> Self {
        Self {
            key,
            value: DefaultValue::Str(value),
        }
    }

    pub const fn flag(key: &'static str, value: bool) -> Self {
        Self {
            key,
            value: DefaultValue::Bool(value),
        }
    }
}

/// Fill every default whose key is absent from `config` into a copy of it
pub fn resolve_defaults(config: &Mapping, defaults: &[AttributeDefault]) -> Mapping {
    let mut resolved = config.clone();
    for default in defaults {
        if !resolved.contains_key(default.key) {
            resolved.insert(Value::from(default.key), default.value.to_value());
        }
    }
    resolved
}
