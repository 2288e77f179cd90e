//! Serde adapters for ESPHome-style scalar values
//!
//! Declarations spell values loosely: numbers where strings are expected,
//! `on`/`off` for booleans, enum options in any case. The newtypes here
//! deserialize those forms; the free functions plug them into
//! `#[serde(deserialize_with = ...)]`.

use crate::schema::ClosedSet;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::Deserialize;
use std::fmt;

/// Error text for a value outside a closed set
pub(crate) fn unknown_value_message(value: &str, legal: &[&str]) -> String {
    let options = legal
        .iter()
        .map(|option| format!("'{}'", option))
        .collect::<Vec<_>>()
        .join(", ");
    format!("unknown value '{}', valid options are {}", value, options)
}

/// A scalar rendered as a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar(pub String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// A boolean; accepts `true/false`, `yes/no`, `on/off`, `enable/disable`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag(pub bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlagVisitor;

        impl<'de> Visitor<'de> for FlagVisitor {
            type Value = Flag;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Flag, E> {
                Ok(Flag(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Flag, E> {
                match v.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "enable" => Ok(Flag(true)),
                    "false" | "no" | "off" | "disable" => Ok(Flag(false)),
                    _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

/// A member of a closed set, matched case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closed<T>(pub T);

impl<'de, T: ClosedSet> Deserialize<'de> for Closed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Scalar(value) = Scalar::deserialize(deserializer)?;
        T::lookup(&value)
            .map(Closed)
            .ok_or_else(|| de::Error::custom(unknown_value_message(&value, &T::legal_values())))
    }
}

/// An icon reference of the form `prefix:name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon(pub String);

impl<'de> Deserialize<'de> for Icon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Scalar(icon) = Scalar::deserialize(deserializer)?;
        let part = |s: &str| {
            !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };
        match icon.split_once(':') {
            Some((prefix, name)) if part(prefix) && part(name) => Ok(Icon(icon)),
            _ => Err(de::Error::custom(format!(
                "icons must match the format 'prefix:name', found '{}'",
                icon
            ))),
        }
    }
}

pub(crate) fn scalar_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| scalar.0))
}

pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Flag::deserialize(deserializer)?.0)
}

pub(crate) fn flag_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| flag.0))
}

pub(crate) fn closed_option<'de, D: Deserializer<'de>, T: ClosedSet>(
    deserializer: D,
) -> Result<Option<T>, D::Error> {
    Ok(Option::<Closed<T>>::deserialize(deserializer)?.map(|closed| closed.0))
}

pub(crate) fn icon_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Icon>::deserialize(deserializer)?.map(|icon| icon.0))
}
