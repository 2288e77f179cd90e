//! Descriptors for the ten entity platforms
//!
//! Tagged platforms select their variant with `type`; cover, light, lock
//! and select have a single implicit variant.

mod binary_sensor;
mod button;
mod cover;
mod light;
mod lock;
mod number;
mod select;
mod sensor;
mod switch;
mod text_sensor;

pub use binary_sensor::{BinarySensor, BinarySensorType};
pub use button::{Button, ButtonType};
pub use cover::{Cover, CoverTraits, CoverType};
pub use light::{Light, LightTraits, LightType};
pub use lock::{Lock, LockType};
pub use number::{Number, NumberTraits, NumberType};
pub use select::{ProtocolOption, Select, SelectTraits, SelectType};
pub use sensor::{Sensor, SensorType};
pub use switch::{Switch, SwitchType};
pub use text_sensor::{TextSensor, TextSensorType};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::resolve_defaults;
    use crate::kind::EntityKind;
    use crate::schema::{ClosedSet, CONF_ID, CONF_NAME};
    use serde_yaml::{Mapping, Value};
    use std::collections::HashSet;

    fn registration_methods<K: EntityKind>() -> Vec<&'static str> {
        K::ALL.iter().map(|kind| kind.registration().method).collect()
    }

    fn assert_distinct_registrations<K: EntityKind>() {
        let methods = registration_methods::<K>();
        let unique: HashSet<_> = methods.iter().collect();
        assert_eq!(unique.len(), methods.len(), "{} reuses a target", K::PLATFORM);
    }

    #[test]
    fn test_every_variant_has_one_registration_target() {
        assert_distinct_registrations::<BinarySensorType>();
        assert_distinct_registrations::<NumberType>();
        assert_distinct_registrations::<SensorType>();
        assert_distinct_registrations::<SwitchType>();
        assert_distinct_registrations::<TextSensorType>();

        // buttons share one entry point and differ by the command they carry
        let methods: HashSet<_> = registration_methods::<ButtonType>().into_iter().collect();
        assert_eq!(methods.len(), 1);
        let commands: HashSet<_> = ButtonType::ALL.iter().map(|b| b.command()).collect();
        assert_eq!(commands.len(), ButtonType::ALL.len());
    }

    #[test]
    fn test_untagged_kinds_have_one_variant() {
        assert_eq!(CoverType::ALL.len(), 1);
        assert_eq!(LightType::ALL.len(), 1);
        assert_eq!(LockType::ALL.len(), 1);
        assert_eq!(SelectType::ALL.len(), 1);
    }

    #[test]
    fn test_variant_names_round_trip() {
        fn check<K: EntityKind>() {
            for kind in K::ALL {
                assert_eq!(K::lookup(kind.as_str()), Some(*kind));
                assert_eq!(K::lookup(&kind.as_str().to_uppercase()), Some(*kind));
            }
        }
        check::<BinarySensorType>();
        check::<ButtonType>();
        check::<CoverType>();
        check::<LightType>();
        check::<LockType>();
        check::<NumberType>();
        check::<SelectType>();
        check::<SensorType>();
        check::<SwitchType>();
        check::<TextSensorType>();
    }

    /// Default keys must be accepted by the kind's own schema
    #[test]
    fn test_default_keys_are_in_schema() {
        fn check<K: EntityKind>() {
            for kind in K::ALL {
                for default in kind.defaults() {
                    assert!(
                        crate::schema::ENTITY_BASE_SCHEMA.contains(&default.key)
                            || K::SCHEMA.contains(&default.key),
                        "{} {} defaults unknown key {}",
                        K::PLATFORM,
                        kind.as_str(),
                        default.key
                    );
                }
            }
        }
        check::<BinarySensorType>();
        check::<ButtonType>();
        check::<CoverType>();
        check::<LightType>();
        check::<LockType>();
        check::<NumberType>();
        check::<SelectType>();
        check::<SensorType>();
        check::<SwitchType>();
        check::<TextSensorType>();
    }

    /// Explicit keys survive and exactly the missing default keys are added
    #[test]
    fn test_defaults_never_clobber_user_keys() {
        fn check<K: EntityKind>() {
            for kind in K::ALL {
                let defaults = kind.defaults();
                // every prefix of the table stands in for a different set of user keys
                for taken in 0..=defaults.len() {
                    let mut user = Mapping::new();
                    user.insert(Value::from(CONF_ID), Value::from("mine"));
                    for default in &defaults[..taken] {
                        user.insert(Value::from(default.key), Value::from(""));
                    }

                    let resolved = resolve_defaults(&user, defaults);
                    for (key, value) in &user {
                        assert_eq!(resolved.get(key), Some(value));
                    }
                    let added: HashSet<_> = resolved
                        .keys()
                        .filter(|key| !user.contains_key(*key))
                        .filter_map(Value::as_str)
                        .collect();
                    let expected: HashSet<_> = defaults[taken..].iter().map(|d| d.key).collect();
                    assert_eq!(added, expected);
                }
            }
        }
        check::<BinarySensorType>();
        check::<ButtonType>();
        check::<CoverType>();
        check::<LightType>();
        check::<LockType>();
        check::<NumberType>();
        check::<SelectType>();
        check::<SensorType>();
        check::<SwitchType>();
        check::<TextSensorType>();
    }

    #[test]
    fn test_button_table() {
        let name = |kind: ButtonType| {
            kind.defaults()
                .iter()
                .find(|d| d.key == CONF_NAME)
                .map(|d| d.value)
        };
        assert_eq!(
            name(ButtonType::RestartComms),
            Some(crate::defaults::DefaultValue::Str("Restart GDO comms"))
        );
        assert_eq!(
            name(ButtonType::LockToggle),
            Some(crate::defaults::DefaultValue::Str("Lock toggle"))
        );
    }
}
