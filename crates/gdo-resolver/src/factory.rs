//! Generic entity factory
//!
//! One code path serves every platform: validate keys, pick the variant,
//! merge its defaults, build the typed entity and return it together with
//! its registration target. Attaching to the root is left to the pass.
//! Keys owned by the host platform (filters, triggers) ride along untouched.

use crate::attributes::EntityAttributes;
use crate::defaults::resolve_defaults;
use crate::error::{ResolveError, ResolveResult};
use crate::kind::{Entity, EntityKind, Registration};
use crate::pass::ResolutionPass;
use crate::schema::{
    host_schema, is_host_key, Fields, CONF_ID, CONF_TYPE, ENTITY_BASE_SCHEMA, HOST_BASE_SCHEMA,
};
use gdo_config::EntityDeclaration;
use serde_yaml::Mapping;
use tracing::trace;

/// Read the variant of a declaration
///
/// Tagged kinds require `type` and match it case-insensitively; untagged
/// kinds have exactly one variant.
pub fn discriminant<K: EntityKind>(fields: &Fields<'_>) -> ResolveResult<K> {
    if !K::PLATFORM.is_tagged() {
        return K::ALL
            .first()
            .copied()
            .ok_or_else(|| ResolveError::schema(fields.path(), "kind has no variants"));
    }
    match fields.option::<K>(CONF_TYPE)? {
        Some(kind) => Ok(kind),
        None => Err(ResolveError::schema(
            fields.key_path(CONF_TYPE),
            format!(
                "required key not provided, valid options are {}",
                K::legal_values()
                    .iter()
                    .map(|v| format!("'{}'", v))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )),
    }
}

/// Build an entity of kind `K` from its declaration
pub fn build<K: EntityKind>(
    pass: &ResolutionPass,
    declaration: &EntityDeclaration,
) -> ResolveResult<(Entity<K>, Registration<K>)> {
    let raw = Fields::new(&declaration.config, &declaration.path);
    let type_key: &[&str] = if K::PLATFORM.is_tagged() {
        &[CONF_TYPE]
    } else {
        &[]
    };
    raw.check_keys(&[
        ENTITY_BASE_SCHEMA,
        HOST_BASE_SCHEMA,
        host_schema(K::PLATFORM),
        type_key,
        K::SCHEMA,
    ])?;

    let kind = discriminant::<K>(&raw)?;

    let merged = resolve_defaults(&declaration.config, kind.defaults());
    let fields = Fields::new(&merged, &declaration.path);
    trace!("Merged {} declaration: {:?}", declaration.path, merged);

    let attributes = EntityAttributes::from_fields(&fields)?;
    let traits = kind.traits(&fields, pass)?;
    let parent = pass.resolve_parent(&fields)?;

    let id = fields.id(CONF_ID)?.unwrap_or_else(|| {
        pass.generated_id(&[K::PLATFORM.as_str(), kind.as_str()], declaration.index)
    });

    let host: Mapping = declaration
        .config
        .iter()
        .filter(|(key, _)| key.as_str().is_some_and(|key| is_host_key(K::PLATFORM, key)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let entity = Entity {
        id,
        kind,
        attributes,
        traits,
        parent,
        host,
    };
    Ok((entity, kind.registration()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::attributes::StateClass;
    use crate::kinds::{
        BinarySensorType, ButtonType, CoverType, NumberType, SelectType, SensorType,
    };
    use crate::schema::ClosedSet;
    use gdo_config::Declaration;
    use gdo_core::{EntityCategory, Platform};

    pub(crate) fn pass_with_roots(ids: &[&str]) -> ResolutionPass {
        let mut pass = ResolutionPass::new();
        for (index, id) in ids.iter().enumerate() {
            let declaration = Declaration {
                path: format!("secplus_gdo[{}]", index),
                config: serde_yaml::from_str(&format!(
                    "id: {}\nuart_tx_pin: {}\nuart_rx_pin: {}\n",
                    id,
                    index * 2 + 1,
                    index * 2 + 2
                ))
                .unwrap(),
            };
            pass.bind_root(&declaration, index).unwrap();
        }
        pass
    }

    pub(crate) fn declaration(platform: Platform, yaml: &str) -> EntityDeclaration {
        EntityDeclaration {
            platform,
            index: 0,
            path: format!("{}[0]", platform),
            config: serde_yaml::from_str(yaml).unwrap(),
        }
    }

    #[test]
    fn test_sync_button_defaults() {
        let pass = pass_with_roots(&["gdo"]);
        let (button, registration) =
            build::<ButtonType>(&pass, &declaration(Platform::Button, "type: sync\n")).unwrap();

        assert_eq!(button.kind, ButtonType::Sync);
        assert_eq!(button.attributes.name.as_deref(), Some("Sync opener"));
        assert_eq!(button.attributes.icon.as_deref(), Some("mdi:sync"));
        assert_eq!(button.attributes.entity_category, Some(EntityCategory::Config));
        assert!(!button.attributes.disabled_by_default);
        assert!(button.attributes.visible_by_default());
        assert_eq!(registration.method, "register_command_button");
        assert_eq!(button.parent.as_str(), "gdo");
        assert_eq!(button.id.as_str(), "button_sync_0");
    }

    #[test]
    fn test_user_unit_wins() {
        let pass = pass_with_roots(&["gdo"]);
        let (sensor, registration) = build::<SensorType>(
            &pass,
            &declaration(
                Platform::Sensor,
                "type: openings\nunit_of_measurement: cycles\n",
            ),
        )
        .unwrap();

        assert_eq!(sensor.attributes.unit_of_measurement.as_deref(), Some("cycles"));
        assert_eq!(sensor.attributes.state_class, Some(StateClass::TotalIncreasing));
        assert_eq!(sensor.attributes.icon.as_deref(), Some("mdi:counter"));
        assert_eq!(registration.method, "register_openings_sensor");
    }

    #[test]
    fn test_discriminant_case_insensitive() {
        let pass = pass_with_roots(&["gdo"]);
        let (number, _) = build::<NumberType>(
            &pass,
            &declaration(Platform::Number, "type: Rolling_Code\n"),
        )
        .unwrap();
        assert_eq!(number.kind, NumberType::RollingCode);
        assert_eq!(number.traits.max_value, u32::MAX);
    }

    #[test]
    fn test_unknown_discriminant_lists_legal_values() {
        let pass = pass_with_roots(&["gdo"]);
        let err = build::<SensorType>(&pass, &declaration(Platform::Sensor, "type: humidity\n"))
            .unwrap_err();
        match err {
            ResolveError::SchemaValidation { path, reason } => {
                assert_eq!(path, "sensor[0].type");
                for legal in SensorType::legal_values() {
                    assert!(reason.contains(legal), "{} missing from {}", legal, reason);
                }
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_discriminant() {
        let pass = pass_with_roots(&["gdo"]);
        let err = build::<ButtonType>(&pass, &declaration(Platform::Button, "name: Sync\n"))
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "button[0].type"
        ));
    }

    #[test]
    fn test_untagged_kind_rejects_type() {
        let pass = pass_with_roots(&["gdo"]);
        let (cover, registration) =
            build::<CoverType>(&pass, &declaration(Platform::Cover, "name: Garage\n")).unwrap();
        assert_eq!(cover.attributes.device_class.as_deref(), Some("garage"));
        assert_eq!(registration.method, "register_door");

        let err = build::<CoverType>(&pass, &declaration(Platform::Cover, "type: door\n"))
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "cover[0].type"
        ));
    }

    #[test]
    fn test_select_initial_option() {
        let pass = pass_with_roots(&["gdo"]);
        let (select, _) = build::<SelectType>(
            &pass,
            &declaration(Platform::Select, "initial_option: Security+2.0\n"),
        )
        .unwrap();
        assert_eq!(select.traits.initial_option.as_str(), "security+2.0");
        assert_eq!(select.traits.options.len(), 4);

        let err = build::<SelectType>(
            &pass,
            &declaration(Platform::Select, "initial_option: security+3.0\n"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "select[0].initial_option"
        ));
    }

    #[test]
    fn test_root_reference() {
        let pass = pass_with_roots(&["left", "right"]);

        let (sensor, _) = build::<SensorType>(
            &pass,
            &declaration(Platform::Sensor, "type: openings\nsecplus_gdo_id: right\n"),
        )
        .unwrap();
        assert_eq!(sensor.parent.as_str(), "right");

        let err = build::<SensorType>(
            &pass,
            &declaration(Platform::Sensor, "type: openings\nsecplus_gdo_id: middle\n"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UnknownReference { id, .. } if id == "middle"
        ));

        let err = build::<SensorType>(&pass, &declaration(Platform::Sensor, "type: openings\n"))
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "sensor[0].secplus_gdo_id"
        ));
    }

    #[test]
    fn test_no_root_resolved_yet() {
        let pass = ResolutionPass::new();
        let err = build::<ButtonType>(&pass, &declaration(Platform::Button, "type: sync\n"))
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UnknownReference { id, .. } if id == "secplus_gdo"
        ));
    }

    #[test]
    fn test_host_keys_ride_along() {
        let pass = pass_with_roots(&["gdo"]);
        let (sensor, _) = build::<BinarySensorType>(
            &pass,
            &declaration(
                Platform::BinarySensor,
                "type: motion\nfilters:\n  - delayed_off: 5s\non_press:\n  - logger.log: moved\nweb_server:\n  sorting_weight: 10\n",
            ),
        )
        .unwrap();

        assert_eq!(sensor.kind, BinarySensorType::Motion);
        assert_eq!(sensor.attributes.device_class.as_deref(), Some("motion"));
        assert_eq!(sensor.host.len(), 3);
        assert!(sensor.host.contains_key("filters"));
        assert!(sensor.host.contains_key("web_server"));

        // host keys of one platform are still foreign to another
        let err = build::<ButtonType>(
            &pass,
            &declaration(Platform::Button, "type: sync\nfilters: []\n"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "button[0].filters"
        ));
    }

    #[test]
    fn test_extra_key_rejected() {
        let pass = pass_with_roots(&["gdo"]);
        let err = build::<ButtonType>(
            &pass,
            &declaration(Platform::Button, "type: sync\nunit_of_measurement: x\n"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SchemaValidation { path, .. } if path == "button[0].unit_of_measurement"
        ));
    }
}
