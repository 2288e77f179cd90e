//! End-to-end resolution of a full device document

use gdo_core::{EntityCategory, Platform};
use gdo_resolver::kinds::{NumberType, ProtocolOption, SwitchType};
use gdo_resolver::{resolve_file, ClosedSet, Command, Resolution};
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn resolve() -> Resolution {
    resolve_file(fixtures(), "garage.yaml").expect("fixture resolves")
}

#[test]
fn test_root_settings_from_secrets() {
    let resolution = resolve();
    assert_eq!(resolution.roots.len(), 1);

    let root = resolution.root("gdo").unwrap();
    let settings = root.settings;
    assert_eq!(settings.uart_tx_pin.number(), 17);
    assert_eq!(settings.uart_rx_pin.number(), 18);
    assert_eq!(settings.obstruction_input_pin.map(|p| p.number()), Some(19));
    assert_eq!(settings.min_command_interval.total_milliseconds(), 50);
    assert_eq!(settings.sync_retry_interval.total_milliseconds(), 45_000);
    assert!(settings.auto_start);
}

#[test]
fn test_only_secplus_gdo_items_are_resolved() {
    let resolution = resolve();
    let root = resolution.root("gdo").unwrap();

    assert_eq!(root.binary_sensors().len(), 2);

    let motion = &root.binary_sensors()[0];
    assert!(motion.host.contains_key("filters"));
    assert!(motion.host.contains_key("on_press"));
    assert!(root.binary_sensors()[1].host.is_empty());
    assert_eq!(root.buttons().len(), 2);
    assert_eq!(resolution.entity_count(), 13);
}

#[test]
fn test_included_buttons() {
    let resolution = resolve();
    let root = resolution.root("gdo").unwrap();

    let sync = &root.buttons()[0];
    assert_eq!(sync.id.as_str(), "opener_sync");
    assert_eq!(sync.traits, Command::Sync);
    assert_eq!(sync.attributes.name.as_deref(), Some("Sync opener"));

    let toggle = &root.buttons()[1];
    assert_eq!(toggle.id.as_str(), "button_door_toggle_1");
    assert_eq!(toggle.attributes.icon.as_deref(), Some("mdi:garage-variant"));
    assert!(!toggle.attributes.disabled_by_default);
}

#[test]
fn test_single_variant_kinds() {
    let resolution = resolve();
    let root = resolution.root("gdo").unwrap();

    let door = root.door().unwrap();
    assert_eq!(door.id.as_str(), "garage_door");
    assert_eq!(door.attributes.device_class.as_deref(), Some("garage"));
    assert_eq!(door.traits.pre_close_warning_duration.total_milliseconds(), 5_000);
    assert_eq!(door.traits.pre_close_warning_start.steps.len(), 1);
    assert!(door.traits.pre_close_warning_start.bound_actions().is_empty());

    let light = root.light().unwrap();
    assert_eq!(light.attributes.icon.as_deref(), Some("mdi:lightbulb"));

    let select = root.protocol_select().unwrap();
    assert_eq!(select.traits.initial_option, ProtocolOption::SecurityPlus2);
    assert_eq!(select.attributes.entity_category, Some(EntityCategory::Config));

    assert!(root.lock().is_some());
}

#[test]
fn test_numbers_switches_and_sensors() {
    let resolution = resolve();
    let root = resolution.root("gdo").unwrap();

    let open = root.number(NumberType::OpenDuration).unwrap();
    assert_eq!(open.traits.max_value, 0xFFFF);
    assert!(open.attributes.disabled_by_default);
    let client = root.number(NumberType::ClientId).unwrap();
    assert_eq!(client.attributes.mode.map(|m| m.as_str()), Some("box"));
    assert!(root.number(NumberType::RollingCode).is_none());

    assert!(root.switch(SwitchType::Learn).is_some());

    let openings = &root.sensors()[0];
    assert_eq!(openings.attributes.unit_of_measurement.as_deref(), Some("cycles"));
    assert_eq!(openings.attributes.icon.as_deref(), Some("mdi:counter"));

    assert_eq!(
        root.text_sensors()[0].attributes.icon.as_deref(),
        Some("mdi:battery")
    );
}

#[test]
fn test_registration_log_follows_document_order() {
    let resolution = resolve();
    let root = resolution.root("gdo").unwrap();
    let platforms: Vec<_> = root.registrations().iter().map(|r| r.platform).collect();

    assert_eq!(platforms.first(), Some(&Platform::BinarySensor));
    assert_eq!(platforms.last(), Some(&Platform::TextSensor));
    assert!(root
        .registrations()
        .iter()
        .any(|r| r.method == "register_obstruction_sensor"));
}

#[test]
fn test_script_actions_are_bound() {
    let resolution = resolve();
    assert_eq!(resolution.scripts.len(), 1);

    let script = &resolution.scripts[0];
    assert_eq!(script.id.as_str(), "close_garage");
    assert_eq!(script.then.steps.len(), 4);

    let commands: Vec<_> = script
        .then
        .bound_actions()
        .iter()
        .map(|action| action.command)
        .collect();
    assert_eq!(commands, vec![Command::DoorClose, Command::LightToggle]);
}

#[test]
fn test_summary_serializes() {
    let resolution = resolve();
    let json = serde_json::to_value(&resolution).unwrap();

    let root = &json["roots"]["gdo"];
    assert_eq!(root["settings"]["uart_tx_pin"], 17);
    assert_eq!(root["settings"]["min_command_interval"], 50);
    assert_eq!(root["buttons"][0]["type"], "sync");
    assert_eq!(root["door"]["attributes"]["device_class"], "garage");
    assert_eq!(root["protocol_select"]["traits"]["initial_option"], "security+2.0");
}

#[test]
fn test_load_failures_surface_as_config_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("garage.yaml"),
        "secplus_gdo:\nbutton: !include missing_buttons.yaml\n",
    )
    .unwrap();

    let err = resolve_file(dir.path(), "garage.yaml").unwrap_err();
    assert!(matches!(
        err,
        gdo_resolver::ResolveError::Config(gdo_config::ConfigError::IncludeNotFound { .. })
    ));
}

#[test]
fn test_resolution_errors_from_files() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("secrets.yaml"), "gdo_pin: 4\n").unwrap();
    std::fs::write(
        dir.path().join("garage.yaml"),
        "secplus_gdo:\n  uart_tx_pin: !secret gdo_pin\n  uart_rx_pin: !secret gdo_pin\n",
    )
    .unwrap();

    let err = resolve_file(dir.path(), "garage.yaml").unwrap_err();
    assert!(matches!(err, gdo_resolver::ResolveError::ConfigConflict { .. }));
}
