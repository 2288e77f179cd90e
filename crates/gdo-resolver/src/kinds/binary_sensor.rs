use crate::component::GdoComponent;
use crate::defaults::AttributeDefault;
use crate::error::ResolveResult;
use crate::kind::{Entity, EntityKind, Registration};
use crate::pass::ResolutionPass;
use crate::schema::{
    ClosedSet, Fields, CONF_DEVICE_CLASS, CONF_DISABLED_BY_DEFAULT, CONF_ENTITY_CATEGORY,
    CONF_ICON, ENTITY_CATEGORY_DIAGNOSTIC,
};
use gdo_core::Platform;
use serde::Serialize;

/// Opener events reported as on/off state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinarySensorType {
    Motion,
    Obstruction,
    Motor,
    Button,
    Sync,
    WirelessRemote,
}

pub type BinarySensor = Entity<BinarySensorType>;

const MOTION_DEFAULTS: &[AttributeDefault] = &[AttributeDefault::text(CONF_DEVICE_CLASS, "motion")];
const OBSTRUCTION_DEFAULTS: &[AttributeDefault] =
    &[AttributeDefault::text(CONF_DEVICE_CLASS, "problem")];
const MOTOR_DEFAULTS: &[AttributeDefault] = &[AttributeDefault::text(CONF_DEVICE_CLASS, "running")];
const SYNC_DEFAULTS: &[AttributeDefault] =
    &[AttributeDefault::text(CONF_DEVICE_CLASS, "connectivity")];
const WIRELESS_REMOTE_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_ICON, "mdi:remote"),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_DIAGNOSTIC),
];
const BUTTON_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_DIAGNOSTIC),
];

impl ClosedSet for BinarySensorType {
    const ALL: &'static [Self] = &[
        BinarySensorType::Motion,
        BinarySensorType::Obstruction,
        BinarySensorType::Motor,
        BinarySensorType::Button,
        BinarySensorType::Sync,
        BinarySensorType::WirelessRemote,
    ];

    fn as_str(self) -> &'static str {
        match self {
            BinarySensorType::Motion => "motion",
            BinarySensorType::Obstruction => "obstruction",
            BinarySensorType::Motor => "motor",
            BinarySensorType::Button => "button",
            BinarySensorType::Sync => "sync",
            BinarySensorType::WirelessRemote => "wireless_remote",
        }
    }
}

impl EntityKind for BinarySensorType {
    const PLATFORM: Platform = Platform::BinarySensor;
    const SCHEMA: &'static [&'static str] = &[CONF_DEVICE_CLASS];
    type Traits = ();

    fn defaults(self) -> &'static [AttributeDefault] {
        match self {
            BinarySensorType::Motion => MOTION_DEFAULTS,
            BinarySensorType::Obstruction => OBSTRUCTION_DEFAULTS,
            BinarySensorType::Motor => MOTOR_DEFAULTS,
            BinarySensorType::Button => BUTTON_DEFAULTS,
            BinarySensorType::Sync => SYNC_DEFAULTS,
            BinarySensorType::WirelessRemote => WIRELESS_REMOTE_DEFAULTS,
        }
    }

    fn registration(self) -> Registration<Self> {
        let method = match self {
            BinarySensorType::Motion => "register_motion_sensor",
            BinarySensorType::Obstruction => "register_obstruction_sensor",
            BinarySensorType::Motor => "register_motor_sensor",
            BinarySensorType::Button => "register_button_sensor",
            BinarySensorType::Sync => "register_sync_sensor",
            BinarySensorType::WirelessRemote => "register_wireless_remote_sensor",
        };
        Registration::new(method, GdoComponent::add_binary_sensor)
    }

    fn traits(self, _fields: &Fields<'_>, _pass: &ResolutionPass) -> ResolveResult<()> {
        Ok(())
    }
}
