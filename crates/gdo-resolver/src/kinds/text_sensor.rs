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

/// Opener status strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSensorType {
    Battery,
    Protocol,
    GdolibVersion,
    OpenerId,
    LastError,
    LastEvent,
}

pub type TextSensor = Entity<TextSensorType>;

const BATTERY_DEFAULTS: &[AttributeDefault] = &[AttributeDefault::text(CONF_ICON, "mdi:battery")];
const PROTOCOL_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_ICON, "mdi:protocol"),
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_DIAGNOSTIC),
];

macro_rules! hidden_diagnostic {
    ($icon:literal) => {
        &[
            AttributeDefault::text(CONF_ICON, $icon),
            AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_DIAGNOSTIC),
            AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
        ]
    };
}

const GDOLIB_VERSION_DEFAULTS: &[AttributeDefault] = hidden_diagnostic!("mdi:source-branch");
const OPENER_ID_DEFAULTS: &[AttributeDefault] = hidden_diagnostic!("mdi:identifier");
const LAST_ERROR_DEFAULTS: &[AttributeDefault] = hidden_diagnostic!("mdi:alert-circle-outline");
const LAST_EVENT_DEFAULTS: &[AttributeDefault] = hidden_diagnostic!("mdi:timeline-text-outline");

impl ClosedSet for TextSensorType {
    const ALL: &'static [Self] = &[
        TextSensorType::Battery,
        TextSensorType::Protocol,
        TextSensorType::GdolibVersion,
        TextSensorType::OpenerId,
        TextSensorType::LastError,
        TextSensorType::LastEvent,
    ];

    fn as_str(self) -> &'static str {
        match self {
            TextSensorType::Battery => "battery",
            TextSensorType::Protocol => "protocol",
            TextSensorType::GdolibVersion => "gdolib_version",
            TextSensorType::OpenerId => "opener_id",
            TextSensorType::LastError => "last_error",
            TextSensorType::LastEvent => "last_event",
        }
    }
}

impl EntityKind for TextSensorType {
    const PLATFORM: Platform = Platform::TextSensor;
    const SCHEMA: &'static [&'static str] = &[CONF_DEVICE_CLASS];
    type Traits = ();

    fn defaults(self) -> &'static [AttributeDefault] {
        match self {
            TextSensorType::Battery => BATTERY_DEFAULTS,
            TextSensorType::Protocol => PROTOCOL_DEFAULTS,
            TextSensorType::GdolibVersion => GDOLIB_VERSION_DEFAULTS,
            TextSensorType::OpenerId => OPENER_ID_DEFAULTS,
            TextSensorType::LastError => LAST_ERROR_DEFAULTS,
            TextSensorType::LastEvent => LAST_EVENT_DEFAULTS,
        }
    }

    fn registration(self) -> Registration<Self> {
        let method = match self {
            TextSensorType::Battery => "register_battery_text_sensor",
            TextSensorType::Protocol => "register_protocol_text_sensor",
            TextSensorType::GdolibVersion => "register_gdolib_version_text_sensor",
            TextSensorType::OpenerId => "register_opener_id_text_sensor",
            TextSensorType::LastError => "register_last_error_text_sensor",
            TextSensorType::LastEvent => "register_last_event_text_sensor",
        };
        Registration::new(method, GdoComponent::add_text_sensor)
    }

    fn traits(self, _fields: &Fields<'_>, _pass: &ResolutionPass) -> ResolveResult<()> {
        Ok(())
    }
}
