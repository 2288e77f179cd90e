use crate::component::GdoComponent;
use crate::defaults::AttributeDefault;
use crate::error::ResolveResult;
use crate::kind::{Entity, EntityKind, Registration};
use crate::pass::ResolutionPass;
use crate::schema::{
    ClosedSet, Fields, CONF_ACCURACY_DECIMALS, CONF_DEVICE_CLASS, CONF_DISABLED_BY_DEFAULT,
    CONF_ENTITY_CATEGORY, CONF_FORCE_UPDATE, CONF_ICON, CONF_STATE_CLASS,
    CONF_UNIT_OF_MEASUREMENT, ENTITY_CATEGORY_DIAGNOSTIC,
};
use gdo_core::Platform;
use serde::Serialize;

/// Opener counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    Openings,
    PairedDevicesTotal,
    PairedDevicesRemotes,
    PairedDevicesKeypads,
    PairedDevicesWallControls,
    PairedDevicesAccessories,
}

pub type Sensor = Entity<SensorType>;

const OPENINGS_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_UNIT_OF_MEASUREMENT, "openings"),
    AttributeDefault::text(CONF_STATE_CLASS, "total_increasing"),
    AttributeDefault::text(CONF_ICON, "mdi:counter"),
];

macro_rules! paired_defaults {
    ($icon:literal) => {
        &[
            AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_DIAGNOSTIC),
            AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
            AttributeDefault::text(CONF_ICON, $icon),
        ]
    };
}

const PAIRED_TOTAL_DEFAULTS: &[AttributeDefault] = paired_defaults!("mdi:account-multiple");
const PAIRED_REMOTES_DEFAULTS: &[AttributeDefault] = paired_defaults!("mdi:remote");
const PAIRED_KEYPADS_DEFAULTS: &[AttributeDefault] = paired_defaults!("mdi:dialpad");
const PAIRED_WALL_CONTROLS_DEFAULTS: &[AttributeDefault] =
    paired_defaults!("mdi:gesture-tap-button");
const PAIRED_ACCESSORIES_DEFAULTS: &[AttributeDefault] = paired_defaults!("mdi:puzzle");

impl ClosedSet for SensorType {
    const ALL: &'static [Self] = &[
        SensorType::Openings,
        SensorType::PairedDevicesTotal,
        SensorType::PairedDevicesRemotes,
        SensorType::PairedDevicesKeypads,
        SensorType::PairedDevicesWallControls,
        SensorType::PairedDevicesAccessories,
    ];

    fn as_str(self) -> &'static str {
        match self {
            SensorType::Openings => "openings",
            SensorType::PairedDevicesTotal => "paired_devices_total",
            SensorType::PairedDevicesRemotes => "paired_devices_remotes",
            SensorType::PairedDevicesKeypads => "paired_devices_keypads",
            SensorType::PairedDevicesWallControls => "paired_devices_wall_controls",
            SensorType::PairedDevicesAccessories => "paired_devices_accessories",
        }
    }
}

impl EntityKind for SensorType {
    const PLATFORM: Platform = Platform::Sensor;
    const SCHEMA: &'static [&'static str] = &[
        CONF_UNIT_OF_MEASUREMENT,
        CONF_STATE_CLASS,
        CONF_ACCURACY_DECIMALS,
        CONF_DEVICE_CLASS,
        CONF_FORCE_UPDATE,
    ];
    type Traits = ();

    fn defaults(self) -> &'static [AttributeDefault] {
        match self {
            SensorType::Openings => OPENINGS_DEFAULTS,
            SensorType::PairedDevicesTotal => PAIRED_TOTAL_DEFAULTS,
            SensorType::PairedDevicesRemotes => PAIRED_REMOTES_DEFAULTS,
            SensorType::PairedDevicesKeypads => PAIRED_KEYPADS_DEFAULTS,
            SensorType::PairedDevicesWallControls => PAIRED_WALL_CONTROLS_DEFAULTS,
            SensorType::PairedDevicesAccessories => PAIRED_ACCESSORIES_DEFAULTS,
        }
    }

    fn registration(self) -> Registration<Self> {
        let method = match self {
            SensorType::Openings => "register_openings_sensor",
            SensorType::PairedDevicesTotal => "register_paired_total_sensor",
            SensorType::PairedDevicesRemotes => "register_paired_remotes_sensor",
            SensorType::PairedDevicesKeypads => "register_paired_keypads_sensor",
            SensorType::PairedDevicesWallControls => "register_paired_wall_controls_sensor",
            SensorType::PairedDevicesAccessories => "register_paired_accessories_sensor",
        };
        Registration::new(method, GdoComponent::add_sensor)
    }

    fn traits(self, _fields: &Fields<'_>, _pass: &ResolutionPass) -> ResolveResult<()> {
        Ok(())
    }
}
