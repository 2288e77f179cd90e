use crate::action::{Command, CommandResult, GdoCommands};
use crate::component::GdoComponent;
use crate::defaults::AttributeDefault;
use crate::error::ResolveResult;
use crate::kind::{Entity, EntityKind, Registration};
use crate::pass::ResolutionPass;
use crate::schema::{
    ClosedSet, Fields, CONF_DEVICE_CLASS, CONF_DISABLED_BY_DEFAULT, CONF_ENTITY_CATEGORY,
    CONF_ICON, CONF_NAME, ENTITY_CATEGORY_CONFIG,
};
use gdo_core::Platform;
use serde::Serialize;

/// Buttons firing one opener command each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonType {
    Sync,
    Resync,
    RestartComms,
    ResetTravelTimings,
    DoorOpen,
    DoorClose,
    DoorStop,
    DoorToggle,
    LightToggle,
    LockToggle,
}

pub type Button = Entity<ButtonType>;

const SYNC_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_NAME, "Sync opener"),
    AttributeDefault::text(CONF_ICON, "mdi:sync"),
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_CONFIG),
];
const RESYNC_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_NAME, "Resync opener"),
    AttributeDefault::text(CONF_ICON, "mdi:sync-alert"),
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_CONFIG),
];
const RESTART_COMMS_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_NAME, "Restart GDO comms"),
    AttributeDefault::text(CONF_ICON, "mdi:restart"),
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_CONFIG),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
];
const RESET_TRAVEL_TIMINGS_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_NAME, "Reset travel timings"),
    AttributeDefault::text(CONF_ICON, "mdi:timer-refresh"),
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_CONFIG),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
];
const DOOR_OPEN_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_NAME, "Door open"),
    AttributeDefault::text(CONF_ICON, "mdi:garage-open"),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
];
const DOOR_CLOSE_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_NAME, "Door close"),
    AttributeDefault::text(CONF_ICON, "mdi:garage"),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
];
const DOOR_STOP_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_NAME, "Door stop"),
    AttributeDefault::text(CONF_ICON, "mdi:garage-alert"),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
];
const DOOR_TOGGLE_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_NAME, "Door toggle"),
    AttributeDefault::text(CONF_ICON, "mdi:garage-variant"),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
];
const LIGHT_TOGGLE_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_NAME, "Light toggle"),
    AttributeDefault::text(CONF_ICON, "mdi:lightbulb-on-outline"),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
];
const LOCK_TOGGLE_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_NAME, "Lock toggle"),
    AttributeDefault::text(CONF_ICON, "mdi:lock-reset"),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
];

impl ButtonType {
    /// The command this button fires when pressed
    pub fn command(self) -> Command {
        match self {
            ButtonType::Sync => Command::Sync,
            ButtonType::Resync => Command::Resync,
            ButtonType::RestartComms => Command::RestartComms,
            ButtonType::ResetTravelTimings => Command::ResetTravelTimings,
            ButtonType::DoorOpen => Command::DoorOpen,
            ButtonType::DoorClose => Command::DoorClose,
            ButtonType::DoorStop => Command::DoorStop,
            ButtonType::DoorToggle => Command::DoorToggle,
            ButtonType::LightToggle => Command::LightToggle,
            ButtonType::LockToggle => Command::LockToggle,
        }
    }
}

impl ClosedSet for ButtonType {
    const ALL: &'static [Self] = &[
        ButtonType::Sync,
        ButtonType::Resync,
        ButtonType::RestartComms,
        ButtonType::ResetTravelTimings,
        ButtonType::DoorOpen,
        ButtonType::DoorClose,
        ButtonType::DoorStop,
        ButtonType::DoorToggle,
        ButtonType::LightToggle,
        ButtonType::LockToggle,
    ];

    fn as_str(self) -> &'static str {
        self.command().as_str()
    }
}

impl EntityKind for ButtonType {
    const PLATFORM: Platform = Platform::Button;
    const SCHEMA: &'static [&'static str] = &[CONF_DEVICE_CLASS];
    type Traits = Command;

    fn defaults(self) -> &'static [AttributeDefault] {
        match self {
            ButtonType::Sync => SYNC_DEFAULTS,
            ButtonType::Resync => RESYNC_DEFAULTS,
            ButtonType::RestartComms => RESTART_COMMS_DEFAULTS,
            ButtonType::ResetTravelTimings => RESET_TRAVEL_TIMINGS_DEFAULTS,
            ButtonType::DoorOpen => DOOR_OPEN_DEFAULTS,
            ButtonType::DoorClose => DOOR_CLOSE_DEFAULTS,
            ButtonType::DoorStop => DOOR_STOP_DEFAULTS,
            ButtonType::DoorToggle => DOOR_TOGGLE_DEFAULTS,
            ButtonType::LightToggle => LIGHT_TOGGLE_DEFAULTS,
            ButtonType::LockToggle => LOCK_TOGGLE_DEFAULTS,
        }
    }

    // every button goes through the same entry point and carries its command
    fn registration(self) -> Registration<Self> {
        Registration::new("register_command_button", GdoComponent::add_button)
    }

    fn traits(self, _fields: &Fields<'_>, _pass: &ResolutionPass) -> ResolveResult<Command> {
        Ok(self.command())
    }
}

impl Button {
    /// Fire the button's command on the owning root's driver
    pub fn press(&self, driver: &mut dyn GdoCommands) -> CommandResult {
        self.traits.invoke(driver)
    }
}
