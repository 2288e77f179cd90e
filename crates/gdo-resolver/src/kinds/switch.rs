use crate::component::GdoComponent;
use crate::defaults::AttributeDefault;
use crate::error::ResolveResult;
use crate::kind::{Entity, EntityKind, Registration};
use crate::pass::ResolutionPass;
use crate::schema::{
    ClosedSet, Fields, CONF_DEVICE_CLASS, CONF_DISABLED_BY_DEFAULT, CONF_ENTITY_CATEGORY,
    CONF_ICON, CONF_RESTORE_MODE, ENTITY_CATEGORY_CONFIG,
};
use gdo_core::Platform;
use serde::Serialize;

/// Opener modes that can be switched on and off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchType {
    /// Pairing mode for new remotes
    Learn,
    /// Opener only accepts toggle commands
    ToggleOnly,
}

pub type Switch = Entity<SwitchType>;

const LEARN_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_ICON, "mdi:school"),
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_CONFIG),
];
const TOGGLE_ONLY_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_ICON, "mdi:swap-horizontal"),
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_CONFIG),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
];

impl ClosedSet for SwitchType {
    const ALL: &'static [Self] = &[SwitchType::Learn, SwitchType::ToggleOnly];

    fn as_str(self) -> &'static str {
        match self {
            SwitchType::Learn => "learn",
            SwitchType::ToggleOnly => "toggle_only",
        }
    }
}

impl EntityKind for SwitchType {
    const PLATFORM: Platform = Platform::Switch;
    const SCHEMA: &'static [&'static str] = &[CONF_DEVICE_CLASS, CONF_RESTORE_MODE];
    type Traits = ();

    fn defaults(self) -> &'static [AttributeDefault] {
        match self {
            SwitchType::Learn => LEARN_DEFAULTS,
            SwitchType::ToggleOnly => TOGGLE_ONLY_DEFAULTS,
        }
    }

    fn registration(self) -> Registration<Self> {
        let method = match self {
            SwitchType::Learn => "register_learn",
            SwitchType::ToggleOnly => "register_toggle_only",
        };
        Registration::new(method, GdoComponent::set_switch)
    }

    fn traits(self, _fields: &Fields<'_>, _pass: &ResolutionPass) -> ResolveResult<()> {
        Ok(())
    }
}
