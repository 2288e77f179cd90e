use crate::component::GdoComponent;
use crate::defaults::AttributeDefault;
use crate::error::ResolveResult;
use crate::kind::{Entity, EntityKind, Registration};
use crate::pass::ResolutionPass;
use crate::schema::{
    ClosedSet, Fields, CONF_DEFAULT_TRANSITION_LENGTH, CONF_ICON, CONF_OUTPUT_ID,
    CONF_RESTORE_MODE,
};
use gdo_core::{ComponentId, Platform};
use serde::Serialize;

/// The opener's built-in light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightType {
    Light,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LightTraits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_id: Option<ComponentId>,
}

pub type Light = Entity<LightType>;

const LIGHT_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_ICON, "mdi:lightbulb"),
    AttributeDefault::text(CONF_RESTORE_MODE, "ALWAYS_OFF"),
];

impl ClosedSet for LightType {
    const ALL: &'static [Self] = &[LightType::Light];

    fn as_str(self) -> &'static str {
        match self {
            LightType::Light => "light",
        }
    }
}

impl EntityKind for LightType {
    const PLATFORM: Platform = Platform::Light;
    const SCHEMA: &'static [&'static str] =
        &[CONF_RESTORE_MODE, CONF_DEFAULT_TRANSITION_LENGTH, CONF_OUTPUT_ID];
    type Traits = LightTraits;

    fn defaults(self) -> &'static [AttributeDefault] {
        match self {
            LightType::Light => LIGHT_DEFAULTS,
        }
    }

    fn registration(self) -> Registration<Self> {
        match self {
            LightType::Light => Registration::new("register_light", GdoComponent::set_light),
        }
    }

    fn traits(self, fields: &Fields<'_>, _pass: &ResolutionPass) -> ResolveResult<LightTraits> {
        Ok(LightTraits {
            output_id: fields.id(CONF_OUTPUT_ID)?,
        })
    }
}
