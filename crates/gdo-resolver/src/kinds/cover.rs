use crate::automation::Automation;
use crate::component::GdoComponent;
use crate::defaults::AttributeDefault;
use crate::error::ResolveResult;
use crate::kind::{Entity, EntityKind, Registration};
use crate::pass::ResolutionPass;
use crate::schema::{
    ClosedSet, Fields, CONF_DEVICE_CLASS, CONF_PRE_CLOSE_WARNING_DURATION,
    CONF_PRE_CLOSE_WARNING_END, CONF_PRE_CLOSE_WARNING_START,
};
use gdo_core::{Platform, TimePeriod};
use serde::Serialize;

/// The garage door itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverType {
    Door,
}

/// Warning phase run before the door closes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverTraits {
    pub pre_close_warning_duration: TimePeriod,
    pub pre_close_warning_start: Automation,
    pub pre_close_warning_end: Automation,
}

pub type Cover = Entity<CoverType>;

const DOOR_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_DEVICE_CLASS, "garage"),
    AttributeDefault::text(CONF_PRE_CLOSE_WARNING_DURATION, "0s"),
];

impl ClosedSet for CoverType {
    const ALL: &'static [Self] = &[CoverType::Door];

    fn as_str(self) -> &'static str {
        match self {
            CoverType::Door => "door",
        }
    }
}

impl EntityKind for CoverType {
    const PLATFORM: Platform = Platform::Cover;
    const SCHEMA: &'static [&'static str] = &[
        CONF_DEVICE_CLASS,
        CONF_PRE_CLOSE_WARNING_DURATION,
        CONF_PRE_CLOSE_WARNING_START,
        CONF_PRE_CLOSE_WARNING_END,
    ];
    type Traits = CoverTraits;

    fn defaults(self) -> &'static [AttributeDefault] {
        match self {
            CoverType::Door => DOOR_DEFAULTS,
        }
    }

    fn registration(self) -> Registration<Self> {
        match self {
            CoverType::Door => Registration::new("register_door", GdoComponent::set_door),
        }
    }

    fn traits(self, fields: &Fields<'_>, pass: &ResolutionPass) -> ResolveResult<CoverTraits> {
        let automation = |key: &str| match fields.raw(key) {
            Some(value) => Automation::parse(value, &fields.key_path(key), pass),
            None => Ok(Automation::default()),
        };

        Ok(CoverTraits {
            pre_close_warning_duration: fields
                .parse(CONF_PRE_CLOSE_WARNING_DURATION)?
                .unwrap_or(TimePeriod::ZERO),
            pre_close_warning_start: automation(CONF_PRE_CLOSE_WARNING_START)?,
            pre_close_warning_end: automation(CONF_PRE_CLOSE_WARNING_END)?,
        })
    }
}
