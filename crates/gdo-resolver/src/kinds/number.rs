use crate::component::GdoComponent;
use crate::defaults::AttributeDefault;
use crate::error::ResolveResult;
use crate::kind::{Entity, EntityKind, Registration};
use crate::pass::ResolutionPass;
use crate::schema::{
    ClosedSet, Fields, CONF_DEVICE_CLASS, CONF_DISABLED_BY_DEFAULT, CONF_ENTITY_CATEGORY,
    CONF_MODE, CONF_UNIT_OF_MEASUREMENT, ENTITY_CATEGORY_CONFIG,
};
use gdo_core::Platform;
use serde::Serialize;

/// Opener values that can be read and written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberType {
    OpenDuration,
    CloseDuration,
    ClientId,
    RollingCode,
}

/// Value range of a number entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberTraits {
    pub min_value: u32,
    pub max_value: u32,
    pub step: u32,
}

pub type Number = Entity<NumberType>;

const DURATION_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_CONFIG),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
];
const IDENTIFIER_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_CONFIG),
    AttributeDefault::flag(CONF_DISABLED_BY_DEFAULT, true),
    AttributeDefault::text(CONF_MODE, "box"),
];

impl NumberType {
    /// Travel durations are 16-bit on the wire, identifiers and counters 32-bit
    pub const fn bounds(self) -> NumberTraits {
        let max_value = match self {
            NumberType::OpenDuration | NumberType::CloseDuration => u16::MAX as u32,
            NumberType::ClientId | NumberType::RollingCode => u32::MAX,
        };
        NumberTraits {
            min_value: 0,
            max_value,
            step: 1,
        }
    }
}

impl ClosedSet for NumberType {
    const ALL: &'static [Self] = &[
        NumberType::OpenDuration,
        NumberType::CloseDuration,
        NumberType::ClientId,
        NumberType::RollingCode,
    ];

    fn as_str(self) -> &'static str {
        match self {
            NumberType::OpenDuration => "open_duration",
            NumberType::CloseDuration => "close_duration",
            NumberType::ClientId => "client_id",
            NumberType::RollingCode => "rolling_code",
        }
    }
}

impl EntityKind for NumberType {
    const PLATFORM: Platform = Platform::Number;
    const SCHEMA: &'static [&'static str] = &[CONF_UNIT_OF_MEASUREMENT, CONF_DEVICE_CLASS, CONF_MODE];
    type Traits = NumberTraits;

    fn defaults(self) -> &'static [AttributeDefault] {
        match self {
            NumberType::OpenDuration | NumberType::CloseDuration => DURATION_DEFAULTS,
            NumberType::ClientId | NumberType::RollingCode => IDENTIFIER_DEFAULTS,
        }
    }

    fn registration(self) -> Registration<Self> {
        let method = match self {
            NumberType::OpenDuration => "register_open_duration",
            NumberType::CloseDuration => "register_close_duration",
            NumberType::ClientId => "register_client_id",
            NumberType::RollingCode => "register_rolling_code",
        };
        Registration::new(method, GdoComponent::set_number)
    }

    fn traits(self, _fields: &Fields<'_>, _pass: &ResolutionPass) -> ResolveResult<NumberTraits> {
        Ok(self.bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_by_variant() {
        assert_eq!(NumberType::OpenDuration.bounds().max_value, 65_535);
        assert_eq!(NumberType::CloseDuration.bounds().max_value, 65_535);
        assert_eq!(NumberType::ClientId.bounds().max_value, 4_294_967_295);
        assert_eq!(NumberType::RollingCode.bounds().max_value, 4_294_967_295);
        for number in NumberType::ALL {
            assert_eq!(number.bounds().min_value, 0);
            assert_eq!(number.bounds().step, 1);
        }
    }
}
