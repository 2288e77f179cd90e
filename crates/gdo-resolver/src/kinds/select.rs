use crate::component::GdoComponent;
use crate::defaults::AttributeDefault;
use crate::error::ResolveResult;
use crate::kind::{Entity, EntityKind, Registration};
use crate::pass::ResolutionPass;
use crate::schema::{
    ClosedSet, Fields, CONF_ENTITY_CATEGORY, CONF_ICON, CONF_INITIAL_OPTION,
    ENTITY_CATEGORY_CONFIG,
};
use gdo_core::Platform;
use serde::{Serialize, Serializer};

/// Wire protocol selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectType {
    Protocol,
}

/// Protocols the opener can be driven with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolOption {
    Auto,
    SecurityPlus1,
    SecurityPlus2,
    SecurityPlus1SmartPanel,
}

impl ClosedSet for ProtocolOption {
    const ALL: &'static [Self] = &[
        ProtocolOption::Auto,
        ProtocolOption::SecurityPlus1,
        ProtocolOption::SecurityPlus2,
        ProtocolOption::SecurityPlus1SmartPanel,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ProtocolOption::Auto => "auto",
            ProtocolOption::SecurityPlus1 => "security+1.0",
            ProtocolOption::SecurityPlus2 => "security+2.0",
            ProtocolOption::SecurityPlus1SmartPanel => "security+1.0 with smart panel",
        }
    }
}

impl Serialize for ProtocolOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectTraits {
    pub options: Vec<&'static str>,
    pub initial_option: ProtocolOption,
}

pub type Select = Entity<SelectType>;

const PROTOCOL_DEFAULTS: &[AttributeDefault] = &[
    AttributeDefault::text(CONF_ENTITY_CATEGORY, ENTITY_CATEGORY_CONFIG),
    AttributeDefault::text(CONF_ICON, "mdi:cog-sync"),
    AttributeDefault::text(CONF_INITIAL_OPTION, "auto"),
];

impl ClosedSet for SelectType {
    const ALL: &'static [Self] = &[SelectType::Protocol];

    fn as_str(self) -> &'static str {
        match self {
            SelectType::Protocol => "protocol",
        }
    }
}

impl EntityKind for SelectType {
    const PLATFORM: Platform = Platform::Select;
    const SCHEMA: &'static [&'static str] = &[CONF_INITIAL_OPTION];
    type Traits = SelectTraits;

    fn defaults(self) -> &'static [AttributeDefault] {
        match self {
            SelectType::Protocol => PROTOCOL_DEFAULTS,
        }
    }

    fn registration(self) -> Registration<Self> {
        match self {
            SelectType::Protocol => {
                Registration::new("register_protocol_select", GdoComponent::set_protocol_select)
            }
        }
    }

    fn traits(self, fields: &Fields<'_>, _pass: &ResolutionPass) -> ResolveResult<SelectTraits> {
        Ok(SelectTraits {
            options: ProtocolOption::legal_values(),
            initial_option: fields
                .option(CONF_INITIAL_OPTION)?
                .unwrap_or(ProtocolOption::Auto),
        })
    }
}
