use crate::component::GdoComponent;
use crate::defaults::AttributeDefault;
use crate::error::ResolveResult;
use crate::kind::{Entity, EntityKind, Registration};
use crate::pass::ResolutionPass;
use crate::schema::{ClosedSet, Fields, CONF_ICON};
use gdo_core::Platform;
use serde::Serialize;

/// Remote lockout of the opener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockType {
    Lock,
}

pub type Lock = Entity<LockType>;

const LOCK_DEFAULTS: &[AttributeDefault] = &[AttributeDefault::text(CONF_ICON, "mdi:lock")];

impl ClosedSet for LockType {
    const ALL: &'static [Self] = &[LockType::Lock];

    fn as_str(self) -> &'static str {
        match self {
            LockType::Lock => "lock",
        }
    }
}

impl EntityKind for LockType {
    const PLATFORM: Platform = Platform::Lock;
    const SCHEMA: &'static [&'static str] = &[];
    type Traits = ();

    fn defaults(self) -> &'static [AttributeDefault] {
        match self {
            LockType::Lock => LOCK_DEFAULTS,
        }
    }

    fn registration(self) -> Registration<Self> {
        match self {
            LockType::Lock => Registration::new("register_lock", GdoComponent::set_lock),
        }
    }

    fn traits(self, _fields: &Fields<'_>, _pass: &ResolutionPass) -> ResolveResult<()> {
        Ok(())
    }
}
