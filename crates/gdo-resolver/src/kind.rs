//! Entity kind descriptors
//!
//! Each platform is described once by a discriminant enum implementing
//! [`EntityKind`]: its extra schema keys, the defaults table per variant,
//! the registration target per variant and any kind-specific traits (number
//! bounds, select options, cover automations). The generic factory in
//! [`crate::factory`] is the only code path that consumes these descriptors.

use crate::attributes::EntityAttributes;
use crate::component::GdoComponent;
use crate::defaults::AttributeDefault;
use crate::error::ResolveResult;
use crate::pass::ResolutionPass;
use crate::schema::{ClosedSet, Fields};
use gdo_core::{ComponentId, Platform};
use serde::Serialize;
use serde_yaml::Mapping;
use std::fmt;
use std::hash::Hash;

/// Descriptor of one entity platform, implemented by its discriminant enum
pub trait EntityKind: ClosedSet + fmt::Debug + Eq + Hash + Serialize {
    const PLATFORM: Platform;

    /// Keys accepted in addition to the base entity schema and `type`
    const SCHEMA: &'static [&'static str];

    /// Kind-specific data carried by every entity of this kind
    type Traits: fmt::Debug + Clone + PartialEq + Serialize;

    /// Attribute defaults of this variant
    fn defaults(self) -> &'static [AttributeDefault];

    /// Root registration target of this variant
    fn registration(self) -> Registration<Self>;

    /// Build the kind-specific traits from the merged declaration
    fn traits(self, fields: &Fields<'_>, pass: &ResolutionPass) -> ResolveResult<Self::Traits>;
}

/// A resolved entity, attached to its root by id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity<K: EntityKind> {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub kind: K,
    pub attributes: EntityAttributes,
    pub traits: K::Traits,
    /// Owning root; a back-reference by identity, never ownership
    pub parent: ComponentId,
    /// Host platform keys (filters, triggers), kept as written
    #[serde(skip_serializing_if = "Mapping::is_empty")]
    pub host: Mapping,
}

/// Attach function storing an entity in its root
pub type AttachFn<K> = fn(&mut GdoComponent, Entity<K>) -> ResolveResult<()>;

/// The root driver entry point a variant registers through
pub struct Registration<K: EntityKind> {
    pub method: &'static str,
    pub attach: AttachFn<K>,
}

impl<K: EntityKind> Registration<K> {
    pub const fn new(method: &'static str, attach: AttachFn<K>) -> Self {
        Self { method, attach }
    }
}

impl<K: EntityKind> Clone for Registration<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: EntityKind> Copy for Registration<K> {}

impl<K: EntityKind> fmt::Debug for Registration<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("method", &self.method)
            .finish()
    }
}

impl<K: EntityKind> PartialEq for Registration<K> {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method
    }
}
