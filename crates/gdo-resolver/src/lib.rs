//! Declaration resolver for the secplus_gdo garage door opener component
//!
//! Turns the secplus_gdo part of a configuration document into typed,
//! registered entities:
//!
//! - [`pins`] - tx/rx pin aliases, fallbacks and distinctness
//! - [`defaults`] - per-variant attribute defaults, merged by key presence
//! - [`kinds`] - one descriptor per platform ([`EntityKind`])
//! - [`factory`] - the generic build path shared by all kinds
//! - [`root`] - binds `secplus_gdo` declarations into [`GdoComponent`]s
//! - [`action`] - the ten `secplus_gdo.*` commands and [`GdoCommands`]
//! - [`automation`] - action lists of scripts and cover warnings
//! - [`pass`] - orders the above over one document and fails fast
//!
//! # Example
//!
//! ```ignore
//! use gdo_config::ConfigDocument;
//! use gdo_resolver::resolve_document;
//!
//! let document = ConfigDocument::load("/config", "garage.yaml")?;
//! let resolution = resolve_document(&document)?;
//! for root in resolution.roots.values() {
//!     println!("{}: {} entities", root.id, root.entity_count());
//! }
//! ```

pub mod action;
pub mod attributes;
pub mod automation;
pub mod component;
pub mod defaults;
mod error;
pub mod factory;
pub mod kind;
pub mod kinds;
pub mod pass;
pub mod pins;
pub mod root;
pub mod schema;
mod value;

pub use action::{bind_action, BoundAction, Command, CommandError, CommandResult, GdoCommands};
pub use attributes::{EntityAttributes, NumberMode, RestoreMode, StateClass};
pub use automation::{ActionStep, Automation, Script};
pub use component::{GdoComponent, RegistrationRecord};
pub use defaults::{resolve_defaults, AttributeDefault, DefaultValue};
pub use error::{ResolveError, ResolveResult};
pub use kind::{Entity, EntityKind, Registration};
pub use pass::{resolve_document, Resolution, ResolutionPass};
pub use pins::normalize_pins;
pub use root::{bind_root, DriverSettings};
pub use schema::{ClosedSet, Fields};

use gdo_config::ConfigDocument;
use std::path::{Path, PathBuf};

/// Load a document from disk and resolve it
pub fn resolve_file(
    config_dir: impl Into<PathBuf>,
    file: impl AsRef<Path>,
) -> ResolveResult<Resolution> {
    let document = ConfigDocument::load(config_dir, file)?;
    resolve_document(&document)
}
