//! Configuration document loading for the secplus_gdo resolver
//!
//! Documents are YAML with the host's custom tags:
//!
//! - `!include path` - Include another YAML file
//! - `!include_dir_list dir` - Include all YAML files in a directory as a list
//! - `!include_dir_merge_list dir` - Merge lists from all YAML files
//! - `!include_dir_named dir` - Include all YAML files as a mapping
//! - `!include_dir_merge_named dir` - Merge mappings from all YAML files
//! - `!secret key` - Substitute from secrets.yaml
//! - `!env_var VAR` - Environment variable substitution
//!
//! After tag processing, [`ConfigDocument`] splits the document into the
//! declarations the resolver consumes: `secplus_gdo` roots, entity
//! declarations whose `platform` is `secplus_gdo`, and scripts.
//!
//! # Example
//!
//! ```ignore
//! use gdo_config::ConfigDocument;
//!
//! let document = ConfigDocument::load("/config", "garage.yaml")?;
//! for entity in &document.entities {
//!     println!("{} at {}", entity.platform, entity.path);
//! }
//! ```

mod document;
mod error;
mod loader;
mod secrets;

pub use document::{ConfigDocument, Declaration, EntityDeclaration};
pub use error::{ConfigError, ConfigResult};
pub use loader::{load_yaml, load_yaml_string, YamlLoader};
pub use secrets::Secrets;

// Re-export serde_yaml types for convenience
pub use serde_yaml::{Mapping, Value};
