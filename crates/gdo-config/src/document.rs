//! Splits a loaded document into the declarations the resolver consumes
//!
//! Only three kinds of top-level keys are read:
//! - `secplus_gdo:` a mapping, a list of mappings, or empty (all defaults)
//! - one list per entity platform (`sensor:`, `cover:`, ...), of which only
//!   items with `platform: secplus_gdo` are taken
//! - `script:` a list of scripts whose steps may use `secplus_gdo.*` actions
//!
//! Everything else belongs to the host and is ignored.

use crate::error::{ConfigError, ConfigResult};
use crate::loader::load_yaml;
use gdo_core::{Platform, DOMAIN};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

const CONF_PLATFORM: &str = "platform";
const CONF_SCRIPT: &str = "script";

/// A raw declaration together with its location in the document
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Location used in error messages (e.g. `secplus_gdo[1]`)
    pub path: String,
    pub config: Mapping,
}

/// A raw entity declaration for one of the secplus_gdo platforms
///
/// The `platform` routing key has already been removed from `config`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDeclaration {
    pub platform: Platform,
    /// Position in the platform list, used for generated ids
    pub index: usize,
    /// Location used in error messages (e.g. `sensor[2]`)
    pub path: String,
    pub config: Mapping,
}

/// The secplus_gdo view of a configuration document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    pub roots: Vec<Declaration>,
    pub entities: Vec<EntityDeclaration>,
    pub scripts: Vec<Declaration>,
}

impl ConfigDocument {
    /// Load a document file (with tag processing) and split it
    pub fn load(config_dir: impl Into<PathBuf>, file: impl AsRef<Path>) -> ConfigResult<Self> {
        let value = load_yaml(config_dir, file)?;
        Self::from_yaml(&value)
    }

    /// Split an already loaded document
    pub fn from_yaml(yaml: &Value) -> ConfigResult<Self> {
        let mapping = yaml.as_mapping().ok_or_else(|| ConfigError::InvalidSection {
            section: "root".to_string(),
            reason: "configuration must be a mapping".to_string(),
        })?;

        let mut document = Self::default();

        for (key, value) in mapping {
            let Some(key) = key.as_str() else {
                continue;
            };

            if key == DOMAIN {
                document.roots = Self::roots(value)?;
            } else if key == CONF_SCRIPT {
                document.scripts = Self::items(key, value)?
                    .into_iter()
                    .map(|(path, config)| Declaration { path, config })
                    .collect();
            } else if let Ok(platform) = key.parse::<Platform>() {
                let items = Self::items(key, value)?;
                for (index, (path, mut config)) in items.into_iter().enumerate() {
                    if config.get(CONF_PLATFORM).and_then(Value::as_str) != Some(DOMAIN) {
                        continue;
                    }
                    config.remove(CONF_PLATFORM);
                    document.entities.push(EntityDeclaration {
                        platform,
                        index,
                        path,
                        config,
                    });
                }
            }
        }

        debug!(
            "Document has {} root(s), {} entity declaration(s), {} script(s)",
            document.roots.len(),
            document.entities.len(),
            document.scripts.len()
        );

        Ok(document)
    }

    fn roots(value: &Value) -> ConfigResult<Vec<Declaration>> {
        match value {
            Value::Null => Ok(vec![Declaration {
                path: DOMAIN.to_string(),
                config: Mapping::new(),
            }]),
            Value::Mapping(config) => Ok(vec![Declaration {
                path: DOMAIN.to_string(),
                config: config.clone(),
            }]),
            Value::Sequence(_) => Ok(Self::items(DOMAIN, value)?
                .into_iter()
                .map(|(path, config)| Declaration { path, config })
                .collect()),
            _ => Err(ConfigError::InvalidSection {
                section: DOMAIN.to_string(),
                reason: "expected a mapping or a list of mappings".to_string(),
            }),
        }
    }

    /// Items of a list section as `(path, mapping)` pairs
    fn items(section: &str, value: &Value) -> ConfigResult<Vec<(String, Mapping)>> {
        let seq = match value {
            Value::Null => return Ok(Vec::new()),
            Value::Sequence(seq) => seq,
            _ => {
                return Err(ConfigError::InvalidSection {
                    section: section.to_string(),
                    reason: "expected a list".to_string(),
                })
            }
        };

        seq.iter()
            .enumerate()
            .map(|(index, item)| {
                let path = format!("{}[{}]", section, index);
                match item {
                    Value::Mapping(config) => Ok((path, config.clone())),
                    _ => Err(ConfigError::InvalidSection {
                        section: path,
                        reason: "expected a mapping".to_string(),
                    }),
                }
            })
            .collect()
    }
}
