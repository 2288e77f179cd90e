//! Secrets store backing the `!secret` tag
//!
//! Pins, ids and intervals are often kept out of shared device files; the
//! store reads `secrets.yaml` next to the document and renders every scalar
//! as a string.

use crate::error::{ConfigError, ConfigResult};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Secrets loaded from secrets.yaml
#[derive(Debug, Clone)]
pub struct Secrets {
    values: HashMap<String, String>,
    path: PathBuf,
}

impl Secrets {
    /// An empty store that remembers where its file would live
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            values: HashMap::new(),
            path: path.into(),
        }
    }

    /// Load secrets from `<config_dir>/secrets.yaml`; a missing file yields an empty store
    pub fn load(config_dir: &Path) -> ConfigResult<Self> {
        let path = config_dir.join("secrets.yaml");

        if !path.exists() {
            debug!("No secrets.yaml found at {:?}, using empty secrets", path);
            return Ok(Self::empty(path));
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        let raw: HashMap<String, Value> =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
                path: path.clone(),
                source: e,
            })?;

        let values = raw
            .into_iter()
            .map(|(key, value)| (key, Self::render(value)))
            .collect::<HashMap<_, _>>();

        debug!("Loaded {} secrets from {:?}", values.len(), path);
        Ok(Self { values, path })
    }

    fn render(value: Value) -> String {
        match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            other => serde_yaml::to_string(&other)
                .unwrap_or_default()
                .trim()
                .to_string(),
        }
    }

    /// Get a secret by key
    pub fn get(&self, key: &str) -> ConfigResult<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::SecretNotFound {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Path of the secrets file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for Secrets {
    fn default() -> Self {
        Self::empty("secrets.yaml")
    }
}
