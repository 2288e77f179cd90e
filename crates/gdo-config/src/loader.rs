//! YAML loader with custom tag support
//!
//! Tags are resolved eagerly while the document is read, so the resolver
//! only ever sees plain mappings, sequences and scalars.

use crate::error::{ConfigError, ConfigResult};
use crate::secrets::Secrets;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// How an `!include_dir_*` tag combines the files of a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirInclude {
    /// One list item per file
    List,
    /// Concatenate the lists of every file
    MergeList,
    /// One mapping entry per file, keyed by file stem
    Named,
    /// Merge the mappings of every file
    MergeNamed,
}

impl DirInclude {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "!include_dir_list" => Some(Self::List),
            "!include_dir_merge_list" => Some(Self::MergeList),
            "!include_dir_named" => Some(Self::Named),
            "!include_dir_merge_named" => Some(Self::MergeNamed),
            _ => None,
        }
    }
}

/// YAML loader with support for the host's custom tags
#[derive(Debug)]
pub struct YamlLoader {
    /// Base directory for resolving relative paths
    config_dir: PathBuf,
    /// Secrets store
    secrets: Secrets,
    /// Files currently being loaded, innermost last
    include_stack: Vec<PathBuf>,
}

impl YamlLoader {
    /// Create a new YAML loader for the given config directory
    pub fn new(config_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let config_dir = config_dir.into();
        let secrets = Secrets::load(&config_dir)?;
        Ok(Self::with_secrets(config_dir, secrets))
    }

    /// Create a loader with pre-loaded secrets
    pub fn with_secrets(config_dir: impl Into<PathBuf>, secrets: Secrets) -> Self {
        Self {
            config_dir: config_dir.into(),
            secrets,
            include_stack: Vec::new(),
        }
    }

    /// Load and process a YAML file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<Value> {
        let path = self.resolve_path(path.as_ref());
        debug!("Loading YAML file: {:?}", path);

        if self.include_stack.contains(&path) {
            return Err(ConfigError::CircularInclude { path });
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        self.include_stack.push(path.clone());
        let result = self.load_string(&content, &path);
        self.include_stack.pop();

        result
    }

    /// Load and process YAML from a string
    pub fn load_string(&mut self, content: &str, source_path: &Path) -> ConfigResult<Value> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: source_path.to_path_buf(),
            source: e,
        })?;

        self.process_value(value, source_path)
    }

    fn process_value(&mut self, value: Value, source_path: &Path) -> ConfigResult<Value> {
        match value {
            Value::Tagged(tagged) => self.process_tagged(*tagged, source_path),
            Value::Mapping(map) => {
                let mut result = Mapping::with_capacity(map.len());
                for (k, v) in map {
                    let key = self.process_value(k, source_path)?;
                    let value = self.process_value(v, source_path)?;
                    result.insert(key, value);
                }
                Ok(Value::Mapping(result))
            }
            Value::Sequence(seq) => seq
                .into_iter()
                .map(|v| self.process_value(v, source_path))
                .collect::<ConfigResult<Vec<_>>>()
                .map(Value::Sequence),
            scalar => Ok(scalar),
        }
    }

    fn process_tagged(&mut self, tagged: TaggedValue, source_path: &Path) -> ConfigResult<Value> {
        let tag = tagged.tag.to_string();
        trace!("Processing tag '{}' with value {:?}", tag, tagged.value);

        if let Some(mode) = DirInclude::from_tag(&tag) {
            return self.process_include_dir(mode, &tagged.value, source_path);
        }

        match tag.as_str() {
            "!include" => {
                let path = self.value_to_path(&tagged.value, source_path)?;
                if !path.is_file() {
                    return Err(ConfigError::IncludeNotFound { path });
                }
                debug!("Including file: {:?}", path);
                self.load_file(&path)
            }
            "!secret" => {
                let key = Self::tag_string(&tagged.value, "!secret", "secret key")?;
                let secret = self.secrets.get(key)?;
                debug!("Substituted secret: {}", key);
                Ok(Value::String(secret.to_string()))
            }
            "!env_var" => {
                let var = Self::tag_string(&tagged.value, "!env_var", "environment variable name")?;
                let value = std::env::var(var).map_err(|_| ConfigError::EnvVarNotFound {
                    var: var.to_string(),
                })?;
                debug!("Substituted env var: {}", var);
                Ok(Value::String(value))
            }
            // Unknown tags belong to the host (e.g. !lambda); keep them with processed contents
            _ => {
                let value = self.process_value(tagged.value, source_path)?;
                Ok(Value::Tagged(Box::new(TaggedValue {
                    tag: tagged.tag,
                    value,
                })))
            }
        }
    }

    fn process_include_dir(
        &mut self,
        mode: DirInclude,
        value: &Value,
        source_path: &Path,
    ) -> ConfigResult<Value> {
        let dir = self.value_to_path(value, source_path)?;
        debug!("Including directory {:?} as {:?}", dir, mode);

        let files = Self::yaml_files(&dir)?;
        match mode {
            DirInclude::List => files
                .iter()
                .map(|file| self.load_file(file))
                .collect::<ConfigResult<Vec<_>>>()
                .map(Value::Sequence),
            DirInclude::MergeList => {
                let mut result = Vec::new();
                for file in &files {
                    match self.load_file(file)? {
                        Value::Sequence(seq) => result.extend(seq),
                        other => result.push(other),
                    }
                }
                Ok(Value::Sequence(result))
            }
            DirInclude::Named => {
                let mut result = Mapping::new();
                for file in &files {
                    let name = file
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or_default()
                        .to_string();
                    result.insert(Value::String(name), self.load_file(file)?);
                }
                Ok(Value::Mapping(result))
            }
            DirInclude::MergeNamed => {
                let mut result = Mapping::new();
                for file in &files {
                    match self.load_file(file)? {
                        Value::Mapping(map) => result.extend(map),
                        // an empty file merges nothing
                        Value::Null => {}
                        _ => {
                            return Err(ConfigError::InvalidSection {
                                section: file.display().to_string(),
                                reason: "!include_dir_merge_named files must hold a mapping"
                                    .to_string(),
                            })
                        }
                    }
                }
                Ok(Value::Mapping(result))
            }
        }
    }

    fn tag_string<'v>(value: &'v Value, tag: &str, what: &str) -> ConfigResult<&'v str> {
        value.as_str().ok_or_else(|| ConfigError::InvalidTag {
            tag: tag.to_string(),
            reason: format!("{} must be a string", what),
        })
    }

    /// Convert a YAML value to a path, resolving relative to the including file
    fn value_to_path(&self, value: &Value, source_path: &Path) -> ConfigResult<PathBuf> {
        let path = value.as_str().ok_or_else(|| ConfigError::InvalidIncludePath {
            path: format!("{:?}", value),
            reason: "path must be a string".to_string(),
        })?;

        let path = Path::new(path);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let base_dir = source_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(&self.config_dir);
        Ok(base_dir.join(path))
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config_dir.join(path)
        }
    }

    /// All `.yaml`/`.yml` files in a directory, sorted by name
    fn yaml_files(dir: &Path) -> ConfigResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(ConfigError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| ConfigError::ReadFile {
                path: dir.to_path_buf(),
                source: e,
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();

        files.sort();
        Ok(files)
    }

    /// Get a reference to the secrets store
    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

/// Load a YAML file with full tag processing
pub fn load_yaml(config_dir: impl Into<PathBuf>, file: impl AsRef<Path>) -> ConfigResult<Value> {
    let mut loader = YamlLoader::new(config_dir)?;
    loader.load_file(file)
}

/// Load a YAML string with tag processing
pub fn load_yaml_string(
    config_dir: impl Into<PathBuf>,
    content: &str,
    source_name: &str,
) -> ConfigResult<Value> {
    let config_dir = config_dir.into();
    let source = config_dir.join(source_name);
    let mut loader = YamlLoader::new(config_dir)?;
    loader.load_string(content, &source)
}
