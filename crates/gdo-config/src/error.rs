//! Errors raised while loading and splitting a configuration document

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid YAML: {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `!secret` named a key that secrets.yaml does not define
    #[error("secret '{key}' is not defined in secrets.yaml")]
    SecretNotFound { key: String },

    /// `!env_var` named an unset variable
    #[error("environment variable '{var}' is not set")]
    EnvVarNotFound { var: String },

    /// A `!secret`/`!env_var` tag whose argument is not a plain string
    #[error("bad argument for {tag}: {reason}")]
    InvalidTag { tag: String, reason: String },

    #[error("invalid include path '{path}': {reason}")]
    InvalidIncludePath { path: String, reason: String },

    #[error("included file not found: {path}")]
    IncludeNotFound { path: PathBuf },

    #[error("included directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("{path} includes itself")]
    CircularInclude { path: PathBuf },

    /// A top-level section (or one of its items) has the wrong shape
    #[error("section '{section}': {reason}")]
    InvalidSection { section: String, reason: String },
}
