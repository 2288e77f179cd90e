//! Resolution errors
//!
//! Every failure aborts resolution of the current document; variants carry
//! enough context (field path, offending keys or values) to fix it.

use crate::value::unknown_value_message;
use gdo_config::ConfigError;
use thiserror::Error;

/// Result type for resolver operations
pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Mutually exclusive keys both set, or two roles claim the same resource
    #[error("'{first}' conflicts with '{second}': {reason}")]
    ConfigConflict {
        first: String,
        second: String,
        reason: String,
    },

    /// Missing required field, illegal value or wrong value type
    #[error("invalid configuration at '{path}': {reason}")]
    SchemaValidation { path: String, reason: String },

    /// A declaration names a root that was never resolved
    #[error("unknown {expected} reference '{id}'")]
    UnknownReference { id: String, expected: &'static str },

    /// The document itself could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ResolveError {
    pub(crate) fn conflict(
        first: impl Into<String>,
        second: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ConfigConflict {
            first: first.into(),
            second: second.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaValidation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// A value outside a closed set; the message lists every legal value
    pub(crate) fn unknown_option(path: impl Into<String>, value: &str, legal: &[&str]) -> Self {
        Self::schema(path, unknown_value_message(value, legal))
    }

    pub(crate) fn unknown_root(id: impl Into<String>) -> Self {
        Self::UnknownReference {
            id: id.into(),
            expected: gdo_core::DOMAIN,
        }
    }
}
