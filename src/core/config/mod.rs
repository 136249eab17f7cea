//! core::config
//!
//! Client configuration file and settings.
//!
//! # Overview
//!
//! The client keeps a single TOML file, `.reevecli`, inside its config
//! directory. Two views sit on top of it:
//! - [`ConfigStore`]: the raw document, edited by `reeve config` with
//!   dotted key paths
//! - [`ClientConfig`]: the typed connection settings used by `reeve ask`
//!
//! # Precedence
//!
//! Settings are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. `REEVE_CLI_*` environment variables
//! 4. CLI flags
//!
//! Environment variables and flags arrive together as [`ConfigOverrides`].
//!
//! # Example
//!
//! ```no_run
//! use reeve_cli::core::config::{ConfigStore, TypeHint};
//!
//! let mut store = ConfigStore::open("/home/me/.config/reeve/.reevecli").unwrap();
//! store.set("auth.header", "X-Api-Key", TypeHint::String).unwrap();
//! println!("{}", store.get("auth.header").unwrap());
//! ```

mod coerce;
mod document;
pub mod schema;
mod store;

pub use coerce::TypeHint;
pub use document::{ConfigDocument, ConfigValue, Number, Section};
pub use schema::{AuthConfig, ClientConfig, ConfigOverrides};
pub use store::ConfigStore;

use std::path::PathBuf;
use thiserror::Error;

use crate::core::types::TypeError;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error(transparent)]
    Key(#[from] TypeError),

    #[error("The option '{key}' is not set")]
    NotSet { key: String },

    #[error("The option '{key}' is a section, not a single value")]
    NotScalar { key: String },

    #[error("'{prefix}' is not a section, you need to unset it before setting '{key}'")]
    NotASection { prefix: String, key: String },

    #[error("'{key}' is a section, you need to unset it before setting it to a value")]
    IsASection { key: String },

    #[error("cannot parse '{value}' as a {expected}")]
    Coercion { value: String, expected: TypeHint },

    #[error("unsupported {kind} value at '{key}'")]
    UnsupportedValue { key: String, kind: &'static str },
}

impl ConfigError {
    /// The requested key does not resolve to a value.
    pub fn is_not_set(&self) -> bool {
        matches!(self, ConfigError::NotSet { .. } | ConfigError::NotScalar { .. })
    }

    /// A set would break the leaf/section structure.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ConfigError::NotASection { .. } | ConfigError::IsASection { .. }
        )
    }

    /// The caller supplied a malformed key or value.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ConfigError::Key(_) | ConfigError::Coercion { .. })
    }

    /// The file could not be read, parsed or written.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ConfigError::ReadError { .. }
                | ConfigError::ParseError { .. }
                | ConfigError::WriteError { .. }
                | ConfigError::InvalidValue(_)
                | ConfigError::UnsupportedValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_disjoint() {
        let errors = [
            ConfigError::NotSet { key: "a".into() },
            ConfigError::NotScalar { key: "a".into() },
            ConfigError::NotASection {
                prefix: "a".into(),
                key: "a.b".into(),
            },
            ConfigError::IsASection { key: "a".into() },
            ConfigError::Coercion {
                value: "x".into(),
                expected: TypeHint::Number,
            },
            ConfigError::Key(TypeError::MissingKey),
            ConfigError::InvalidValue("bad".into()),
        ];

        for err in &errors {
            let hits = [
                err.is_not_set(),
                err.is_conflict(),
                err.is_invalid_input(),
                err.is_io(),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();
            assert_eq!(hits, 1, "{err:?}");
        }
    }

    #[test]
    fn messages_name_the_key() {
        let err = ConfigError::NotASection {
            prefix: "auth".into(),
            key: "auth.header".into(),
        };
        assert_eq!(
            err.to_string(),
            "'auth' is not a section, you need to unset it before setting 'auth.header'"
        );

        let err = ConfigError::NotSet {
            key: "url".into(),
        };
        assert_eq!(err.to_string(), "The option 'url' is not set");
    }
}
