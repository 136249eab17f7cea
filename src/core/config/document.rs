//! core::config::document
//!
//! The nested key/value document behind the config file.
//!
//! # Model
//!
//! A [`ConfigDocument`] is a tree of [`ConfigValue`]s. Leaves are strings,
//! booleans or numbers; internal nodes are sections. A key path walks one
//! section per segment, so a single location can never be both a leaf and a
//! section.
//!
//! # Mutation
//!
//! [`ConfigDocument::set`] checks the whole path before touching anything.
//! A rejected assignment leaves the document exactly as it was.
//!
//! # Example
//!
//! ```
//! use reeve_cli::core::config::{ConfigDocument, ConfigValue};
//! use reeve_cli::core::types::KeyPath;
//!
//! let mut doc = ConfigDocument::new();
//! let key = KeyPath::new("auth.header").unwrap();
//!
//! doc.set(&key, ConfigValue::String("X-Api-Key".into())).unwrap();
//! assert_eq!(doc.get(&key).unwrap(), &ConfigValue::String("X-Api-Key".into()));
//!
//! // "auth" is now a section and cannot be read as a value
//! assert!(doc.get(&KeyPath::new("auth").unwrap()).is_err());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use super::ConfigError;
use crate::core::types::KeyPath;

/// Keys and values of one section.
pub type Section = BTreeMap<String, ConfigValue>;

/// A numeric leaf. Integers and floats stay distinct so `42` is written
/// back as `42`, not `42.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

/// A node in the configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Boolean(bool),
    Number(Number),
    Section(Section),
}

impl ConfigValue {
    /// Check if this value is a section.
    pub fn is_section(&self) -> bool {
        matches!(self, ConfigValue::Section(_))
    }

    /// Borrow the section, if this is one.
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            ConfigValue::Section(section) => Some(section),
            _ => None,
        }
    }

    /// Human-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Boolean(_) => "boolean",
            ConfigValue::Number(Number::Integer(_)) => "integer",
            ConfigValue::Number(Number::Float(_)) => "float",
            ConfigValue::Section(_) => "section",
        }
    }

    fn into_toml(self) -> toml::Value {
        match self {
            ConfigValue::String(s) => toml::Value::String(s),
            ConfigValue::Boolean(b) => toml::Value::Boolean(b),
            ConfigValue::Number(Number::Integer(n)) => toml::Value::Integer(n),
            ConfigValue::Number(Number::Float(n)) => toml::Value::Float(n),
            ConfigValue::Section(section) => toml::Value::Table(section_into_toml(section)),
        }
    }

    fn from_toml(key: String, value: toml::Value) -> Result<Self, ConfigError> {
        match value {
            toml::Value::String(s) => Ok(ConfigValue::String(s)),
            toml::Value::Boolean(b) => Ok(ConfigValue::Boolean(b)),
            toml::Value::Integer(n) => Ok(ConfigValue::Number(Number::Integer(n))),
            toml::Value::Float(n) => Ok(ConfigValue::Number(Number::Float(n))),
            toml::Value::Table(table) => Ok(ConfigValue::Section(section_from_toml(
                Some(&key),
                table,
            )?)),
            toml::Value::Array(_) => Err(ConfigError::UnsupportedValue { key, kind: "array" }),
            toml::Value::Datetime(_) => Err(ConfigError::UnsupportedValue {
                key,
                kind: "datetime",
            }),
        }
    }
}

/// Scalars print bare (strings without quotes); sections print as TOML.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Section(section) => {
                let table = section_into_toml(section.clone());
                let rendered = toml::to_string(&table).map_err(|_| fmt::Error)?;
                f.write_str(rendered.trim_end())
            }
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Boolean(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Number(Number::Integer(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(Number::Float(value))
    }
}

/// The root of the configuration tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Section,
}

impl ConfigDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the document has no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Find the node at `key`, leaf or section.
    ///
    /// Walking through a missing key or through a leaf yields `None`.
    pub fn lookup(&self, key: &KeyPath) -> Option<&ConfigValue> {
        let mut section = &self.root;
        for segment in key.parents() {
            section = section.get(segment)?.as_section()?;
        }
        section.get(key.leaf())
    }

    /// Get the scalar at `key`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::NotSet` if nothing is stored at `key`
    /// - `ConfigError::NotScalar` if `key` names a section
    pub fn get(&self, key: &KeyPath) -> Result<&ConfigValue, ConfigError> {
        match self.lookup(key) {
            None => Err(ConfigError::NotSet {
                key: key.to_string(),
            }),
            Some(ConfigValue::Section(_)) => Err(ConfigError::NotScalar {
                key: key.to_string(),
            }),
            Some(value) => Ok(value),
        }
    }

    /// Store `value` at `key`, creating missing sections along the way.
    ///
    /// A leaf replaces a previous leaf. Nothing is modified when an error
    /// is returned.
    ///
    /// # Errors
    ///
    /// - `ConfigError::NotASection` if a prefix of `key` holds a leaf
    /// - `ConfigError::IsASection` if a leaf would replace a section
    pub fn set(&mut self, key: &KeyPath, value: ConfigValue) -> Result<(), ConfigError> {
        self.check_assignable(key, &value)?;

        let mut section = &mut self.root;
        for (depth, segment) in key.parents().iter().enumerate() {
            let entry = section
                .entry(segment.clone())
                .or_insert_with(|| ConfigValue::Section(Section::new()));
            section = match entry {
                ConfigValue::Section(inner) => inner,
                _ => return Err(not_a_section(key, depth)),
            };
        }

        section.insert(key.leaf().to_string(), value);
        Ok(())
    }

    /// Remove the node at `key` and return it. Sections are removed whole.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotSet` if any segment of `key` is missing or
    /// a prefix of `key` is a leaf.
    pub fn unset(&mut self, key: &KeyPath) -> Result<ConfigValue, ConfigError> {
        let not_set = || ConfigError::NotSet {
            key: key.to_string(),
        };

        let mut section = &mut self.root;
        for segment in key.parents() {
            section = match section.get_mut(segment) {
                Some(ConfigValue::Section(inner)) => inner,
                _ => return Err(not_set()),
            };
        }

        section.remove(key.leaf()).ok_or_else(not_set)
    }

    /// Walk `key` read-only and report the first conflict, if any.
    fn check_assignable(&self, key: &KeyPath, value: &ConfigValue) -> Result<(), ConfigError> {
        let mut section = &self.root;
        for (depth, segment) in key.parents().iter().enumerate() {
            match section.get(segment) {
                // Everything below will be created fresh.
                None => return Ok(()),
                Some(ConfigValue::Section(inner)) => section = inner,
                Some(_) => return Err(not_a_section(key, depth)),
            }
        }

        match section.get(key.leaf()) {
            Some(existing) if existing.is_section() && !value.is_section() => {
                Err(ConfigError::IsASection {
                    key: key.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Convert to a TOML table for serialization.
    pub fn to_table(&self) -> toml::Table {
        section_into_toml(self.root.clone())
    }

    /// Build a document from a parsed TOML table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedValue` for arrays and datetimes,
    /// which have no place in the document model.
    pub fn from_table(table: toml::Table) -> Result<Self, ConfigError> {
        Ok(Self {
            root: section_from_toml(None, table)?,
        })
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for malformed TOML and
    /// `ConfigError::UnsupportedValue` for values outside the model.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let table: toml::Table =
            toml::from_str(contents).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        Self::from_table(table)
    }

    /// Render the document as TOML. An empty document renders as `""`.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(&self.to_table()).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}

fn not_a_section(key: &KeyPath, depth: usize) -> ConfigError {
    ConfigError::NotASection {
        prefix: key.prefix(depth + 1),
        key: key.to_string(),
    }
}

fn section_into_toml(section: Section) -> toml::Table {
    section
        .into_iter()
        .map(|(k, v)| (k, v.into_toml()))
        .collect()
}

fn section_from_toml(parent: Option<&str>, table: toml::Table) -> Result<Section, ConfigError> {
    table
        .into_iter()
        .map(|(k, v)| {
            let path = match parent {
                Some(parent) => format!("{}.{}", parent, k),
                None => k.clone(),
            };
            ConfigValue::from_toml(path, v).map(|value| (k, value))
        })
        .collect()
}
