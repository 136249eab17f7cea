//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`KeyPath`] - Validated dot-separated configuration key
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so traversal code never sees an empty segment.
//!
//! # Examples
//!
//! ```
//! use reeve_cli::core::types::KeyPath;
//!
//! let key = KeyPath::new("auth.header").unwrap();
//! assert_eq!(key.segments(), ["auth", "header"]);
//!
//! assert!(KeyPath::new("").is_err());
//! assert!(KeyPath::new("auth..header").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Missing key")]
    MissingKey,

    #[error("invalid key '{0}': key segments cannot be empty")]
    InvalidKey(String),
}

/// A validated configuration key path such as `auth.header`.
///
/// Key paths must:
/// - Not be empty
/// - Not contain empty segments (`a..b`, `.a`, `a.`)
///
/// Segments are otherwise taken literally; there is no quoting.
///
/// # Example
///
/// ```
/// use reeve_cli::core::types::KeyPath;
///
/// let key = KeyPath::new("auth.prefix").unwrap();
/// assert_eq!(key.leaf(), "prefix");
/// assert_eq!(key.parents(), ["auth"]);
/// assert_eq!(key.prefix(1), "auth");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    raw: String,
    segments: Vec<String>,
}

impl KeyPath {
    /// Create a new validated key path.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::MissingKey` for an empty string and
    /// `TypeError::InvalidKey` if any segment is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypeError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(TypeError::MissingKey);
        }

        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(TypeError::InvalidKey(raw));
        }

        Ok(Self { raw, segments })
    }

    /// The key exactly as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All segments, root first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments that must resolve to sections.
    pub fn parents(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The final segment, naming the value inside its containing section.
    pub fn leaf(&self) -> &str {
        // Construction guarantees at least one segment.
        &self.segments[self.segments.len() - 1]
    }

    /// The first `depth` segments joined back into a dotted key.
    pub fn prefix(&self, depth: usize) -> String {
        self.segments[..depth.min(self.segments.len())].join(".")
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for KeyPath {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
