//! core::config::coerce
//!
//! Turning raw command-line strings into typed config values.
//!
//! # Precedence
//!
//! With [`TypeHint::Auto`] a value is tried, in order, as:
//! 1. The exact literals `true` / `false`
//! 2. A 64-bit signed integer
//! 3. A float
//! 4. The literal string
//!
//! So `42` becomes a number and `true` a boolean unless the caller forces
//! [`TypeHint::String`].

use std::fmt;

use super::document::{ConfigValue, Number};
use super::ConfigError;

/// Requested type for a value being set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeHint {
    /// Infer the type from the value.
    #[default]
    Auto,
    /// Store the value verbatim.
    String,
    /// Require `true` or `false`.
    Boolean,
    /// Require an integer or a float.
    Number,
}

impl TypeHint {
    /// Coerce `raw` according to this hint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Coercion` when a forced type does not parse.
    /// `Auto` and `String` never fail.
    pub fn coerce(self, raw: &str) -> Result<ConfigValue, ConfigError> {
        match self {
            TypeHint::String => Ok(ConfigValue::String(raw.to_string())),
            TypeHint::Boolean => parse_boolean(raw)
                .map(ConfigValue::Boolean)
                .ok_or_else(|| self.failure(raw)),
            TypeHint::Number => parse_number(raw)
                .map(ConfigValue::Number)
                .ok_or_else(|| self.failure(raw)),
            TypeHint::Auto => Ok(parse_boolean(raw)
                .map(ConfigValue::Boolean)
                .or_else(|| parse_number(raw).map(ConfigValue::Number))
                .unwrap_or_else(|| ConfigValue::String(raw.to_string()))),
        }
    }

    fn failure(self, raw: &str) -> ConfigError {
        ConfigError::Coercion {
            value: raw.to_string(),
            expected: self,
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeHint::Auto => "value",
            TypeHint::String => "string",
            TypeHint::Boolean => "boolean",
            TypeHint::Number => "number",
        };
        f.write_str(name)
    }
}

/// Case-sensitive: `True`, `1` and `yes` are not booleans.
fn parse_boolean(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Number::Integer(n));
    }
    raw.parse::<f64>().ok().map(Number::Float)
}
