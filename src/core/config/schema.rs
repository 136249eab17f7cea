//! core::config::schema
//!
//! Typed connection settings.
//!
//! # Example
//!
//! ```toml
//! url = "https://reeve.example.com"
//! insecure = false
//! secret = "..."
//!
//! [auth]
//! header = "Authorization"
//! prefix = "Bearer "
//! ```
//!
//! Keys not listed here are ignored, so the file can carry other settings
//! managed through `reeve config`.

use std::fmt;

use serde::Deserialize;

use super::ConfigDocument;

/// Default header carrying the credential.
pub const DEFAULT_AUTH_HEADER: &str = "Authorization";

/// Default text placed before the secret in the credential header.
pub const DEFAULT_AUTH_PREFIX: &str = "Bearer ";

/// Client settings as read from the config file, with overrides applied.
#[derive(Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Reeve server URL
    pub url: Option<String>,

    /// Skip TLS certificate verification
    pub insecure: Option<bool>,

    /// CLI secret
    pub secret: Option<String>,

    /// Credential header settings
    pub auth: AuthConfig,
}

/// The `[auth]` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Header name (default: "Authorization")
    pub header: Option<String>,

    /// Prefix placed before the secret (default: "Bearer ")
    pub prefix: Option<String>,
}

// Custom Debug to avoid exposing the secret
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("insecure", &self.insecure)
            .field("has_secret", &self.secret.is_some())
            .field("auth", &self.auth)
            .finish()
    }
}

/// Values supplied by flags or `REEVE_CLI_*` environment variables.
///
/// Every field that is `Some` wins over the config file.
#[derive(Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub insecure: Option<bool>,
    pub secret: Option<String>,
    pub auth_header: Option<String>,
    pub auth_prefix: Option<String>,
}

impl fmt::Debug for ConfigOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOverrides")
            .field("url", &self.url)
            .field("insecure", &self.insecure)
            .field("has_secret", &self.secret.is_some())
            .field("auth_header", &self.auth_header)
            .field("auth_prefix", &self.auth_prefix)
            .finish()
    }
}

impl ClientConfig {
    /// Read settings from a config document.
    ///
    /// # Errors
    ///
    /// Returns an error if a known key holds a value of the wrong type,
    /// e.g. `insecure = "yes"`.
    pub fn from_document(document: &ConfigDocument) -> Result<Self, toml::de::Error> {
        toml::Value::Table(document.to_table()).try_into()
    }

    /// Apply overrides on top of the file values.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(url) = &overrides.url {
            self.url = Some(url.clone());
        }
        if let Some(insecure) = overrides.insecure {
            self.insecure = Some(insecure);
        }
        if let Some(secret) = &overrides.secret {
            self.secret = Some(secret.clone());
        }
        if let Some(header) = &overrides.auth_header {
            self.auth.header = Some(header.clone());
        }
        if let Some(prefix) = &overrides.auth_prefix {
            self.auth.prefix = Some(prefix.clone());
        }
        self
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Get the server URL.
    ///
    /// Returns `None` if not configured or empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Check if TLS verification is disabled.
    ///
    /// Defaults to `false` if not configured.
    pub fn insecure(&self) -> bool {
        self.insecure.unwrap_or(false)
    }

    /// Get the CLI secret.
    ///
    /// Returns `None` if not configured or empty.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.is_empty())
    }

    /// Get the credential header name.
    ///
    /// Defaults to "Authorization" if not configured.
    pub fn auth_header(&self) -> &str {
        self.auth.header.as_deref().unwrap_or(DEFAULT_AUTH_HEADER)
    }

    /// Get the credential prefix. An explicitly empty prefix is kept.
    ///
    /// Defaults to "Bearer " if not configured.
    pub fn auth_prefix(&self) -> &str {
        self.auth.prefix.as_deref().unwrap_or(DEFAULT_AUTH_PREFIX)
    }
}
