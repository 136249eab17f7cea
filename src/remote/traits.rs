//! remote::traits
//!
//! Invoker trait definition for talking to the Reeve server.
//!
//! # Design
//!
//! The `CommandInvoker` trait is async because invocations involve network
//! I/O. Plugins register CLI commands on the server; the client only knows
//! them by name, so arguments travel as an ordered list of strings and the
//! result comes back as raw text.
//!
//! # Example
//!
//! ```ignore
//! use reeve_cli::remote::CommandInvoker;
//!
//! async fn deploy(invoker: &dyn CommandInvoker) -> Result<(), RemoteError> {
//!     let output = invoker
//!         .execute("deploy", "trigger", &["web".to_string()])
//!         .await?;
//!     println!("{}", output);
//!     Ok(())
//! }
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

/// Commands of one plugin: command name to description.
pub type PluginCommands = BTreeMap<String, String>;

/// Every plugin's commands, keyed by plugin name.
pub type CommandCatalog = BTreeMap<String, PluginCommands>;

/// Errors from remote operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// No server URL configured.
    #[error("Missing server URL")]
    MissingUrl,

    /// No CLI secret configured.
    #[error("Missing secret")]
    MissingSecret,

    /// Empty plugin (target) name.
    #[error("Missing plugin")]
    MissingTarget,

    /// Empty command (method) name.
    #[error("Missing command")]
    MissingMethod,

    /// The credential header could not be built. Never contains the secret.
    #[error("invalid authorization header: {0}")]
    InvalidHeader(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("status {status} - {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body as sent by the server
        body: String,
    },

    /// Command listing did not come back as JSON.
    #[error("Content-Type is not application/json, but {0}")]
    UnexpectedContentType(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Access to server-registered plugin commands.
#[async_trait]
pub trait CommandInvoker: Send + Sync {
    /// Fetch every command the server exposes to the CLI.
    async fn list_commands(&self) -> Result<CommandCatalog, RemoteError>;

    /// Run `method` of plugin `target` with `args`, returning the raw result.
    async fn execute(
        &self,
        target: &str,
        method: &str,
        args: &[String],
    ) -> Result<String, RemoteError>;
}

/// Reject empty target or method names before any request is made.
pub fn validate_invocation(target: &str, method: &str) -> Result<(), RemoteError> {
    if target.is_empty() {
        return Err(RemoteError::MissingTarget);
    }
    if method.is_empty() {
        return Err(RemoteError::MissingMethod);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_includes_body() {
        let err = RemoteError::Status {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "status 403 - forbidden");
    }

    #[test]
    fn invocation_names_required() {
        assert_eq!(validate_invocation("", "run"), Err(RemoteError::MissingTarget));
        assert_eq!(validate_invocation("deploy", ""), Err(RemoteError::MissingMethod));
        assert!(validate_invocation("deploy", "run").is_ok());
    }
}
