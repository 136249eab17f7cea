//! remote::mock
//!
//! Mock invoker implementation for deterministic testing.
//!
//! # Design
//!
//! The mock invoker serves a fixed catalog and canned command results from
//! memory, records every call, and can be told to fail.
//!
//! # Example
//!
//! ```
//! use reeve_cli::remote::mock::MockInvoker;
//! use reeve_cli::remote::CommandInvoker;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let invoker = MockInvoker::new()
//!     .with_command("deploy", "trigger", "Trigger a deployment")
//!     .with_result("deploy", "trigger", "queued");
//!
//! let output = invoker.execute("deploy", "trigger", &[]).await.unwrap();
//! assert_eq!(output, "queued");
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{validate_invocation, CommandCatalog, CommandInvoker, RemoteError};

/// Mock invoker for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockInvoker {
    inner: Arc<Mutex<MockInvokerInner>>,
}

#[derive(Debug, Default)]
struct MockInvokerInner {
    catalog: CommandCatalog,
    /// Canned results by (target, method).
    results: HashMap<(String, String), String>,
    fail_with: Option<RemoteError>,
    calls: Vec<MockCall>,
}

/// A recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ListCommands,
    Execute {
        target: String,
        method: String,
        args: Vec<String>,
    },
}

impl MockInvoker {
    /// Create an invoker with an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command in the catalog.
    pub fn with_command(self, plugin: &str, command: &str, description: &str) -> Self {
        self.lock()
            .catalog
            .entry(plugin.to_string())
            .or_default()
            .insert(command.to_string(), description.to_string());
        self
    }

    /// Set the result returned by `execute(target, method, ..)`.
    pub fn with_result(self, target: &str, method: &str, result: &str) -> Self {
        self.lock()
            .results
            .insert((target.to_string(), method.to_string()), result.to_string());
        self
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(self, error: RemoteError) -> Self {
        self.lock().fail_with = Some(error);
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockInvokerInner> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CommandInvoker for MockInvoker {
    async fn list_commands(&self) -> Result<CommandCatalog, RemoteError> {
        let mut inner = self.lock();
        inner.calls.push(MockCall::ListCommands);
        if let Some(err) = &inner.fail_with {
            return Err(err.clone());
        }
        Ok(inner.catalog.clone())
    }

    async fn execute(
        &self,
        target: &str,
        method: &str,
        args: &[String],
    ) -> Result<String, RemoteError> {
        validate_invocation(target, method)?;

        let mut inner = self.lock();
        inner.calls.push(MockCall::Execute {
            target: target.to_string(),
            method: method.to_string(),
            args: args.to_vec(),
        });
        if let Some(err) = &inner.fail_with {
            return Err(err.clone());
        }

        inner
            .results
            .get(&(target.to_string(), method.to_string()))
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                status: 404,
                body: format!("unknown command {}/{}", target, method),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let invoker = MockInvoker::new().with_result("p", "c", "ok");

        invoker.list_commands().await.unwrap();
        invoker
            .execute("p", "c", &["a".to_string(), "-b".to_string()])
            .await
            .unwrap();

        assert_eq!(
            invoker.calls(),
            vec![
                MockCall::ListCommands,
                MockCall::Execute {
                    target: "p".into(),
                    method: "c".into(),
                    args: vec!["a".into(), "-b".into()],
                },
            ]
        );
    }

    #[tokio::test]
    async fn unknown_command_is_404() {
        let invoker = MockInvoker::new();
        let err = invoker.execute("p", "missing", &[]).await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn configured_failure() {
        let invoker = MockInvoker::new().fail_with(RemoteError::Network("refused".into()));
        assert_eq!(
            invoker.list_commands().await.unwrap_err(),
            RemoteError::Network("refused".into())
        );
    }

    #[tokio::test]
    async fn empty_names_rejected_without_recording() {
        let invoker = MockInvoker::new();
        assert_eq!(
            invoker.execute("", "c", &[]).await.unwrap_err(),
            RemoteError::MissingTarget
        );
        assert!(invoker.calls().is_empty());
    }
}
