//! cli
//!
//! Command-line interface layer for Reeve.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Set up logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, resolves where the
//! config file lives and which settings came from flags or the environment,
//! and dispatches to [`commands`]. Config changes go through
//! [`ConfigStore`], server calls through [`crate::remote`].

pub mod args;
pub mod commands;
pub mod exit;

pub use args::{Cli, Shell};
pub use exit::Failure;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::core::config::{ClientConfig, ConfigOverrides, ConfigStore};
use crate::core::paths::ConfigPaths;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags and the environment.
/// `--debug` only affects logging and is consumed by [`run`].
#[derive(Debug, Clone)]
pub struct Context {
    /// Where the config file lives.
    pub paths: ConfigPaths,
    /// Connection settings that take precedence over the file.
    pub overrides: ConfigOverrides,
}

impl Context {
    /// Build a context from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            paths: ConfigPaths::resolve(cli.config_dir.as_deref()),
            overrides: cli.overrides(),
        }
    }

    /// Open the config file, empty if it does not exist yet.
    pub fn open_store(&self) -> Result<ConfigStore> {
        Ok(ConfigStore::open(self.paths.config_file())?)
    }

    /// Settings from the file with flag and environment overrides applied.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let config = self.open_store()?.client_config()?;
        Ok(config.with_overrides(&self.overrides))
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let ctx = Context::from_cli(&cli);
    tracing::debug!(config = %ctx.paths.config_file().display(), "resolved config file");

    commands::dispatch(cli.command, &ctx)
}

/// Log to stderr. `RUST_LOG` wins over `--debug`.
fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));

    // Fails only if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
