//! cli::commands::ask
//!
//! Run plugin commands on the server, or list what is available.
//!
//! # Modes
//!
//! - `reeve ask -l` lists every plugin's commands
//! - `reeve ask <plugin>` or `reeve ask <plugin> -l` lists one plugin's
//!   commands
//! - `reeve ask <plugin> <command> [args...]` runs a command and prints the
//!   server's response
//!
//! Only the first two tokens are inspected for `-l`/`--list` and
//! `-h`/`--help`. Everything after `<command>` goes to the server as is.
//!
//! The mode is resolved before any connection settings are checked, so
//! `reeve ask` without arguments reports the missing plugin even when no
//! server is configured.
//!
//! # Example
//!
//! ```bash
//! reeve ask --list
//! reeve ask deploy
//! reeve ask deploy trigger web --force
//! ```

use anyhow::{Context as _, Result};
use clap::CommandFactory;
use tracing::debug;

use crate::cli::args::Cli;
use crate::cli::Context;
use crate::remote::{CommandInvoker, HttpInvoker, RemoteError};
use crate::ui::output;

/// What `ask` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskMode {
    /// Show usage.
    Help,
    /// List all commands.
    ListAll,
    /// List the commands of one plugin.
    ListPlugin(String),
    /// Run a command.
    Execute {
        plugin: String,
        command: String,
        args: Vec<String>,
    },
}

fn is_list_flag(token: &str) -> bool {
    token == "-l" || token == "--list"
}

fn is_help_flag(token: &str) -> bool {
    token == "-h" || token == "--help"
}

impl AskMode {
    /// Resolve the mode from the tokens following `ask`.
    ///
    /// # Errors
    ///
    /// - `RemoteError::MissingTarget` if no plugin was given
    /// - `RemoteError::MissingMethod` if the command name is empty
    pub fn resolve(tokens: Vec<String>) -> Result<Self, RemoteError> {
        let mut tokens = tokens.into_iter();

        let plugin = match tokens.next() {
            Some(first) if is_help_flag(&first) => return Ok(AskMode::Help),
            Some(first) if is_list_flag(&first) => return Ok(AskMode::ListAll),
            Some(first) if !first.is_empty() => first,
            _ => return Err(RemoteError::MissingTarget),
        };

        let command = match tokens.next() {
            None => return Ok(AskMode::ListPlugin(plugin)),
            Some(second) if is_list_flag(&second) => return Ok(AskMode::ListPlugin(plugin)),
            Some(second) if second.is_empty() => return Err(RemoteError::MissingMethod),
            Some(second) => second,
        };

        Ok(AskMode::Execute {
            plugin,
            command,
            args: tokens.collect(),
        })
    }

    /// Whether this mode talks to the server.
    pub fn needs_server(&self) -> bool {
        !matches!(self, AskMode::Help)
    }
}

/// Run the ask command.
///
/// This is a synchronous wrapper that uses tokio to run the async implementation.
pub fn ask(ctx: &Context, tokens: Vec<String>) -> Result<()> {
    let mode = AskMode::resolve(tokens)?;
    if !mode.needs_server() {
        print!("{}", help_text());
        return Ok(());
    }

    let config = ctx.client_config()?;
    let invoker = HttpInvoker::from_config(&config)?;
    debug!(?invoker, ?mode, "asking server");

    let rt = tokio::runtime::Runtime::new()?;
    let output = rt.block_on(ask_with(&invoker, &mode))?;
    match mode {
        AskMode::Execute { .. } => println!("{}", output),
        _ => print!("{}", output),
    }
    Ok(())
}

/// Carry out `mode` against `invoker` and return the text to print.
///
/// Listings come back newline-terminated; a command result is the
/// server's body unchanged.
pub async fn ask_with(invoker: &dyn CommandInvoker, mode: &AskMode) -> Result<String> {
    match mode {
        AskMode::Help => Ok(help_text()),
        AskMode::ListAll => {
            let catalog = invoker
                .list_commands()
                .await
                .context("failed to list commands")?;
            Ok(output::render_catalog(&catalog))
        }
        AskMode::ListPlugin(plugin) => {
            let catalog = invoker
                .list_commands()
                .await
                .context("failed to list commands")?;
            Ok(match catalog.get(plugin) {
                Some(commands) if !commands.is_empty() => output::render_plugin(plugin, commands),
                _ => format!("{}\n", output::NO_COMMANDS),
            })
        }
        AskMode::Execute {
            plugin,
            command,
            args,
        } => Ok(invoker.execute(plugin, command, args).await?),
    }
}

/// Long help of the `ask` subcommand.
fn help_text() -> String {
    let mut cli = Cli::command();
    cli.build();
    cli.find_subcommand_mut("ask")
        .map(|ask| ask.render_long_help().to_string())
        .unwrap_or_default()
}
