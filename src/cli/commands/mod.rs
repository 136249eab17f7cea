//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the config store or builds the invoker it needs
//! 2. Performs the operation
//! 3. Formats and displays output
//!
//! Handlers return `anyhow::Result`; the typed error stays in the chain so
//! `main` can pick the exit code.
//!
//! # Async Commands
//!
//! `ask` talks to the server and is async. Its handler creates a tokio
//! runtime and blocks on it, so dispatch stays synchronous.

mod ask;
mod completion;
mod config_cmd;
mod crypto_cmd;

// Re-export command functions for testing and direct invocation
pub use ask::{ask, ask_with, AskMode};
pub use completion::completion;
pub use config_cmd::{
    get as config_get, list as config_list, set as config_set, unset as config_unset,
};
pub use crypto_cmd::{hash as crypto_hash, verify as crypto_verify};

use anyhow::Result;

use crate::cli::args::{Command, ConfigAction, CryptoAction};
use crate::cli::Context;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Config { action } => match action {
            ConfigAction::List => config_cmd::list(ctx),
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set {
                value_type,
                key,
                value,
            } => config_cmd::set(ctx, &key, &value, value_type.hint()),
            ConfigAction::Unset { key } => config_cmd::unset(ctx, &key),
        },
        Command::Ask { args } => ask::ask(ctx, args),
        Command::Crypto { action } => match action {
            CryptoAction::Hash { no_trim } => crypto_cmd::hash(no_trim),
            CryptoAction::Verify { hash, no_trim } => crypto_cmd::verify(&hash, no_trim),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
