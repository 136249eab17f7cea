//! Reeve CLI - Command line tools for the Reeve CI / CD server
//!
//! The `reeve` binary manages a small client config file, asks the server to
//! run commands that plugins have registered, and hashes secrets for server
//! configuration.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`core`] - Config document, typed client settings, config file location
//! - [`remote`] - Abstraction for the server's CLI API (HTTP and mock)
//! - [`crypto`] - argon2id hashing
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. A config key is either a value or a section, never both
//! 2. A failed config change leaves the file untouched
//! 3. Secrets never appear in `Debug` output or logs

pub mod cli;
pub mod core;
pub mod crypto;
pub mod remote;
pub mod ui;
