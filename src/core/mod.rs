//! core
//!
//! Core domain types and configuration handling for the Reeve client.
//!
//! # Modules
//!
//! - [`types`] - Strong types: KeyPath
//! - [`config`] - Config document, dotted-path store and client settings
//! - [`paths`] - Location of the config file
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Mutations are validated completely before they are applied
//! - No global state: the store is created per invocation

pub mod config;
pub mod paths;
pub mod types;
