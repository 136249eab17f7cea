//! remote
//!
//! Client side of the Reeve server's CLI API.
//!
//! # Architecture
//!
//! Commands talk to the server through the [`CommandInvoker`] trait.
//! Production code uses [`HttpInvoker`]; tests use [`mock::MockInvoker`].
//!
//! The server owns the meaning of every command. The client forwards a
//! plugin name, a command name and the remaining arguments, and prints
//! whatever comes back.
//!
//! # Modules
//!
//! - `traits`: `CommandInvoker` trait, catalog types and `RemoteError`
//! - [`http`]: reqwest-based implementation
//! - [`mock`]: in-memory implementation for deterministic testing

pub mod http;
pub mod mock;
mod traits;

pub use http::HttpInvoker;
pub use traits::*;
