//! cli::exit
//!
//! Maps command failures to process exit codes.
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Any other failure |
//! | 2 | Usage error (reported by clap) |
//! | 3 | Requested option is not set |
//! | 4 | Set would break the section structure |
//! | 5 | Malformed key or value |
//! | 6 | Config file could not be read, parsed or written |
//! | 7 | Server request failed |
//! | 8 | Hashing failed or hash did not match |

use std::process::ExitCode;

use crate::core::config::ConfigError;
use crate::core::types::TypeError;
use crate::crypto::HashError;
use crate::remote::RemoteError;

/// Failure category of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    General,
    NotSet,
    Conflict,
    InvalidInput,
    Io,
    Remote,
    Hash,
}

impl Failure {
    /// Classify by the first recognised error in the chain.
    pub fn classify(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<ConfigError>() {
                return Self::from_config(e);
            }
            if cause.downcast_ref::<TypeError>().is_some() {
                return Failure::InvalidInput;
            }
            if cause.downcast_ref::<RemoteError>().is_some() {
                return Failure::Remote;
            }
            if cause.downcast_ref::<HashError>().is_some() {
                return Failure::Hash;
            }
        }
        Failure::General
    }

    fn from_config(err: &ConfigError) -> Self {
        if err.is_not_set() {
            Failure::NotSet
        } else if err.is_conflict() {
            Failure::Conflict
        } else if err.is_invalid_input() {
            Failure::InvalidInput
        } else if err.is_io() {
            Failure::Io
        } else {
            Failure::General
        }
    }

    /// Numeric exit status.
    pub fn code(self) -> u8 {
        match self {
            Failure::General => 1,
            Failure::NotSet => 3,
            Failure::Conflict => 4,
            Failure::InvalidInput => 5,
            Failure::Io => 6,
            Failure::Remote => 7,
            Failure::Hash => 8,
        }
    }
}

impl From<Failure> for ExitCode {
    fn from(failure: Failure) -> Self {
        ExitCode::from(failure.code())
    }
}
