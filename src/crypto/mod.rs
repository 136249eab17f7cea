//! crypto
//!
//! Password hashing for server credential setup.
//!
//! Hashes are argon2id PHC strings (`$argon2id$v=19$m=65536,t=1,p=2$...`)
//! with a random 16-byte salt. The server stores the hash; the client only
//! ever produces one from a secret read on stdin.
//!
//! # Example
//!
//! ```
//! use reeve_cli::crypto;
//!
//! let hash = crypto::hash("correct horse").unwrap();
//! assert!(hash.starts_with("$argon2id$"));
//! assert!(crypto::verify("correct horse", &hash).unwrap());
//! assert!(!crypto::verify("battery staple", &hash).unwrap());
//! ```

use argon2::password_hash::{
    rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier,
    SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;
use tracing::debug;

/// Memory cost in KiB (64 MiB).
pub const MEMORY_COST_KIB: u32 = 64 * 1024;

/// Number of passes.
pub const TIME_COST: u32 = 1;

/// Degree of parallelism.
pub const PARALLELISM: u32 = 2;

/// Length of the derived key in bytes.
pub const OUTPUT_LEN: usize = 32;

const ARGON2ID: &str = "argon2id";

/// Errors from hashing operations.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("failed to hash input: {0}")]
    Hash(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("hash does not match")]
    Mismatch,
}

fn hasher() -> Result<Argon2<'static>, HashError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| HashError::Hash(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash `input` with a fresh random salt.
pub fn hash(input: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(input.as_bytes(), &salt)
        .map_err(|e| HashError::Hash(e.to_string()))?;
    debug!(algorithm = ARGON2ID, "hashed input");
    Ok(hash.to_string())
}

/// Check that `hash` is a well-formed argon2id PHC string.
pub fn validate(hash: &str) -> Result<(), HashError> {
    let parsed = parse(hash)?;
    Params::try_from(&parsed).map_err(|e| HashError::InvalidHash(e.to_string()))?;
    if parsed.salt.is_none() || parsed.hash.is_none() {
        return Err(HashError::InvalidHash("missing salt or output".into()));
    }
    Ok(())
}

/// Check `input` against `hash`. The cost parameters come from the hash.
///
/// # Errors
///
/// Returns `HashError::InvalidHash` if `hash` cannot be parsed. A wrong
/// input is `Ok(false)`, not an error.
pub fn verify(input: &str, hash: &str) -> Result<bool, HashError> {
    let parsed = parse(hash)?;
    match Argon2::default().verify_password(input.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => Err(HashError::InvalidHash(e.to_string())),
    }
}

fn parse(hash: &str) -> Result<PasswordHash<'_>, HashError> {
    let parsed = PasswordHash::new(hash).map_err(|e| HashError::InvalidHash(e.to_string()))?;
    if parsed.algorithm.as_str() != ARGON2ID {
        return Err(HashError::InvalidHash(format!(
            "unsupported algorithm '{}', expected '{}'",
            parsed.algorithm, ARGON2ID
        )));
    }
    Ok(parsed)
}
