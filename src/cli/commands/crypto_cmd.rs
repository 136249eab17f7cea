//! crypto command - Hash a secret read from stdin, or check one against a hash

use std::io::{self, Read};

use anyhow::{Context as _, Result};

use crate::crypto::{self, HashError};

/// Print the argon2id hash of stdin.
pub fn hash(no_trim: bool) -> Result<()> {
    let input = read_input(io::stdin().lock(), no_trim)?;
    println!("{}", crypto::hash(&input)?);
    Ok(())
}

/// Print `valid` if stdin matches `hash`.
pub fn verify(hash: &str, no_trim: bool) -> Result<()> {
    let input = read_input(io::stdin().lock(), no_trim)?;
    if !crypto::verify(&input, hash)? {
        return Err(HashError::Mismatch.into());
    }
    println!("valid");
    Ok(())
}

fn read_input(mut reader: impl Read, no_trim: bool) -> Result<String> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .context("failed to read from stdin")?;
    if no_trim {
        Ok(input)
    } else {
        Ok(input.trim().to_string())
    }
}
