//! core::config::store
//!
//! File-backed configuration document.
//!
//! # Persistence
//!
//! - A missing file loads as an empty document
//! - Every successful `set` / `unset` rewrites the whole file
//! - Writes are atomic (write to temp file, then rename)
//! - File permissions are set to 0600 on Unix, since the file may hold the
//!   CLI secret
//!
//! No locking is performed. Two invocations editing the same file race and
//! the last writer wins.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use tracing::{debug, trace};

use super::{ClientConfig, ConfigDocument, ConfigError, ConfigValue, TypeHint};
use crate::core::types::KeyPath;

/// The configuration document together with the file it came from.
#[derive(Debug)]
pub struct ConfigStore {
    /// Path to the config file
    path: PathBuf,
    /// In-memory document
    document: ConfigDocument,
}

impl ConfigStore {
    /// Load the store from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    /// A missing file is not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        let document = match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loaded config file");
                ConfigDocument::from_toml_str(&contents).map_err(|e| ConfigError::ParseError {
                    path: path.clone(),
                    message: match e {
                        ConfigError::InvalidValue(message) => message,
                        other => other.to_string(),
                    },
                })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, starting empty");
                ConfigDocument::new()
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: path.clone(),
                    source: e,
                })
            }
        };

        Ok(Self { path, document })
    }

    /// Get the path to the config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full current document.
    pub fn list(&self) -> &ConfigDocument {
        &self.document
    }

    /// Get the scalar stored at `key`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Key` if `key` is empty or has empty segments
    /// - `ConfigError::NotSet` / `ConfigError::NotScalar` if no scalar is
    ///   stored there
    pub fn get(&self, key: &str) -> Result<&ConfigValue, ConfigError> {
        let key = KeyPath::new(key)?;
        self.document.get(&key)
    }

    /// Coerce `raw` per `hint`, store it at `key` and persist.
    ///
    /// Key validation, coercion and conflict checks all happen before the
    /// document is modified.
    pub fn set(&mut self, key: &str, raw: &str, hint: TypeHint) -> Result<(), ConfigError> {
        let key = KeyPath::new(key)?;
        let value = hint.coerce(raw)?;
        trace!(key = %key, kind = value.kind(), "setting config value");

        self.document.set(&key, value)?;
        self.persist()
    }

    /// Remove `key` (a value or a whole section) and persist.
    pub fn unset(&mut self, key: &str) -> Result<(), ConfigError> {
        let key = KeyPath::new(key)?;
        let removed = self.document.unset(&key)?;
        trace!(key = %key, kind = removed.kind(), "unset config value");

        self.persist()
    }

    /// Resolve typed client settings from the file contents.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        ClientConfig::from_document(&self.document).map_err(|e| ConfigError::ParseError {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Write the whole document to disk.
    ///
    /// Creates parent directories if needed and replaces any previous
    /// contents.
    pub fn persist(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }

        let contents = self.document.to_toml_string()?;

        // Write to temp file in same directory (for atomic rename)
        let temp_path = temp_path_for(&self.path);
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        // From here on the temp file exists and must not outlive a failure.
        if let Err(e) = write_and_sync(&mut file, contents.as_bytes()) {
            drop(file);
            let _ = fs::remove_file(&temp_path);
            return Err(ConfigError::WriteError {
                path: temp_path,
                source: e,
            });
        }
        drop(file);

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(ConfigError::WriteError {
                path: self.path.clone(),
                source: e,
            });
        }

        debug!(path = %self.path.display(), bytes = contents.len(), "wrote config file");
        Ok(())
    }
}

/// Restrict to the owner, write everything and flush to disk.
fn write_and_sync(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// `.reevecli` -> `.reevecli.tmp`, next to the target.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
