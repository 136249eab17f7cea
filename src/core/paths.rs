//! core::paths
//!
//! Location of the client config file.
//!
//! # Resolution
//!
//! The config directory is, in order:
//! 1. `--config <dir>` (or `$REEVE_CLI_CONFIG`, bound to the same flag)
//! 2. `<user config dir>/reeve` (e.g. `~/.config/reeve` on Linux)
//! 3. `.` if the platform has no user config directory
//!
//! The file inside it is always named `.reevecli`.
//!
//! # Example
//!
//! ```
//! use reeve_cli::core::paths::ConfigPaths;
//! use std::path::PathBuf;
//!
//! let paths = ConfigPaths::new("/etc/reeve");
//! assert_eq!(paths.config_file(), PathBuf::from("/etc/reeve/.reevecli"));
//! ```

use std::path::{Path, PathBuf};

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = ".reevecli";

/// Directory created under the platform config directory.
pub const APP_DIR_NAME: &str = "reeve";

/// Resolved config directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl ConfigPaths {
    /// Use an explicit config directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Use `explicit` if given, otherwise the platform default.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        match explicit {
            Some(dir) => Self::new(dir),
            None => Self::new(Self::default_dir()),
        }
    }

    /// The platform default config directory.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The config directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the config file.
    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }
}
