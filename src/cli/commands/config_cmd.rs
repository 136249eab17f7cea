//! config command - List, get, set or unset options in the config file
//!
//! Only the file is read and written. Flag and environment overrides do
//! not show up here.

use anyhow::Result;
use tracing::info;

use crate::cli::Context;
use crate::core::config::TypeHint;

/// Print the whole file as TOML. Prints nothing if no options are set.
pub fn list(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let document = store.list();
    if document.is_empty() {
        return Ok(());
    }
    print!("{}", document.to_toml_string()?);
    Ok(())
}

/// Print the value stored at `key`.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let store = ctx.open_store()?;
    println!("{}", store.get(key)?);
    Ok(())
}

/// Store `value` at `key`, creating sections on the way.
pub fn set(ctx: &Context, key: &str, value: &str, hint: TypeHint) -> Result<()> {
    let mut store = ctx.open_store()?;
    store.set(key, value, hint)?;
    info!(key, path = %store.path().display(), "config option set");
    Ok(())
}

/// Remove `key`, which may be a value or a whole section.
pub fn unset(ctx: &Context, key: &str) -> Result<()> {
    let mut store = ctx.open_store()?;
    store.unset(key)?;
    info!(key, path = %store.path().display(), "config option unset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ConfigError, ConfigOverrides, ConfigStore};
    use crate::core::paths::ConfigPaths;

    fn context(dir: &std::path::Path) -> Context {
        Context {
            paths: ConfigPaths::new(dir),
            overrides: ConfigOverrides::default(),
        }
    }

    #[test]
    fn set_then_unset_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        set(&ctx, "auth.header", "X-Api-Key", TypeHint::Auto).unwrap();
        let store = ConfigStore::open(ctx.paths.config_file()).unwrap();
        assert_eq!(store.get("auth.header").unwrap().to_string(), "X-Api-Key");

        unset(&ctx, "auth.header").unwrap();
        let store = ConfigStore::open(ctx.paths.config_file()).unwrap();
        assert!(store.get("auth.header").is_err());
    }

    #[test]
    fn get_missing_option_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = get(&context(dir.path()), "url").unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        assert!(config_err.is_not_set());
        assert_eq!(err.to_string(), "The option 'url' is not set");
    }

    #[test]
    fn list_on_missing_file_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        list(&context(dir.path())).unwrap();
        assert!(!dir.path().join(".reevecli").exists());
    }
}
