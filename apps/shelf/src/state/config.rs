//! # Configuration State
//!
//! Stores application configuration resolved at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHELF_DB_PATH`, `SHELF_BUSY_TEXT`, `RUST_LOG`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use shelf_core::DEFAULT_BUSY_TEXT;
use shelf_db::DATABASE_FILE_NAME;
use thiserror::Error;

/// Environment variable overriding the database file path.
pub const DB_PATH_ENV: &str = "SHELF_DB_PATH";

/// Environment variable overriding the busy caption.
pub const BUSY_TEXT_ENV: &str = "SHELF_BUSY_TEXT";

/// Environment variable holding the log filter.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

/// Log filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info,shelf_core=debug,shelf_db=debug,shelf_app=debug,sqlx=warn";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// SQLite file holding the products table.
    pub database_path: PathBuf,

    /// Caption shown while the list reloads.
    pub busy_text: String,

    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
}

/// Config resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No per-user data directory on this platform and no override set.
    #[error("Could not determine app data directory (set SHELF_DB_PATH to choose a database file)")]
    NoDataDirectory,
}

impl ConfigState {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from any key lookup.
    ///
    /// ## Platform-Specific Database Paths
    /// - **macOS**: `~/Library/Application Support/com.Shelf.Shelf/Products.db3`
    /// - **Windows**: `%APPDATA%\Shelf\Shelf\data\Products.db3`
    /// - **Linux**: `~/.local/share/shelf/Products.db3`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_path = match non_empty(DB_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        Ok(ConfigState {
            database_path,
            busy_text: non_empty(BUSY_TEXT_ENV).unwrap_or_else(|| DEFAULT_BUSY_TEXT.to_string()),
            log_filter: non_empty(LOG_FILTER_ENV)
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

/// `<platform data dir>/Products.db3`.
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("com", "Shelf", "Shelf").ok_or(ConfigError::NoDataDirectory)?;
    Ok(proj_dirs.data_dir().join(DATABASE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = ConfigState::from_lookup(lookup(&[
            (DB_PATH_ENV, "/tmp/shelf/Products.db3"),
            (BUSY_TEXT_ENV, "Hold on..."),
            (LOG_FILTER_ENV, "warn"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/shelf/Products.db3"));
        assert_eq!(config.busy_text, "Hold on...");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = ConfigState::from_lookup(lookup(&[
            (DB_PATH_ENV, "/data/Products.db3"),
            (BUSY_TEXT_ENV, "   "),
        ]))
        .unwrap();

        assert_eq!(config.busy_text, DEFAULT_BUSY_TEXT);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_default_path_uses_database_file_name() {
        // Some CI sandboxes have no home directory; nothing to check there
        if let Ok(config) = ConfigState::from_lookup(|_| None) {
            assert_eq!(
                config.database_path.file_name().and_then(|n| n.to_str()),
                Some(DATABASE_FILE_NAME)
            );
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let config = ConfigState::from_lookup(lookup(&[(DB_PATH_ENV, "p.db3")])).unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["databasePath"], "p.db3");
        assert_eq!(json["busyText"], DEFAULT_BUSY_TEXT);
    }
}
