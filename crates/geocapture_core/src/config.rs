//! Application paths and well-known storage names.
//!
//! # Responsibility
//! - Resolve the data directory holding the database, preferences and logs.
//! - Keep file names and preference keys in one place.
//!
//! # Invariants
//! - The data directory must be absolute; relative paths are rejected.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "GEOCAPTURE_DATA_DIR";
/// SQLite file name, shared with the original mobile app.
pub const DB_FILE_NAME: &str = "locations.db";
pub const PREFS_FILE_NAME: &str = "preferences.json";
pub const LOG_DIR_NAME: &str = "logs";
/// Preference key of the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";
/// Header title shown by every shell.
pub const APP_TITLE: &str = "My Location BASE";

/// Resolved on-disk layout for one application instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub prefs_path: PathBuf,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Derives all paths from one absolute data directory.
    pub fn from_data_dir(data_dir: impl AsRef<Path>) -> Result<Self, String> {
        let raw = data_dir.as_ref();
        let trimmed = raw.to_string_lossy();
        let trimmed = trimmed.trim();
        if trimmed.is_empty() {
            return Err("data_dir cannot be empty".to_string());
        }
        let data_dir = PathBuf::from(trimmed);
        if !data_dir.is_absolute() {
            return Err(format!(
                "data_dir must be an absolute path, got `{trimmed}`"
            ));
        }

        Ok(Self {
            db_path: data_dir.join(DB_FILE_NAME),
            prefs_path: data_dir.join(PREFS_FILE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            data_dir,
        })
    }

    /// Resolves the data directory from `GEOCAPTURE_DATA_DIR`, falling back
    /// to `fallback` when the variable is unset or blank.
    pub fn from_env_or(fallback: impl AsRef<Path>) -> Result<Self, String> {
        match std::env::var(DATA_DIR_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::from_data_dir(raw),
            _ => Self::from_data_dir(fallback),
        }
    }

    /// Creates the data directory if missing.
    pub fn ensure_dirs(&self) -> Result<(), String> {
        std::fs::create_dir_all(&self.data_dir).map_err(|err| {
            format!(
                "failed to create data directory `{}`: {err}",
                self.data_dir.display()
            )
        })
    }
}
