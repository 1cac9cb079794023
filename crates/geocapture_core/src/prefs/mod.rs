//! Key-value preference storage.
//!
//! # Responsibility
//! - Persist small string values (JSON text) under well-known keys.
//! - Provide the typed dark-mode flag helpers used by the controller.
//!
//! # Invariants
//! - Values are stored as JSON-encoded strings; `darkMode` holds `"true"`/`"false"`.
//! - A key that was never written reads as `None`, never as a default.

mod file_store;
mod memory_store;

pub use file_store::JsonFilePreferenceStore;
pub use memory_store::MemoryPreferenceStore;

use crate::config::DARK_MODE_KEY;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type PrefResult<T> = Result<T, PreferenceError>;

/// Errors raised by preference reads and writes.
#[derive(Debug)]
pub enum PreferenceError {
    /// Backing file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Stored text is not valid JSON for the expected shape.
    Encoding {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for PreferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "preference file `{}`: {source}", path.display())
            }
            Self::Encoding { key, source } => {
                write!(f, "preference `{key}` is not valid JSON: {source}")
            }
        }
    }
}

impl Error for PreferenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encoding { source, .. } => Some(source),
        }
    }
}

/// String key-value store scoped to this application.
pub trait PreferenceStore {
    /// Returns the raw stored text for `key`, or `None` if never set.
    fn get_item(&self, key: &str) -> PrefResult<Option<String>>;
    /// Overwrites `key` with `value`.
    fn set_item(&mut self, key: &str, value: &str) -> PrefResult<()>;

    /// Reads the persisted dark-mode flag.
    fn load_dark_mode(&self) -> PrefResult<Option<bool>> {
        match self.get_item(DARK_MODE_KEY)? {
            Some(raw) => serde_json::from_str::<bool>(&raw)
                .map(Some)
                .map_err(|source| PreferenceError::Encoding {
                    key: DARK_MODE_KEY.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Persists the dark-mode flag as a JSON boolean.
    fn save_dark_mode(&mut self, value: bool) -> PrefResult<()> {
        let encoded =
            serde_json::to_string(&value).map_err(|source| PreferenceError::Encoding {
                key: DARK_MODE_KEY.to_string(),
                source,
            })?;
        self.set_item(DARK_MODE_KEY, &encoded)
    }
}
