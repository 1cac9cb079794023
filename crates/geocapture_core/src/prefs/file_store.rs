//! JSON-file preference store.
//!
//! # Responsibility
//! - Keep all preference keys in one JSON object file.
//! - Write changes atomically (temp file + rename).
//!
//! # Invariants
//! - A missing file is an empty store, not an error.
//! - Reads go to disk every time; there is no cached copy to drift.
//! - A corrupt file fails reads, and the next write replaces it.

use super::{PrefResult, PreferenceError, PreferenceStore};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

type Items = BTreeMap<String, String>;

/// File-backed `PreferenceStore`.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    /// Binds the store to `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(&self) -> PrefResult<Items> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Items::new()),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str::<Items>(&content).map_err(|source| PreferenceError::Encoding {
            key: self.path.display().to_string(),
            source,
        })
    }

    fn write_items(&self, items: &Items) -> PrefResult<()> {
        let content =
            serde_json::to_string_pretty(items).map_err(|source| PreferenceError::Encoding {
                key: self.path.display().to_string(),
                source,
            })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(|source| PreferenceError::Io {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get_item(&self, key: &str) -> PrefResult<Option<String>> {
        Ok(self.read_items()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> PrefResult<()> {
        let mut items = match self.read_items() {
            Ok(items) => items,
            Err(PreferenceError::Encoding { .. }) => {
                warn!(
                    "event=prefs_write module=prefs status=recovered error_code=corrupt_file path={}",
                    self.path.display()
                );
                Items::new()
            }
            Err(err) => return Err(err),
        };
        items.insert(key.to_string(), value.to_string());
        self.write_items(&items)?;
        debug!("event=prefs_write module=prefs status=ok key={}", key);
        Ok(())
    }
}
