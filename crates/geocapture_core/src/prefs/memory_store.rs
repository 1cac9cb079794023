//! Process-local preference store.

use super::{PrefResult, PreferenceStore};
use std::collections::BTreeMap;

/// In-memory `PreferenceStore`; contents are lost on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    items: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_item(&self, key: &str) -> PrefResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> PrefResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
