//! In-memory state store.

use std::collections::HashMap;
use std::sync::RwLock;

use super::StateStore;

/// A [`StateStore`] backed by a `HashMap`. Used by tests and anywhere state
/// should not outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cells: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cells.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut cells) = self.cells.write() {
            cells.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut cells) = self.cells.write() {
            cells.remove(key);
        }
    }
}
