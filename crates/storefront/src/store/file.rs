//! JSON-file-backed state store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::StateStore;

/// A [`StateStore`] persisted as a single JSON object on disk.
///
/// The whole map is loaded at open and rewritten on every mutation. A
/// missing file starts empty; a malformed file is logged and starts empty
/// (state degradation is never an error). Write failures keep the in-memory
/// map authoritative for the rest of the process.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cells: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any existing state.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cells = load(&path);
        Self {
            path,
            cells: RwLock::new(cells),
        }
    }

    fn persist(&self, cells: &BTreeMap<String, String>) {
        let json = match serde_json::to_string_pretty(cells) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to encode state file");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), %err, "failed to write state file");
        }
    }
}

fn load(path: &Path) -> BTreeMap<String, String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "failed to read state file, starting empty");
            return BTreeMap::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(cells) => cells,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "malformed state file, starting empty");
            BTreeMap::new()
        }
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cells.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut cells) = self.cells.write() {
            cells.insert(key.to_owned(), value.to_owned());
            self.persist(&cells);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut cells) = self.cells.write() {
            if cells.remove(key).is_some() {
                self.persist(&cells);
            }
        }
    }
}
