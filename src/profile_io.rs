use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{CerebroError, Result};
use crate::profile::CerebroState;

/// Load/save port for the persisted state slot.
///
/// `load` returns `Ok(None)` when nothing was ever saved and an error when
/// something was saved but cannot be read back.
pub trait StateStorage: Send {
    fn load(&self) -> Result<Option<CerebroState>>;
    fn save(&self, state: &CerebroState) -> Result<()>;
    fn describe(&self) -> String;
}

/// One pretty-printed JSON file per slot.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/<slot>.json`
    pub fn for_slot(dir: &Path, slot_name: &str) -> Self {
        Self::new(dir.join(format!("{}.json", slot_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<CerebroState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let state: CerebroState = serde_json::from_reader(reader)?;
        Ok(Some(state))
    }

    fn save(&self, state: &CerebroState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, state)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {:?}", self.path)
    }
}

/// In-process key-value slot holding the serialized blob.
///
/// Keeps the raw text rather than the value so tests can seed it with
/// anything, including malformed JSON.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(contents: &str) -> Self {
        Self {
            slot: Mutex::new(Some(contents.to_string())),
        }
    }

    pub fn with_state(state: &CerebroState) -> Result<Self> {
        Ok(Self::with_raw(&serde_json::to_string(state)?))
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self) -> Result<Option<CerebroState>> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| CerebroError::Other(format!("memory slot poisoned: {}", e)))?;
        match slot.as_deref() {
            None => Ok(None),
            Some(contents) => Ok(Some(serde_json::from_str(contents)?)),
        }
    }

    fn save(&self, state: &CerebroState) -> Result<()> {
        let serialized = serde_json::to_string(state)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| CerebroError::Other(format!("memory slot poisoned: {}", e)))?;
        *slot = Some(serialized);
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory slot".to_string()
    }
}

// Lets a caller keep a handle on the storage after handing it to the store.
impl<S: StateStorage + Sync> StateStorage for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<CerebroState>> {
        (**self).load()
    }

    fn save(&self, state: &CerebroState) -> Result<()> {
        (**self).save(state)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_empty() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());
        assert!(storage.raw().is_none());
    }

    #[test]
    fn test_memory_storage_save_then_load() {
        let storage = MemoryStorage::new();
        let mut state = CerebroState::default();
        state.community_metrics.total_pioneers = 12;
        storage.save(&state).unwrap();
        assert_eq!(storage.load().unwrap(), Some(state));
    }

    #[test]
    fn test_memory_storage_malformed() {
        let storage = MemoryStorage::with_raw("{ not json");
        assert!(matches!(
            storage.load(),
            Err(CerebroError::Serialization(_))
        ));
    }

    #[test]
    fn test_file_storage_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::for_slot(dir.path(), "slot");
        assert_eq!(storage.path(), dir.path().join("slot.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/deeper/state.json"));
        storage.save(&CerebroState::default()).unwrap();
        assert_eq!(storage.load().unwrap(), Some(CerebroState::default()));
    }
}
