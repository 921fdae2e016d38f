//! Key-value store adapter
//!
//! Thin wrapper over durable, synchronous, string-keyed storage. The
//! repository and preferences only talk to this trait, so tests can swap
//! the on-disk store for an in-memory fake.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::storage::{get_data_dir, StorageError};

/// Durable string-keyed storage.
///
/// Synchronous and capacity-bounded by the host; callers must not assume
/// unlimited space. There is no transactional guarantee across keys: a
/// crash between two `set` calls may leave them inconsistent.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for `key`, or `None` if absent
    fn get(&self, key: &str) -> Option<String>;
    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Remove `key`; absent keys are a no-op
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// On-disk store keeping one file per key under the app data directory
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store under the default application data directory
    pub fn open_default() -> Result<Self, StorageError> {
        let root = get_data_dir()?.join("store");
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Open the store under an explicit directory
    pub fn with_root(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers (see storage::keys), never user input.
        self.root.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and as a fallback when the data directory
/// is unavailable
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}
