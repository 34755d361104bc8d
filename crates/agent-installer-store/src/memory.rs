//! In-memory storage for tests.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::{Result, StoreError};
use crate::types::File;
use crate::AssetStore;

/// A store that keeps files in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single file.
    #[must_use]
    pub fn with_file(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.insert(name, data);
        store
    }

    /// Insert or replace a file.
    pub fn insert(&self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.lock().insert(name.into(), data.into());
    }

    /// Get a copy of a file's contents.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().get(name).cloned()
    }

    /// Number of stored files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    /// Whether the store holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

impl AssetStore for MemoryStore {
    fn fetch_by_name(&self, name: &str) -> Result<File> {
        self.get(name)
            .map(|data| File::new(name, data))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn write_file(&self, file: &File) -> Result<()> {
        self.insert(file.filename.clone(), file.data.clone());
        Ok(())
    }
}
