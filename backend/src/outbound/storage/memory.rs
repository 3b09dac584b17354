//! In-memory snapshot store. Nothing it holds survives the process.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{SnapshotStore, SnapshotStoreError};

use super::validate_key;

/// Snapshot store backed by a process-local map.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    documents: Mutex<HashMap<String, String>>,
}

impl InMemorySnapshotStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self, key: &str) -> Result<MutexGuard<'_, HashMap<String, String>>, SnapshotStoreError> {
        self.documents
            .lock()
            .map_err(|_| SnapshotStoreError::read(key, "store lock poisoned"))
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SnapshotStoreError> {
        validate_key(key)?;
        Ok(self.lock(key)?.get(key).cloned())
    }

    async fn set(&self, key: &str, document: &str) -> Result<(), SnapshotStoreError> {
        validate_key(key)?;
        self.lock(key)?.insert(key.to_owned(), document.to_owned());
        Ok(())
    }
}
