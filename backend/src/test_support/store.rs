use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{SnapshotStore, SnapshotStoreError};

/// In-memory store whose writes can be switched to fail.
#[derive(Default)]
pub struct ToggleStore {
    documents: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl ToggleStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn document(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn seed(&self, key: &str, document: &str) {
        self.lock().insert(key.to_owned(), document.to_owned());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.documents.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("store mutex"),
        }
    }
}

#[async_trait]
impl SnapshotStore for ToggleStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SnapshotStoreError> {
        Ok(self.document(key))
    }

    async fn set(&self, key: &str, document: &str) -> Result<(), SnapshotStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SnapshotStoreError::write(key, "writes disabled"));
        }
        self.seed(key, document);
        Ok(())
    }
}
