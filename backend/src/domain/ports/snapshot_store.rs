//! Port for the key-value snapshot storage that backs both collections.
//!
//! Each collection is persisted as one JSON document under a fixed key. A
//! failed `set` must leave the previously stored document readable.

use async_trait::async_trait;

use super::define_port_error;

/// Storage key for the account collection.
pub const ACCOUNTS_KEY: &str = "ajm-users";
/// Storage key for the booking collection.
pub const BOOKINGS_KEY: &str = "ajm-bookings";

define_port_error! {
    /// Errors raised by snapshot store adapters.
    pub enum SnapshotStoreError {
        /// The stored document could not be read.
        Read { key: String, message: String } =>
            "snapshot store read of {key} failed: {message}",
        /// The document could not be written.
        Write { key: String, message: String } =>
            "snapshot store write of {key} failed: {message}",
        /// The key contains characters the adapter cannot store.
        InvalidKey { key: String } => "snapshot store key {key} is not valid",
    }
}

/// Key-value store holding serialised collection snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the document stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, SnapshotStoreError>;

    /// Replace the document stored under `key`.
    async fn set(&self, key: &str, document: &str) -> Result<(), SnapshotStoreError>;
}
