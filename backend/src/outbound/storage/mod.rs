//! Snapshot store adapters.
//!
//! - [`InMemorySnapshotStore`]: process-local map whose contents are lost
//!   on restart; the server wiring tests run over it.
//! - [`FileSnapshotStore`]: one JSON document per key inside a data
//!   directory, replaced atomically on every write.

mod file;
mod memory;

pub use file::FileSnapshotStore;
pub use memory::InMemorySnapshotStore;

use crate::domain::ports::SnapshotStoreError;

/// Keys become file names, so only a conservative character set is accepted.
fn validate_key(key: &str) -> Result<(), SnapshotStoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SnapshotStoreError::invalid_key(key))
    }
}
