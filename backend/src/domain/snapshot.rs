//! Loading and persisting whole collections through the snapshot store.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{SnapshotStore, SnapshotStoreError};

pub(crate) fn map_store_error(error: SnapshotStoreError) -> Error {
    match error {
        SnapshotStoreError::Read { key, message } => {
            Error::persistence(format!("could not read {key}: {message}"))
        }
        SnapshotStoreError::Write { key, message } => {
            Error::persistence(format!("could not save {key}: {message}"))
        }
        SnapshotStoreError::InvalidKey { key } => {
            Error::internal(format!("storage key {key} is not valid"))
        }
    }
}

/// Read the collection stored under `key`. `None` means nothing was stored.
pub(crate) async fn load_collection<T>(
    store: &dyn SnapshotStore,
    key: &str,
) -> Result<Option<Vec<T>>, Error>
where
    T: DeserializeOwned,
{
    let Some(document) = store.get(key).await.map_err(map_store_error)? else {
        return Ok(None);
    };
    serde_json::from_str(&document).map(Some).map_err(|err| {
        warn!(key, error = %err, "stored collection could not be decoded");
        Error::persistence(format!("stored {key} could not be decoded: {err}"))
    })
}

/// Replace the collection stored under `key`.
pub(crate) async fn persist_collection<T>(
    store: &dyn SnapshotStore,
    key: &str,
    items: &[T],
) -> Result<(), Error>
where
    T: Serialize,
{
    let document = serde_json::to_string(items)
        .map_err(|err| Error::internal(format!("could not encode {key}: {err}")))?;
    store.set(key, &document).await.map_err(|err| {
        warn!(key, error = %err, "snapshot write failed");
        map_store_error(err)
    })
}
