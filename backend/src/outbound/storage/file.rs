//! File-backed snapshot store.
//!
//! Each key maps to `<key>.json` under the data directory, opened through a
//! `cap-std` directory handle so writes cannot escape it.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{SnapshotStore, SnapshotStoreError};

use super::validate_key;

/// Snapshot store writing `<key>.json` files into a data directory.
///
/// Writes land in a staging file first and are renamed into place, so a
/// failed write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    root: PathBuf,
    dir: Arc<Dir>,
}

impl FileSnapshotStore {
    /// Open `root`, creating it when missing.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        Dir::create_ambient_dir_all(&root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        Ok(Self {
            root,
            dir: Arc::new(dir),
        })
    }

    /// Directory holding the documents.
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    async fn run_blocking<T, F>(&self, key: &str, task: F) -> Result<T, SnapshotStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> Result<T, SnapshotStoreError> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || task(&dir))
            .await
            .map_err(|err| SnapshotStoreError::write(key, format!("storage task failed: {err}")))?
    }
}

fn file_name(key: &str) -> String {
    format!("{key}.json")
}

fn read_document(dir: &Dir, key: &str) -> Result<Option<String>, SnapshotStoreError> {
    match dir.read_to_string(file_name(key)) {
        Ok(document) => Ok(Some(document)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(SnapshotStoreError::read(key, err.to_string())),
    }
}

fn write_document(dir: &Dir, key: &str, document: &str) -> Result<(), SnapshotStoreError> {
    let staged = format!(".{key}.json.tmp-{}", Uuid::new_v4().simple());
    let result = dir
        .write(&staged, document.as_bytes())
        .and_then(|()| dir.rename(&staged, dir, file_name(key)));
    if let Err(err) = result {
        let _cleanup_result = dir.remove_file(&staged);
        return Err(SnapshotStoreError::write(key, err.to_string()));
    }
    Ok(())
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SnapshotStoreError> {
        validate_key(key)?;
        let owned = key.to_owned();
        self.run_blocking(key, move |dir| read_document(dir, &owned))
            .await
    }

    async fn set(&self, key: &str, document: &str) -> Result<(), SnapshotStoreError> {
        validate_key(key)?;
        let owned = key.to_owned();
        let document = document.to_owned();
        self.run_blocking(key, move |dir| write_document(dir, &owned, &document))
            .await?;
        debug!(key, root = %self.root.display(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[rstest]
    #[tokio::test]
    async fn missing_document_reads_as_none(temp_dir: TempDir) {
        let store = FileSnapshotStore::open(temp_dir.path()).expect("open store");
        assert!(store.get("ajm-bookings").await.expect("read").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn documents_survive_reopening(temp_dir: TempDir) {
        let store = FileSnapshotStore::open(temp_dir.path()).expect("open store");
        store.set("ajm-bookings", "[]").await.expect("first write");
        store
            .set("ajm-bookings", r#"[{"id":1}]"#)
            .await
            .expect("second write");

        let reopened = FileSnapshotStore::open(temp_dir.path()).expect("reopen store");
        assert_eq!(
            reopened.get("ajm-bookings").await.expect("read").as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert!(temp_dir.path().join("ajm-bookings.json").is_file());
    }

    #[rstest]
    #[tokio::test]
    async fn writes_leave_no_staging_files(temp_dir: TempDir) {
        let store = FileSnapshotStore::open(temp_dir.path()).expect("open store");
        store.set("ajm-users", "[]").await.expect("write");

        let names: Vec<String> = std::fs::read_dir(temp_dir.path())
            .expect("list dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["ajm-users.json".to_owned()]);
    }

    #[rstest]
    #[tokio::test]
    async fn open_creates_nested_directories(temp_dir: TempDir) {
        let nested = temp_dir.path().join("var").join("shuttle");
        let store = FileSnapshotStore::open(&nested).expect("open store");
        assert_eq!(store.root(), nested.as_path());
        assert!(nested.is_dir());
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_path_traversal(temp_dir: TempDir) {
        let store = FileSnapshotStore::open(temp_dir.path()).expect("open store");
        let err = store
            .set("../escape", "[]")
            .await
            .expect_err("invalid key");
        assert!(matches!(err, SnapshotStoreError::InvalidKey { .. }));
    }
}
