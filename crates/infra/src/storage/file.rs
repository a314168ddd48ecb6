//! JSON-file backed key-value store used by the `roster` binary.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value as JsonValue};
use tokio::sync::Mutex;

use super::{KeyValueStore, StorageError};

/// Key-value store kept in a single JSON object file.
///
/// The whole document is loaded on [`FileKeyValueStore::open`] and rewritten on
/// every mutation (temp file + rename). In-memory contents only change once the
/// rewrite succeeded, so a failed write leaves both views consistent.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<Map<String, JsonValue>>,
}

impl FileKeyValueStore {
    /// Open (or create on first write) the store at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Map::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(err.into()),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "opened file store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_document(&self, entries: &Map<String, JsonValue>) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn commit<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Map<String, JsonValue>) + Send,
    {
        let mut guard = self.entries.lock().await;
        let mut next = guard.clone();
        f(&mut next);
        self.write_document(&next).await?;
        *guard = next;
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn set_item(&self, key: &str, value: JsonValue) -> Result<(), StorageError> {
        self.commit(|map| {
            map.insert(key.to_string(), value);
        })
        .await
    }

    async fn get_item(&self, key: &str) -> Result<Option<JsonValue>, StorageError> {
        let guard = self.entries.lock().await;
        Ok(guard.get(key).cloned())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.commit(|map| {
            map.remove(key);
        })
        .await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.commit(|map| map.clear()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn contents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileKeyValueStore::open(&path).await.unwrap();
        store.set_item("@people", json!([{"id": "1"}])).await.unwrap();
        store.set_item("@favorites", json!([])).await.unwrap();
        store.remove_item("@favorites").await.unwrap();
        drop(store);

        let reopened = FileKeyValueStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get_item("@people").await.unwrap(),
            Some(json!([{"id": "1"}]))
        );
        assert_eq!(reopened.get_item("@favorites").await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path().join("absent.json"))
            .await
            .unwrap();
        assert_eq!(store.get_item("@people").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let err = FileKeyValueStore::open(&path).await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn clear_empties_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let store = FileKeyValueStore::open(&path).await.unwrap();
        store.set_item("a", json!(1)).await.unwrap();
        store.clear().await.unwrap();

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(serde_json::from_str::<JsonValue>(&text).unwrap(), json!({}));
    }
}
