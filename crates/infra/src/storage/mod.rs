//! Local key-value storage.
//!
//! The application persists whole collections as JSON values under a small set of
//! string keys. Engines implement [`KeyValueStore`]; typed access goes through
//! [`load_json`] and [`save_json`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use thiserror::Error;

mod file;
mod in_memory;

pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;

/// Storage operation error.
///
/// These are **infrastructure errors**. Callers in this workspace log them and
/// continue with in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Keys under which the application keeps its collections.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The full people collection.
    People,
    /// The favorites snapshots.
    Favorites,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::People => "@people",
            StorageKey::Favorites => "@favorites",
        }
    }
}

impl core::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Async string-keyed store of JSON values.
///
/// Every call may fail. A missing key is `Ok(None)`, not an error.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn set_item(&self, key: &str, value: JsonValue) -> Result<(), StorageError>;

    async fn get_item(&self, key: &str) -> Result<Option<JsonValue>, StorageError>;

    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key.
    async fn clear(&self) -> Result<(), StorageError>;
}

#[async_trait::async_trait]
impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    async fn set_item(&self, key: &str, value: JsonValue) -> Result<(), StorageError> {
        (**self).set_item(key, value).await
    }

    async fn get_item(&self, key: &str) -> Result<Option<JsonValue>, StorageError> {
        (**self).get_item(key).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        (**self).clear().await
    }
}

/// Read and decode the value stored under `key`.
///
/// A stored JSON `null` reads as absent.
pub async fn load_json<T, S>(store: &S, key: StorageKey) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get_item(key.as_str()).await? {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

/// Encode `value` and store it under `key`.
pub async fn save_json<T, S>(store: &S, key: StorageKey, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let value = serde_json::to_value(value)?;
    store.set_item(key.as_str(), value).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn typed_round_trip_through_arc_dyn_store() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
        save_json(&store, StorageKey::Favorites, &vec!["a", "b"])
            .await
            .unwrap();

        let loaded: Option<Vec<String>> = load_json(&store, StorageKey::Favorites).await.unwrap();
        assert_eq!(loaded, Some(vec!["a".to_string(), "b".to_string()]));

        let missing: Option<Vec<String>> = load_json(&store, StorageKey::People).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn stored_null_reads_as_absent() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("@people", JsonValue::Null).await.unwrap();
        let loaded: Option<Vec<String>> = load_json(&store, StorageKey::People).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn wrong_shape_is_a_serialization_error() {
        let store = InMemoryKeyValueStore::new();
        store
            .set_item("@people", serde_json::json!({"not": "a list"}))
            .await
            .unwrap();
        let err = load_json::<Vec<String>, _>(&store, StorageKey::People)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn keys_have_fixed_names() {
        assert_eq!(StorageKey::People.as_str(), "@people");
        assert_eq!(StorageKey::Favorites.to_string(), "@favorites");
    }
}
