use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde_json::Value as JsonValue;

use super::{KeyValueStore, StorageError};

/// In-memory key-value store.
///
/// Intended for tests/dev. Values are kept as serialized JSON text, so reads
/// always hand out fresh copies. Reads and writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get_item` fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent mutating call fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful mutating calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|map| map.contains_key(key))
            .unwrap_or(false)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::backend("injected write failure"));
        }
        Ok(())
    }

    fn mutate<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        self.check_writable()?;
        let mut map = self
            .entries
            .write()
            .map_err(|_| StorageError::backend("lock poisoned"))?;
        f(&mut map);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn set_item(&self, key: &str, value: JsonValue) -> Result<(), StorageError> {
        let text = serde_json::to_string(&value)?;
        self.mutate(|map| {
            map.insert(key.to_string(), text);
        })
    }

    async fn get_item(&self, key: &str) -> Result<Option<JsonValue>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::backend("injected read failure"));
        }
        let map = self
            .entries
            .read()
            .map_err(|_| StorageError::backend("lock poisoned"))?;
        match map.get(key) {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|map| {
            map.remove(key);
        })
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.mutate(|map| map.clear())
    }
}
