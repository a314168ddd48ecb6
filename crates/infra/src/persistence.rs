//! Persistence intents: the durable half of a state mutation.
//!
//! State mutations run synchronously and describe what must be written as a
//! [`PersistIntent`]. The caller decides when to perform it, either awaiting
//! [`PersistIntent::execute`] directly or handing it to
//! [`crate::WriteBehind`].

use roster_people::{Person, PersonDto, PersonMapper};

use crate::storage::{KeyValueStore, StorageError, StorageKey, save_json};

/// A pending write to local storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistIntent {
    /// Replace the collection stored under `key`.
    Save {
        key: StorageKey,
        people: Vec<PersonDto>,
    },
    /// Drop `key` entirely.
    Remove { key: StorageKey },
}

impl PersistIntent {
    /// Snapshot `people` in wire shape for `key`.
    pub fn save(key: StorageKey, people: &[Person]) -> Self {
        Self::Save {
            key,
            people: PersonMapper::to_dto_list(people),
        }
    }

    pub fn remove(key: StorageKey) -> Self {
        Self::Remove { key }
    }

    pub fn key(&self) -> StorageKey {
        match self {
            PersistIntent::Save { key, .. } | PersistIntent::Remove { key } => *key,
        }
    }

    /// Perform the write against `store`.
    pub async fn execute<S>(&self, store: &S) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        match self {
            PersistIntent::Save { key, people } => save_json(store, *key, people).await,
            PersistIntent::Remove { key } => store.remove_item(key.as_str()).await,
        }
    }
}
