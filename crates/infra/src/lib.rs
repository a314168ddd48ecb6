//! Infrastructure layer: local key-value storage, write-behind persistence and the
//! person repository.

pub mod persistence;
pub mod repository;
pub mod storage;
pub mod write_behind;

pub use persistence::PersistIntent;
pub use repository::{LocalPersonRepository, PersonRepository};
pub use storage::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError, StorageKey,
};
pub use write_behind::WriteBehind;
