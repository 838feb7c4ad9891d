pub mod keys;
pub mod local_store;
pub mod storage;

pub use local_store::{JsonList, LocalStore};
pub use storage::{open_storage, FileStore, KeyValueStore, MemoryStore, StorageError};

#[cfg(any(test, feature = "mock"))]
pub use storage::MockKeyValueStore;
