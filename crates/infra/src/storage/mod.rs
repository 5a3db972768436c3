//! Key-value storage backends for the persisted quote slot.

pub mod file;
pub mod kv;

pub use file::FileKeyValueStore;
pub use kv::{DisabledKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError};
