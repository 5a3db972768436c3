//! Infrastructure layer: key-value storage, the persisted quote slot, the
//! shared quote store, configuration and submitter adapters.

pub mod config;
pub mod persistence;
pub mod quote_store;
pub mod storage;
pub mod submission;

pub use config::{ConfigError, StoreConfig};
pub use persistence::{DecodedSnapshot, QUOTE_STORAGE_KEY, SnapshotError};
pub use quote_store::{HydrationOutcome, QuoteEnvelope, QuoteStore};
pub use storage::{
    DisabledKeyValueStore, FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StorageError,
};
pub use submission::{LoggingSubmitter, MailtoSubmitter};
