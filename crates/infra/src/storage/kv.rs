use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Failure talking to a key-value slot.
///
/// Every variant is recoverable from the quote store's point of view: a failed
/// read means "nothing persisted", a failed write means "persistence skipped".
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage mechanism is disabled or missing.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The write would exceed the store's capacity.
    #[error("storage quota exceeded ({needed} bytes needed, {limit} allowed)")]
    QuotaExceeded { needed: usize, limit: usize },

    /// The key contains characters the backend cannot represent.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal lock poisoning.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Per-browser style string key/value storage (the local storage contract).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store for tests/dev, with an optional byte quota over all values.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would push the total stored bytes above `limit`.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            quota: Some(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.inner.read().map_err(|_| StorageError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.inner.write().map_err(|_| StorageError::Poisoned)?;

        if let Some(limit) = self.quota {
            let others: usize = map
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.inner.write().map_err(|_| StorageError::Poisoned)?;
        map.remove(key);
        Ok(())
    }
}

/// A store that is always unavailable (storage disabled, private browsing).
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledKeyValueStore;

impl KeyValueStore for DisabledKeyValueStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage is disabled".to_string()))
    }
}
