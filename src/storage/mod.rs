//! Durable key-value storage backing the journal.
//!
//! The entry store persists its whole collection as a single string value under
//! one key. This module defines the asynchronous `KeyValueStore` seam it writes
//! through, plus two implementations.
//!
//! # Module Structure
//!
//! - `file`: One JSON file per key in a locked data directory
//! - `MemoryStore` (here): In-process map, for tests and embedders

pub mod file;

use crate::errors::AppResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

pub use file::FileStore;

/// Asynchronous string key-value store.
///
/// Each operation may fail independently. Deleting a missing key succeeds.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Removes `key` and its value.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        (**self).delete(key).await
    }
}

/// In-memory `KeyValueStore`.
///
/// Cloning shares the underlying map, so a clone can be kept to inspect what
/// an entry store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous read, for inspection.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.values().get(key).cloned()
    }

    /// Synchronous write, for seeding.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values().insert(key.into(), value.into());
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.values().insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.values().remove(key);
        Ok(())
    }
}
