use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage quota exceeded ({needed} bytes needed, {limit} allowed)")]
    QuotaExceeded { needed: usize, limit: usize },
}

/// One persisted key-value entry.
///
/// The value is opaque to storage; callers decide its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl StateEntry {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            updated_at,
        }
    }
}

/// Repository contract for the key-value entries holding app state.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Fetch an entry by key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or decoding failures. A missing key is `Ok(None)`.
    async fn get_entry(&self, key: &str) -> Result<Option<StateEntry>, StorageError>;

    /// Insert or replace an entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be stored.
    async fn put_entry(&self, entry: &StateEntry) -> Result<(), StorageError>;

    /// Remove an entry. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection failures.
    async fn delete_entry(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// An optional byte quota mimics the limits of browser-style local storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, StateEntry>>>,
    quota: Option<usize>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that rejects writes once stored values exceed `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Number of successful `put_entry` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StateRepository for InMemoryRepository {
    async fn get_entry(&self, key: &str) -> Result<Option<StateEntry>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_entry(&self, entry: &StateEntry) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if let Some(limit) = self.quota {
            let others: usize = guard
                .values()
                .filter(|existing| existing.key != entry.key)
                .map(|existing| existing.value.len())
                .sum();
            let needed = others + entry.value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        guard.insert(entry.key.clone(), entry.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_entry(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub state: Arc<dyn StateRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repo(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_repo(repo: impl StateRepository + 'static) -> Self {
        let state: Arc<dyn StateRepository> = Arc::new(repo);
        Self { state }
    }
}
