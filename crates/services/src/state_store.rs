use std::sync::Arc;

use companion_core::model::{AppState, MODULES, Module, storage_key};
use storage::repository::{StateEntry, StateRepository};

use crate::Clock;
use crate::error::StateStoreError;

/// Writes are attempted this many times before the failure is surfaced.
pub const PERSIST_ATTEMPTS: usize = 2;

/// Loads, persists and resets the single state document.
///
/// Loading fails open: anything unreadable yields a fresh default document.
#[derive(Clone)]
pub struct StateStore {
    clock: Clock,
    repo: Arc<dyn StateRepository>,
    key: String,
    modules: &'static [Module],
}

impl StateStore {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn StateRepository>) -> Self {
        Self {
            clock,
            repo,
            key: storage_key(),
            modules: &MODULES,
        }
    }

    #[must_use]
    pub fn with_modules(mut self, modules: &'static [Module]) -> Self {
        self.modules = modules;
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn modules(&self) -> &'static [Module] {
        self.modules
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn default_state(&self) -> AppState {
        AppState::new(self.modules, self.clock.now())
    }

    /// Read the persisted document and merge it over fresh defaults.
    pub async fn load(&self) -> AppState {
        let entry = match self.repo.get_entry(&self.key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no persisted state; starting fresh");
                return self.default_state();
            }
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "state could not be read; starting fresh"
                );
                return self.default_state();
            }
        };

        match AppState::from_json_str(&entry.value, self.default_state()) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "persisted state is invalid; starting fresh"
                );
                self.default_state()
            }
        }
    }

    /// Stamp `updated_at` and serialize the whole document into an entry.
    ///
    /// # Errors
    ///
    /// Returns `StateStoreError::Serialization` if the document cannot be encoded.
    pub fn stamp_entry(&self, state: &mut AppState) -> Result<StateEntry, StateStoreError> {
        state.updated_at = self.clock.now();
        let value = state.to_json()?;
        Ok(StateEntry::new(self.key.clone(), value, state.updated_at))
    }

    /// Write a prepared entry, retrying once before giving up.
    ///
    /// # Errors
    ///
    /// Returns `StateStoreError::Storage` with the last storage error.
    pub async fn write_entry(&self, entry: &StateEntry) -> Result<(), StateStoreError> {
        let mut attempt = 1;
        loop {
            match self.repo.put_entry(entry).await {
                Ok(()) => return Ok(()),
                Err(err) if attempt < PERSIST_ATTEMPTS => {
                    tracing::warn!(attempt, error = %err, "state write failed; retrying");
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(attempts = attempt, error = %err, "state write failed");
                    return Err(err.into());
                }
            }
        }
    }

    /// Stamp and write the document.
    ///
    /// # Errors
    ///
    /// Returns `StateStoreError` if serialization or the write fails.
    pub async fn persist(&self, state: &mut AppState) -> Result<(), StateStoreError> {
        let entry = self.stamp_entry(state)?;
        self.write_entry(&entry).await
    }

    /// Drop the persisted document and hand back a fresh one.
    ///
    /// # Errors
    ///
    /// Returns `StateStoreError::Storage` if the entry cannot be removed.
    pub async fn reset(&self) -> Result<AppState, StateStoreError> {
        self.repo.delete_entry(&self.key).await?;
        tracing::info!(key = %self.key, "persisted state cleared");
        Ok(self.default_state())
    }
}
