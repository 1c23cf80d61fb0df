use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use companion_core::export::{self, ExportFile};
use companion_core::model::{AppState, Module, backfill_repo, is_known_section, section_ids};
use companion_core::{Progress, compute_progress};
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::error::{ImportError, StateStoreError};
use crate::state_store::StateStore;

/// Delay before jumping back to the last visited section at startup.
pub const RESTORE_DELAY: Duration = Duration::from_millis(150);

/// What views observe after every persist, import or reset.
#[derive(Clone, Debug, PartialEq)]
pub struct CompanionSnapshot {
    pub state: AppState,
    pub save_error: Option<String>,
}

struct Inner {
    store: StateStore,
    state: Mutex<AppState>,
    write_lock: tokio::sync::Mutex<()>,
    changes: watch::Sender<CompanionSnapshot>,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, save_error: Option<String>) {
        let state = self.lock_state().clone();
        self.changes.send_replace(CompanionSnapshot { state, save_error });
    }

    // Writes are serialized so a newer snapshot is never overwritten by an older one.
    async fn persist_now(&self) -> Result<(), StateStoreError> {
        let _writing = self.write_lock.lock().await;
        let entry = {
            let mut state = self.lock_state();
            self.store.stamp_entry(&mut state)?
        };
        let result = self.store.write_entry(&entry).await;
        self.publish(result.as_ref().err().map(ToString::to_string));
        result
    }
}

/// Owns the state document and exposes the commands a view dispatches.
///
/// Completion toggles persist immediately; note, answer and navigation edits
/// go through a trailing-edge debounce.
#[derive(Clone)]
pub struct CompanionController {
    inner: Arc<Inner>,
    debounce: Debouncer,
}

impl CompanionController {
    /// Load the persisted document and build a controller around it.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub async fn load(store: StateStore) -> Self {
        Self::load_with_debounce(store, DEFAULT_DEBOUNCE).await
    }

    /// Like [`Self::load`] with a custom debounce window.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub async fn load_with_debounce(store: StateStore, window: Duration) -> Self {
        let state = store.load().await;
        let (changes, _) = watch::channel(CompanionSnapshot {
            state: state.clone(),
            save_error: None,
        });
        Self {
            inner: Arc::new(Inner {
                store,
                state: Mutex::new(state),
                write_lock: tokio::sync::Mutex::new(()),
                changes,
            }),
            debounce: Debouncer::new(window, Handle::current()),
        }
    }

    #[must_use]
    pub fn modules(&self) -> &'static [Module] {
        self.inner.store.modules()
    }

    #[must_use]
    pub fn sections(&self) -> Vec<&'static str> {
        section_ids(self.modules())
    }

    /// Current in-memory document.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.inner.lock_state().clone()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        compute_progress(&self.inner.lock_state(), self.modules())
    }

    /// Receiver that wakes after every persist, import and reset.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CompanionSnapshot> {
        self.inner.changes.subscribe()
    }

    /// Mark a module done or open and persist right away.
    ///
    /// # Errors
    ///
    /// Returns `StateStoreError` if the write fails; the in-memory flag stays set.
    pub async fn on_toggle_done(&self, id: &str, value: bool) -> Result<(), StateStoreError> {
        self.inner.lock_state().set_done(id, value);
        tracing::debug!(module = id, done = value, "completion toggled");
        self.inner.persist_now().await
    }

    pub fn on_note_changed(&self, key: &str, text: &str) {
        self.inner.lock_state().set_note(key, text);
        self.schedule_persist();
    }

    pub fn on_answer_changed(&self, key: &str, text: &str) {
        self.inner.lock_state().set_answer(key, text);
        self.schedule_persist();
    }

    /// Remember `id` as the last visited section.
    ///
    /// Returns false, changing nothing, when the section does not exist.
    pub fn scroll_to_section(&self, id: &str) -> bool {
        if !is_known_section(self.modules(), id) {
            return false;
        }
        self.inner.lock_state().ui.last_nav = id.to_string();
        self.schedule_persist();
        true
    }

    /// Section to return to at startup, only for learners with prior data.
    #[must_use]
    pub fn restore_target(&self) -> Option<String> {
        let state = self.inner.lock_state();
        let last_nav = state.ui.last_nav.as_str();
        (state.has_any_data() && is_known_section(self.modules(), last_nav))
            .then(|| last_nav.to_string())
    }

    /// Write any debounced change now instead of waiting for the window.
    ///
    /// # Errors
    ///
    /// Returns `StateStoreError` if the write fails.
    pub async fn flush(&self) -> Result<(), StateStoreError> {
        if self.debounce.cancel() {
            self.inner.persist_now().await
        } else {
            Ok(())
        }
    }

    /// Forget everything: clear the persisted entry and start fresh.
    ///
    /// # Errors
    ///
    /// Returns `StateStoreError` if the entry cannot be removed; state is unchanged then.
    pub async fn reset(&self) -> Result<(), StateStoreError> {
        self.debounce.cancel();
        {
            let _writing = self.inner.write_lock.lock().await;
            let fresh = self.inner.store.reset().await?;
            *self.inner.lock_state() = fresh;
        }
        self.inner.publish(None);
        Ok(())
    }

    /// Replace the document with an imported one, backfilled from defaults.
    ///
    /// Nothing changes unless the payload is a JSON object and the write succeeds.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` for invalid payloads and storage failures.
    pub async fn import_json(&self, contents: &str) -> Result<(), ImportError> {
        let mut value: Value =
            serde_json::from_str(contents).map_err(companion_core::StateError::from)?;
        backfill_repo(&mut value);
        let mut imported = AppState::merge_over(self.inner.store.default_state(), value)?;

        {
            let _writing = self.inner.write_lock.lock().await;
            let entry = self.inner.store.stamp_entry(&mut imported)?;
            self.inner.store.write_entry(&entry).await?;
            self.debounce.cancel();
            *self.inner.lock_state() = imported;
        }
        self.inner.publish(None);
        tracing::info!("state imported");
        Ok(())
    }

    /// Read a UTF-8 file and import it.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Read` if the file cannot be read, otherwise as [`Self::import_json`].
    pub async fn import_file(&self, path: &Path) -> Result<(), ImportError> {
        let contents = tokio::fs::read_to_string(path).await?;
        self.import_json(&contents).await
    }

    #[must_use]
    pub fn export_text(&self) -> ExportFile {
        let state = self.snapshot();
        export::export_text(&state, self.modules(), self.inner.store.clock().now())
    }

    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn export_json(&self) -> Result<ExportFile, serde_json::Error> {
        let state = self.snapshot();
        export::export_json(&state, self.inner.store.clock().now())
    }

    fn schedule_persist(&self) {
        let inner = Arc::clone(&self.inner);
        self.debounce.call(move || async move {
            // Failures are already published to subscribers.
            let _ = inner.persist_now().await;
        });
    }
}
