use std::path::PathBuf;
use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::companion::CompanionController;
use crate::error::AppServicesError;
use crate::export_service::ExportService;
use crate::state_store::StateStore;

/// Assembles the controller and export service over a storage backend.
#[derive(Clone)]
pub struct AppServices {
    controller: CompanionController,
    exports: Arc<ExportService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        export_dir: impl Into<PathBuf>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, export_dir).await)
    }

    /// Build services over volatile in-memory storage.
    pub async fn in_memory(clock: Clock, export_dir: impl Into<PathBuf>) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, export_dir).await
    }

    pub async fn from_storage(
        storage: &Storage,
        clock: Clock,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        let store = StateStore::new(clock, Arc::clone(&storage.state));
        let controller = CompanionController::load(store).await;
        let exports = Arc::new(ExportService::new(export_dir));
        Self {
            controller,
            exports,
        }
    }

    #[must_use]
    pub fn controller(&self) -> CompanionController {
        self.controller.clone()
    }

    #[must_use]
    pub fn exports(&self) -> Arc<ExportService> {
        Arc::clone(&self.exports)
    }
}
