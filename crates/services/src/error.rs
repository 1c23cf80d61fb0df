//! Shared error types for the services crate.

use thiserror::Error;

use companion_core::StateError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `StateStore` and the controller's persist path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StateStoreError {
    #[error("Speichern fehlgeschlagen: {0}")]
    Storage(#[from] StorageError),
    #[error("Zustand konnte nicht serialisiert werden: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors emitted while importing a JSON export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("Datei konnte nicht gelesen werden: {0}")]
    Read(#[from] std::io::Error),
    #[error(transparent)]
    Invalid(#[from] StateError),
    #[error(transparent)]
    Store(#[from] StateStoreError),
}

/// Errors emitted by `ExportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("Export konnte nicht geschrieben werden: {0}")]
    Io(#[from] std::io::Error),
    #[error("Export konnte nicht serialisiert werden: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
