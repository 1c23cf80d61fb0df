#![forbid(unsafe_code)]

pub mod app_services;
pub mod companion;
pub mod debounce;
pub mod error;
pub mod export_service;
pub mod state_store;

pub use companion_core::Clock;

pub use app_services::AppServices;
pub use companion::{CompanionController, CompanionSnapshot, RESTORE_DELAY};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use error::{AppServicesError, ExportError, ImportError, StateStoreError};
pub use export_service::ExportService;
pub use state_store::StateStore;
