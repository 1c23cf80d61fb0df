mod catalog;
mod state;

pub use catalog::{
    DEFAULT_SECTION, EXPORT_SECTION, MODULES, Module, REPO_NAME, SCHEMA_VERSION, is_known_section,
    section_ids, storage_key,
};
pub use state::{AppState, UiMemory, backfill_repo};
