use std::sync::Arc;

use services::{CompanionController, ExportService};

pub trait UiApp: Send + Sync {
    fn companion(&self) -> CompanionController;
    fn exports(&self) -> Arc<ExportService>;
}

#[derive(Clone)]
pub struct AppContext {
    companion: CompanionController,
    exports: Arc<ExportService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            companion: app.companion(),
            exports: app.exports(),
        }
    }

    #[must_use]
    pub fn companion(&self) -> CompanionController {
        self.companion.clone()
    }

    #[must_use]
    pub fn exports(&self) -> Arc<ExportService> {
        Arc::clone(&self.exports)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
