use thiserror::Error;

/// Errors raised while turning untrusted JSON into an `AppState`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StateError {
    #[error("Ungültiges JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Ungültiges JSON: erwartet ein Objekt")]
    NotAnObject,
}
