#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod link;
pub mod model;
pub mod progress;
pub mod time;

pub use error::StateError;
pub use progress::{Progress, compute_progress};
pub use time::Clock;
