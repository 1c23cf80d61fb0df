use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;

/// Quiet period before a debounced write fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Trailing-edge debounce: only the last call within the window runs.
///
/// Each call bumps a generation counter and schedules a task on the captured
/// runtime. When the task wakes it runs the action only if no newer call (or
/// cancel) happened in the meantime.
#[derive(Clone)]
pub struct Debouncer {
    window: Duration,
    runtime: Handle,
    generation: Arc<AtomicU64>,
    pending: Arc<AtomicBool>,
}

impl Debouncer {
    #[must_use]
    pub fn new(window: Duration, runtime: Handle) -> Self {
        Self {
            window,
            runtime,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Schedule `action`, superseding any call still waiting out its window.
    pub fn call<F, Fut>(&self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.pending.store(true, Ordering::SeqCst);

        let generation = Arc::clone(&self.generation);
        let pending = Arc::clone(&self.pending);
        let window = self.window;
        self.runtime.spawn(async move {
            tokio::time::sleep(window).await;
            if generation.load(Ordering::SeqCst) != ticket {
                return;
            }
            pending.store(false, Ordering::SeqCst);
            action().await;
        });
    }

    /// Drop the waiting call. Returns true if one was pending.
    pub fn cancel(&self) -> bool {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.pending.swap(false, Ordering::SeqCst)
    }
}
