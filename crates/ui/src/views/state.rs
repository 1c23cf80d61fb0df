use dioxus::prelude::*;
use services::{CompanionController, CompanionSnapshot};

use super::scripts::scroll_into_view;

/// Provide the reactive snapshot for everything below and keep it in step
/// with the controller's change notifications.
pub fn use_snapshot_provider(companion: &CompanionController) -> Signal<CompanionSnapshot> {
    let initial = CompanionSnapshot {
        state: companion.snapshot(),
        save_error: None,
    };
    let snapshot = use_context_provider(|| Signal::new(initial));

    let companion = companion.clone();
    use_future(move || {
        let mut changes = companion.subscribe();
        let mut snapshot = snapshot;
        async move {
            while changes.changed().await.is_ok() {
                let next = changes.borrow_and_update().clone();
                snapshot.set(next);
            }
        }
    });

    snapshot
}

#[must_use]
pub fn use_snapshot() -> Signal<CompanionSnapshot> {
    use_context::<Signal<CompanionSnapshot>>()
}

/// Pull edits that are still waiting on the debounce into the view.
pub fn refresh_snapshot(mut snapshot: Signal<CompanionSnapshot>, companion: &CompanionController) {
    let state = companion.snapshot();
    snapshot.with_mut(|current| current.state = state);
}

/// Record the section and scroll to it. Unknown sections are ignored.
pub fn navigate_to(companion: &CompanionController, section_id: &str) {
    if !companion.scroll_to_section(section_id) {
        return;
    }
    let section_id = section_id.to_string();
    spawn(async move {
        scroll_into_view(&section_id).await;
    });
}
