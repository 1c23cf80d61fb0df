use companion_core::compute_progress;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{last_saved_label, map_dashboard, map_progress};

use super::sidebar::ProgressBar;
use super::state::{navigate_to, use_snapshot};

#[component]
pub fn DashboardSection() -> Element {
    let ctx = use_context::<AppContext>();
    let companion = ctx.companion();
    let snapshot = use_snapshot();
    let current = snapshot.read().clone();
    let dashboard = map_dashboard(&current.state, companion.modules());
    let progress = map_progress(compute_progress(&current.state, companion.modules()));
    let saved = last_saved_label(current.state.updated_at);

    let nav = use_callback({
        let companion = companion.clone();
        move |section_id: String| navigate_to(&companion, &section_id)
    });

    rsx! {
        section { id: "dashboard", class: "section",
            header { class: "section__header",
                h2 { "Dashboard" }
                span { class: "pill pill--summary", "{dashboard.pill}" }
            }
            ProgressBar { pct: progress.pct, width: progress.width, label: progress.label }
            p { class: "muted", "{progress.counts} Module abgeschlossen" }
            ul { class: "status-list",
                for item in dashboard.items {
                    li { key: "{item.id}",
                        button {
                            class: "status-link",
                            "data-go": "{item.id}",
                            onclick: move |_| nav.call(item.id.to_string()),
                            "{item.text}"
                        }
                    }
                }
            }
            p { class: "saved-at", "{saved}" }
            if let Some(err) = current.save_error {
                p { class: "save-error", role: "alert", "{err}" }
            }
        }
    }
}
