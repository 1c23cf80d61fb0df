use companion_core::compute_progress;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{map_dashboard, map_progress};

use super::state::{navigate_to, use_snapshot};

#[component]
pub fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let companion = ctx.companion();
    let snapshot = use_snapshot();
    let state = snapshot.read().state.clone();
    let modules = companion.modules();
    let dashboard = map_dashboard(&state, modules);
    let progress = map_progress(compute_progress(&state, modules));

    let nav = use_callback({
        let companion = companion.clone();
        move |section_id: String| navigate_to(&companion, &section_id)
    });

    rsx! {
        nav { class: "sidebar",
            h1 { "Was ist ein Mensch?" }
            ProgressBar { pct: progress.pct, width: progress.width, label: progress.label }
            ul {
                li {
                    button {
                        class: "nav-link",
                        "data-go": "dashboard",
                        onclick: move |_| nav.call("dashboard".to_string()),
                        "{dashboard.nav_label}"
                    }
                }
                for item in dashboard.items {
                    li { key: "{item.id}",
                        button {
                            class: if item.done { "nav-link nav-link--done" } else { "nav-link" },
                            "data-go": "{item.id}",
                            onclick: move |_| nav.call(item.id.to_string()),
                            "{item.text}"
                        }
                    }
                }
                li {
                    button {
                        class: "nav-link",
                        "data-go": "export",
                        onclick: move |_| nav.call("export".to_string()),
                        "Export / Import"
                    }
                }
            }
        }
    }
}

#[component]
pub fn ProgressBar(pct: u32, width: String, label: String) -> Element {
    rsx! {
        div { class: "progress",
            div {
                class: "progress__track",
                role: "progressbar",
                aria_valuemin: "0",
                aria_valuemax: "100",
                aria_valuenow: "{pct}",
                div { class: "progress__bar", style: "width: {width};" }
            }
            span { class: "progress__label", "{label}" }
        }
    }
}
