use companion_core::link::video_direct_link;
use dioxus::prelude::*;

use super::scripts::copy_text;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CopyState {
    Idle,
    Copied,
    Manual,
}

#[component]
pub fn VideoPanel() -> Element {
    let direct = use_hook(video_direct_link);
    let mut copy_state = use_signal(|| CopyState::Idle);

    let on_copy = {
        let direct = direct.clone();
        move |_| {
            let direct = direct.clone();
            spawn(async move {
                let next = if copy_text(&direct).await {
                    CopyState::Copied
                } else {
                    CopyState::Manual
                };
                copy_state.set(next);
            });
        }
    };

    rsx! {
        div { class: "video",
            video {
                class: "video__player",
                controls: true,
                preload: "metadata",
                src: "{direct}",
            }
            div { class: "video__actions",
                button { class: "btn", onclick: on_copy, "Direktlink kopieren" }
                match copy_state() {
                    CopyState::Idle => rsx! {},
                    CopyState::Copied => rsx! {
                        span { class: "muted", "Link kopiert." }
                    },
                    CopyState::Manual => rsx! {
                        label { class: "manual-copy",
                            "Kopieren nicht möglich. Link manuell kopieren: "
                            input { r#type: "text", readonly: true, value: "{direct}" }
                        }
                    },
                }
            }
        }
    }
}
