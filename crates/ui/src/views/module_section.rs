use companion_core::link::DOCUMENTS;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::ModuleSectionVm;

use super::state::{refresh_snapshot, use_snapshot};
use super::video::VideoPanel;

fn document_for(module_id: &str) -> Option<(&'static str, &'static str)> {
    match module_id {
        "m1" => Some(DOCUMENTS[0]),
        "m4" => Some(DOCUMENTS[1]),
        _ => None,
    }
}

#[component]
pub fn ModuleSection(vm: ModuleSectionVm) -> Element {
    let ctx = use_context::<AppContext>();
    let companion = ctx.companion();
    let snapshot = use_snapshot();
    let module_id = vm.id;

    let on_toggle = use_callback({
        let companion = companion.clone();
        move |checked: bool| {
            let companion = companion.clone();
            spawn(async move {
                // Failures reach the view through the change notification.
                let _ = companion.on_toggle_done(module_id, checked).await;
            });
        }
    });

    let on_note = use_callback({
        let companion = companion.clone();
        move |text: String| {
            companion.on_note_changed(module_id, &text);
            refresh_snapshot(snapshot, &companion);
        }
    });

    let on_answer = use_callback({
        let companion = companion.clone();
        move |(key, text): (&'static str, String)| {
            companion.on_answer_changed(key, &text);
            refresh_snapshot(snapshot, &companion);
        }
    });

    let checkbox_id = format!("done-{module_id}");
    let notes_id = format!("notes-{module_id}");

    rsx! {
        section { id: "{module_id}", class: "section module",
            header { class: "section__header",
                h2 { "{vm.number}) {vm.title}" }
                span { class: "{vm.pill.class}", "data-pill-for": "{module_id}", "{vm.pill.label}" }
            }
            p { class: "module__intro", "{vm.intro}" }

            if let Some((label, path)) = document_for(module_id) {
                p { class: "module__doc",
                    a { href: "{path}", target: "_blank", rel: "noopener", "{label}" }
                }
            }
            if module_id == "m3" {
                VideoPanel {}
            }

            div { class: "field",
                label { r#for: "{notes_id}", "Notizen" }
                textarea {
                    id: "{notes_id}",
                    "data-notes": "{module_id}",
                    rows: "5",
                    value: "{vm.note}",
                    oninput: move |evt| on_note.call(evt.value()),
                }
            }

            if !vm.answers.is_empty() {
                div { class: "mini-check",
                    h3 { "Mini-Check" }
                    for (question, answer) in vm.answers.clone() {
                        div { key: "{question.key}", class: "field",
                            label { r#for: "answer-{question.key}", "{question.prompt}" }
                            input {
                                id: "answer-{question.key}",
                                r#type: "text",
                                "data-answer": "{question.key}",
                                value: "{answer}",
                                oninput: move |evt| on_answer.call((question.key, evt.value())),
                            }
                        }
                    }
                }
            }

            label { class: "done-toggle", r#for: "{checkbox_id}",
                input {
                    id: "{checkbox_id}",
                    r#type: "checkbox",
                    "data-done": "{module_id}",
                    checked: vm.done,
                    onchange: move |evt| on_toggle.call(evt.checked()),
                }
                " Modul abgeschlossen"
            }
        }
    }
}
