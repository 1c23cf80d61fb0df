use std::path::PathBuf;

use companion_core::export::ExportFormat;
use companion_core::model::DEFAULT_SECTION;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::Notice;

use super::state::navigate_to;

#[component]
pub fn ExportPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let companion = ctx.companion();
    let exports = ctx.exports();
    let mut notice = use_signal(|| None::<Notice>);
    let mut import_path = use_signal(String::new);
    let mut confirm_reset = use_signal(|| false);
    let export_dir = exports.dir().display().to_string();

    let export = use_callback({
        let companion = companion.clone();
        move |format: ExportFormat| {
            let companion = companion.clone();
            let exports = exports.clone();
            spawn(async move {
                let file = match format {
                    ExportFormat::Text => Ok(companion.export_text()),
                    ExportFormat::Json => companion.export_json(),
                };
                let next = match file {
                    Ok(file) => match exports.write(&file).await {
                        Ok(path) => Notice::Exported(path.display().to_string()),
                        Err(err) => Notice::ExportFailed(err.to_string()),
                    },
                    Err(err) => Notice::ExportFailed(err.to_string()),
                };
                notice.set(Some(next));
            });
        }
    });

    let import = use_callback({
        let companion = companion.clone();
        move |()| {
            let raw = import_path.read().trim().to_string();
            if raw.is_empty() {
                return;
            }
            let companion = companion.clone();
            spawn(async move {
                let next = match companion.import_file(&PathBuf::from(raw)).await {
                    Ok(()) => {
                        import_path.set(String::new());
                        Notice::Imported
                    }
                    Err(err) => Notice::ImportFailed(err.to_string()),
                };
                notice.set(Some(next));
            });
        }
    });

    let reset = use_callback({
        let companion = companion.clone();
        move |()| {
            confirm_reset.set(false);
            let companion = companion.clone();
            spawn(async move {
                let next = match companion.reset().await {
                    Ok(()) => {
                        navigate_to(&companion, DEFAULT_SECTION);
                        Notice::Reset
                    }
                    Err(err) => Notice::ResetFailed(err.to_string()),
                };
                notice.set(Some(next));
            });
        }
    });

    rsx! {
        section { id: "export", class: "section export",
            header { class: "section__header",
                h2 { "Export / Import" }
            }
            p { class: "muted", "Exporte landen im Ordner {export_dir}." }

            div { class: "export__actions",
                button { class: "btn", onclick: move |_| export.call(ExportFormat::Text), "Export als TXT" }
                button { class: "btn", onclick: move |_| export.call(ExportFormat::Json), "Export als JSON" }
            }

            div { class: "field import",
                label { r#for: "import-path", "JSON-Datei importieren" }
                input {
                    id: "import-path",
                    r#type: "text",
                    placeholder: "Pfad zur Exportdatei (.json)",
                    value: "{import_path}",
                    oninput: move |evt| import_path.set(evt.value()),
                }
                button {
                    class: "btn",
                    disabled: import_path.read().trim().is_empty(),
                    onclick: move |_| import.call(()),
                    "Importieren"
                }
            }

            button { class: "btn btn--danger", onclick: move |_| confirm_reset.set(true), "Alles zurücksetzen" }

            if let Some(current) = notice() {
                div { class: "{current.class()}", role: "status",
                    span { "{current.message()}" }
                    button { class: "btn btn--ghost", onclick: move |_| notice.set(None), "OK" }
                }
            }

            if confirm_reset() {
                div { class: "modal-backdrop",
                    div { class: "modal", role: "dialog", aria_modal: "true",
                        h3 { "Wirklich zurücksetzen?" }
                        p { "Fortschritt, Notizen und Antworten werden gelöscht." }
                        div { class: "modal__actions",
                            button { class: "btn", onclick: move |_| confirm_reset.set(false), "Abbrechen" }
                            button { class: "btn btn--danger", onclick: move |_| reset.call(()), "Ja, zurücksetzen" }
                        }
                    }
                }
            }
        }
    }
}
