use companion_core::model::{AppState, Module};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulePillVm {
    pub label: &'static str,
    pub class: &'static str,
}

#[must_use]
pub fn module_pill(done: bool) -> ModulePillVm {
    if done {
        ModulePillVm {
            label: "abgeschlossen",
            class: "pill pill--done",
        }
    } else {
        ModulePillVm {
            label: "offen",
            class: "pill pill--open",
        }
    }
}

/// One mini-check prompt under a module; its answer is stored under `key`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
}

/// Static copy shown inside a module section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModuleCopy {
    pub id: &'static str,
    pub intro: &'static str,
    pub questions: &'static [Question],
}

pub const MODULE_COPY: [ModuleCopy; 5] = [
    ModuleCopy {
        id: "m1",
        intro: "Warum wirken fast menschliche Roboter und Figuren oft unheimlicher als deutlich künstliche?",
        questions: &[
            Question {
                key: "m1_q1",
                prompt: "Was beschreibt die Kurve des Uncanny Valley?",
            },
            Question {
                key: "m1_q2",
                prompt: "Nenne ein Beispiel, das bei dir Unbehagen auslöst.",
            },
        ],
    },
    ModuleCopy {
        id: "m2",
        intro: "Technik kann vieles, trotzdem wird sie nicht überall akzeptiert. Woran liegt die Lücke?",
        questions: &[
            Question {
                key: "m2_q1",
                prompt: "Welche Faktoren entscheiden über Akzeptanz?",
            },
            Question {
                key: "m2_q2",
                prompt: "Wo würdest du einer Maschine nicht vertrauen?",
            },
        ],
    },
    ModuleCopy {
        id: "m3",
        intro: "Schau dir den ARTE-Beitrag an und halte fest, was dir auffällt.",
        questions: &[Question {
            key: "m3_q1",
            prompt: "Welche Erklärung im Video überzeugt dich am meisten?",
        }],
    },
    ModuleCopy {
        id: "m4",
        intro: "Philippe Wampfler beschreibt KI als Spiegel: Was zeigt sie uns über uns selbst?",
        questions: &[
            Question {
                key: "m4_q1",
                prompt: "Was spiegelt KI nach Wampfler wider?",
            },
            Question {
                key: "m4_q2",
                prompt: "Stimmst du der These zu? Warum?",
            },
        ],
    },
    ModuleCopy {
        id: "m5",
        intro: "Führe die Module zusammen und formuliere deine eigene Antwort.",
        questions: &[Question {
            key: "m5_q1",
            prompt: "Was ist für dich ein Mensch, in einem Satz?",
        }],
    },
];

#[must_use]
pub fn module_copy(id: &str) -> Option<&'static ModuleCopy> {
    MODULE_COPY.iter().find(|copy| copy.id == id)
}

/// Per-module data bound into a section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleSectionVm {
    pub id: &'static str,
    pub number: usize,
    pub title: &'static str,
    pub done: bool,
    pub pill: ModulePillVm,
    pub note: String,
    pub intro: &'static str,
    pub answers: Vec<(Question, String)>,
}

#[must_use]
pub fn map_module_sections(state: &AppState, modules: &[Module]) -> Vec<ModuleSectionVm> {
    modules
        .iter()
        .enumerate()
        .map(|(idx, module)| {
            let done = state.is_done(module.id);
            let copy = module_copy(module.id);
            ModuleSectionVm {
                id: module.id,
                number: idx + 1,
                title: module.title,
                done,
                pill: module_pill(done),
                note: state.note(module.id).to_string(),
                intro: copy.map_or("", |copy| copy.intro),
                answers: copy
                    .map(|copy| copy.questions)
                    .unwrap_or_default()
                    .iter()
                    .map(|question| (*question, state.answer(question.key).to_string()))
                    .collect(),
            }
        })
        .collect()
}
