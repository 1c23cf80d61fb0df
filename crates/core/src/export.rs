use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::link::{DOCUMENTS, VIDEO_URL, to_direct_link};
use crate::model::{AppState, Module, REPO_NAME};
use crate::progress::compute_progress;
use crate::time::{export_date, format_iso};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain;charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownExportFormat(pub String);

impl fmt::Display for UnknownExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown export format: {} (expected txt or json)", self.0)
    }
}

impl std::error::Error for UnknownExportFormat {}

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(UnknownExportFormat(raw.to_string())),
        }
    }
}

/// A rendered export, ready to be written wherever the caller downloads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub contents: String,
}

/// `{repo}_export_{YYYY-MM-DD}.{ext}`
#[must_use]
pub fn export_filename(format: ExportFormat, now: DateTime<Utc>) -> String {
    format!(
        "{REPO_NAME}_export_{}.{}",
        export_date(now),
        format.extension()
    )
}

/// Human-readable report: header, module status, notes, answers, links.
#[must_use]
pub fn render_text_report(state: &AppState, modules: &[Module]) -> String {
    let progress = compute_progress(state, modules);
    let mut lines: Vec<String> = vec![
        "WAS IST EIN MENSCH? – EXPORT (TXT)".to_string(),
        format!("Repo: {REPO_NAME}"),
        format!("Erstellt: {}", format_iso(state.created_at)),
        format!("Aktualisiert: {}", format_iso(state.updated_at)),
        format!("Fortschritt: {}%", progress.pct),
        String::new(),
        "=== MODULE-STATUS ===".to_string(),
    ];
    for (idx, module) in modules.iter().enumerate() {
        let status = if state.is_done(module.id) {
            "ABGESCHLOSSEN"
        } else {
            "OFFEN"
        };
        lines.push(format!("{}) {} :: {status}", idx + 1, module.title));
    }

    lines.push(String::new());
    lines.push("=== NOTIZEN ===".to_string());
    for (key, text) in utf16_sorted(&state.notes) {
        lines.push(format!("-- {key} --"));
        lines.push(text.clone());
        lines.push(String::new());
    }

    lines.push("=== ANTWORTEN (Mini-Check) ===".to_string());
    for (key, text) in utf16_sorted(&state.answers) {
        lines.push(format!("{key}: {text}"));
    }

    lines.push(String::new());
    lines.push("=== LINKS ===".to_string());
    for (label, path) in DOCUMENTS {
        lines.push(format!("{label}: {path}"));
    }
    lines.push(format!("ARTE/Dropbox: {VIDEO_URL}"));
    lines.push(format!("Direktlink (dl=1): {}", to_direct_link(VIDEO_URL)));

    lines.join("\n")
}

// Keys are listed in UTF-16 code unit order, which differs from the map's
// byte order once astral characters meet U+E000..U+FFFF.
fn utf16_sorted(map: &BTreeMap<String, String>) -> Vec<(&String, &String)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));
    entries
}

#[must_use]
pub fn export_text(state: &AppState, modules: &[Module], now: DateTime<Utc>) -> ExportFile {
    ExportFile {
        filename: export_filename(ExportFormat::Text, now),
        content_type: ExportFormat::Text.content_type(),
        contents: render_text_report(state, modules),
    }
}

/// Pretty-printed echo of the whole document.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn export_json(state: &AppState, now: DateTime<Utc>) -> Result<ExportFile, serde_json::Error> {
    Ok(ExportFile {
        filename: export_filename(ExportFormat::Json, now),
        content_type: ExportFormat::Json.content_type(),
        contents: state.to_json_pretty()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MODULES;
    use crate::time::fixed_now;

    fn sample_state() -> AppState {
        let mut state = AppState::new(&MODULES, fixed_now());
        state.set_done("m1", true);
        state.set_done("m3", true);
        state.set_note("m2", "Lücke zwischen\nErwartung und Realität");
        state.set_note("m1", "Roboter wirken unheimlich");
        state.set_answer("m1_q1", "Mori");
        state.set_answer("m4_q1", "Spiegel");
        state
    }

    #[test]
    fn text_report_has_sections_in_order() {
        let report = render_text_report(&sample_state(), &MODULES);
        let arte = format!("ARTE/Dropbox: {VIDEO_URL}");
        let direct = format!("Direktlink (dl=1): {}", to_direct_link(VIDEO_URL));
        let expected = [
            "WAS IST EIN MENSCH? – EXPORT (TXT)",
            "Repo: wasisteinmensch",
            "Erstellt: 2023-11-14T22:13:20.000Z",
            "Aktualisiert: 2023-11-14T22:13:20.000Z",
            "Fortschritt: 40%",
            "",
            "=== MODULE-STATUS ===",
            "1) Uncanny Valley :: ABGESCHLOSSEN",
            "2) Akzeptanzlücke :: OFFEN",
            "3) Video ARTE (Dropbox) :: ABGESCHLOSSEN",
            "4) Essay: KI als Spiegel (Wampfler) :: OFFEN",
            "5) Synthese: Was ist ein Mensch? :: OFFEN",
            "",
            "=== NOTIZEN ===",
            "-- m1 --",
            "Roboter wirken unheimlich",
            "",
            "-- m2 --",
            "Lücke zwischen",
            "Erwartung und Realität",
            "",
            "=== ANTWORTEN (Mini-Check) ===",
            "m1_q1: Mori",
            "m4_q1: Spiegel",
            "",
            "=== LINKS ===",
            "PDF Uncanny Valley: assets/docs/uncanny_valley.pdf",
            "PDF KI als Spiegel (Wampfler): assets/docs/wampfler_ki_als_spiegel.pdf",
            arte.as_str(),
            direct.as_str(),
        ]
        .join("\n");
        assert_eq!(report, expected);
    }

    #[test]
    fn empty_state_keeps_section_headers() {
        let state = AppState::new(&MODULES, fixed_now());
        let report = render_text_report(&state, &MODULES);
        let sections = "=== NOTIZEN ===\n=== ANTWORTEN (Mini-Check) ===\n\n=== LINKS ===";
        assert!(report.contains(sections));
        assert!(report.contains("Fortschritt: 0%"));
    }

    #[test]
    fn note_and_answer_keys_follow_utf16_order() {
        let mut state = AppState::new(&MODULES, fixed_now());
        state.notes.insert("\u{FF01}".into(), "breit".into());
        state.notes.insert("\u{1F600}".into(), "smiley".into());
        state.answers.insert("\u{FF01}_q1".into(), "b".into());
        state.answers.insert("\u{1F600}_q1".into(), "a".into());
        let report = render_text_report(&state, &MODULES);

        let smiley = report.find("-- \u{1F600} --").unwrap();
        let wide = report.find("-- \u{FF01} --").unwrap();
        assert!(smiley < wide);
        let smiley = report.find("\u{1F600}_q1: a").unwrap();
        let wide = report.find("\u{FF01}_q1: b").unwrap();
        assert!(smiley < wide);
    }

    #[test]
    fn filenames_embed_repo_and_day() {
        let txt = export_text(&sample_state(), &MODULES, fixed_now());
        assert_eq!(txt.filename, "wasisteinmensch_export_2023-11-14.txt");
        assert_eq!(txt.content_type, "text/plain;charset=utf-8");

        let json = export_json(&sample_state(), fixed_now()).unwrap();
        assert_eq!(json.filename, "wasisteinmensch_export_2023-11-14.json");
        assert!(json.contents.starts_with("{\n  \"version\": 1,"));
    }

    #[test]
    fn format_parses_cli_spellings() {
        assert_eq!("TXT".parse::<ExportFormat>(), Ok(ExportFormat::Text));
        assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
