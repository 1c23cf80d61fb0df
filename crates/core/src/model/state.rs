use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use super::catalog::{DEFAULT_SECTION, Module, REPO_NAME, SCHEMA_VERSION};
use crate::error::StateError;
use crate::time::{parse_iso, serialize_iso};

/// View memory persisted alongside progress.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiMemory {
    pub last_nav: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl UiMemory {
    #[must_use]
    pub fn new(last_nav: impl Into<String>) -> Self {
        Self {
            last_nav: last_nav.into(),
            extra: Map::new(),
        }
    }

    /// Keys written by other versions of the app, kept verbatim.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    fn merge_from(&mut self, fields: Map<String, Value>) {
        for (key, value) in fields {
            if key == "lastNav" {
                if let Value::String(nav) = value {
                    self.last_nav = nav;
                }
            } else {
                self.extra.insert(key, value);
            }
        }
    }
}

/// The single persisted document: progress, notes, answers and view memory.
///
/// Serializes with the camelCase field names used on disk and in JSON
/// exports. Unknown top-level keys survive a load/save cycle.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub version: u32,
    pub repo: String,
    #[serde(serialize_with = "serialize_iso")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_iso")]
    pub updated_at: DateTime<Utc>,
    pub done: BTreeMap<String, bool>,
    pub notes: BTreeMap<String, String>,
    pub answers: BTreeMap<String, String>,
    pub ui: UiMemory,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl AppState {
    /// Fresh document: every module open, no notes or answers.
    #[must_use]
    pub fn new(modules: &[Module], now: DateTime<Utc>) -> Self {
        let done = modules
            .iter()
            .map(|module| (module.id.to_string(), false))
            .collect();
        Self {
            version: SCHEMA_VERSION,
            repo: REPO_NAME.to_string(),
            created_at: now,
            updated_at: now,
            done,
            notes: BTreeMap::new(),
            answers: BTreeMap::new(),
            ui: UiMemory::new(DEFAULT_SECTION),
            extra: Map::new(),
        }
    }

    /// Parse a persisted blob and merge it over `defaults`.
    ///
    /// # Errors
    ///
    /// Returns `StateError` if the text is not JSON or not a JSON object.
    pub fn from_json_str(raw: &str, defaults: Self) -> Result<Self, StateError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::merge_over(defaults, value)
    }

    /// Field-level merge of an untrusted JSON document over `defaults`.
    ///
    /// Scalars are replaced when the incoming value has a usable type, `done`
    /// and `ui` are filled per key, `notes` and `answers` come wholly from
    /// the incoming document.
    ///
    /// # Errors
    ///
    /// Returns `StateError::NotAnObject` for arrays and primitives.
    pub fn merge_over(defaults: Self, value: Value) -> Result<Self, StateError> {
        let Value::Object(mut fields) = value else {
            return Err(StateError::NotAnObject);
        };
        let mut merged = defaults;

        if let Some(version) = fields
            .remove("version")
            .and_then(|value| value.as_u64())
            .and_then(|value| u32::try_from(value).ok())
        {
            merged.version = version;
        }
        if let Some(Value::String(repo)) = fields.remove("repo") {
            merged.repo = repo;
        }
        if let Some(at) = take_timestamp(&mut fields, "createdAt") {
            merged.created_at = at;
        }
        if let Some(at) = take_timestamp(&mut fields, "updatedAt") {
            merged.updated_at = at;
        }
        if let Some(Value::Object(done)) = fields.remove("done") {
            for (id, flag) in done {
                merged.done.insert(id, truthy(&flag));
            }
        }
        merged.notes = text_map(fields.remove("notes"));
        merged.answers = text_map(fields.remove("answers"));
        if let Some(Value::Object(ui)) = fields.remove("ui") {
            merged.ui.merge_from(ui);
        }
        merged.extra.extend(fields);

        Ok(merged)
    }

    /// Top-level keys this version does not model.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    #[must_use]
    pub fn is_done(&self, id: &str) -> bool {
        self.done.get(id).copied().unwrap_or(false)
    }

    pub fn set_done(&mut self, id: impl Into<String>, value: bool) {
        self.done.insert(id.into(), value);
    }

    /// Note text for a key, empty when the key was never written.
    #[must_use]
    pub fn note(&self, key: &str) -> &str {
        self.notes.get(key).map_or("", String::as_str)
    }

    pub fn set_note(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.notes.insert(key.into(), text.into());
    }

    #[must_use]
    pub fn answer(&self, key: &str) -> &str {
        self.answers.get(key).map_or("", String::as_str)
    }

    pub fn set_answer(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.answers.insert(key.into(), text.into());
    }

    /// True once the learner has completed a module or written anything.
    #[must_use]
    pub fn has_any_data(&self) -> bool {
        self.done.values().any(|flag| *flag) || !self.notes.is_empty() || !self.answers.is_empty()
    }

    /// Compact JSON used for the persisted blob.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Two-space indented JSON used for exports.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Imported documents without a usable `repo` are claimed for this repo.
pub fn backfill_repo(value: &mut Value) {
    if let Value::Object(fields) = value {
        let missing = fields.get("repo").is_none_or(|repo| !truthy(repo));
        if missing {
            fields.insert("repo".to_string(), Value::String(REPO_NAME.to_string()));
        }
    }
}

fn take_timestamp(fields: &mut Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    match fields.remove(key) {
        Some(Value::String(raw)) => parse_iso(&raw),
        _ => None,
    }
}

fn text_map(value: Option<Value>) -> BTreeMap<String, String> {
    let Some(Value::Object(fields)) = value else {
        return BTreeMap::new();
    };
    fields
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(text) => text,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, text)
        })
        .collect()
}

// Loose truthiness: older exports were written by hand as often as by the app.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MODULES;
    use crate::time::fixed_now;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn defaults() -> AppState {
        AppState::new(&MODULES, fixed_now())
    }

    #[test]
    fn new_state_has_every_module_open() {
        let state = defaults();
        assert_eq!(state.done.len(), MODULES.len());
        assert!(state.done.values().all(|flag| !flag));
        assert!(state.notes.is_empty());
        assert!(state.answers.is_empty());
        assert_eq!(state.ui.last_nav, "dashboard");
        assert_eq!(state.repo, "wasisteinmensch");
        assert_eq!(state.version, 1);
        assert!(!state.has_any_data());
    }

    #[test]
    fn merge_fills_missing_module_ids() {
        let merged = AppState::merge_over(defaults(), json!({ "done": { "m2": true } })).unwrap();
        assert_eq!(merged.done.len(), MODULES.len());
        assert!(merged.is_done("m2"));
        assert!(!merged.is_done("m1"));
        assert_eq!(merged.done.get("m5"), Some(&false));
    }

    #[test]
    fn merge_keeps_unknown_note_and_answer_keys() {
        let merged = AppState::merge_over(
            defaults(),
            json!({
                "notes": { "legacy_block": "kept", "m1": "Notiz" },
                "answers": { "q_future": "ja" }
            }),
        )
        .unwrap();
        assert_eq!(merged.note("legacy_block"), "kept");
        assert_eq!(merged.note("m1"), "Notiz");
        assert_eq!(merged.answer("q_future"), "ja");
        assert_eq!(merged.note("absent"), "");
        assert!(!merged.notes.contains_key("absent"));
    }

    #[test]
    fn merge_rejects_arrays_and_primitives() {
        assert!(matches!(
            AppState::merge_over(defaults(), json!([1, 2])),
            Err(StateError::NotAnObject)
        ));
        assert!(matches!(
            AppState::from_json_str("42", defaults()),
            Err(StateError::NotAnObject)
        ));
        assert!(matches!(
            AppState::from_json_str("{not json", defaults()),
            Err(StateError::InvalidJson(_))
        ));
    }

    #[test]
    fn merge_takes_incoming_timestamps_and_ignores_bad_ones() {
        let later = fixed_now() + Duration::days(3);
        let merged = AppState::merge_over(
            defaults(),
            json!({
                "createdAt": "2023-11-17T22:13:20.000Z",
                "updatedAt": "not a date",
                "version": "two"
            }),
        )
        .unwrap();
        assert_eq!(merged.created_at, later);
        assert_eq!(merged.updated_at, fixed_now());
        assert_eq!(merged.version, 1);
    }

    #[test]
    fn merge_reads_offsetless_and_date_only_timestamps_as_local() {
        let merged = AppState::merge_over(
            defaults(),
            json!({ "createdAt": "2024-03-01", "updatedAt": "2024-03-01T10:00:00" }),
        )
        .unwrap();
        let local = |hour| {
            chrono::Local
                .with_ymd_and_hms(2024, 3, 1, hour, 0, 0)
                .earliest()
                .unwrap()
                .with_timezone(&Utc)
        };
        assert_eq!(merged.created_at, local(0));
        assert_eq!(merged.updated_at, local(10));
    }

    #[test]
    fn merge_keeps_sub_millisecond_timestamps() {
        let merged = AppState::merge_over(
            defaults(),
            json!({ "createdAt": "2024-03-01T10:00:00.123456Z" }),
        )
        .unwrap();
        let doc = serde_json::to_value(&merged).unwrap();
        assert_eq!(doc["createdAt"], "2024-03-01T10:00:00.123456Z");
    }

    #[test]
    fn merge_coerces_loose_done_values() {
        let merged = AppState::merge_over(
            defaults(),
            json!({ "done": { "m1": 1, "m2": "", "m3": "yes", "m4": null, "extra": true } }),
        )
        .unwrap();
        assert!(merged.is_done("m1"));
        assert!(!merged.is_done("m2"));
        assert!(merged.is_done("m3"));
        assert!(!merged.is_done("m4"));
        assert!(merged.is_done("extra"));
    }

    #[test]
    fn unknown_top_level_and_ui_keys_survive_serialization() {
        let merged = AppState::merge_over(
            defaults(),
            json!({
                "theme": "dark",
                "ui": { "lastNav": "m4", "collapsed": ["m1"] }
            }),
        )
        .unwrap();
        assert_eq!(merged.ui.last_nav, "m4");

        let value: Value = serde_json::from_str(&merged.to_json().unwrap()).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["ui"]["collapsed"], json!(["m1"]));
        assert_eq!(value["ui"]["lastNav"], "m4");
        assert_eq!(value["createdAt"], "2023-11-14T22:13:20.000Z");
        assert_eq!(value["done"]["m1"], false);
    }

    #[test]
    fn non_string_notes_are_flattened_to_text() {
        let merged = AppState::merge_over(
            defaults(),
            json!({ "notes": { "a": 3, "b": null, "c": true } }),
        )
        .unwrap();
        assert_eq!(merged.note("a"), "3");
        assert_eq!(merged.note("b"), "");
        assert_eq!(merged.note("c"), "true");
    }

    #[test]
    fn backfill_repo_only_fills_missing_or_empty() {
        let mut missing = json!({ "done": {} });
        backfill_repo(&mut missing);
        assert_eq!(missing["repo"], "wasisteinmensch");

        let mut empty = json!({ "repo": "" });
        backfill_repo(&mut empty);
        assert_eq!(empty["repo"], "wasisteinmensch");

        let mut foreign = json!({ "repo": "other" });
        backfill_repo(&mut foreign);
        assert_eq!(foreign["repo"], "other");
    }

    #[test]
    fn any_data_detects_notes_answers_and_done() {
        let mut state = defaults();
        state.set_answer("m1_q1", "x");
        assert!(state.has_any_data());

        let mut state = defaults();
        state.set_done("m5", true);
        assert!(state.has_any_data());
    }
}
