/// Repository identifier stamped into every state document and export.
pub const REPO_NAME: &str = "wasisteinmensch";

/// Schema tag of the persisted document.
pub const SCHEMA_VERSION: u32 = 1;

/// Section the view starts on, and the one `ui.lastNav` defaults to.
pub const DEFAULT_SECTION: &str = "dashboard";

/// Section holding export, import and reset controls.
pub const EXPORT_SECTION: &str = "export";

/// One unit of the curriculum. Only the id is ever persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Module {
    pub id: &'static str,
    pub title: &'static str,
}

impl Module {
    #[must_use]
    pub const fn new(id: &'static str, title: &'static str) -> Self {
        Self { id, title }
    }
}

pub const MODULES: [Module; 5] = [
    Module::new("m1", "Uncanny Valley"),
    Module::new("m2", "Akzeptanzlücke"),
    Module::new("m3", "Video ARTE (Dropbox)"),
    Module::new("m4", "Essay: KI als Spiegel (Wampfler)"),
    Module::new("m5", "Synthese: Was ist ein Mensch?"),
];

/// Key of the single persisted entry (`{repo}::state::v1`).
#[must_use]
pub fn storage_key() -> String {
    format!("{REPO_NAME}::state::v{SCHEMA_VERSION}")
}

/// Navigation targets in page order: dashboard, each module, export.
#[must_use]
pub fn section_ids(modules: &[Module]) -> Vec<&'static str> {
    let mut ids = Vec::with_capacity(modules.len() + 2);
    ids.push(DEFAULT_SECTION);
    ids.extend(modules.iter().map(|module| module.id));
    ids.push(EXPORT_SECTION);
    ids
}

#[must_use]
pub fn is_known_section(modules: &[Module], id: &str) -> bool {
    section_ids(modules).contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_matches_repo() {
        assert_eq!(storage_key(), "wasisteinmensch::state::v1");
    }

    #[test]
    fn sections_wrap_modules() {
        let ids = section_ids(&MODULES);
        assert_eq!(ids.first(), Some(&"dashboard"));
        assert_eq!(ids.last(), Some(&"export"));
        assert_eq!(ids.len(), MODULES.len() + 2);
        assert!(is_known_section(&MODULES, "m3"));
        assert!(!is_known_section(&MODULES, "m9"));
    }
}
