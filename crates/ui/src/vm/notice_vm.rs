/// Feedback shown after an export, import or reset action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Exported(String),
    ExportFailed(String),
    Imported,
    ImportFailed(String),
    Reset,
    ResetFailed(String),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Exported(path) => format!("Export gespeichert: {path}"),
            Self::ExportFailed(err) => format!("Export fehlgeschlagen: {err}"),
            Self::Imported => "Import erfolgreich. Der Stand wurde übernommen.".to_string(),
            Self::ImportFailed(err) => format!("Import fehlgeschlagen: {err}"),
            Self::Reset => "Alle Daten wurden zurückgesetzt.".to_string(),
            Self::ResetFailed(err) => format!("Zurücksetzen fehlgeschlagen: {err}"),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::ExportFailed(_) | Self::ImportFailed(_) | Self::ResetFailed(_)
        )
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.is_error() {
            "notice notice--error"
        } else {
            "notice notice--ok"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_messages_match_copy() {
        assert_eq!(
            Notice::Imported.message(),
            "Import erfolgreich. Der Stand wurde übernommen."
        );
        let failed = Notice::ImportFailed("Ungültiges JSON: erwartet ein Objekt".into());
        assert_eq!(
            failed.message(),
            "Import fehlgeschlagen: Ungültiges JSON: erwartet ein Objekt"
        );
        assert!(failed.is_error());
        assert_eq!(failed.class(), "notice notice--error");
    }

    #[test]
    fn export_notice_names_path() {
        let notice = Notice::Exported("exports/wasisteinmensch_export_2023-11-14.txt".into());
        assert_eq!(
            notice.message(),
            "Export gespeichert: exports/wasisteinmensch_export_2023-11-14.txt"
        );
        assert!(!notice.is_error());
    }
}
