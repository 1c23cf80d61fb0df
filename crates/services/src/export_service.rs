use std::path::{Path, PathBuf};

use companion_core::export::ExportFile;

use crate::error::ExportError;

/// Writes export files into a target directory.
#[derive(Clone, Debug)]
pub struct ExportService {
    dir: PathBuf,
}

impl ExportService {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `file` under its own filename, replacing an earlier export of the same day.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the directory or file cannot be written.
    pub async fn write(&self, file: &ExportFile) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(&file.filename);
        tokio::fs::write(&path, file.contents.as_bytes()).await?;
        tracing::info!(
            path = %path.display(),
            content_type = file.content_type,
            bytes = file.contents.len(),
            "export written"
        );
        Ok(path)
    }
}
