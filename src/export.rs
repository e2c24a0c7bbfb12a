//! Document export collaborator.
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use render::RenderedDocument;
use thiserror::Error;

/// What an exporter receives: where the markup came from, what to call it,
/// and the markup itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub container_id: String,
    pub filename: String,
    pub markup: String,
}

impl From<RenderedDocument> for ExportRequest {
    fn from(doc: RenderedDocument) -> Self {
        Self {
            container_id: doc.container_id,
            filename: doc.filename,
            markup: doc.html,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("refusing to export to `{0}`: file names may not contain path separators")]
    InvalidFilename(String),
    #[error("no exporter configured")]
    NotConfigured,
}

/// Turns rendered markup into a downloadable artifact.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Exports the document and returns where it ended up.
    async fn export(&self, request: ExportRequest) -> Result<String, ExportError>;
}

/// Writes `<dir>/<filename>.html`.
#[derive(Debug, Clone)]
pub struct HtmlDirectoryExporter {
    dir: PathBuf,
}

impl HtmlDirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target(&self, filename: &str) -> Result<PathBuf, ExportError> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename == "."
            || filename == ".."
        {
            return Err(ExportError::InvalidFilename(filename.to_string()));
        }
        Ok(self.dir.join(format!("{filename}.html")))
    }
}

#[async_trait]
impl DocumentExporter for HtmlDirectoryExporter {
    async fn export(&self, request: ExportRequest) -> Result<String, ExportError> {
        let path = self.target(&request.filename)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, request.markup.as_bytes()).await?;
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(filename: &str) -> ExportRequest {
        ExportRequest {
            container_id: "discovery-pdf-template-blank".into(),
            filename: filename.into(),
            markup: "<html></html>".into(),
        }
    }

    #[tokio::test]
    async fn writes_markup_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = HtmlDirectoryExporter::new(dir.path().join("nested"));

        let location = exporter
            .export(request("Discovery_Blank_2026-01-10.pdf"))
            .await
            .unwrap();

        let written = std::fs::read_to_string(&location).unwrap();
        assert_eq!(written, "<html></html>");
        assert!(location.ends_with("Discovery_Blank_2026-01-10.pdf.html"));
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = HtmlDirectoryExporter::new(dir.path());

        let err = exporter.export(request("../escape.pdf")).await.unwrap_err();
        assert!(matches!(err, ExportError::InvalidFilename(_)));
    }
}
