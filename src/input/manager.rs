//! Input manager for loading resume uploads from disk

use crate::error::{Result, ResumeScreenerError};
use crate::processing::document::{Document, Upload};
use log::{info, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read one file into a document; the type is routed on the extension later
    pub async fn load_document(&self, path: &Path) -> Result<Document> {
        if !path.exists() {
            return Err(ResumeScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        info!("Loaded {} ({} bytes)", path.display(), bytes.len());

        Ok(Document::new(Self::filename_of(path), bytes))
    }

    /// Load every path in order. Files that cannot be read stay in the batch as
    /// `Upload::Unreadable` so they still get a row.
    pub async fn load_batch(&self, paths: &[PathBuf]) -> Vec<Upload> {
        let mut uploads = Vec::with_capacity(paths.len());

        for path in paths {
            match self.load_document(path).await {
                Ok(document) => uploads.push(Upload::Loaded(document)),
                Err(error) => {
                    warn!("Could not read {}: {}", path.display(), error);
                    uploads.push(Upload::Unreadable {
                        filename: Self::filename_of(path),
                        error,
                    });
                }
            }
        }

        uploads
    }

    fn filename_of(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string())
    }
}
