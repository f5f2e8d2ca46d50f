//! Uploaded documents and their text extraction

use crate::error::{Result, ResumeScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extractor_for;
use log::debug;

/// A resume as uploaded: filename plus raw bytes
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub file_type: FileType,
    bytes: Vec<u8>,
}

/// One entry of a batch. Unreadable files keep their place so the result set
/// stays aligned with what was uploaded.
#[derive(Debug)]
pub enum Upload {
    Loaded(Document),
    Unreadable {
        filename: String,
        error: ResumeScreenerError,
    },
}

impl Document {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let file_type = FileType::from_filename(&filename);

        Self {
            filename,
            file_type,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Convert the document into plain text, routed on its file type
    pub fn extract_text(&self) -> Result<String> {
        let extractor = extractor_for(self.file_type).ok_or_else(|| {
            ResumeScreenerError::UnsupportedFormat(format!(
                "{} (supported: {})",
                self.filename,
                FileType::supported_extensions()
                    .iter()
                    .map(|ext| format!(".{}", ext))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;

        let text = extractor.extract(&self.bytes)?;
        debug!("Extracted {} characters from {}", text.chars().count(), self.filename);
        Ok(text)
    }
}

impl Upload {
    pub fn filename(&self) -> &str {
        match self {
            Upload::Loaded(document) => &document.filename,
            Upload::Unreadable { filename, .. } => filename,
        }
    }
}

impl From<Document> for Upload {
    fn from(document: Document) -> Self {
        Upload::Loaded(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new("Jane_Doe.PDF", vec![1, 2, 3]);
        assert_eq!(doc.file_type, FileType::Pdf);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_unsupported_extension_is_reported() {
        let doc = Document::new("jane.txt", b"Jane Doe".to_vec());
        let err = doc.extract_text().unwrap_err();
        assert!(matches!(err, ResumeScreenerError::UnsupportedFormat(_)));
        assert!(err.to_string().contains(".pdf, .docx"));
    }

    #[test]
    fn test_empty_word_document_has_empty_text() {
        let doc = Document::new("blank.docx", Vec::new());
        assert!(doc.is_empty());
        assert_eq!(doc.extract_text().unwrap(), "");
    }
}
