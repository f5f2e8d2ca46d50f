//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Word,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Word,
            _ => FileType::Unknown,
        }
    }

    /// Routes on the filename's extension; no extension means `Unknown`
    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    pub fn supported_extensions() -> &'static [&'static str] {
        &["pdf", "docx"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_by_extension() {
        assert_eq!(FileType::from_filename("jane.pdf"), FileType::Pdf);
        assert_eq!(FileType::from_filename("Jane_CV.DOCX"), FileType::Word);
        assert_eq!(FileType::from_filename("notes.doc"), FileType::Unknown);
        assert_eq!(FileType::from_filename("README"), FileType::Unknown);
    }
}
