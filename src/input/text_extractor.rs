//! Text extraction from PDF and Word documents

use crate::error::{Result, ResumeScreenerError};
use crate::input::file_detector::FileType;
use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use zip::ZipArchive;

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Pick the extractor for a detected file type
pub fn extractor_for(file_type: FileType) -> Option<&'static dyn TextExtractor> {
    match file_type {
        FileType::Pdf => Some(&PdfExtractor),
        FileType::Word => Some(&WordExtractor),
        FileType::Unknown => None,
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Ok(String::new());
        }

        let document = match lopdf::Document::load_mem(bytes) {
            Ok(document) => document,
            Err(e) => {
                debug!("lopdf could not load PDF ({}), trying pdf-extract", e);
                return Self::extract_whole(bytes);
            }
        };

        let text = Self::extract_pages(&document);
        if !text.trim().is_empty() {
            return Ok(text);
        }

        // Some font encodings defeat per-page extraction; the whole-document extractor copes better
        match Self::extract_whole(bytes) {
            Ok(fallback) if !fallback.trim().is_empty() => Ok(fallback),
            _ => Ok(text),
        }
    }
}

impl PdfExtractor {
    /// pdf-extract can panic on malformed PDFs, so a panic becomes an extraction error
    fn extract_whole(bytes: &[u8]) -> Result<String> {
        match contain_panic("whole-document PDF extraction", || {
            pdf_extract::extract_text_from_mem(bytes)
        }) {
            Some(Ok(text)) => Ok(text),
            Some(Err(e)) => Err(ResumeScreenerError::PdfExtraction(format!(
                "Failed to extract text from PDF: {}",
                e
            ))),
            None => Err(ResumeScreenerError::PdfExtraction(
                "PDF parser panicked on malformed input".to_string(),
            )),
        }
    }

    /// Concatenate page texts in page order. A page that fails contributes nothing.
    fn extract_pages(document: &lopdf::Document) -> String {
        document
            .get_pages()
            .keys()
            .map(|&page_number| {
                match contain_panic("PDF page extraction", || document.extract_text(&[page_number])) {
                    Some(Ok(text)) => text,
                    Some(Err(e)) => {
                        debug!("No extractable text on page {}: {}", page_number, e);
                        String::new()
                    }
                    None => String::new(),
                }
            })
            .collect()
    }
}

/// Run a parser that may panic on hostile input. A panic is logged and yields `None`.
///
/// The process-wide panic hook still runs first, so the panic message also reaches stderr
/// unless the embedding application installs its own hook.
fn contain_panic<T>(what: &str, parse: impl FnOnce() -> T) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(parse)) {
        Ok(value) => Some(value),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!("{} panicked: {}", what, reason);
            None
        }
    }
}

pub struct WordExtractor;

impl TextExtractor for WordExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Ok(String::new());
        }

        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ResumeScreenerError::WordExtraction(format!("Not a valid .docx container: {}", e))
        })?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| ResumeScreenerError::WordExtraction(format!("Missing word/document.xml: {}", e)))?
            .read_to_string(&mut xml)?;

        Ok(Self::paragraphs(&xml)?.join("\n"))
    }
}

impl WordExtractor {
    /// Collect the text of every body-level `w:p` in document order. Paragraphs nested in
    /// tables, content controls or text boxes are not part of the body text.
    fn paragraphs(xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        // w:t runs carry significant spaces (xml:space="preserve")
        reader.trim_text(false);

        let mut buf = Vec::new();
        let mut path: Vec<Vec<u8>> = Vec::new();
        let mut paragraphs = Vec::new();
        let mut current = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = e.name().as_ref().to_vec();
                    if name == b"w:p" && is_body(&path) {
                        current.clear();
                    }
                    path.push(name);
                }
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"w:p" if is_body(&path) => paragraphs.push(String::new()),
                    b"w:tab" if in_body_run(&path) => current.push('\t'),
                    b"w:br" | b"w:cr" if in_body_run(&path) => current.push('\n'),
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if let Some((last, parent)) = path.split_last() {
                        if last == b"w:t" && in_body_run(parent) {
                            let text = e.unescape().map_err(|e| {
                                ResumeScreenerError::WordExtraction(format!("Bad text in document.xml: {}", e))
                            })?;
                            current.push_str(&text);
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    if let Some(name) = path.pop() {
                        if name == b"w:p" && is_body(&path) {
                            paragraphs.push(std::mem::take(&mut current));
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ResumeScreenerError::WordExtraction(format!(
                        "Error parsing document.xml: {}",
                        e
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(paragraphs)
    }
}

/// The innermost open element is `w:body`
fn is_body(path: &[Vec<u8>]) -> bool {
    path.last().is_some_and(|name| name == b"w:body")
}

/// Inside a run of a body-level paragraph, directly or through a hyperlink
fn in_body_run(path: &[Vec<u8>]) -> bool {
    match path {
        [.., body, p, r] if body == b"w:body" && p == b"w:p" && r == b"w:r" => true,
        [.., body, p, link, r]
            if body == b"w:body" && p == b"w:p" && link == b"w:hyperlink" && r == b"w:r" =>
        {
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>Skills:</w:t><w:tab/><w:t>Rust &amp; Go</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    const WITH_TABLE: &str = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Header Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:hyperlink><w:r><w:t>jane@example.com</w:t></w:r></w:hyperlink><w:r><w:br/><w:t>Pune</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_table_paragraphs_are_not_body_text() {
        let paragraphs = WordExtractor::paragraphs(WITH_TABLE).unwrap();
        assert_eq!(paragraphs, vec!["Jane Doe", "jane@example.com\nPune"]);
    }

    #[test]
    fn test_paragraphs_in_document_order() {
        let paragraphs = WordExtractor::paragraphs(BODY).unwrap();
        assert_eq!(paragraphs, vec!["Jane Doe", "", "Skills:\tRust & Go"]);
    }

    #[test]
    fn test_empty_input_is_empty_text() {
        assert_eq!(PdfExtractor.extract(&[]).unwrap(), "");
        assert_eq!(WordExtractor.extract(&[]).unwrap(), "");
    }

    #[test]
    fn test_corrupt_input_fails() {
        let garbage = b"definitely not a document";
        assert!(matches!(
            WordExtractor.extract(garbage),
            Err(ResumeScreenerError::WordExtraction(_))
        ));
        assert!(matches!(
            PdfExtractor.extract(garbage),
            Err(ResumeScreenerError::PdfExtraction(_))
        ));
    }

    #[test]
    fn test_parser_panic_is_contained() {
        let contained: Option<u32> = contain_panic("test parser", || panic!("bad xref table"));
        assert_eq!(contained, None);
        assert_eq!(contain_panic("test parser", || 7), Some(7));
    }

    #[test]
    fn test_no_extractor_for_unknown_type() {
        assert!(extractor_for(FileType::Unknown).is_none());
        assert!(extractor_for(FileType::Pdf).is_some());
    }
}
