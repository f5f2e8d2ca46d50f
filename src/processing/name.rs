//! Candidate name heuristics

use regex::Regex;
use std::path::Path;

/// Derives a candidate name from the document text and, independently, from the filename.
/// The two are never reconciled.
pub struct NameResolver {
    separator_regex: Regex,
    non_word_regex: Regex,
    keyword_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NameResolver {
    pub fn new() -> Self {
        Self {
            separator_regex: Regex::new(r"[_-]").expect("Invalid separator regex"),
            non_word_regex: Regex::new(r"\W+").expect("Invalid non-word regex"),
            keyword_regex: Regex::new(r"(?i)\b(?:resume|cv|curriculum vitae)\b")
                .expect("Invalid keyword regex"),
            whitespace_regex: Regex::new(r"\s+").expect("Invalid whitespace regex"),
        }
    }

    /// First two whitespace-delimited tokens of the text, assuming the name heads the resume
    pub fn from_text(&self, text: &str) -> String {
        text.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
    }

    pub fn from_filename(&self, filename: &str) -> String {
        let stem = Path::new(filename)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        let name = self.separator_regex.replace_all(&stem, " ");
        let name = self.non_word_regex.replace_all(&name, " ");
        let name = self.keyword_regex.replace_all(&name, "");
        let name = self.whitespace_regex.replace_all(&name, " ");

        name.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_text() {
        let resolver = NameResolver::new();
        assert_eq!(resolver.from_text("  Jane   Doe\nSoftware Engineer"), "Jane Doe");
        assert_eq!(resolver.from_text("Jane\n\nDoe"), "Jane Doe");
        assert_eq!(resolver.from_text("Madonna"), "Madonna");
        assert_eq!(resolver.from_text(""), "");
    }

    #[test]
    fn test_name_from_filename() {
        let resolver = NameResolver::new();
        assert_eq!(resolver.from_filename("john_doe_resume.pdf"), "john doe");
        assert_eq!(resolver.from_filename("Jane-Smith CV (2024).docx"), "Jane Smith 2024");
        assert_eq!(resolver.from_filename("Curriculum Vitae - Ravi Kumar.pdf"), "Ravi Kumar");
        assert_eq!(resolver.from_filename("RESUME.pdf"), "");
    }

    #[test]
    fn test_keywords_only_removed_as_whole_words() {
        let resolver = NameResolver::new();
        assert_eq!(resolver.from_filename("cvetkova_anna.pdf"), "cvetkova anna");
    }
}
