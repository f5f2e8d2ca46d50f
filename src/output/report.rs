//! Screening results: one record per uploaded resume

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// What was extracted from one resume. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub filename: String,
    pub name_from_text: String,
    pub name_from_file: String,
    /// Emails joined with ", "
    pub emails: String,
    /// Phone numbers joined with ", "
    pub phones: String,
    /// Matched skills joined with ", "
    pub matched_skills: String,
    pub meets_experience: bool,
    /// Why the text could not be read; the text-derived fields are then empty
    pub extraction_error: Option<String>,
}

/// Row layout of the exported table
#[derive(Debug, Serialize)]
pub struct TableRow<'a> {
    #[serde(rename = "Name from Text")]
    pub name_from_text: &'a str,
    #[serde(rename = "Name from File")]
    pub name_from_file: &'a str,
    #[serde(rename = "Emails")]
    pub emails: &'a str,
    #[serde(rename = "Phone Numbers")]
    pub phones: &'a str,
    #[serde(rename = "Matched Skills")]
    pub matched_skills: &'a str,
    #[serde(rename = "Meets Experience Requirement")]
    pub meets_experience: &'static str,
}

pub const TABLE_HEADERS: [&str; 6] = [
    "Name from Text",
    "Name from File",
    "Emails",
    "Phone Numbers",
    "Matched Skills",
    "Meets Experience Requirement",
];

impl ResultRecord {
    /// A row for a document whose text could not be extracted
    pub fn failed(filename: &str, name_from_file: String, error: String) -> Self {
        Self {
            filename: filename.to_string(),
            name_from_text: String::new(),
            name_from_file,
            emails: String::new(),
            phones: String::new(),
            matched_skills: String::new(),
            meets_experience: false,
            extraction_error: Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.extraction_error.is_some()
    }

    pub fn experience_label(&self) -> &'static str {
        if self.meets_experience {
            "Yes"
        } else {
            "No"
        }
    }

    pub fn table_row(&self) -> TableRow<'_> {
        TableRow {
            name_from_text: &self.name_from_text,
            name_from_file: &self.name_from_file,
            emails: &self.emails,
            phones: &self.phones,
            matched_skills: &self.matched_skills,
            meets_experience: self.experience_label(),
        }
    }
}

/// Records of the latest batch, in upload order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    records: Vec<ResultRecord>,
}

impl ResultSet {
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.iter().filter(|record| record.is_failed())
    }

    pub fn summary(&self) -> ScreeningSummary {
        ScreeningSummary {
            total: self.records.len(),
            meeting_experience: self.records.iter().filter(|r| r.meets_experience).count(),
            with_matched_skills: self.records.iter().filter(|r| !r.matched_skills.is_empty()).count(),
            failed: self.failures().count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub total: usize,
    pub meeting_experience: usize,
    pub with_matched_skills: usize,
    pub failed: usize,
}

/// Everything a formatter needs about one batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub results: ResultSet,
    pub criteria: CriteriaSummary,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriteriaSummary {
    pub skills: Vec<String>,
    pub experience_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: SystemTime,

    /// Version of the screener used
    pub screener_version: String,

    /// Total processing time
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(processing_time_ms: u64) -> Self {
        Self {
            generated_at: SystemTime::now(),
            screener_version: env!("CARGO_PKG_VERSION").to_string(),
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(meets: bool, skills: &str) -> ResultRecord {
        ResultRecord {
            filename: "a.pdf".to_string(),
            name_from_text: "Jane Doe".to_string(),
            name_from_file: "a".to_string(),
            emails: String::new(),
            phones: String::new(),
            matched_skills: skills.to_string(),
            meets_experience: meets,
            extraction_error: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let results = ResultSet::new(vec![
            record(true, "rust"),
            record(false, ""),
            ResultRecord::failed("b.docx", "b".to_string(), "corrupt".to_string()),
        ]);

        let summary = results.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.meeting_experience, 1);
        assert_eq!(summary.with_matched_skills, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_table_row_labels() {
        assert_eq!(record(true, "").table_row().meets_experience, "Yes");
        assert_eq!(record(false, "").table_row().meets_experience, "No");
    }
}
