//! Batch orchestration: one result record per uploaded resume

use crate::output::report::{ResultRecord, ResultSet};
use crate::processing::contact::ContactExtractor;
use crate::processing::document::{Document, Upload};
use crate::processing::experience::ExperienceChecker;
use crate::processing::name::NameResolver;
use crate::processing::skills::{SkillAliases, SkillCriteria, SkillMatcher};
use log::{debug, info, warn};

/// What the recruiter is looking for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreeningCriteria {
    pub skills: SkillCriteria,
    pub experience_years: u32,
}

impl ScreeningCriteria {
    pub fn new(skills: SkillCriteria, experience_years: u32) -> Self {
        Self {
            skills,
            experience_years,
        }
    }
}

/// Runs every extractor over each document. Holds no per-batch state.
pub struct Screener {
    contacts: ContactExtractor,
    names: NameResolver,
    skills: SkillMatcher,
    experience: ExperienceChecker,
}

impl Default for Screener {
    fn default() -> Self {
        Self::new(SkillAliases::default())
    }
}

impl Screener {
    pub fn new(aliases: SkillAliases) -> Self {
        Self {
            contacts: ContactExtractor::new(),
            names: NameResolver::new(),
            skills: SkillMatcher::new(aliases),
            experience: ExperienceChecker::new(),
        }
    }

    /// Build the record for one document. Extraction failures produce a partial
    /// record instead of an error.
    pub fn screen_document(&self, document: &Document, criteria: &ScreeningCriteria) -> ResultRecord {
        let name_from_file = self.names.from_filename(&document.filename);

        let text = match document.extract_text() {
            Ok(text) => text,
            Err(e) => {
                warn!("Skipping text analysis for {}: {}", document.filename, e);
                return ResultRecord::failed(&document.filename, name_from_file, e.to_string());
            }
        };

        self.screen_text(&document.filename, name_from_file, &text, criteria)
    }

    fn screen_text(
        &self,
        filename: &str,
        name_from_file: String,
        text: &str,
        criteria: &ScreeningCriteria,
    ) -> ResultRecord {
        let contact = self.contacts.extract(text);
        let matched_skills = self.skills.match_skills(text, &criteria.skills);
        let meets_experience = self.experience.meets_requirement(text, criteria.experience_years);

        debug!(
            "{}: {} emails, {} phones, {} skills, experience {}",
            filename,
            contact.emails.len(),
            contact.phones.len(),
            matched_skills.len(),
            meets_experience
        );

        ResultRecord {
            filename: filename.to_string(),
            name_from_text: self.names.from_text(text),
            name_from_file,
            emails: contact.emails.join(", "),
            phones: contact.phones.join(", "),
            matched_skills: matched_skills.join(", "),
            meets_experience,
            extraction_error: None,
        }
    }

    pub fn screen_upload(&self, upload: &Upload, criteria: &ScreeningCriteria) -> ResultRecord {
        match upload {
            Upload::Loaded(document) => self.screen_document(document, criteria),
            Upload::Unreadable { filename, error } => {
                ResultRecord::failed(filename, self.names.from_filename(filename), error.to_string())
            }
        }
    }

    /// Screen a whole batch in upload order; `on_record` fires after each document
    pub fn screen_batch_with<F>(&self, uploads: Vec<Upload>, criteria: &ScreeningCriteria, mut on_record: F) -> ResultSet
    where
        F: FnMut(&ResultRecord),
    {
        info!("Screening {} documents", uploads.len());

        let records = uploads
            .into_iter()
            .map(|upload| {
                let record = self.screen_upload(&upload, criteria);
                on_record(&record);
                record
            })
            .collect();

        ResultSet::new(records)
    }

    pub fn screen_batch(&self, uploads: Vec<Upload>, criteria: &ScreeningCriteria) -> ResultSet {
        self.screen_batch_with(uploads, criteria, |_| {})
    }
}

/// Holds the result set of the most recent batch. Each batch replaces it wholesale.
pub struct ScreeningSession {
    screener: Screener,
    results: ResultSet,
}

impl ScreeningSession {
    pub fn new(screener: Screener) -> Self {
        Self {
            screener,
            results: ResultSet::default(),
        }
    }

    pub fn process_batch(&mut self, uploads: Vec<Upload>, criteria: &ScreeningCriteria) -> &ResultSet {
        self.results = self.screener.screen_batch(uploads, criteria);
        &self.results
    }

    pub fn process_batch_with<F>(&mut self, uploads: Vec<Upload>, criteria: &ScreeningCriteria, on_record: F) -> &ResultSet
    where
        F: FnMut(&ResultRecord),
    {
        self.results = self.screener.screen_batch_with(uploads, criteria, on_record);
        &self.results
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }
}
