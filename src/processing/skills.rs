//! Skill matching with alias normalization

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Canonical skill name -> accepted surface variants, all lower-case.
///
/// This is plain data: adding a skill or a spelling never touches the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillAliases {
    table: BTreeMap<String, BTreeSet<String>>,
}

impl Default for SkillAliases {
    fn default() -> Self {
        let mut aliases = Self::empty();
        aliases.insert("generative ai", ["generative ai", "gen ai", "genai", "generativeai"]);
        aliases
    }
}

impl SkillAliases {
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// Add variants for a canonical skill, merging with any it already has.
    /// The canonical name is always one of its own variants. A variant moves here from
    /// any other entry that listed it, so the latest assignment wins.
    pub fn insert<I, S>(&mut self, canonical: &str, variants: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let canonical = normalize(canonical);
        let variants: BTreeSet<String> = variants
            .into_iter()
            .map(|variant| normalize(variant.as_ref()))
            .filter(|variant| !variant.is_empty())
            .collect();

        for (other, other_variants) in self.table.iter_mut() {
            if *other != canonical {
                other_variants.retain(|variant| variant == other || !variants.contains(variant));
            }
        }

        let entry = self.table.entry(canonical.clone()).or_default();
        entry.insert(canonical);
        entry.extend(variants);
    }

    /// The canonical entry a requested skill belongs to, if any.
    ///
    /// An exact canonical name wins. Otherwise the entry listing the skill as a variant is
    /// used; if a hand-edited table lists it under several, the alphabetically first wins.
    pub fn lookup(&self, skill: &str) -> Option<(&str, &BTreeSet<String>)> {
        let skill = normalize(skill);
        self.table
            .get_key_value(&skill)
            .or_else(|| self.table.iter().find(|(_, variants)| variants.contains(&skill)))
            .map(|(canonical, variants)| (canonical.as_str(), variants))
    }

    pub fn canonical_for(&self, skill: &str) -> Option<&str> {
        self.lookup(skill).map(|(canonical, _)| canonical)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.table.iter()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// The skills a recruiter asked for, in the order entered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillCriteria {
    skills: Vec<String>,
}

impl SkillCriteria {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            skills: skills
                .into_iter()
                .map(|skill| normalize(skill.as_ref()))
                .filter(|skill| !skill.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated list such as `"Rust, gen ai , SQL"`
    pub fn parse(input: &str) -> Self {
        Self::new(input.split(','))
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

pub struct SkillMatcher {
    aliases: SkillAliases,
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(SkillAliases::default())
    }
}

impl SkillMatcher {
    pub fn new(aliases: SkillAliases) -> Self {
        Self { aliases }
    }

    /// Requested skills present in `text`. Aliased skills report their canonical name;
    /// each skill appears at most once.
    pub fn match_skills(&self, text: &str, criteria: &SkillCriteria) -> Vec<String> {
        let text = text.to_lowercase();
        let mut matched: Vec<String> = Vec::new();

        for skill in criteria.skills() {
            let found = match self.aliases.lookup(skill) {
                Some((canonical, variants)) => variants
                    .iter()
                    .any(|variant| text.contains(variant.as_str()))
                    .then_some(canonical),
                None => text.contains(skill.as_str()).then_some(skill.as_str()),
            };

            if let Some(name) = found {
                if !matched.iter().any(|existing| existing == name) {
                    matched.push(name.to_string());
                }
            }
        }

        matched
    }

    pub fn aliases(&self) -> &SkillAliases {
        &self.aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_criteria() {
        let criteria = SkillCriteria::parse(" Rust, Machine Learning ,, SQL ");
        assert_eq!(criteria.skills(), &["rust", "machine learning", "sql"]);
        assert!(SkillCriteria::parse("").is_empty());
    }

    #[test]
    fn test_alias_reports_canonical_name() {
        let matcher = SkillMatcher::default();
        let criteria = SkillCriteria::new(["GenAI"]);
        let matched = matcher.match_skills("Experience with Generative AI", &criteria);
        assert_eq!(matched, vec!["generative ai"]);
    }

    #[test]
    fn test_alias_without_any_variant_in_text() {
        let matcher = SkillMatcher::default();
        let criteria = SkillCriteria::new(["gen ai"]);
        assert!(matcher.match_skills("Classic ML only", &criteria).is_empty());
    }

    #[test]
    fn test_plain_substring_match_in_request_order() {
        let matcher = SkillMatcher::default();
        let criteria = SkillCriteria::parse("sql, rust, go");
        let matched = matcher.match_skills("Rust services backed by PostgreSQL", &criteria);
        assert_eq!(matched, vec!["sql", "rust"]);
    }

    #[test]
    fn test_skill_reported_once() {
        let matcher = SkillMatcher::default();
        let criteria = SkillCriteria::parse("genai, gen ai, generative ai");
        let matched = matcher.match_skills("GenAI and more GenAI", &criteria);
        assert_eq!(matched, vec!["generative ai"]);
    }

    #[test]
    fn test_custom_alias_table() {
        let mut aliases = SkillAliases::empty();
        aliases.insert("Kubernetes", ["k8s", "kube"]);
        let matcher = SkillMatcher::new(aliases);

        let matched = matcher.match_skills("Ran k8s clusters", &SkillCriteria::new(["kube"]));
        assert_eq!(matched, vec!["kubernetes"]);
        assert_eq!(matcher.aliases().len(), 1);
    }

    #[test]
    fn test_reassigned_variant_moves_to_latest_skill() {
        let mut aliases = SkillAliases::empty();
        aliases.insert("go programming", ["go"]);
        aliases.insert("golang", ["go"]);

        assert_eq!(aliases.canonical_for("go"), Some("golang"));
        let (_, earlier) = aliases.lookup("go programming").unwrap();
        assert!(!earlier.contains("go"));
        assert!(earlier.contains("go programming"));
    }

    #[test]
    fn test_canonical_name_beats_variant_elsewhere() {
        let mut aliases = SkillAliases::empty();
        aliases.insert("machine learning", ["ml"]);
        aliases.insert("ai", ["machine learning"]);

        assert_eq!(aliases.canonical_for("machine learning"), Some("machine learning"));
        assert_eq!(aliases.canonical_for("ml"), Some("machine learning"));
    }
}
