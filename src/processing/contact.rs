//! Email and phone number extraction
//!
//! Resumes write phone numbers in many regional styles, so matching is a
//! best-effort heuristic: several independent patterns are tried in priority
//! order and a second pass recovers comma-joined numbers. Long digit runs
//! (account numbers, IDs) can produce false positives and unusual layouts can
//! be missed; neither is treated as an error.

use regex::{Match, Regex};
use std::collections::HashSet;

/// Contact details found in one document's text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    /// Every email match in text order, duplicates kept
    pub emails: Vec<String>,
    /// Unique phone numbers in first-seen order
    pub phones: Vec<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }
}

/// Ordered phone collection with constant-time duplicate checks
#[derive(Default)]
struct PhoneSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl PhoneSet {
    fn add(&mut self, phone: &str) {
        if self.seen.insert(phone.to_string()) {
            self.ordered.push(phone.to_string());
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// A named phone layout
struct PhonePattern {
    name: &'static str,
    regex: Regex,
}

pub struct ContactExtractor {
    email_regex: Regex,
    phone_patterns: Vec<PhonePattern>,
    concatenated_regex: Regex,
}

/// Phone layouts in priority order; earlier entries win when two match at the same position
const PHONE_LAYOUTS: &[(&str, &str)] = &[
    ("in_parenthesized_code", r"\(\+91\)\s?\d{5}-\d{5}"),
    ("in_hyphenated", r"\+91-\d{10}"),
    ("in_spaced", r"\+91\s?\d{10}"),
    ("in_bare", r"\d{10}"),
    ("na_spaced_parenthesized", r"\+1\s\(\d{3}\)\s\d{3}-\d{4}"),
    ("na_spaced_hyphenated", r"\+1\s\d{3}-\d{3}-\d{4}"),
    ("na_spaced_mixed", r"\+1\s\d{3}\s\d{3}-\d{4}"),
    ("na_spaced_short", r"\+1\s\d{3}\s\d{4}"),
    ("na_hyphenated", r"\+1-\d{3}-\d{3}-\d{4}"),
    ("na_bare_hyphenated", r"\d{3}-\d{3}-\d{4}"),
    ("na_bare_mixed", r"\d{3}\s\d{3}-\d{4}"),
    ("na_spaced_compact", r"\+1\s\d{3}\d{7}"),
    ("na_parenthesized_compact", r"\+1\(\d{3}\)\d{7}"),
    ("na_parenthesized_spaced_compact", r"\+1\(\d{3}\)\s\d{7}"),
    ("na_parenthesized_hyphenated", r"\+1\(\d{3}\)\s\d{3}-\d{4}"),
    ("na_parenthesized_split", r"\+1\(\d{3}\)\s\d{3}\d{4}"),
    ("na_spaced_split", r"\+1\s\d{3}-\d{3}\d{4}"),
    ("na_bare_spaced", r"\d{3}\s?\d{3}\s?\d{4}"),
];

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}")
            .expect("Invalid email regex");

        let phone_patterns = PHONE_LAYOUTS
            .iter()
            .map(|&(name, pattern)| PhonePattern {
                name,
                regex: Regex::new(pattern).expect("Invalid phone regex"),
            })
            .collect();

        let concatenated_regex = Regex::new(r"\d{10}(?:,\d{10})+")
            .expect("Invalid concatenated phone regex");

        Self {
            email_regex,
            phone_patterns,
            concatenated_regex,
        }
    }

    /// Find all emails and phone numbers in `text`
    pub fn extract(&self, text: &str) -> ContactInfo {
        let mut phones = PhoneSet::default();

        for (_, phone) in self.find_phones(text) {
            phones.add(phone);
        }

        if text.contains(',') {
            for run in self.concatenated_regex.find_iter(text) {
                for phone in run.as_str().split(',') {
                    phones.add(phone);
                }
            }
        }

        ContactInfo {
            emails: self.find_emails(text),
            phones: phones.into_vec(),
        }
    }

    pub fn find_emails(&self, text: &str) -> Vec<String> {
        self.email_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Non-overlapping phone matches, left to right, tagged with the layout that matched.
    /// At each position the earliest match wins and ties go to the higher-priority layout.
    ///
    /// Each layout's next match is cached and only searched again once the scan has moved
    /// past its start, so every layout walks the text once.
    pub fn find_phones<'t>(&self, text: &'t str) -> Vec<(&'static str, &'t str)> {
        let mut upcoming: Vec<Option<Match<'t>>> = self
            .phone_patterns
            .iter()
            .map(|pattern| pattern.regex.find(text))
            .collect();
        let mut found = Vec::new();
        let mut position = 0;

        while position < text.len() {
            let mut best: Option<(usize, Match<'t>)> = None;

            for (index, pattern) in self.phone_patterns.iter().enumerate() {
                let cached = &mut upcoming[index];
                if matches!(cached, Some(m) if m.start() < position) {
                    *cached = pattern.regex.find_at(text, position);
                }

                if let Some(m) = *cached {
                    // Strict comparison keeps the earlier layout on ties
                    if best.map_or(true, |(_, current)| m.start() < current.start()) {
                        best = Some((index, m));
                    }
                }
            }

            match best {
                Some((index, m)) => {
                    found.push((self.phone_patterns[index].name, m.as_str()));
                    position = m.end();
                }
                None => break,
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_email() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("Contact: jane.doe@example.com");
        assert_eq!(info.emails, vec!["jane.doe@example.com"]);
        assert!(info.phones.is_empty());
    }

    #[test]
    fn test_duplicate_emails_are_kept() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("a.b@mail.org / a.b@mail.org");
        assert_eq!(info.emails, vec!["a.b@mail.org", "a.b@mail.org"]);
    }

    #[test]
    fn test_duplicate_phones_are_collapsed() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("Phone: 9876543210, 9876543210");
        assert_eq!(info.phones, vec!["9876543210"]);
    }

    #[test]
    fn test_indian_numbers() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("Mobile +91 9876543210\nAlt 9123456780\nOffice (+91) 98765-43210");
        assert_eq!(
            info.phones,
            vec!["+91 9876543210", "9123456780", "(+91) 98765-43210"]
        );

        let layouts: Vec<&str> = extractor
            .find_phones("+91-9876543210 and +919876543210")
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(layouts, vec!["in_hyphenated", "in_spaced"]);
    }

    #[test]
    fn test_north_american_numbers() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("Call +1 (555) 123-4567 or 555-987-6543 or +1-555-222-3333");
        assert_eq!(
            info.phones,
            vec!["+1 (555) 123-4567", "555-987-6543", "+1-555-222-3333"]
        );
    }

    #[test]
    fn test_space_grouped_number() {
        let extractor = ContactExtractor::new();
        // Space-only grouping has no +1 form, so the bare layout takes it
        let phones = extractor.find_phones("tel 555 123 4567");
        assert_eq!(phones, vec![("na_bare_spaced", "555 123 4567")]);
    }

    #[test]
    fn test_concatenated_numbers_are_recovered() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("Phones: 9570298107,8851649905");
        assert_eq!(info.phones, vec!["9570298107", "8851649905"]);
    }

    #[test]
    fn test_large_text_scans_in_linear_time() {
        let extractor = ContactExtractor::new();
        let text: String = (0..10_000)
            .map(|i| format!("Ref 555-{:03}-{:04} x\n", i / 100, i))
            .collect();

        let started = std::time::Instant::now();
        let info = extractor.extract(&text);

        assert_eq!(info.phones.len(), 10_000);
        assert_eq!(info.phones[0], "555-000-0000");
        assert_eq!(info.phones[9_999], "555-099-9999");
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }

    #[test]
    fn test_cached_layouts_keep_priority_after_skips() {
        let extractor = ContactExtractor::new();
        // in_bare sees 9876543210 first but must not shadow the later +1 layout
        let phones = extractor.find_phones("9876543210 then +1 555-123-4567 then 555 123 4567");
        assert_eq!(
            phones,
            vec![
                ("in_bare", "9876543210"),
                ("na_spaced_hyphenated", "+1 555-123-4567"),
                ("na_bare_spaced", "555 123 4567"),
            ]
        );
    }

    #[test]
    fn test_no_contact_info_is_empty() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("Nothing to see here.");
        assert!(info.is_empty());
    }
}
