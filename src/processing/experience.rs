//! Years-of-experience threshold check

use regex::Regex;

pub struct ExperienceChecker {
    phrase_regex: Regex,
    number_regex: Regex,
    digit_regex: Regex,
}

impl Default for ExperienceChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceChecker {
    pub fn new() -> Self {
        Self {
            phrase_regex: Regex::new(r"(?i)\d+\s*\+?\s*years?(?:\s*of\s*experience?)?")
                .expect("Invalid experience regex"),
            number_regex: Regex::new(r"\d+").expect("Invalid number regex"),
            digit_regex: Regex::new(r"^\d$").expect("Invalid digit regex"),
        }
    }

    /// Years asserted by each experience phrase, in text order. "8+ years" counts as 9.
    /// Values beyond `u64` saturate.
    pub fn claimed_years(&self, text: &str) -> Vec<u64> {
        self.phrase_regex
            .find_iter(text)
            .filter_map(|phrase| {
                let phrase = phrase.as_str();
                let years = self.parse_number(self.number_regex.find(phrase)?.as_str());
                if phrase.contains('+') {
                    Some(years.saturating_add(1))
                } else {
                    Some(years)
                }
            })
            .collect()
    }

    /// Decimal value of a run of Unicode digits (`\d` also matches e.g. Arabic-Indic digits)
    fn parse_number(&self, digits: &str) -> u64 {
        digits.chars().fold(0u64, |value, c| {
            value
                .saturating_mul(10)
                .saturating_add(u64::from(self.digit_value(c)))
        })
    }

    /// Unicode decimal digits come in contiguous runs of whole 0..9 blocks, so a digit's
    /// value is its offset from the start of its run, modulo 10.
    fn digit_value(&self, c: char) -> u32 {
        if let Some(value) = c.to_digit(10) {
            return value;
        }

        let is_digit = |code: u32| {
            let mut buf = [0u8; 4];
            char::from_u32(code).is_some_and(|c| self.digit_regex.is_match(c.encode_utf8(&mut buf)))
        };

        let code = u32::from(c);
        let mut run_start = code;
        while run_start > 0 && is_digit(run_start - 1) {
            run_start -= 1;
        }
        (code - run_start) % 10
    }

    /// True as soon as one phrase claims at least `required` years. Claims are not summed,
    /// and a text without any phrase never qualifies, even for a requirement of zero.
    pub fn meets_requirement(&self, text: &str, required: u32) -> bool {
        self.claimed_years(text)
            .into_iter()
            .any(|years| years >= u64::from(required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_counts_one_more_year() {
        let checker = ExperienceChecker::new();
        let text = "Senior engineer with 5+ years of experience";
        assert!(checker.meets_requirement(text, 5));
        assert!(checker.meets_requirement(text, 6));
        assert!(!checker.meets_requirement(text, 7));
    }

    #[test]
    fn test_phrase_variants() {
        let checker = ExperienceChecker::new();
        assert_eq!(checker.claimed_years("1 year at Acme, 3 YEARS at Initech, 10 + years overall"), vec![1, 3, 11]);
    }

    #[test]
    fn test_claims_are_not_summed() {
        let checker = ExperienceChecker::new();
        let text = "2 years at Acme. 3 years at Initech.";
        assert!(!checker.meets_requirement(text, 5));
        assert!(checker.meets_requirement(text, 3));
    }

    #[test]
    fn test_zero_requirement() {
        let checker = ExperienceChecker::new();
        assert!(!checker.meets_requirement("Fresh graduate, eager to learn", 0));
        assert!(checker.meets_requirement("0 years of experience", 0));
    }

    #[test]
    fn test_oversized_number_saturates() {
        let checker = ExperienceChecker::new();
        let text = "99999999999999999999999 years of experience";
        assert_eq!(checker.claimed_years(text), vec![u64::MAX]);
        assert!(checker.meets_requirement(text, 5));
        assert_eq!(checker.claimed_years("99999999999999999999999+ years"), vec![u64::MAX]);
    }

    #[test]
    fn test_non_ascii_digits() {
        let checker = ExperienceChecker::new();
        assert!(checker.meets_requirement("٥ years of experience", 3));
        assert_eq!(checker.claimed_years("٥ years"), vec![5]);
        assert_eq!(checker.claimed_years("१२+ years"), vec![13]);
        assert_eq!(checker.claimed_years("𝟗 years"), vec![9]);
    }
}
