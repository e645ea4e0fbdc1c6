//! Investigation subjects
//!
//! A subject is the key of one investigation: a phone number in loose
//! E.164 form, or a social handle. Classification happens once, when a
//! search starts; the subject is immutable afterwards.

use regex::Regex;
use std::sync::LazyLock;

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{6,14}$").unwrap());

/// Check whether a string is a plausible E.164 phone number.
///
/// Same pattern the input form applies, so both ends of the pipeline
/// agree on what counts as a phone subject.
pub fn is_valid_phone(raw: &str) -> bool {
    PHONE_REGEX.is_match(raw)
}

/// The entity under investigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// A phone number in loose E.164 form
    Phone(String),
    /// A social handle / username
    Handle(String),
}

impl Subject {
    /// Classify a raw input string. Empty or whitespace-only input is
    /// rejected here so no downstream component ever sees a blank subject.
    pub fn parse(raw: &str) -> Option<Subject> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if is_valid_phone(trimmed) {
            Some(Subject::Phone(trimmed.to_string()))
        } else {
            Some(Subject::Handle(trimmed.to_string()))
        }
    }

    /// The raw subject value
    pub fn value(&self) -> &str {
        match self {
            Subject::Phone(v) | Subject::Handle(v) => v,
        }
    }

    pub fn is_phone(&self) -> bool {
        matches!(self, Subject::Phone(_))
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phone_numbers() {
        assert!(is_valid_phone("+12025550123"));
        assert!(is_valid_phone("12025550123"));
        assert!(is_valid_phone("+4915112345678"));
    }

    #[test]
    fn test_invalid_phone_numbers() {
        assert!(!is_valid_phone("+0123456"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+1 202 555 0123"));
        assert!(!is_valid_phone("not-a-number"));
    }

    #[test]
    fn test_parse_classifies_subjects() {
        assert_eq!(
            Subject::parse("+12025550123"),
            Some(Subject::Phone("+12025550123".to_string()))
        );
        assert_eq!(
            Subject::parse("shadow_user"),
            Some(Subject::Handle("shadow_user".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(Subject::parse(""), None);
        assert_eq!(Subject::parse("   "), None);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let subject = Subject::parse("  +12025550123  ").unwrap();
        assert_eq!(subject.value(), "+12025550123");
        assert!(subject.is_phone());
    }
}
