//! Normalised views of a user question shared by every classifier.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[a-z0-9%]+").expect("word pattern is valid"))
}

/// A question with its lowercased text and word set precomputed.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    lower: String,
    words: HashSet<String>,
}

impl Query {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let lower = raw.trim().to_lowercase();
        let words = word_pattern()
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect();
        Self { raw, lower, words }
    }

    /// The question as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Trimmed, lowercased text.
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Substring test on the lowercased text.
    pub fn contains(&self, needle: &str) -> bool {
        self.lower.contains(needle)
    }

    /// Whether any needle occurs as a substring.
    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.lower.contains(n))
    }

    /// Whole-word test.
    pub fn has_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Whether any of the words occurs as a whole word.
    pub fn has_any_word(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.words.contains(*w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        let q = Query::new("  What is PPF?  ");
        assert_eq!(q.raw(), "  What is PPF?  ");
        assert_eq!(q.lower(), "what is ppf?");
        assert!(q.contains("ppf"));
    }

    #[test]
    fn test_word_and_substring_tests_differ() {
        let q = Query::new("Are FDs safer than funds?");
        assert!(q.has_word("fds"));
        assert!(!q.has_word("fd"));
        assert!(q.contains("fund"));
        assert!(!q.has_word("fund"));
        assert!(q.has_any_word(&["fd", "fds"]));
    }

    #[test]
    fn test_percent_stays_in_word() {
        let q = Query::new("Explain the 4% rule");
        assert!(q.has_word("4%"));
    }
}
