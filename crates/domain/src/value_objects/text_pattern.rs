//! Case-insensitive text pattern used by string-valued filter conditions.
//!
//! Patterns are stored as user-typed text and interpreted as an unanchored,
//! case-insensitive regular expression, so `"army"` finds `"Sarlona Army"`.
//! Case folding is Unicode-aware in both the regex and the literal path.
//! Text that is not a valid expression (e.g. `"Tempest's ("`) degrades to a
//! literal case-insensitive substring search, keeping matching total.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
enum Matcher {
    Regex(Regex),
    /// Lowercased needle for the literal fallback
    Literal(String),
}

/// A compiled, case-insensitive search pattern.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TextPattern {
    source: String,
    matcher: Matcher,
}

impl TextPattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let matcher = match RegexBuilder::new(&source).case_insensitive(true).build() {
            Ok(regex) => Matcher::Regex(regex),
            Err(_) => Matcher::Literal(source.to_lowercase()),
        };
        Self { source, matcher }
    }

    /// True if the pattern occurs anywhere in `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(haystack),
            Matcher::Literal(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }

    /// Null-safe variant for optional party fields; absent text never matches.
    pub fn is_match_opt(&self, haystack: Option<&str>) -> bool {
        haystack.is_some_and(|text| self.is_match(text))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the source text compiled as a regular expression.
    pub fn is_regex(&self) -> bool {
        matches!(self.matcher, Matcher::Regex(_))
    }
}

impl PartialEq for TextPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for TextPattern {}

impl fmt::Debug for TextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextPattern").field(&self.source).finish()
    }
}

impl fmt::Display for TextPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl From<String> for TextPattern {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl From<&str> for TextPattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<TextPattern> for String {
    fn from(pattern: TextPattern) -> String {
        pattern.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitive_substring() {
        let pattern = TextPattern::new("army");
        assert!(pattern.is_match("Sarlona Army"));
        assert!(pattern.is_match("ARMY of one"));
        assert!(!pattern.is_match("Cannith"));
    }

    #[test]
    fn case_folding_covers_non_ascii_text() {
        let pattern = TextPattern::new("élite");
        assert!(pattern.is_regex());
        assert!(pattern.is_match("ÉLITE"));
        assert!(pattern.is_match("Reaper / Élite"));

        let literal = TextPattern::new("garçon (");
        assert!(!literal.is_regex());
        assert!(literal.is_match("Le GARÇON (Argonnessen)"));
    }

    #[test]
    fn regex_syntax_is_honoured() {
        let pattern = TextPattern::new("^khy");
        assert!(pattern.is_regex());
        assert!(pattern.is_match("Khyber"));
        assert!(!pattern.is_match("Old Khyber"));
    }

    #[test]
    fn invalid_regex_falls_back_to_literal() {
        let pattern = TextPattern::new("spine (");
        assert!(!pattern.is_regex());
        assert!(pattern.is_match("Tempest's SPINE (elite)"));
        assert!(!pattern.is_match("Tempest's Spine"));
    }

    #[test]
    fn empty_pattern_matches_any_text() {
        let pattern = TextPattern::new("");
        assert!(pattern.is_match("anything"));
        assert!(pattern.is_match(""));
    }

    #[test]
    fn absent_text_never_matches() {
        let pattern = TextPattern::new("");
        assert!(!pattern.is_match_opt(None));
        assert!(pattern.is_match_opt(Some("Elite")));
    }

    #[test]
    fn serializes_as_source_string() {
        let pattern = TextPattern::new("Shroud");
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, "\"Shroud\"");
        let back: TextPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pattern);
        assert!(back.is_match("The Shroud"));
    }
}
