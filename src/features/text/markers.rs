//! Whole-word phrase matching for confidence markers and fillers

use regex::Regex;

use crate::error::ScoringError;

/// Phrases that signal certainty
pub const POSITIVE_MARKERS: &[&str] = &[
    "confident",
    "certainly",
    "definitely",
    "absolutely",
    "surely",
    "undoubtedly",
    "clearly",
    "obviously",
    "precisely",
    "exactly",
    "I know",
    "I am sure",
    "without doubt",
    "I believe",
    "I am confident",
    "I am certain",
];

/// Phrases that signal hedging
pub const NEGATIVE_MARKERS: &[&str] = &[
    "maybe",
    "perhaps",
    "possibly",
    "probably",
    "somewhat",
    "I think",
    "I guess",
    "kind of",
    "sort of",
    "might",
    "I suppose",
    "I assume",
    "not sure",
    "uncertain",
    "unsure",
    "hopefully",
    "seems like",
    "in my opinion",
    "if I recall",
];

/// Filler words and phrases
pub const FILLERS: &[&str] = &[
    "um",
    "uh",
    "er",
    "ah",
    "like",
    "actually",
    "basically",
    "literally",
    "you know",
    "i mean",
    "sort of",
    "kind of",
    "so",
    "just",
    "well",
    "anyway",
    "right",
];

/// Case-insensitive matcher for a set of words and multi-word phrases
///
/// Each phrase only matches on word boundaries; words inside a phrase may be
/// separated by any run of whitespace.
#[derive(Debug, Clone)]
pub struct PhraseSet {
    patterns: Vec<Regex>,
}

impl PhraseSet {
    /// Compile a phrase set
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidInput` if a phrase is empty
    pub fn new<'a, I>(phrases: I) -> Result<Self, ScoringError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut patterns = Vec::new();
        for phrase in phrases {
            let parts: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
            if parts.is_empty() {
                return Err(ScoringError::InvalidInput("empty marker phrase".to_string()));
            }
            let pattern = format!(r"(?i)\b{}\b", parts.join(r"\s+"));
            let regex = Regex::new(&pattern)
                .map_err(|e| ScoringError::InvalidInput(format!("marker '{}': {}", phrase, e)))?;
            patterns.push(regex);
        }
        Ok(Self { patterns })
    }

    /// Total occurrences of every phrase in `text`
    ///
    /// Overlapping phrases are counted independently, so "I am confident"
    /// also counts as "confident".
    pub fn count(&self, text: &str) -> usize {
        self.patterns.iter().map(|p| p.find_iter(text).count()).sum()
    }

    /// Number of phrases in the set
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set has no phrases
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
