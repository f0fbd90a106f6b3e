//! Keyword extraction

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::tokenize::{is_stopword, words};

static URLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("static regex"));
static HANDLES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[@#]\w+").expect("static regex"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static regex"));

/// Lower-case and strip URLs, mentions, hashtags and digits
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_urls = URLS.replace_all(&lowered, " ");
    let without_handles = HANDLES.replace_all(&without_urls, " ");
    DIGITS.replace_all(&without_handles, " ").into_owned()
}

/// Most frequent content words, at most `n`
///
/// Stop-words and words of two characters or fewer are skipped. Equal counts
/// keep the order in which the words first appear.
///
/// # Example
///
/// ```
/// use interview_signals::features::text::keywords::extract_keywords;
///
/// let keywords = extract_keywords("Rust services, Rust tooling and async services", 2);
/// assert_eq!(keywords, vec!["rust", "services"]);
/// ```
pub fn extract_keywords(text: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }

    let cleaned = clean_text(text);
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in words(&cleaned).into_iter().enumerate() {
        if word.chars().count() <= 2 || is_stopword(&word) {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(n).map(|(word, _, _)| word).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        let cleaned = clean_text("See https://example.com/x or @bob #rust in 2024");
        assert!(!cleaned.contains("example"));
        assert!(!cleaned.contains("bob"));
        assert!(!cleaned.contains("2024"));
        assert!(cleaned.contains("see"));
    }

    #[test]
    fn test_ranking_and_ties() {
        let keywords = extract_keywords("kafka pipeline kafka metrics pipeline kafka latency", 3);
        assert_eq!(keywords, vec!["kafka", "pipeline", "metrics"]);
    }

    #[test]
    fn test_short_and_stop_words_skipped() {
        assert!(extract_keywords("it is an ok go to", 5).is_empty());
        assert!(extract_keywords("anything", 0).is_empty());
    }
}
