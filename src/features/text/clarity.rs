//! Clarity metrics: filler ratio, sentence length profile, vocabulary richness
//!
//! Each metric is mapped onto 0-100 and the three are averaged:
//!
//! - filler: `100 - ratio * 500`, floored at 0
//! - sentence length: peaks at 20 words; below 5 words `len * 10`; above 30
//!   words `100 - (len - 30) * 3`
//! - vocabulary richness: below 0.3 `r * 200`; above 0.9 `100 - (r - 0.9) * 100`;
//!   otherwise `60 + r * 50`

use std::collections::HashSet;

use super::markers::PhraseSet;
use super::tokenize::{is_stopword, sentence_lengths, words};
use crate::analysis::range::{clamp_ratio, clamp_score};

/// Raw and combined clarity measures of a text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClarityMetrics {
    /// Combined clarity (0-100)
    pub clarity: f32,
    /// Filler occurrences per word (0.0-1.0)
    pub filler_ratio: f32,
    /// Mean words per sentence
    pub avg_sentence_length: f32,
    /// Unique content words over content words (0.0-1.0)
    pub vocabulary_richness: f32,
}

/// Measure clarity of `text`
///
/// Text without words yields all-zero metrics.
pub fn measure_clarity(text: &str, fillers: &PhraseSet) -> ClarityMetrics {
    let tokens = words(text);
    if tokens.is_empty() {
        return ClarityMetrics::default();
    }

    // Fillers are matched on the punctuation-free token stream so that
    // "you, know" still counts as "you know"
    let normalized = tokens.join(" ");
    let filler_ratio = clamp_ratio(fillers.count(&normalized) as f32 / tokens.len() as f32);

    let lengths = sentence_lengths(text);
    let avg_sentence_length = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f32 / lengths.len() as f32
    };

    let content: Vec<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|w| !is_stopword(w))
        .collect();
    let vocabulary_richness = if content.is_empty() {
        0.0
    } else {
        let unique: HashSet<&str> = content.iter().copied().collect();
        clamp_ratio(unique.len() as f32 / content.len() as f32)
    };

    let clarity = clamp_score(
        (filler_score(filler_ratio)
            + sentence_length_score(avg_sentence_length)
            + vocabulary_score(vocabulary_richness))
            / 3.0,
    );

    log::debug!(
        "Clarity: {:.1} (fillers={:.3}, sentence={:.1}, richness={:.3})",
        clarity,
        filler_ratio,
        avg_sentence_length,
        vocabulary_richness
    );

    ClarityMetrics {
        clarity,
        filler_ratio,
        avg_sentence_length,
        vocabulary_richness,
    }
}

/// Five points lost per percentage point of fillers
pub fn filler_score(filler_ratio: f32) -> f32 {
    (100.0 - filler_ratio * 100.0 * 5.0).max(0.0)
}

/// Sentence length suitability, best at 20 words
pub fn sentence_length_score(length: f32) -> f32 {
    let score = if length < 5.0 {
        length * 10.0
    } else if length > 30.0 {
        (100.0 - (length - 30.0) * 3.0).max(0.0)
    } else {
        100.0 - (20.0 - length).abs() * 2.0
    };
    clamp_score(score)
}

/// Vocabulary richness suitability
pub fn vocabulary_score(richness: f32) -> f32 {
    let score = if richness < 0.3 {
        richness * 200.0
    } else if richness > 0.9 {
        100.0 - (richness - 0.9) * 100.0
    } else {
        60.0 + richness * 50.0
    };
    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::text::markers::FILLERS;

    fn fillers() -> PhraseSet {
        PhraseSet::new(FILLERS.iter().copied()).unwrap()
    }

    #[test]
    fn test_empty_text_is_all_zero() {
        let metrics = measure_clarity("", &fillers());
        assert_eq!(metrics, ClarityMetrics::default());
        assert_eq!(metrics.filler_ratio, 0.0);
        assert_eq!(metrics.avg_sentence_length, 0.0);
    }

    #[test]
    fn test_filler_ratio_counts_phrases() {
        // 7 words; "um" and "you know" are fillers
        let metrics = measure_clarity("Um, the design was, you know, modular.", &fillers());
        assert!((metrics.filler_ratio - 2.0 / 7.0).abs() < 1e-6, "{:?}", metrics);
    }

    #[test]
    fn test_sentence_length_shape() {
        assert_eq!(sentence_length_score(20.0), 100.0);
        assert_eq!(sentence_length_score(3.0), 30.0);
        assert_eq!(sentence_length_score(10.0), 80.0);
        assert_eq!(sentence_length_score(40.0), 70.0);
        assert_eq!(sentence_length_score(80.0), 0.0);
    }

    #[test]
    fn test_vocabulary_shape() {
        assert!((vocabulary_score(0.2) - 40.0).abs() < 1e-4);
        assert!((vocabulary_score(0.6) - 90.0).abs() < 1e-4);
        assert!((vocabulary_score(1.0) - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_filler_shape() {
        assert_eq!(filler_score(0.0), 100.0);
        assert!((filler_score(0.1) - 50.0).abs() < 1e-4);
        assert_eq!(filler_score(0.5), 0.0);
    }

    #[test]
    fn test_repetitive_text_has_low_richness() {
        let metrics = measure_clarity("Data data data data data data data data data data.", &fillers());
        assert!((metrics.vocabulary_richness - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_clarity_bounded() {
        let metrics = measure_clarity(
            "I designed the caching layer. It reduced latency across three regions.",
            &fillers(),
        );
        assert!(metrics.clarity > 0.0 && metrics.clarity <= 100.0);
        assert_eq!(metrics.filler_ratio, 0.0);
        assert!((metrics.avg_sentence_length - 5.5).abs() < 1e-6);
    }
}
