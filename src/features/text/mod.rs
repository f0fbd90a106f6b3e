//! Text channel analysis
//!
//! Sentiment polarity, linguistic confidence from marker phrases, clarity
//! from filler ratio / sentence length / vocabulary richness, and keywords.

pub mod clarity;
pub mod keywords;
pub mod markers;
pub mod sentiment;
pub mod tokenize;

use crate::analysis::range::clamp_score;
use crate::analysis::result::TextResult;
use crate::config::TextConfig;
use crate::error::ScoringError;

use clarity::measure_clarity;
use keywords::extract_keywords;
use markers::{PhraseSet, FILLERS, NEGATIVE_MARKERS, POSITIVE_MARKERS};
use sentiment::polarity_scores;

/// Neutral confidence for text without markers
const NEUTRAL_CONFIDENCE: f32 = 50.0;

/// Text analyzer
///
/// Marker and filler sets are compiled once at construction.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    config: TextConfig,
    positive: PhraseSet,
    negative: PhraseSet,
    fillers: PhraseSet,
}

impl TextAnalyzer {
    /// Build an analyzer from the built-in marker sets plus any extras in `config`
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidInput` if an extra marker is empty or the
    /// marker weight or cap is negative or not finite.
    pub fn new(config: TextConfig) -> Result<Self, ScoringError> {
        if !config.marker_weight.is_finite() || config.marker_weight < 0.0 {
            return Err(ScoringError::InvalidInput(format!(
                "Marker weight must be >= 0, got {}",
                config.marker_weight
            )));
        }
        if !config.marker_cap.is_finite() || config.marker_cap < 0.0 {
            return Err(ScoringError::InvalidInput(format!(
                "Marker cap must be >= 0, got {}",
                config.marker_cap
            )));
        }

        let positive = combined(POSITIVE_MARKERS, &config.extra_positive_markers)?;
        let negative = combined(NEGATIVE_MARKERS, &config.extra_negative_markers)?;
        let fillers = combined(FILLERS, &config.extra_fillers)?;

        log::debug!(
            "Text analyzer: {} positive markers, {} negative markers, {} fillers",
            positive.len(),
            negative.len(),
            fillers.len()
        );

        Ok(Self {
            config,
            positive,
            negative,
            fillers,
        })
    }

    /// Analyze one answer
    ///
    /// Whitespace-only text yields [`TextResult::empty`].
    pub fn analyze(&self, text: &str) -> TextResult {
        let word_count = text.split_whitespace().count();
        if word_count == 0 {
            log::debug!("Empty text, returning neutral result");
            return TextResult::empty();
        }

        let sentiment = polarity_scores(text);
        let confidence = self.confidence(text, word_count);
        let clarity = measure_clarity(text, &self.fillers);
        let keywords = extract_keywords(text, self.config.keyword_count);

        log::debug!(
            "Text: {} words, confidence={:.1}, clarity={:.1}, compound={:.3}",
            word_count,
            confidence,
            clarity.clarity,
            sentiment.compound
        );

        TextResult {
            sentiment,
            confidence,
            clarity: clarity.clarity,
            filler_ratio: clarity.filler_ratio,
            avg_sentence_length: clarity.avg_sentence_length,
            vocabulary_richness: clarity.vocabulary_richness,
            word_count,
            keywords,
        }
    }

    /// Confidence score (0-100) of `text` containing `word_count` words
    ///
    /// Marker counts are taken per hundred words, weighted, and capped
    /// separately for raising and lowering markers before being applied
    /// around the neutral 50.
    pub fn confidence(&self, text: &str, word_count: usize) -> f32 {
        if word_count == 0 {
            return NEUTRAL_CONFIDENCE;
        }
        let per_hundred = word_count as f32 / 100.0;
        let impact = |count: usize| -> f32 {
            (count as f32 / per_hundred * self.config.marker_weight).min(self.config.marker_cap)
        };

        let positive_count = self.positive.count(text);
        let negative_count = self.negative.count(text);
        log::debug!("Markers: {} positive, {} negative", positive_count, negative_count);

        clamp_score(NEUTRAL_CONFIDENCE + impact(positive_count) - impact(negative_count))
    }
}

fn combined(builtin: &[&str], extra: &[String]) -> Result<PhraseSet, ScoringError> {
    PhraseSet::new(builtin.iter().copied().chain(extra.iter().map(String::as_str)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::SentimentScores;

    fn analyzer() -> TextAnalyzer {
        TextAnalyzer::new(TextConfig::default()).unwrap()
    }

    #[test]
    fn test_certain_answer_scores_high_confidence() {
        let result = analyzer()
            .analyze("I am absolutely certain this will work and I am confident in the design");
        assert!(result.confidence > 70.0, "confidence {}", result.confidence);
        assert_eq!(result.word_count, 14);
    }

    #[test]
    fn test_hedged_answer_scores_low_confidence() {
        let result = analyzer().analyze("Maybe it works, I guess. Perhaps it might, I think.");
        assert!(result.confidence < 50.0, "confidence {}", result.confidence);
    }

    #[test]
    fn test_empty_text() {
        for text in ["", "   \n\t "] {
            let result = analyzer().analyze(text);
            assert_eq!(result.confidence, 50.0);
            assert_eq!(result.sentiment, SentimentScores::neutral());
            assert_eq!(result.filler_ratio, 0.0);
            assert_eq!(result.avg_sentence_length, 0.0);
            assert_eq!(result.vocabulary_richness, 0.0);
            assert_eq!(result.clarity, 0.0);
            assert!(result.keywords.is_empty());
        }
    }

    #[test]
    fn test_contribution_is_capped() {
        let analyzer = analyzer();
        // One marker in three words is far above the cap
        assert_eq!(analyzer.confidence("definitely definitely definitely", 3), 90.0);
        assert_eq!(analyzer.confidence("maybe maybe maybe", 3), 10.0);
        assert_eq!(analyzer.confidence("anything", 0), 50.0);
    }

    #[test]
    fn test_extra_markers() {
        let config = TextConfig {
            extra_positive_markers: vec!["nailed it".to_string()],
            ..TextConfig::default()
        };
        let analyzer = TextAnalyzer::new(config).unwrap();
        assert!(analyzer.analyze("We nailed it on the launch").confidence > 50.0);
    }

    #[test]
    fn test_empty_extra_marker_rejected() {
        let config = TextConfig {
            extra_fillers: vec!["  ".to_string()],
            ..TextConfig::default()
        };
        assert!(TextAnalyzer::new(config).is_err());
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let result = analyzer().analyze(
            "Um, so, like, basically I just, you know, kind of did the thing. Well, right, anyway.",
        );
        assert!((0.0..=100.0).contains(&result.confidence));
        assert!((0.0..=100.0).contains(&result.clarity));
        assert!((0.0..=1.0).contains(&result.filler_ratio));
        assert!(result.filler_ratio > 0.3);
    }
}
