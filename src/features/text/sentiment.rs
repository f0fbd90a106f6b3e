//! Polarity scoring with the VADER sentiment analyzer
//!
//! # Reference
//!
//! Hutto, C. J., & Gilbert, E. (2014). VADER: A parsimonious rule-based model
//! for sentiment analysis of social media text. *Proceedings of the 8th
//! International AAAI Conference on Weblogs and Social Media (ICWSM-14)*.
//!
//! VADER scores each token from its valence lexicon, adjusted for boosters,
//! negation, capitalization, contrastive "but" and punctuation emphasis. Its
//! `pos`/`neg`/`neu` shares are renormalized to sum to exactly 1 and the
//! `compound` score is kept as is.

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::analysis::result::SentimentScores;

/// Score the polarity of `text`
///
/// Text without any sentiment-bearing token is fully neutral.
///
/// # Example
///
/// ```
/// use interview_signals::features::text::sentiment::polarity_scores;
///
/// let scores = polarity_scores("The launch was a great success");
/// assert!(scores.compound > 0.5);
///
/// let scores = polarity_scores("");
/// assert_eq!(scores.neutral, 1.0);
/// ```
pub fn polarity_scores(text: &str) -> SentimentScores {
    if !text.chars().any(char::is_alphanumeric) {
        return SentimentScores::neutral();
    }

    let analyzer = SentimentIntensityAnalyzer::new();
    let raw = analyzer.polarity_scores(text);
    let share = |key: &str| raw.get(key).copied().unwrap_or(0.0).max(0.0) as f32;

    let positive = share("pos");
    let negative = share("neg");
    let neutral = share("neu");
    let compound = raw.get("compound").copied().unwrap_or(0.0) as f32;

    let total = positive + negative + neutral;
    if (positive == 0.0 && negative == 0.0) || total <= f32::EPSILON {
        return SentimentScores::neutral();
    }

    let scores = SentimentScores {
        positive: positive / total,
        negative: negative / total,
        neutral: neutral / total,
        compound: compound.clamp(-1.0, 1.0),
    };

    log::debug!(
        "Sentiment: pos={:.3}, neg={:.3}, neu={:.3}, compound={:.3}",
        scores.positive,
        scores.negative,
        scores.neutral,
        scores.compound
    );

    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums_to_one(scores: &SentimentScores) -> bool {
        (scores.positive + scores.negative + scores.neutral - 1.0).abs() < 1e-5
    }

    #[test]
    fn test_empty_is_neutral() {
        assert_eq!(polarity_scores(""), SentimentScores::neutral());
        assert_eq!(polarity_scores("  \n "), SentimentScores::neutral());
        assert_eq!(polarity_scores("?!"), SentimentScores::neutral());
    }

    #[test]
    fn test_no_lexicon_words_is_neutral() {
        assert_eq!(polarity_scores("The table has four legs"), SentimentScores::neutral());
    }

    #[test]
    fn test_positive_text() {
        let scores = polarity_scores("I loved leading this team, it was a great success.");
        assert!(scores.compound > 0.5, "{:?}", scores);
        assert!(scores.positive > scores.negative);
        assert!(sums_to_one(&scores));
    }

    #[test]
    fn test_negative_text() {
        let scores = polarity_scores("The project failed and it was a terrible mistake.");
        assert!(scores.compound < -0.5, "{:?}", scores);
        assert!(sums_to_one(&scores));
    }

    #[test]
    fn test_negation_flips() {
        let plain = polarity_scores("The result was good");
        let negated = polarity_scores("The result was not good");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn test_booster_amplifies() {
        let plain = polarity_scores("The demo was good");
        let boosted = polarity_scores("The demo was very good");
        assert!(boosted.compound > plain.compound);
    }

    #[test]
    fn test_but_shifts_weight() {
        let scores = polarity_scores("The start was bad but the ending was great");
        assert!(scores.compound > 0.0, "{:?}", scores);
    }

    #[test]
    fn test_mixed_text_shares_sum_to_one() {
        let scores = polarity_scores("I was proud of the launch, but the outage was awful and stressful.");
        assert!(scores.positive > 0.0);
        assert!(scores.negative > 0.0);
        assert!(sums_to_one(&scores));
        assert!((-1.0..=1.0).contains(&scores.compound));
    }

    #[test]
    fn test_exclamation_adds_emphasis() {
        let calm = polarity_scores("This is great");
        let loud = polarity_scores("This is great!!");
        assert!(loud.compound > calm.compound);
    }
}
