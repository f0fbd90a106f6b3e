//! Analysis result types
//!
//! One record per channel sample (`TextResult`, `FrameResult`, `ClipResult`)
//! and one per session (`VisualAggregate`, `VocalAggregate`). Per-sample
//! records are produced once and never updated; aggregates are recomputed
//! from the full sequence of per-sample records.

use serde::{Deserialize, Serialize};

/// Polarity proportions of a text
///
/// `positive + negative + neutral == 1`; `compound` lies in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    /// Share of positive sentiment
    pub positive: f32,
    /// Share of negative sentiment
    pub negative: f32,
    /// Share of neutral sentiment
    pub neutral: f32,
    /// Normalized overall polarity (-1.0 to 1.0)
    pub compound: f32,
}

impl SentimentScores {
    /// Fully neutral sentiment `{0, 0, 1, 0}`
    pub const fn neutral() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound: 0.0,
        }
    }
}

impl Default for SentimentScores {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Text channel result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextResult {
    /// Sentiment polarity
    pub sentiment: SentimentScores,

    /// Linguistic confidence (0-100, 50 is neutral)
    pub confidence: f32,

    /// Combined clarity (0-100)
    pub clarity: f32,

    /// Filler tokens per word (0.0-1.0)
    pub filler_ratio: f32,

    /// Mean words per sentence
    pub avg_sentence_length: f32,

    /// Unique content words over total content words (0.0-1.0)
    pub vocabulary_richness: f32,

    /// Whitespace-separated word count
    pub word_count: usize,

    /// Most frequent content words
    pub keywords: Vec<String>,
}

impl TextResult {
    /// Result for text with no words
    ///
    /// Confidence sits at the neutral 50, sentiment is fully neutral and every
    /// clarity measure is zero.
    pub fn empty() -> Self {
        Self {
            sentiment: SentimentScores::neutral(),
            confidence: 50.0,
            clarity: 0.0,
            filler_ratio: 0.0,
            avg_sentence_length: 0.0,
            vocabulary_richness: 0.0,
            word_count: 0,
            keywords: Vec::new(),
        }
    }
}

/// Facial expression label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacialExpression {
    /// Expression score above 70
    Happy,
    /// Expression score above 60
    Positive,
    /// Expression score between 40 and 60
    Neutral,
    /// Expression score below 40
    Negative,
}

impl FacialExpression {
    /// Label an expression score
    ///
    /// # Example
    ///
    /// ```
    /// use interview_signals::FacialExpression;
    ///
    /// assert_eq!(FacialExpression::from_score(80.0), FacialExpression::Happy);
    /// assert_eq!(FacialExpression::from_score(65.0), FacialExpression::Positive);
    /// assert_eq!(FacialExpression::from_score(50.0), FacialExpression::Neutral);
    /// assert_eq!(FacialExpression::from_score(30.0), FacialExpression::Negative);
    /// ```
    pub fn from_score(score: f32) -> Self {
        if score > 70.0 {
            FacialExpression::Happy
        } else if score > 60.0 {
            FacialExpression::Positive
        } else if score < 40.0 {
            FacialExpression::Negative
        } else {
            FacialExpression::Neutral
        }
    }

    /// Lower-case display name
    pub fn name(&self) -> &'static str {
        match self {
            FacialExpression::Happy => "happy",
            FacialExpression::Positive => "positive",
            FacialExpression::Neutral => "neutral",
            FacialExpression::Negative => "negative",
        }
    }
}

/// Head position relative to the frame center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadPosition {
    /// Both offsets under the centered band
    #[serde(rename = "centered")]
    Centered,
    /// Both offsets under the slightly-off band
    #[serde(rename = "slightly off-center")]
    SlightlyOffCenter,
    /// Anything further out
    #[serde(rename = "off-center")]
    OffCenter,
}

impl HeadPosition {
    /// Display name as it appears in serialized records
    pub fn name(&self) -> &'static str {
        match self {
            HeadPosition::Centered => "centered",
            HeadPosition::SlightlyOffCenter => "slightly off-center",
            HeadPosition::OffCenter => "off-center",
        }
    }
}

/// Visual channel result for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    /// Whether any face was found
    pub face_detected: bool,

    /// Eye-contact quality (0-100)
    pub eye_contact: f32,

    /// Expression label derived from `expression_score`
    pub facial_expression: FacialExpression,

    /// Expression valence (0-100)
    pub expression_score: f32,

    /// Position of the primary face
    pub head_position: HeadPosition,
}

impl FrameResult {
    /// Result for a frame in which no face was found
    pub fn no_face() -> Self {
        Self {
            face_detected: false,
            eye_contact: 0.0,
            facial_expression: FacialExpression::Neutral,
            expression_score: 50.0,
            head_position: HeadPosition::Centered,
        }
    }
}

/// Vocal channel result for a single clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipResult {
    /// Estimated words per second
    pub speech_rate: f32,

    /// Mean fundamental frequency in Hz
    pub pitch: f32,

    /// RMS level in dBFS
    pub volume: f32,

    /// Unvoiced share of the clip (0.0-1.0)
    pub pause_ratio: f32,

    /// Harmonic clarity (0-100)
    pub clarity: f32,

    /// Whether `pitch` was measured rather than defaulted
    pub pitch_detected: bool,

    /// Clip length after resampling, in seconds
    pub duration_seconds: f32,

    /// Speech rate against its ideal range (0-100)
    pub speech_rate_score: f32,

    /// Pitch against its ideal range (0-100)
    pub pitch_score: f32,

    /// Volume against its ideal range (0-100)
    pub volume_score: f32,

    /// Pause ratio against its ideal range (0-100)
    pub pause_ratio_score: f32,

    /// Clarity used as-is (0-100)
    pub clarity_score: f32,

    /// Mean of the five sub-scores (0-100)
    pub total_score: f32,
}

/// Session summary of a frame sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualAggregate {
    /// Frames in which a face was found
    pub face_detected_frames: usize,

    /// Frames analyzed
    pub total_frames: usize,

    /// `face_detected_frames / total_frames` (0.0-1.0)
    pub face_coverage: f32,

    /// Mean eye contact over frames with a face; `None` when no face was seen
    pub avg_eye_contact: Option<f32>,

    /// Mean expression score over frames with a face; `None` when no face was seen
    pub avg_expression_score: Option<f32>,

    /// Most frequent expression among frames with a face
    pub common_expression: FacialExpression,

    /// Most frequent head position among frames with a face
    pub common_head_position: HeadPosition,
}

/// Session summary of a clip sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocalAggregate {
    /// Clips analyzed
    pub clip_count: usize,

    /// Mean words per second
    pub avg_speech_rate: f32,

    /// Mean pitch over clips with a measured pitch; `None` when there are none
    pub avg_pitch: Option<f32>,

    /// Share of clips with a measured pitch (0.0-1.0)
    pub pitch_coverage: f32,

    /// Mean volume in dBFS
    pub avg_volume: f32,

    /// Mean pause ratio (0.0-1.0)
    pub avg_pause_ratio: f32,

    /// Mean clarity (0-100)
    pub avg_clarity: f32,

    /// Mean total score (0-100)
    pub avg_total_score: f32,

    /// Cross-clip stability of rate, pitch and volume (0-100)
    pub consistency: f32,
}
