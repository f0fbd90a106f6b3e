//! # Interview Signals
//!
//! A deterministic signal-to-score engine for interview answers. Each answer
//! is measured along three independent channels and reduced to comparable
//! 0-100 sub-scores:
//!
//! - **Text**: sentiment polarity, confidence from certainty/hedging markers,
//!   clarity from filler ratio, sentence length and vocabulary richness
//! - **Visual**: per-frame face detection, eye contact, expression valence and
//!   head position, aggregated over a session
//! - **Vocal**: per-clip speech rate, pitch, volume, pause ratio and harmonic
//!   clarity scored against ideal ranges, aggregated with cross-clip
//!   consistency
//!
//! Weighting the channels into a final score is left to the caller.
//!
//! ## Quick Start
//!
//! ```
//! use interview_signals::{AnswerSamples, EngineConfig, NoFaceDetector, SignalEngine};
//!
//! let engine = SignalEngine::new(EngineConfig::default(), Box::new(NoFaceDetector))?;
//!
//! let answer = AnswerSamples {
//!     text: Some("I am confident the cache layer cut our latency in half.".to_string()),
//!     ..AnswerSamples::default()
//! };
//! let scores = engine.score_answer(&answer);
//!
//! let text = scores.text.unwrap();
//! println!("confidence {:.0}, clarity {:.0}", text.confidence, text.clarity);
//! assert!(scores.visual.is_none());
//! # Ok::<(), interview_signals::ScoringError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Raw sample -> io (decode) -> preprocessing -> features (per channel) -> analysis (score, aggregate)
//! ```
//!
//! Per-sample results are produced once and never updated; session summaries
//! are recomputed from the complete batch.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use analysis::channels::{Channel, ChannelScores, SubScore};
pub use analysis::result::{
    ClipResult, FacialExpression, FrameResult, HeadPosition, SentimentScores, TextResult,
    VisualAggregate, VocalAggregate,
};
pub use config::{EngineConfig, IdealRange, TextConfig, VisualConfig, VocalConfig, VocalIdealRanges};
pub use error::ScoringError;
pub use features::text::TextAnalyzer;
pub use features::visual::{
    BoundingBox, FaceDetection, FaceDetector, Landmarks, NoFaceDetector, Point, VisualAnalyzer,
};
pub use features::vocal::VocalAnalyzer;

use analysis::aggregate::{aggregate_clips, aggregate_frames};

/// One raw sample, tagged with its channel
#[derive(Debug, Clone, PartialEq)]
pub enum RawSample {
    /// Answer text (UTF-8)
    Text(String),
    /// Encoded still frame (PNG, JPEG)
    Frame(Vec<u8>),
    /// Encoded audio clip (WAV, FLAC, Ogg/Vorbis, ...)
    Clip(Vec<u8>),
}

impl RawSample {
    /// Channel the sample belongs to
    pub fn channel(&self) -> Channel {
        match self {
            RawSample::Text(_) => Channel::Text,
            RawSample::Frame(_) => Channel::Visual,
            RawSample::Clip(_) => Channel::Vocal,
        }
    }
}

/// Result of analyzing one raw sample
#[derive(Debug, Clone, PartialEq)]
pub enum SampleResult {
    /// Text channel result
    Text(TextResult),
    /// Visual channel result
    Frame(FrameResult),
    /// Vocal channel result
    Clip(ClipResult),
}

/// All raw samples captured for one answer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSamples {
    /// Answer text; `None` when the text channel was not captured
    pub text: Option<String>,
    /// Encoded frames in capture order
    pub frames: Vec<Vec<u8>>,
    /// Encoded clips in capture order
    pub clips: Vec<Vec<u8>>,
}

/// One analyzer per channel, built from a single configuration
///
/// The engine is `Send + Sync`; share one instance across threads to analyze
/// samples in parallel.
#[derive(Debug)]
pub struct SignalEngine {
    text: TextAnalyzer,
    visual: VisualAnalyzer,
    vocal: VocalAnalyzer,
}

impl SignalEngine {
    /// Build the three channel analyzers
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidRange` or `ScoringError::InvalidInput` if
    /// the configuration cannot be used.
    pub fn new(config: EngineConfig, detector: Box<dyn FaceDetector>) -> Result<Self, ScoringError> {
        let EngineConfig { text, visual, vocal } = config;
        Ok(Self {
            text: TextAnalyzer::new(text)?,
            visual: VisualAnalyzer::new(visual, detector),
            vocal: VocalAnalyzer::new(vocal)?,
        })
    }

    /// Text analyzer
    pub fn text(&self) -> &TextAnalyzer {
        &self.text
    }

    /// Visual analyzer
    pub fn visual(&self) -> &VisualAnalyzer {
        &self.visual
    }

    /// Vocal analyzer
    pub fn vocal(&self) -> &VocalAnalyzer {
        &self.vocal
    }

    /// Analyze a single raw sample
    ///
    /// Returns `None` when a frame or clip cannot be decoded; the failure is
    /// logged and does not affect other samples.
    pub fn analyze_sample(&self, sample: &RawSample) -> Option<SampleResult> {
        match sample {
            RawSample::Text(text) => Some(SampleResult::Text(self.text.analyze(text))),
            RawSample::Frame(bytes) => self.visual.analyze_frame_bytes(bytes).map(SampleResult::Frame),
            RawSample::Clip(bytes) => self.vocal.analyze_clip_bytes(bytes).map(SampleResult::Clip),
        }
    }

    /// Analyze a mixed batch of samples into per-channel results
    ///
    /// Frames and clips are aggregated in the order given; undecodable ones
    /// are skipped. When the batch holds several texts they are analyzed as one
    /// answer, joined by blank lines.
    pub fn analyze_batch(&self, samples: &[RawSample]) -> ChannelScores {
        let mut texts: Vec<&str> = Vec::new();
        let mut frames: Vec<FrameResult> = Vec::new();
        let mut clips: Vec<ClipResult> = Vec::new();

        for sample in samples {
            match sample {
                RawSample::Text(text) => texts.push(text),
                other => match self.analyze_sample(other) {
                    Some(SampleResult::Frame(frame)) => frames.push(frame),
                    Some(SampleResult::Clip(clip)) => clips.push(clip),
                    Some(SampleResult::Text(_)) | None => {}
                },
            }
        }

        let text = if texts.is_empty() {
            None
        } else {
            Some(self.text.analyze(&texts.join("\n\n")))
        };

        ChannelScores {
            text,
            visual: aggregate_frames(&frames),
            vocal: aggregate_clips(&clips),
        }
    }

    /// Score every channel captured for one answer
    ///
    /// Channels without samples (or whose samples all failed to decode) are
    /// absent from the result.
    pub fn score_answer(&self, answer: &AnswerSamples) -> ChannelScores {
        let scores = ChannelScores {
            text: answer.text.as_deref().map(|text| self.text.analyze(text)),
            visual: self.visual.analyze_frames(&answer.frames),
            vocal: self.vocal.analyze_clips(&answer.clips),
        };
        log::debug!("Scored answer: channels {:?}", scores.present_channels());
        scores
    }
}
