//! Configuration parameters for the three channel analyzers
//!
//! Configuration is an immutable value handed to each analyzer at
//! construction. Nothing here is read from global state.

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Closed interval within which a raw metric earns full marks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    /// Lower bound (inclusive)
    pub low: f32,
    /// Upper bound (inclusive)
    pub high: f32,
}

impl IdealRange {
    /// Create a range; validity is checked when it is scored against
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Check that the range can be scored against
    ///
    /// Both bounds are used as divisors by the range scorer, so a zero bound
    /// is rejected along with inverted or non-finite ranges.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidRange` naming `metric`.
    pub fn validate(&self, metric: &str) -> Result<(), ScoringError> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(ScoringError::invalid_range(metric, "bounds must be finite"));
        }
        if self.low == 0.0 {
            return Err(ScoringError::invalid_range(metric, "low bound is zero"));
        }
        if self.high == 0.0 {
            return Err(ScoringError::invalid_range(metric, "high bound is zero"));
        }
        if self.low > self.high {
            return Err(ScoringError::invalid_range(
                metric,
                format!("low ({}) exceeds high ({})", self.low, self.high),
            ));
        }
        Ok(())
    }

    /// Whether `value` lies inside the closed interval
    pub fn contains(&self, value: f32) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Ideal ranges for the four range-scored vocal metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VocalIdealRanges {
    /// Words per second (default: 3-5)
    pub speech_rate: IdealRange,
    /// Mean fundamental frequency in Hz (default: 85-255)
    pub pitch: IdealRange,
    /// RMS level in dBFS (default: -20 to -5)
    pub volume: IdealRange,
    /// Unvoiced share of the clip (default: 0.1-0.3)
    pub pause_ratio: IdealRange,
}

impl Default for VocalIdealRanges {
    fn default() -> Self {
        Self {
            speech_rate: IdealRange::new(3.0, 5.0),
            pitch: IdealRange::new(85.0, 255.0),
            volume: IdealRange::new(-20.0, -5.0),
            pause_ratio: IdealRange::new(0.1, 0.3),
        }
    }
}

impl VocalIdealRanges {
    /// Validate every range, reporting the first bad one
    pub fn validate(&self) -> Result<(), ScoringError> {
        self.speech_rate.validate("speech_rate")?;
        self.pitch.validate("pitch")?;
        self.volume.validate("volume")?;
        self.pause_ratio.validate("pause_ratio")?;
        Ok(())
    }
}

/// Vocal analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocalConfig {
    // Decoding
    /// Rate every clip is resampled to before analysis (default: 16000)
    pub target_sample_rate: u32,

    // Framing
    /// Analysis frame length in samples (default: 1024)
    pub frame_size: usize,

    /// Hop between frames in samples (default: 256)
    pub hop_size: usize,

    // Speech rate
    /// Moving-average width applied to the energy envelope (default: 5)
    pub envelope_smoothing: usize,

    /// Frames before a candidate that it must dominate (default: 3)
    pub pre_max: usize,

    /// Frames after a candidate that it must dominate (default: 3)
    pub post_max: usize,

    /// Frames before a candidate used for the local mean (default: 3)
    pub pre_avg: usize,

    /// Frames after a candidate used for the local mean (default: 3)
    pub post_avg: usize,

    /// Height above the local mean on the max-normalized envelope (default: 0.05)
    pub peak_delta: f32,

    /// Minimum frames between accepted peaks (default: 5)
    pub peak_wait: usize,

    // Pitch
    /// Lowest fundamental considered, Hz (default: 65.4, C2)
    pub min_pitch_hz: f32,

    /// Highest fundamental considered, Hz (default: 2093.0, C7)
    pub max_pitch_hz: f32,

    /// YIN absolute threshold on the normalized difference (default: 0.15)
    pub yin_threshold: f32,

    // Pauses
    /// Frames quieter than the loudest frame by more than this are silent (default: 30.0)
    pub top_db: f32,

    // Clarity
    /// Median filter length for harmonic/percussive separation (default: 31)
    pub hpss_kernel: usize,

    // Scoring
    /// Ideal ranges for range-scored metrics
    pub ideal_ranges: VocalIdealRanges,

    // Defaults substituted when a metric cannot be measured
    /// Words per second reported when fewer than two syllable peaks are found (default: 3.5)
    pub default_speech_rate: f32,

    /// Pitch reported when no frame yields an estimate (default: 150.0)
    pub default_pitch_hz: f32,

    /// Volume reported for near-silent clips (default: -30.0)
    pub default_volume_db: f32,

    /// Pause ratio reported for zero-length clips (default: 0.2)
    pub default_pause_ratio: f32,

    /// Clarity reported when separation fails (default: 75.0)
    pub default_clarity: f32,
}

impl Default for VocalConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: 16_000,
            frame_size: 1024,
            hop_size: 256,
            envelope_smoothing: 5,
            pre_max: 3,
            post_max: 3,
            pre_avg: 3,
            post_avg: 3,
            peak_delta: 0.05,
            peak_wait: 5,
            min_pitch_hz: 65.4,
            max_pitch_hz: 2093.0,
            yin_threshold: 0.15,
            top_db: 30.0,
            hpss_kernel: 31,
            ideal_ranges: VocalIdealRanges::default(),
            default_speech_rate: 3.5,
            default_pitch_hz: 150.0,
            default_volume_db: -30.0,
            default_pause_ratio: 0.2,
            default_clarity: 75.0,
        }
    }
}

impl VocalConfig {
    /// Validate framing parameters and ideal ranges
    ///
    /// # Errors
    ///
    /// `InvalidInput` for zero rates or frame sizes, `InvalidRange` for bad
    /// ideal ranges.
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.target_sample_rate == 0 {
            return Err(ScoringError::InvalidInput(
                "Target sample rate must be > 0".to_string(),
            ));
        }
        if self.frame_size == 0 || self.hop_size == 0 {
            return Err(ScoringError::InvalidInput(
                "Frame and hop size must be > 0".to_string(),
            ));
        }
        if self.min_pitch_hz <= 0.0 || self.max_pitch_hz <= self.min_pitch_hz {
            return Err(ScoringError::InvalidInput(format!(
                "Pitch band {}-{} Hz is empty",
                self.min_pitch_hz, self.max_pitch_hz
            )));
        }
        self.ideal_ranges.validate()
    }
}

/// Visual analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Equalize the intensity histogram before detection (default: true)
    pub equalize_histogram: bool,

    /// Mouth aspect ratio above which the mouth counts as open (default: 0.3)
    pub mouth_open_ratio: f32,

    /// Mouth aspect ratio below which the mouth counts as closed (default: 0.15)
    pub mouth_closed_ratio: f32,

    /// Eyebrow-to-eye ratio below which brows count as raised (default: -0.1)
    pub brow_raised_ratio: f32,

    /// Eyebrow-to-eye ratio above which brows count as lowered (default: 0.05)
    pub brow_lowered_ratio: f32,

    /// Expression score for an open mouth or raised brows (default: 80)
    pub expressive_score: f32,

    /// Expression score for a resting face (default: 50)
    pub resting_score: f32,

    /// Expression score for a closed mouth under lowered brows (default: 30)
    pub subdued_score: f32,

    /// Normalized offset under which the head is centered (default: 0.1)
    pub centered_band: f32,

    /// Normalized offset under which the head is slightly off-center (default: 0.2)
    pub slightly_off_band: f32,

    /// Eye contact with two eyes found inside the face (default: 80)
    pub two_eyes_score: f32,

    /// Eye contact with one eye found (default: 50)
    pub one_eye_score: f32,

    /// Eye contact with no eye found (default: 20)
    pub no_eye_score: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            equalize_histogram: true,
            mouth_open_ratio: 0.3,
            mouth_closed_ratio: 0.15,
            brow_raised_ratio: -0.1,
            brow_lowered_ratio: 0.05,
            expressive_score: 80.0,
            resting_score: 50.0,
            subdued_score: 30.0,
            centered_band: 0.1,
            slightly_off_band: 0.2,
            two_eyes_score: 80.0,
            one_eye_score: 50.0,
            no_eye_score: 20.0,
        }
    }
}

/// Text analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Points per marker per hundred words (default: 10.0)
    pub marker_weight: f32,

    /// Cap on the positive and on the negative marker contribution (default: 40.0)
    pub marker_cap: f32,

    /// Number of keywords reported (default: 10)
    pub keyword_count: usize,

    /// Extra confidence-raising phrases on top of the built-in set
    pub extra_positive_markers: Vec<String>,

    /// Extra hedging phrases on top of the built-in set
    pub extra_negative_markers: Vec<String>,

    /// Extra filler words or phrases on top of the built-in set
    pub extra_fillers: Vec<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            marker_weight: 10.0,
            marker_cap: 40.0,
            keyword_count: 10,
            extra_positive_markers: Vec::new(),
            extra_negative_markers: Vec::new(),
            extra_fillers: Vec::new(),
        }
    }
}

/// Configuration for all three channels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Text channel
    pub text: TextConfig,
    /// Visual channel
    pub visual: VisualConfig,
    /// Vocal channel
    pub vocal: VocalConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges_are_valid() {
        assert!(VocalIdealRanges::default().validate().is_ok());
        assert!(VocalConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_low_bound_rejected() {
        let range = IdealRange::new(0.0, 1.0);
        match range.validate("pause_ratio") {
            Err(ScoringError::InvalidRange { metric, .. }) => assert_eq!(metric, "pause_ratio"),
            other => panic!("expected InvalidRange, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(IdealRange::new(5.0, 3.0).validate("speech_rate").is_err());
        assert!(IdealRange::new(f32::NAN, 3.0).validate("speech_rate").is_err());
    }

    #[test]
    fn test_zero_hop_rejected() {
        let config = VocalConfig {
            hop_size: 0,
            ..VocalConfig::default()
        };
        assert!(matches!(config.validate(), Err(ScoringError::InvalidInput(_))));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: VocalConfig = serde_json::from_str(r#"{"target_sample_rate": 22050}"#).unwrap();
        assert_eq!(config.target_sample_rate, 22050);
        assert_eq!(config.hop_size, 256);
        assert_eq!(config.ideal_ranges, VocalIdealRanges::default());
    }
}
