//! Vocal channel analysis
//!
//! Per-clip pipeline on a mono waveform at the target rate:
//! - speech rate from energy-envelope peaks
//! - mean pitch from a YIN tracker
//! - RMS volume in dBFS
//! - pause ratio from voiced/silent intervals
//! - harmonic clarity from HPSS
//!
//! Speech rate, pitch, volume and pause ratio are scored against their ideal
//! ranges; clarity is already a 0-100 score. The total is the mean of the
//! five sub-scores. Metrics that cannot be measured take the configured
//! defaults.

pub mod clarity;
pub mod pauses;
pub mod peaks;
pub mod pitch;
pub mod speech_rate;
pub mod volume;

use crate::analysis::aggregate::aggregate_clips;
use crate::analysis::range::{clamp_ratio, clamp_score, score_unchecked};
use crate::analysis::result::{ClipResult, VocalAggregate};
use crate::config::VocalConfig;
use crate::error::ScoringError;
use crate::io::decoder::{decode_audio_at, Waveform};
use crate::io::payload::decode_base64_payload;
use crate::preprocessing::resampling::resample;
use crate::preprocessing::silence::SilenceDetector;

use clarity::harmonic_clarity;
use pauses::pause_ratio;
use peaks::PeakPicker;
use pitch::PitchTracker;
use speech_rate::{energy_envelope, estimate_speech_rate};
use volume::volume_db;

/// Clip analyzer
#[derive(Debug, Clone)]
pub struct VocalAnalyzer {
    config: VocalConfig,
    peaks: PeakPicker,
    pitch: PitchTracker,
    silence: SilenceDetector,
}

impl VocalAnalyzer {
    /// Create an analyzer
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidRange` for an unusable ideal range and
    /// `ScoringError::InvalidInput` for zero rates or frame sizes.
    pub fn new(config: VocalConfig) -> Result<Self, ScoringError> {
        config.validate()?;

        let peaks = PeakPicker {
            pre_max: config.pre_max,
            post_max: config.post_max,
            pre_avg: config.pre_avg,
            post_avg: config.post_avg,
            delta: config.peak_delta,
            wait: config.peak_wait,
        };
        let pitch = PitchTracker {
            min_hz: config.min_pitch_hz,
            max_hz: config.max_pitch_hz,
            threshold: config.yin_threshold,
            frame_size: config.frame_size,
            hop_size: config.hop_size,
            top_db: config.top_db,
        };
        let silence = SilenceDetector {
            top_db: config.top_db,
            frame_size: config.frame_size,
            hop_size: config.hop_size,
        };

        Ok(Self {
            config,
            peaks,
            pitch,
            silence,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &VocalConfig {
        &self.config
    }

    /// Analyze mono samples at the target rate
    pub fn analyze_samples(&self, samples: &[f32]) -> ClipResult {
        let config = &self.config;
        let sample_rate = config.target_sample_rate;
        let duration_seconds = samples.len() as f32 / sample_rate as f32;

        let envelope = energy_envelope(samples, config.frame_size, config.hop_size, config.envelope_smoothing);
        let speech_rate = estimate_speech_rate(&envelope, duration_seconds, &self.peaks)
            .unwrap_or(config.default_speech_rate);

        let measured_pitch = self.pitch.mean_pitch(samples, sample_rate);
        if measured_pitch.is_none() && !samples.is_empty() {
            log::warn!("No pitch found in {:.2}s clip, using {} Hz", duration_seconds, config.default_pitch_hz);
        }
        let pitch = measured_pitch.unwrap_or(config.default_pitch_hz);

        let volume = volume_db(samples).unwrap_or(config.default_volume_db);

        let pause = pause_ratio(samples, &self.silence).unwrap_or(config.default_pause_ratio);

        let clarity = match harmonic_clarity(samples, config.frame_size, config.hop_size, config.hpss_kernel) {
            Some(clarity) => clarity,
            None => {
                log::warn!("Harmonic clarity not measurable, using {}", config.default_clarity);
                config.default_clarity
            }
        };

        let ranges = &config.ideal_ranges;
        let speech_rate_score = score_unchecked(speech_rate, &ranges.speech_rate);
        let pitch_score = score_unchecked(pitch, &ranges.pitch);
        let volume_score = score_unchecked(volume, &ranges.volume);
        let pause_ratio_score = score_unchecked(pause, &ranges.pause_ratio);
        let clarity_score = clamp_score(clarity);

        let total_score = clamp_score(
            (speech_rate_score + pitch_score + volume_score + pause_ratio_score + clarity_score) / 5.0,
        );

        log::debug!(
            "Clip {:.2}s: rate={:.2} w/s, pitch={:.1} Hz, volume={:.1} dB, pause={:.2}, clarity={:.1}, total={:.1}",
            duration_seconds,
            speech_rate,
            pitch,
            volume,
            pause,
            clarity,
            total_score
        );

        ClipResult {
            speech_rate,
            pitch,
            volume,
            pause_ratio: clamp_ratio(pause),
            clarity: clarity_score,
            pitch_detected: measured_pitch.is_some(),
            duration_seconds,
            speech_rate_score,
            pitch_score,
            volume_score,
            pause_ratio_score,
            clarity_score,
            total_score,
        }
    }

    /// Analyze a decoded waveform, resampling it to the target rate if needed
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::ProcessingError` if resampling fails and
    /// `ScoringError::InvalidInput` for a zero sample rate.
    pub fn analyze_waveform(&self, waveform: &Waveform) -> Result<ClipResult, ScoringError> {
        let target = self.config.target_sample_rate;
        if waveform.sample_rate == target {
            return Ok(self.analyze_samples(&waveform.samples));
        }
        let samples = resample(&waveform.samples, waveform.sample_rate, target)?;
        Ok(self.analyze_samples(&samples))
    }

    /// Decode and analyze an encoded clip
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::DecodingError` for malformed clips
    pub fn try_analyze_clip_bytes(&self, bytes: &[u8]) -> Result<ClipResult, ScoringError> {
        let waveform = decode_audio_at(bytes, self.config.target_sample_rate)?;
        Ok(self.analyze_samples(&waveform.samples))
    }

    /// Decode and analyze an encoded clip, `None` if it cannot be decoded
    pub fn analyze_clip_bytes(&self, bytes: &[u8]) -> Option<ClipResult> {
        match self.try_analyze_clip_bytes(bytes) {
            Ok(result) => Some(result),
            Err(e) => {
                log::warn!("Skipping clip: {}", e);
                None
            }
        }
    }

    /// Analyze a base64 clip (optionally a `data:` URL), `None` if it cannot be decoded
    pub fn analyze_clip_base64(&self, payload: &str) -> Option<ClipResult> {
        match decode_base64_payload(payload).and_then(|bytes| self.try_analyze_clip_bytes(&bytes)) {
            Ok(result) => Some(result),
            Err(e) => {
                log::warn!("Skipping clip: {}", e);
                None
            }
        }
    }

    /// Analyze a batch of encoded clips and aggregate them
    ///
    /// Clips that cannot be decoded are skipped. Returns `None` when no clip
    /// could be analyzed.
    pub fn analyze_clips<B: AsRef<[u8]>>(&self, clips: &[B]) -> Option<VocalAggregate> {
        let results: Vec<ClipResult> = clips
            .iter()
            .filter_map(|bytes| self.analyze_clip_bytes(bytes.as_ref()))
            .collect();
        if results.len() < clips.len() {
            log::warn!("{} of {} clips could not be decoded", clips.len() - results.len(), clips.len());
        }
        aggregate_clips(&results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdealRange;

    fn analyzer() -> VocalAnalyzer {
        VocalAnalyzer::new(VocalConfig::default()).unwrap()
    }

    fn tone(freq: f32, seconds: f32, amplitude: f32) -> Vec<f32> {
        let len = (seconds * 16_000.0) as usize;
        (0..len)
            .map(|i| (i as f32 * freq * 2.0 * std::f32::consts::PI / 16_000.0).sin() * amplitude)
            .collect()
    }

    #[test]
    fn test_invalid_range_rejected_at_construction() {
        let mut config = VocalConfig::default();
        config.ideal_ranges.pause_ratio = IdealRange::new(0.0, 0.3);
        let err = VocalAnalyzer::new(config).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidRange { .. }));
    }

    #[test]
    fn test_empty_clip_uses_defaults() {
        let result = analyzer().analyze_samples(&[]);
        assert_eq!(result.speech_rate, 3.5);
        assert_eq!(result.pitch, 150.0);
        assert!(!result.pitch_detected);
        assert_eq!(result.volume, -30.0);
        assert_eq!(result.pause_ratio, 0.2);
        assert_eq!(result.clarity, 75.0);
        assert_eq!(result.duration_seconds, 0.0);
    }

    #[test]
    fn test_silent_clip() {
        let result = analyzer().analyze_samples(&vec![0.0f32; 16_000]);
        assert_eq!(result.volume, -30.0);
        assert_eq!(result.pause_ratio, 1.0);
        assert!(!result.pitch_detected);
        assert_eq!(result.speech_rate, 3.5);
        assert!((0.0..=100.0).contains(&result.total_score));
    }

    #[test]
    fn test_steady_tone() {
        let result = analyzer().analyze_samples(&tone(180.0, 1.0, 0.2));
        assert!(result.pitch_detected);
        assert!((result.pitch - 180.0).abs() < 3.0, "pitch {}", result.pitch);
        assert_eq!(result.pitch_score, 100.0);
        // 0.2 amplitude sine: about -17 dBFS
        assert!((result.volume + 16.99).abs() < 0.1, "volume {}", result.volume);
        assert_eq!(result.volume_score, 100.0);
        assert_eq!(result.pause_ratio, 0.0);
        assert_eq!(result.pause_ratio_score, 0.0);
        assert!(result.clarity > 80.0);
    }

    #[test]
    fn test_total_is_mean_of_sub_scores() {
        let result = analyzer().analyze_samples(&tone(300.0, 0.5, 0.3));
        let mean = (result.speech_rate_score
            + result.pitch_score
            + result.volume_score
            + result.pause_ratio_score
            + result.clarity_score)
            / 5.0;
        assert!((result.total_score - mean).abs() < 1e-4);
        for score in [
            result.speech_rate_score,
            result.pitch_score,
            result.volume_score,
            result.pause_ratio_score,
            result.clarity_score,
        ] {
            assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn test_waveform_is_resampled() {
        let waveform = Waveform {
            samples: (0..8_000)
                .map(|i| (i as f32 * 180.0 * 2.0 * std::f32::consts::PI / 8_000.0).sin() * 0.2)
                .collect(),
            sample_rate: 8_000,
        };
        let result = analyzer().analyze_waveform(&waveform).unwrap();
        assert!((result.duration_seconds - 1.0).abs() < 0.05);
        assert!((result.pitch - 180.0).abs() < 3.0, "pitch {}", result.pitch);
    }

    fn wav(samples: &[f32]) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample((s * 32_767.0) as i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_base64_wav_clip() {
        use base64::Engine as _;
        let encoded = base64::engine::general_purpose::STANDARD.encode(wav(&tone(180.0, 0.5, 0.2)));

        let analyzer = analyzer();
        for payload in [format!("data:audio/wav;base64,{}", encoded), encoded] {
            let result = analyzer.analyze_clip_base64(&payload).expect("clip decodes");
            assert!((result.duration_seconds - 0.5).abs() < 0.01);
            assert!(result.pitch_detected);
            assert!((result.pitch - 180.0).abs() < 3.0, "pitch {}", result.pitch);
        }
    }

    #[test]
    fn test_undecodable_clips_skipped() {
        let analyzer = analyzer();
        assert!(analyzer.analyze_clip_bytes(b"garbage").is_none());
        assert!(analyzer.analyze_clip_base64("data:audio/wav;base64,!!").is_none());
        let clips: [&[u8]; 1] = [b"garbage"];
        assert!(analyzer.analyze_clips(&clips).is_none());
    }
}
