//! Pause ratio from voiced/silent intervals

use crate::analysis::range::clamp_ratio;
use crate::preprocessing::silence::SilenceDetector;

/// Unvoiced share of a clip, `None` for an empty clip
///
/// `1 - voiced / total`. A clip with no energy at all is entirely pause.
pub fn pause_ratio(samples: &[f32], detector: &SilenceDetector) -> Option<f32> {
    if samples.is_empty() {
        return None;
    }
    let voiced = detector.voiced_samples(samples);
    Some(clamp_ratio(1.0 - voiced as f32 / samples.len() as f32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (i as f32 * 250.0 * 2.0 * std::f32::consts::PI / 16_000.0).sin() * 0.4)
            .collect()
    }

    #[test]
    fn test_continuous_speech_has_no_pause() {
        assert_eq!(pause_ratio(&tone(16_000), &SilenceDetector::default()), Some(0.0));
    }

    #[test]
    fn test_half_silence() {
        let mut samples = tone(16_000);
        samples.extend(vec![0.0f32; 16_000]);
        let ratio = pause_ratio(&samples, &SilenceDetector::default()).unwrap();
        // Frames straddling the boundary count as voiced
        assert!(ratio > 0.4 && ratio < 0.5, "ratio {}", ratio);
    }

    #[test]
    fn test_silence_and_empty() {
        assert_eq!(pause_ratio(&[0.0f32; 8_000], &SilenceDetector::default()), Some(1.0));
        assert_eq!(pause_ratio(&[], &SilenceDetector::default()), None);
    }
}
