//! Speech rate from energy-envelope peaks
//!
//! Syllable nuclei carry most of the energy in speech, so local maxima of a
//! smoothed RMS envelope approximate syllables. Two syllables are counted as
//! one word.

use super::peaks::PeakPicker;
use crate::preprocessing::framing::{frame_rms, moving_average};

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Syllables per word assumed when converting syllable rate to word rate
const SYLLABLES_PER_WORD: f32 = 2.0;

/// Smoothed, max-normalized RMS envelope
///
/// # Arguments
///
/// * `samples` - Mono samples
/// * `frame_size` - RMS frame length
/// * `hop_size` - Hop between frames
/// * `smoothing` - Moving-average width
///
/// # Returns
///
/// One value per frame in [0, 1]; all zeros for silent input
pub fn energy_envelope(samples: &[f32], frame_size: usize, hop_size: usize, smoothing: usize) -> Vec<f32> {
    let smoothed = moving_average(&frame_rms(samples, frame_size, hop_size), smoothing);
    let max = smoothed.iter().copied().fold(0.0f32, f32::max);
    if max <= EPSILON {
        return vec![0.0; smoothed.len()];
    }
    smoothed.iter().map(|&v| v / max).collect()
}

/// Words per second, or `None` when fewer than two syllable peaks are found
///
/// `(peaks / duration) / 2`
pub fn estimate_speech_rate(envelope: &[f32], duration_seconds: f32, picker: &PeakPicker) -> Option<f32> {
    if duration_seconds <= 0.0 {
        return None;
    }

    let peaks = picker.pick(envelope);
    if peaks.len() < 2 {
        log::debug!("Only {} syllable peaks, speech rate not measurable", peaks.len());
        return None;
    }

    let syllables_per_second = peaks.len() as f32 / duration_seconds;
    Some(syllables_per_second / SYLLABLES_PER_WORD)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 200 Hz tone gated on for 100 ms every `period` seconds
    fn bursts(count: usize, period: f32, sample_rate: u32) -> Vec<f32> {
        let len = (count as f32 * period * sample_rate as f32) as usize;
        let burst = (0.1 * sample_rate as f32) as usize;
        let step = (period * sample_rate as f32) as usize;
        (0..len)
            .map(|i| {
                if i % step < burst {
                    (i as f32 * 200.0 * 2.0 * std::f32::consts::PI / sample_rate as f32).sin() * 0.5
                } else {
                    0.0
                }
            })
            .collect()
    }

    #[test]
    fn test_envelope_is_normalized() {
        let envelope = energy_envelope(&bursts(4, 0.25, 16_000), 1024, 256, 5);
        let max = envelope.iter().copied().fold(0.0f32, f32::max);
        assert!((max - 1.0).abs() < 1e-6);
        assert!(envelope.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_silence_has_no_rate() {
        let envelope = energy_envelope(&vec![0.0f32; 16_000], 1024, 256, 5);
        assert!(envelope.iter().all(|&v| v == 0.0));
        assert_eq!(estimate_speech_rate(&envelope, 1.0, &PeakPicker::default()), None);
    }

    #[test]
    fn test_burst_rate() {
        // 8 syllables in 2 seconds -> 2 words per second
        let samples = bursts(8, 0.25, 16_000);
        let envelope = energy_envelope(&samples, 1024, 256, 5);
        let rate = estimate_speech_rate(&envelope, 2.0, &PeakPicker::default()).unwrap();
        assert!((rate - 2.0).abs() <= 0.25, "rate {}", rate);
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(estimate_speech_rate(&[0.0, 1.0, 0.0], 0.0, &PeakPicker::default()), None);
    }
}
