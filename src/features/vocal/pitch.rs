//! Fundamental frequency estimation using YIN
//!
//! # Reference
//!
//! de Cheveigné, A., & Kawahara, H. (2002). YIN, a fundamental frequency
//! estimator for speech and music. *The Journal of the Acoustical Society of
//! America*, 111(4), 1917-1930.
//!
//! # Algorithm
//!
//! Per frame:
//! 1. Difference function `d(tau) = sum (x[j] - x[j + tau])^2`
//! 2. Cumulative mean normalized difference `d'(tau) = d(tau) * tau / sum_{k<=tau} d(k)`
//! 3. First `tau` in the lag band where `d'` dips under the threshold, walked
//!    down to its local minimum
//! 4. Parabolic interpolation around that minimum
//!
//! Frames more than `top_db` below the loudest frame are not analyzed.

use crate::preprocessing::framing::{frame_count, rms};

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// YIN pitch tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchTracker {
    /// Lowest fundamental considered, Hz
    pub min_hz: f32,
    /// Highest fundamental considered, Hz
    pub max_hz: f32,
    /// Absolute threshold on the normalized difference
    pub threshold: f32,
    /// Minimum analysis frame length (raised to fit two periods of `min_hz`)
    pub frame_size: usize,
    /// Hop between frames
    pub hop_size: usize,
    /// Frames quieter than the loudest by more than this are skipped
    pub top_db: f32,
}

impl Default for PitchTracker {
    fn default() -> Self {
        Self {
            min_hz: 65.4,
            max_hz: 2093.0,
            threshold: 0.15,
            frame_size: 1024,
            hop_size: 256,
            top_db: 30.0,
        }
    }
}

impl PitchTracker {
    /// Lag band `[tau_min, tau_max]` in samples
    fn lag_band(&self, sample_rate: u32) -> (usize, usize) {
        let sr = sample_rate as f32;
        let tau_min = ((sr / self.max_hz).floor() as usize).max(2);
        let tau_max = ((sr / self.min_hz).ceil() as usize).max(tau_min + 1);
        (tau_min, tau_max)
    }

    /// Pitch estimate of every voiced frame, in time order
    ///
    /// # Arguments
    ///
    /// * `samples` - Mono samples
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Returns
    ///
    /// Estimates in Hz; frames that are silent or aperiodic contribute nothing
    pub fn track(&self, samples: &[f32], sample_rate: u32) -> Vec<f32> {
        if sample_rate == 0 || self.hop_size == 0 || samples.is_empty() {
            return Vec::new();
        }

        let (tau_min, tau_max) = self.lag_band(sample_rate);
        let frame_len = self.frame_size.max(2 * tau_max + 1);
        if samples.len() < frame_len {
            log::debug!(
                "Clip of {} samples is shorter than one pitch frame ({})",
                samples.len(),
                frame_len
            );
            return Vec::new();
        }

        let num_frames = frame_count(samples.len(), frame_len, self.hop_size);
        let levels: Vec<f32> = (0..num_frames)
            .map(|i| rms(&samples[i * self.hop_size..i * self.hop_size + frame_len]))
            .collect();
        let loudest = levels.iter().copied().fold(0.0f32, f32::max);
        if loudest <= EPSILON {
            return Vec::new();
        }
        let gate = loudest * 10f32.powf(-self.top_db / 20.0);

        let mut estimates = Vec::new();
        for (i, &level) in levels.iter().enumerate() {
            if level < gate {
                continue;
            }
            let start = i * self.hop_size;
            let frame = &samples[start..start + frame_len];
            if let Some(f0) = yin(frame, sample_rate, tau_min, tau_max, self.threshold) {
                if f0 >= self.min_hz && f0 <= self.max_hz {
                    estimates.push(f0);
                }
            }
        }

        log::debug!(
            "Pitch: {} of {} frames voiced (band {}-{} samples)",
            estimates.len(),
            num_frames,
            tau_min,
            tau_max
        );
        estimates
    }

    /// Mean pitch over voiced frames, `None` when no frame is voiced
    pub fn mean_pitch(&self, samples: &[f32], sample_rate: u32) -> Option<f32> {
        let estimates = self.track(samples, sample_rate);
        if estimates.is_empty() {
            return None;
        }
        Some(estimates.iter().sum::<f32>() / estimates.len() as f32)
    }
}

/// YIN estimate for a single frame
///
/// `frame` must hold at least `2 * tau_max` samples.
fn yin(frame: &[f32], sample_rate: u32, tau_min: usize, tau_max: usize, threshold: f32) -> Option<f32> {
    let window = frame.len().checked_sub(tau_max)?;
    if window == 0 || tau_min >= tau_max {
        return None;
    }

    // Difference function
    let mut diff = vec![0.0f32; tau_max + 1];
    for (tau, d) in diff.iter_mut().enumerate().skip(1) {
        *d = (0..window)
            .map(|j| {
                let delta = frame[j] - frame[j + tau];
                delta * delta
            })
            .sum();
    }

    // Cumulative mean normalized difference
    let mut cmnd = vec![1.0f32; tau_max + 1];
    let mut running = 0.0f32;
    for tau in 1..=tau_max {
        running += diff[tau];
        cmnd[tau] = if running > EPSILON {
            diff[tau] * tau as f32 / running
        } else {
            1.0
        };
    }

    // Absolute threshold, then descend to the local minimum
    let mut tau = tau_min;
    let mut found = None;
    while tau < tau_max {
        if cmnd[tau] < threshold {
            while tau + 1 < tau_max && cmnd[tau + 1] < cmnd[tau] {
                tau += 1;
            }
            found = Some(tau);
            break;
        }
        tau += 1;
    }
    let tau = found?;

    // Parabolic interpolation
    let refined = if tau > 1 && tau < tau_max {
        let (s0, s1, s2) = (cmnd[tau - 1], cmnd[tau], cmnd[tau + 1]);
        let denom = s0 - 2.0 * s1 + s2;
        if denom.abs() > EPSILON {
            tau as f32 + 0.5 * (s0 - s2) / denom
        } else {
            tau as f32
        }
    } else {
        tau as f32
    };

    if refined <= 0.0 {
        return None;
    }
    Some(sample_rate as f32 / refined)
}
