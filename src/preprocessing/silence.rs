//! Voiced/silent interval splitting

use super::framing::{frame_count, frame_rms};

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Silence detection configuration
#[derive(Debug, Clone)]
pub struct SilenceDetector {
    /// Frames more than this many dB below the loudest frame are silent (default: 30.0)
    pub top_db: f32,

    /// Frame size for analysis (default: 1024)
    pub frame_size: usize,

    /// Hop between frames (default: 256)
    pub hop_size: usize,
}

impl Default for SilenceDetector {
    fn default() -> Self {
        Self {
            top_db: 30.0,
            frame_size: 1024,
            hop_size: 256,
        }
    }
}

impl SilenceDetector {
    /// Split a signal into voiced intervals
    ///
    /// Each sample is attributed to the frame whose hop it starts in; a frame is
    /// voiced when its RMS is within `top_db` of the loudest frame. Adjacent
    /// voiced hops are merged.
    ///
    /// # Returns
    ///
    /// Half-open `(start, end)` sample ranges, sorted by time. A signal with no
    /// energy at all has no voiced interval.
    pub fn voiced_intervals(&self, samples: &[f32]) -> Vec<(usize, usize)> {
        let energies = frame_rms(samples, self.frame_size, self.hop_size);
        let max_rms = energies.iter().copied().fold(0.0f32, f32::max);
        if max_rms <= EPSILON {
            log::debug!("No energy in {} samples, nothing voiced", samples.len());
            return Vec::new();
        }

        let num_frames = frame_count(samples.len(), self.frame_size, self.hop_size);
        let mut intervals: Vec<(usize, usize)> = Vec::new();

        for (i, &energy) in energies.iter().enumerate() {
            let level_db = 20.0 * (energy.max(EPSILON) / max_rms).log10();
            if level_db <= -self.top_db {
                continue;
            }

            let start = i * self.hop_size;
            let end = if i + 1 == num_frames {
                samples.len()
            } else {
                ((i + 1) * self.hop_size).min(samples.len())
            };

            match intervals.last_mut() {
                Some(last) if last.1 >= start => last.1 = end,
                _ => intervals.push((start, end)),
            }
        }

        log::debug!("Found {} voiced intervals", intervals.len());
        intervals
    }

    /// Total voiced length in samples
    pub fn voiced_samples(&self, samples: &[f32]) -> usize {
        self.voiced_intervals(samples)
            .iter()
            .map(|(start, end)| end - start)
            .sum()
    }
}
