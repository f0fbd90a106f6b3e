//! Loudness in dBFS

use crate::preprocessing::framing::rms;

/// RMS level below which a clip counts as silent
const SILENCE_RMS: f32 = 1e-10;

/// RMS level of `samples` in dBFS, `None` for silent input
///
/// `20 * log10(rms)`; a full-scale sine reads about -3 dB.
pub fn volume_db(samples: &[f32]) -> Option<f32> {
    let level = rms(samples);
    if level <= SILENCE_RMS {
        return None;
    }
    Some(20.0 * level.log10())
}
