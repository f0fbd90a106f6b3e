//! Harmonic clarity via harmonic-percussive source separation (HPSS)
//!
//! # Reference
//!
//! Fitzgerald, D. (2010). Harmonic/percussive separation using median
//! filtering. *Proceedings of the 13th International Conference on Digital
//! Audio Effects (DAFx-10)*.
//!
//! # Algorithm
//!
//! 1. Magnitude STFT (Hann window)
//! 2. Median filter along time (harmonic estimate) and along frequency
//!    (percussive estimate)
//! 3. Soft Wiener masks with power 2
//! 4. `hnr_db = 10 * log10(E_harmonic / E_percussive)`
//! 5. `clarity = clamp((hnr_db + 5) * 4, 0, 100)`
//!
//! Median windows are clipped at the spectrogram edges.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::analysis::range::clamp_score;
use crate::preprocessing::framing::frame_count;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-10;

/// Magnitude spectrogram, indexed `[frame][bin]`
///
/// The last frame is zero-padded, so any non-empty signal yields at least one
/// frame.
///
/// # Arguments
///
/// * `samples` - Mono samples
/// * `fft_size` - Frame and FFT length
/// * `hop_size` - Hop between frames
pub fn magnitude_spectrogram(samples: &[f32], fft_size: usize, hop_size: usize) -> Vec<Vec<f32>> {
    let num_frames = frame_count(samples.len(), fft_size, hop_size);
    if num_frames == 0 {
        return Vec::new();
    }

    let window: Vec<f32> = (0..fft_size)
        .map(|i| {
            if fft_size > 1 {
                let t = 2.0 * std::f32::consts::PI * i as f32 / (fft_size - 1) as f32;
                0.5 * (1.0 - t.cos())
            } else {
                1.0
            }
        })
        .collect();

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(fft_size);
    let num_bins = fft_size / 2 + 1;

    let mut spectrogram = Vec::with_capacity(num_frames);
    let mut buffer = vec![Complex::new(0.0f32, 0.0); fft_size];
    for frame_idx in 0..num_frames {
        let start = frame_idx * hop_size;
        for (i, slot) in buffer.iter_mut().enumerate() {
            let sample = samples.get(start + i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * window[i], 0.0);
        }
        fft.process(&mut buffer);
        spectrogram.push(buffer[..num_bins].iter().map(|c| c.norm()).collect());
    }

    spectrogram
}

/// Median of a scratch buffer (reordered in place)
fn median(values: &mut [f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mid = values.len() / 2;
    let (_, m, _) = values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
    *m
}

/// Split a magnitude spectrogram into harmonic and percussive energy
///
/// # Returns
///
/// `(harmonic_energy, percussive_energy)` as sums of squared masked magnitudes
pub fn hpss_energies(spectrogram: &[Vec<f32>], kernel: usize) -> (f64, f64) {
    let num_frames = spectrogram.len();
    if num_frames == 0 {
        return (0.0, 0.0);
    }
    let num_bins = spectrogram[0].len();
    let half = kernel.max(1) / 2;
    let mut scratch: Vec<f32> = Vec::with_capacity(2 * half + 1);

    let mut harmonic_energy = 0.0f64;
    let mut percussive_energy = 0.0f64;

    for t in 0..num_frames {
        for k in 0..num_bins {
            let magnitude = spectrogram[t][k];
            if magnitude <= EPSILON {
                continue;
            }

            // Along time
            scratch.clear();
            let (t0, t1) = (t.saturating_sub(half), (t + half + 1).min(num_frames));
            scratch.extend((t0..t1).map(|i| spectrogram[i][k]));
            let h = median(&mut scratch);

            // Along frequency
            scratch.clear();
            let (k0, k1) = (k.saturating_sub(half), (k + half + 1).min(num_bins));
            scratch.extend_from_slice(&spectrogram[t][k0..k1]);
            let p = median(&mut scratch);

            let (h2, p2) = (h * h, p * p);
            let mask_h = if h2 + p2 > EPSILON { h2 / (h2 + p2) } else { 0.5 };
            let mask_p = 1.0 - mask_h;

            let mag2 = (magnitude * magnitude) as f64;
            harmonic_energy += mag2 * (mask_h * mask_h) as f64;
            percussive_energy += mag2 * (mask_p * mask_p) as f64;
        }
    }

    (harmonic_energy, percussive_energy)
}

/// Harmonic clarity (0-100), `None` when it cannot be measured
///
/// Not measurable means an empty clip or one with no percussive energy to
/// compare against.
pub fn harmonic_clarity(samples: &[f32], fft_size: usize, hop_size: usize, kernel: usize) -> Option<f32> {
    let spectrogram = magnitude_spectrogram(samples, fft_size, hop_size);
    let (harmonic, percussive) = hpss_energies(&spectrogram, kernel);

    if percussive <= EPSILON as f64 {
        log::debug!("No percussive energy in {} frames", spectrogram.len());
        return None;
    }
    if harmonic <= EPSILON as f64 {
        return Some(0.0);
    }

    let hnr_db = 10.0 * (harmonic / percussive).log10() as f32;
    log::debug!(
        "HPSS: harmonic={:.3e}, percussive={:.3e}, hnr={:.2} dB",
        harmonic,
        percussive,
        hnr_db
    );
    Some(clamp_score((hnr_db + 5.0) * 4.0))
}
