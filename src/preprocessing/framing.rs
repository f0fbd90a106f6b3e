//! Short-time framing helpers

/// Number of analysis frames for a signal
///
/// Signals shorter than one frame still yield a single (short) frame so that
/// brief clips are measured rather than dropped.
pub fn frame_count(len: usize, frame_size: usize, hop_size: usize) -> usize {
    if len == 0 || frame_size == 0 || hop_size == 0 {
        return 0;
    }
    if len < frame_size {
        return 1;
    }
    (len - frame_size) / hop_size + 1
}

/// Root-mean-square energy per frame
///
/// # Arguments
///
/// * `samples` - Mono samples
/// * `frame_size` - Frame length in samples
/// * `hop_size` - Hop between frame starts
///
/// # Returns
///
/// One RMS value per frame (empty for empty input)
pub fn frame_rms(samples: &[f32], frame_size: usize, hop_size: usize) -> Vec<f32> {
    let num_frames = frame_count(samples.len(), frame_size, hop_size);
    let mut energies = Vec::with_capacity(num_frames);

    for i in 0..num_frames {
        let start = i * hop_size;
        let end = (start + frame_size).min(samples.len());
        let frame = &samples[start..end];
        let sum_sq: f32 = frame.iter().map(|&x| x * x).sum();
        energies.push((sum_sq / frame.len() as f32).sqrt());
    }

    energies
}

/// Root-mean-square level of a whole signal (0 for empty input)
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&x| (x as f64) * (x as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

/// Centered moving average with a `width`-tap box kernel
///
/// Samples beyond the signal count as zero and every output is divided by the
/// full `width`, as in a "same"-mode convolution with a normalized box. Edge
/// values are therefore pulled towards zero.
pub fn moving_average(values: &[f32], width: usize) -> Vec<f32> {
    if width <= 1 || values.is_empty() {
        return values.to_vec();
    }

    let half = width / 2;
    (0..values.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + width - half).min(values.len());
            values[start..end].iter().sum::<f32>() / width as f32
        })
        .collect()
}
