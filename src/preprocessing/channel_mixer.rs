//! Channel mixing utilities (multi-channel to mono conversion)

use crate::error::ScoringError;

/// Convert interleaved multi-channel samples to mono by averaging channels
///
/// # Arguments
///
/// * `samples` - Interleaved samples (`[c0, c1, .., c0, c1, ..]`)
/// * `channels` - Number of interleaved channels
///
/// # Returns
///
/// Mono samples; a trailing partial frame is dropped
///
/// # Errors
///
/// Returns `ScoringError::InvalidInput` for zero channels
pub fn downmix_interleaved(samples: &[f32], channels: usize) -> Result<Vec<f32>, ScoringError> {
    if channels == 0 {
        return Err(ScoringError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }

    if channels == 1 {
        return Ok(samples.to_vec());
    }

    log::debug!("Downmixing {} samples from {} channels", samples.len(), channels);

    Ok(samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect())
}
