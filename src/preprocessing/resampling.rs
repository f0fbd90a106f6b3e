//! Resampling to the analysis rate

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::error::ScoringError;

/// Band-limited resampling of a mono waveform
///
/// # Arguments
///
/// * `input` - Mono samples
/// * `from_sample_rate` - Source rate in Hz
/// * `to_sample_rate` - Target rate in Hz
///
/// # Errors
///
/// `InvalidInput` for a zero rate, `ProcessingError` if the resampler fails
pub fn resample(
    input: &[f32],
    from_sample_rate: u32,
    to_sample_rate: u32,
) -> Result<Vec<f32>, ScoringError> {
    if from_sample_rate == 0 || to_sample_rate == 0 {
        return Err(ScoringError::InvalidInput(
            "Sample rates must be > 0".to_string(),
        ));
    }

    if input.is_empty() || from_sample_rate == to_sample_rate {
        return Ok(input.to_vec());
    }

    let ratio = to_sample_rate as f64 / from_sample_rate as f64;

    // Downsampling needs the steeper filter to keep speech harmonics from aliasing
    let (sinc_len, interpolation) = if ratio < 1.0 {
        (256, SincInterpolationType::Cubic)
    } else {
        (128, SincInterpolationType::Linear)
    };

    log::debug!(
        "Resampling {} samples: {} Hz -> {} Hz (ratio {:.3})",
        input.len(),
        from_sample_rate,
        to_sample_rate,
        ratio
    );

    let params = SincInterpolationParameters {
        sinc_len,
        f_cutoff: 0.95,
        interpolation,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, input.len(), 1)
        .map_err(|e| ScoringError::ProcessingError(format!("resampler setup: {}", e)))?;

    let waves_in = vec![input.to_vec()];
    let waves_out = resampler
        .process(&waves_in, None)
        .map_err(|e| ScoringError::ProcessingError(format!("resampling: {}", e)))?;

    waves_out
        .into_iter()
        .next()
        .ok_or_else(|| ScoringError::ProcessingError("resampler produced no channel".to_string()))
}
