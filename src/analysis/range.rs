//! Range scoring
//!
//! Maps a raw measurement onto a 0-100 suitability score given the ideal
//! interval for that metric:
//!
//! - inside `[low, high]`: 100
//! - below `low`: linear ramp, 0 at a distance of `|low|` below the bound
//! - above `high`: linear decay, 0 once the overshoot equals `|high|`
//!
//! For positive bounds the ramp below the range reduces to `100 * value / low`.
//!
//! # Example
//!
//! ```
//! use interview_signals::analysis::range::score_in_range;
//! use interview_signals::IdealRange;
//!
//! let range = IdealRange::new(3.0, 5.0);
//! assert_eq!(score_in_range(4.0, &range, "speech_rate")?, 100.0);
//! assert_eq!(score_in_range(1.5, &range, "speech_rate")?, 50.0);
//! assert_eq!(score_in_range(7.5, &range, "speech_rate")?, 50.0);
//! # Ok::<(), interview_signals::ScoringError>(())
//! ```

use crate::config::IdealRange;
use crate::error::ScoringError;

/// Score `value` against `range`
///
/// # Arguments
///
/// * `value` - Raw measurement
/// * `range` - Ideal interval for the metric
/// * `metric` - Metric name, reported in configuration errors
///
/// # Errors
///
/// Returns `ScoringError::InvalidRange` when the range has a zero bound, is
/// inverted, or is not finite. That is a configuration defect, not a data
/// problem, so it is never silently absorbed.
pub fn score_in_range(value: f32, range: &IdealRange, metric: &str) -> Result<f32, ScoringError> {
    range.validate(metric)?;
    Ok(score_unchecked(value, range))
}

/// Score against a range that has already been validated
pub(crate) fn score_unchecked(value: f32, range: &IdealRange) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }

    let score = if value < range.low {
        100.0 * (1.0 - (range.low - value) / range.low.abs())
    } else if value > range.high {
        100.0 * (1.0 - (value - range.high) / range.high.abs())
    } else {
        100.0
    };

    clamp_score(score)
}

/// Clamp a score to [0, 100]; NaN maps to 0
pub fn clamp_score(score: f32) -> f32 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}

/// Clamp a ratio to [0, 1]; NaN maps to 0
pub fn clamp_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}
