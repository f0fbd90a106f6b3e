//! Error types for the scoring engine

use thiserror::Error;

/// Errors that can occur while configuring or running the engine
///
/// Missing signal (no face, no pitch, no syllable peaks) is never an error;
/// analyzers substitute documented defaults for it instead.
#[derive(Debug, Clone, Error)]
pub enum ScoringError {
    /// An ideal range that cannot be scored against (zero or inverted bounds)
    #[error("Invalid ideal range for {metric}: {reason}")]
    InvalidRange {
        /// Metric the range belongs to
        metric: String,
        /// What is wrong with it
        reason: String,
    },

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed base64, image or audio payload
    #[error("Decoding error: {0}")]
    DecodingError(String),

    /// Processing error during analysis
    #[error("Processing error: {0}")]
    ProcessingError(String),
}

impl ScoringError {
    pub(crate) fn invalid_range(metric: &str, reason: impl Into<String>) -> Self {
        ScoringError::InvalidRange {
            metric: metric.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error indicates a caller defect rather than bad sample data
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ScoringError::InvalidRange { .. } | ScoringError::InvalidInput(_)
        )
    }
}

impl From<base64::DecodeError> for ScoringError {
    fn from(err: base64::DecodeError) -> Self {
        ScoringError::DecodingError(format!("base64: {}", err))
    }
}

impl From<image::ImageError> for ScoringError {
    fn from(err: image::ImageError) -> Self {
        ScoringError::DecodingError(format!("image: {}", err))
    }
}

impl From<symphonia::core::errors::Error> for ScoringError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        ScoringError::DecodingError(format!("audio: {}", err))
    }
}
