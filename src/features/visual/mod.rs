//! Visual channel analysis
//!
//! Per-frame pipeline:
//! 1. Decode the frame to an intensity grid (optionally histogram-equalized)
//! 2. Detect faces through the configured [`FaceDetector`]
//! 3. Score expression and eye contact from whatever evidence the primary
//!    face carries, and classify its head position
//!
//! Evidence is used in this order of preference:
//!
//! | Measure       | Preferred            | Fallback            | Last resort         |
//! |---------------|----------------------|---------------------|---------------------|
//! | expression    | landmarks            | confidence x 100    | resting score       |
//! | eye contact   | eye coordinates      | eye count 80/50/20  | no-eye score (20)   |
//!
//! A bounding box alone is no evidence of gaze, so a face without eye
//! coordinates or an eye count scores as if no eye was found.

pub mod detector;
pub mod expression;
pub mod gaze;
#[cfg(feature = "seeta")]
pub mod seeta;

use image::GrayImage;

use crate::analysis::aggregate::aggregate_frames;
use crate::analysis::range::clamp_score;
use crate::analysis::result::{FacialExpression, FrameResult, VisualAggregate};
use crate::config::VisualConfig;
use crate::error::ScoringError;
use crate::io::frame::decode_frame;
use crate::io::payload::decode_base64_payload;
use crate::preprocessing::equalize::equalize_histogram;

pub use detector::{BoundingBox, FaceDetection, FaceDetector, Landmarks, NoFaceDetector, Point};

use expression::{expression_from_confidence, expression_from_landmarks};
use gaze::{eye_contact_from_count, eye_contact_from_eyes, head_position};

/// Frame analyzer bound to one detection backend
pub struct VisualAnalyzer {
    config: VisualConfig,
    detector: Box<dyn FaceDetector>,
}

impl std::fmt::Debug for VisualAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualAnalyzer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl VisualAnalyzer {
    /// Create an analyzer
    pub fn new(config: VisualConfig, detector: Box<dyn FaceDetector>) -> Self {
        Self { config, detector }
    }

    /// Configuration in use
    pub fn config(&self) -> &VisualConfig {
        &self.config
    }

    /// Analyze a decoded frame
    pub fn analyze_frame(&self, frame: &GrayImage) -> FrameResult {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return FrameResult::no_face();
        }

        let detections = if self.config.equalize_histogram {
            self.detector.detect(&equalize_histogram(frame))
        } else {
            self.detector.detect(frame)
        };

        let face = match detections.first() {
            Some(face) => face,
            None => {
                log::debug!("No face in {}x{} frame", width, height);
                return FrameResult::no_face();
            }
        };
        if detections.len() > 1 {
            log::debug!("{} faces found, using the first", detections.len());
        }

        let expression_score = self.expression_score(face);
        let eye_contact = self.eye_contact(face, width, height);
        let position = head_position(&face.bbox, width, height, &self.config);

        FrameResult {
            face_detected: true,
            eye_contact,
            facial_expression: FacialExpression::from_score(expression_score),
            expression_score,
            head_position: position,
        }
    }

    /// Decode and analyze an encoded frame
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::DecodingError` for unreadable images
    pub fn try_analyze_frame_bytes(&self, bytes: &[u8]) -> Result<FrameResult, ScoringError> {
        let frame = decode_frame(bytes)?;
        Ok(self.analyze_frame(&frame))
    }

    /// Decode and analyze an encoded frame, `None` if it cannot be decoded
    pub fn analyze_frame_bytes(&self, bytes: &[u8]) -> Option<FrameResult> {
        match self.try_analyze_frame_bytes(bytes) {
            Ok(result) => Some(result),
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                None
            }
        }
    }

    /// Analyze a base64 frame (optionally a `data:` URL), `None` if it cannot be decoded
    pub fn analyze_frame_base64(&self, payload: &str) -> Option<FrameResult> {
        match decode_base64_payload(payload).and_then(|bytes| self.try_analyze_frame_bytes(&bytes)) {
            Ok(result) => Some(result),
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                None
            }
        }
    }

    /// Analyze a batch of encoded frames and aggregate them
    ///
    /// Frames that cannot be decoded are skipped. Returns `None` when no frame
    /// could be analyzed.
    pub fn analyze_frames<B: AsRef<[u8]>>(&self, frames: &[B]) -> Option<VisualAggregate> {
        let results: Vec<FrameResult> = frames
            .iter()
            .filter_map(|bytes| self.analyze_frame_bytes(bytes.as_ref()))
            .collect();
        if results.len() < frames.len() {
            log::warn!("{} of {} frames could not be decoded", frames.len() - results.len(), frames.len());
        }
        aggregate_frames(&results)
    }

    fn expression_score(&self, face: &FaceDetection) -> f32 {
        if let Some(landmarks) = &face.landmarks {
            expression_from_landmarks(landmarks, &self.config)
        } else if let Some(confidence) = face.confidence {
            expression_from_confidence(confidence)
        } else {
            clamp_score(self.config.resting_score)
        }
    }

    fn eye_contact(&self, face: &FaceDetection, width: u32, height: u32) -> f32 {
        if let Some((left, right)) = face.eyes() {
            eye_contact_from_eyes(left, right, width, height)
        } else {
            eye_contact_from_count(face.eye_count.unwrap_or(0), &self.config)
        }
    }
}
