//! SeetaFace cascade backend (feature `seeta`)
//!
//! Wraps the pure-Rust `rustface` frontal face detector. It yields bounding
//! boxes only, so frames analyzed with it fall back to the resting expression
//! score and the no-eye eye-contact score.
//!
//! A `rustface` detector is stateful and not thread-safe, so one is built
//! from the model per frame.

use std::io::Cursor;
use std::sync::Arc;

use image::GrayImage;
use rustface::{create_detector_with_model, read_model, Detector, ImageData};

use super::detector::{BoundingBox, FaceDetection, FaceDetector};
use crate::error::ScoringError;

/// SeetaFace frontal face detector
#[derive(Clone)]
pub struct SeetaDetector {
    model: Arc<[u8]>,
}

impl std::fmt::Debug for SeetaDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeetaDetector")
            .field("model_bytes", &self.model.len())
            .finish()
    }
}

impl SeetaDetector {
    /// Load a detector from the bytes of a SeetaFace model file
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::DecodingError` if the model cannot be read.
    pub fn from_model_bytes(model: &[u8]) -> Result<Self, ScoringError> {
        build_detector(model)?;
        Ok(Self {
            model: Arc::from(model),
        })
    }
}

fn build_detector(model: &[u8]) -> Result<Box<dyn Detector>, ScoringError> {
    let model = read_model(Cursor::new(model))
        .map_err(|e| ScoringError::DecodingError(format!("face model: {}", e)))?;
    let mut detector = create_detector_with_model(model);
    detector.set_min_face_size(40);
    detector.set_score_thresh(2.0);
    detector.set_pyramid_scale_factor(0.8);
    detector.set_slide_window_step(4, 4);
    Ok(detector)
}

impl FaceDetector for SeetaDetector {
    fn detect(&self, frame: &GrayImage) -> Vec<FaceDetection> {
        let mut detector = match build_detector(&self.model) {
            Ok(detector) => detector,
            Err(e) => {
                log::warn!("Face detector unavailable: {}", e);
                return Vec::new();
            }
        };
        let (width, height) = frame.dimensions();
        let mut image = ImageData::new(frame.as_raw(), width, height);
        let faces = detector.detect(&mut image);

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceDetection::from_bbox(BoundingBox::new(
                    bbox.x() as f32,
                    bbox.y() as f32,
                    bbox.width() as f32,
                    bbox.height() as f32,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_model_rejected() {
        assert!(SeetaDetector::from_model_bytes(b"not a model").is_err());
    }

    #[test]
    fn test_detector_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SeetaDetector>();
    }
}
