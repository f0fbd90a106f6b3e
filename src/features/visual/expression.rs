//! Expression valence from facial landmarks

use super::detector::{Landmarks, Point};
use crate::analysis::range::clamp_score;
use crate::config::VisualConfig;

/// Numerical stability epsilon
const EPSILON: f32 = 1e-6;

/// Eyelid points used for the eye line (upper and lower lids of both eyes)
const EYELID_POINTS: [usize; 8] = [37, 38, 40, 41, 43, 44, 46, 47];

/// Mouth opening relative to its width
///
/// Height between the upper and lower lip midpoints (51, 57) over the
/// distance between the mouth corners (48, 54). A degenerate mouth yields 0.
pub fn mouth_aspect_ratio(landmarks: &Landmarks) -> f32 {
    let width = landmarks.point(48).distance(&landmarks.point(54));
    let height = landmarks.point(51).distance(&landmarks.point(57));
    if width < EPSILON {
        return 0.0;
    }
    height / width
}

/// Vertical gap between eyebrows and eyes, relative to the eye line
///
/// `(brow_y - eye_y) / eye_y`, where `brow_y` is the mean height of both
/// brows (17-21, 22-26) and `eye_y` that of the eyelid points. Image `y`
/// grows downwards, so raised brows give a more negative ratio.
pub fn eyebrow_ratio(landmarks: &Landmarks) -> f32 {
    let mean_y = |points: &[Point]| points.iter().map(|p| p.y).sum::<f32>() / points.len() as f32;

    let all = landmarks.points();
    let brow_y = (mean_y(&all[17..22]) + mean_y(&all[22..27])) / 2.0;
    let eye_y = EYELID_POINTS.iter().map(|&i| landmarks.point(i).y).sum::<f32>() / EYELID_POINTS.len() as f32;

    if eye_y.abs() < EPSILON {
        return 0.0;
    }
    (brow_y - eye_y) / eye_y
}

/// Expression score (0-100) from mouth openness and eyebrow position
///
/// An open mouth or raised brows score as expressive; a closed mouth under
/// lowered brows scores as subdued; anything else is resting.
pub fn expression_from_landmarks(landmarks: &Landmarks, config: &VisualConfig) -> f32 {
    let mar = mouth_aspect_ratio(landmarks);
    let brows = eyebrow_ratio(landmarks);

    let score = if mar > config.mouth_open_ratio || brows < config.brow_raised_ratio {
        config.expressive_score
    } else if mar < config.mouth_closed_ratio && brows > config.brow_lowered_ratio {
        config.subdued_score
    } else {
        config.resting_score
    };

    log::debug!("Landmarks: mar={:.3}, brow_ratio={:.3} -> {:.0}", mar, brows, score);
    clamp_score(score)
}

/// Expression score (0-100) from a detection confidence in [0, 1]
pub fn expression_from_confidence(confidence: f32) -> f32 {
    clamp_score(confidence * 100.0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Landmarks with the given mouth size and brow/eye heights
    pub(crate) fn face(mouth_width: f32, mouth_height: f32, brow_y: f32, eye_y: f32) -> Landmarks {
        let mut points = vec![Point::new(50.0, 60.0); 68];
        for p in &mut points[17..27] {
            p.y = brow_y;
        }
        for p in &mut points[36..48] {
            p.y = eye_y;
        }
        points[36].x = 35.0;
        points[39].x = 45.0;
        points[42].x = 55.0;
        points[45].x = 65.0;
        points[48] = Point::new(50.0 - mouth_width / 2.0, 80.0);
        points[54] = Point::new(50.0 + mouth_width / 2.0, 80.0);
        points[51] = Point::new(50.0, 80.0 - mouth_height / 2.0);
        points[57] = Point::new(50.0, 80.0 + mouth_height / 2.0);
        Landmarks::new(points).unwrap()
    }

    #[test]
    fn test_mouth_aspect_ratio() {
        assert!((mouth_aspect_ratio(&face(20.0, 8.0, 30.0, 40.0)) - 0.4).abs() < 1e-6);
        assert_eq!(mouth_aspect_ratio(&face(0.0, 8.0, 30.0, 40.0)), 0.0);
    }

    #[test]
    fn test_eyebrow_ratio() {
        // Brows 10px above eyes at y=40
        assert!((eyebrow_ratio(&face(20.0, 2.0, 30.0, 40.0)) + 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_open_mouth_is_expressive() {
        let config = VisualConfig::default();
        assert_eq!(expression_from_landmarks(&face(20.0, 8.0, 38.0, 40.0), &config), 80.0);
    }

    #[test]
    fn test_raised_brows_are_expressive() {
        let config = VisualConfig::default();
        assert_eq!(expression_from_landmarks(&face(20.0, 4.0, 30.0, 40.0), &config), 80.0);
    }

    #[test]
    fn test_closed_mouth_lowered_brows_is_subdued() {
        let config = VisualConfig::default();
        assert_eq!(expression_from_landmarks(&face(20.0, 2.0, 44.0, 40.0), &config), 30.0);
    }

    #[test]
    fn test_resting_face() {
        let config = VisualConfig::default();
        assert_eq!(expression_from_landmarks(&face(20.0, 4.0, 38.0, 40.0), &config), 50.0);
    }

    #[test]
    fn test_confidence_scaled() {
        assert!((expression_from_confidence(0.93) - 93.0).abs() < 1e-4);
        assert_eq!(expression_from_confidence(1.7), 100.0);
    }
}
