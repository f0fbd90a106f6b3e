//! Eye contact and head position geometry
//!
//! Both measures compare a point on the face with the frame center. Offsets
//! are normalized by the frame width (horizontal) and height (vertical), so
//! 0.5 on either axis means the point sits on the frame edge.

use super::detector::{BoundingBox, Point};
use crate::analysis::range::clamp_score;
use crate::analysis::result::HeadPosition;
use crate::config::VisualConfig;

/// Normalized horizontal and vertical offset of `point` from the frame center
pub fn center_offset(point: Point, frame_width: u32, frame_height: u32) -> (f32, f32) {
    if frame_width == 0 || frame_height == 0 {
        return (0.0, 0.0);
    }
    let (w, h) = (frame_width as f32, frame_height as f32);
    ((point.x - w / 2.0).abs() / w, (point.y - h / 2.0).abs() / h)
}

/// Eye contact (0-100) from the two eye positions
///
/// `100 - (x_dev + y_dev) * 50` for the offset of the eye midpoint.
pub fn eye_contact_from_eyes(left: Point, right: Point, frame_width: u32, frame_height: u32) -> f32 {
    let (x_dev, y_dev) = center_offset(left.midpoint(&right), frame_width, frame_height);
    clamp_score(100.0 - (x_dev + y_dev) * 50.0)
}

/// Eye contact (0-100) from the number of eyes found inside the face
pub fn eye_contact_from_count(count: usize, config: &VisualConfig) -> f32 {
    let score = match count {
        0 => config.no_eye_score,
        1 => config.one_eye_score,
        _ => config.two_eyes_score,
    };
    clamp_score(score)
}

/// Classify the head position of a face
pub fn head_position(bbox: &BoundingBox, frame_width: u32, frame_height: u32, config: &VisualConfig) -> HeadPosition {
    let (x_dev, y_dev) = center_offset(bbox.center(), frame_width, frame_height);

    if x_dev < config.centered_band && y_dev < config.centered_band {
        HeadPosition::Centered
    } else if x_dev < config.slightly_off_band && y_dev < config.slightly_off_band {
        HeadPosition::SlightlyOffCenter
    } else {
        HeadPosition::OffCenter
    }
}
