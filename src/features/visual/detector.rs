//! Face detection capability
//!
//! Any backend that finds faces in an intensity grid can drive the visual
//! channel. A detection always carries a bounding box; landmarks, a
//! confidence, eye keypoints and an eye count are optional, and the analyzer
//! uses whichever of them a backend supplies.

use image::GrayImage;

/// Number of points in the standard 68-point facial landmark layout
pub const LANDMARK_COUNT: usize = 68;

/// Pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position
    pub x: f32,
    /// Vertical position (grows downwards)
    pub y: f32,
}

impl Point {
    /// Create a point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`
    pub fn distance(&self, other: &Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint between `self` and `other`
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Axis-aligned face rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl BoundingBox {
    /// Create a bounding box
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Center of the box
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// 68-point facial landmarks in the iBUG 300-W layout
///
/// Jaw 0-16, eyebrows 17-26, nose 27-35, eyes 36-47 (36-41 the subject's
/// right eye, 42-47 the left), mouth 48-67.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmarks {
    points: Vec<Point>,
}

impl Landmarks {
    /// Wrap a landmark list; `None` unless exactly 68 points are given
    pub fn new(points: Vec<Point>) -> Option<Self> {
        if points.len() == LANDMARK_COUNT {
            Some(Self { points })
        } else {
            None
        }
    }

    /// Landmark `index`
    ///
    /// Indices are 0-67; every caller in this crate uses fixed indices of
    /// the layout above.
    pub fn point(&self, index: usize) -> Point {
        self.points.get(index).copied().unwrap_or_default()
    }

    /// All 68 points
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Centroids of the two eye contours (right eye 36-41, left eye 42-47)
    pub fn eye_centers(&self) -> (Point, Point) {
        (self.centroid(36..42), self.centroid(42..48))
    }

    fn centroid(&self, range: std::ops::Range<usize>) -> Point {
        let slice = &self.points[range];
        let n = slice.len() as f32;
        let (sx, sy) = slice.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point::new(sx / n, sy / n)
    }
}

/// One detected face and whatever evidence the backend produced for it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceDetection {
    /// Face rectangle
    pub bbox: BoundingBox,

    /// Facial landmarks (landmark-based backends)
    pub landmarks: Option<Landmarks>,

    /// Detection confidence in [0, 1] (neural backends)
    pub confidence: Option<f32>,

    /// Eye positions (neural backends with keypoints)
    pub eye_keypoints: Option<(Point, Point)>,

    /// Eyes found inside the face (classifier-cascade backends)
    pub eye_count: Option<usize>,
}

impl FaceDetection {
    /// Detection with a bounding box only
    pub fn from_bbox(bbox: BoundingBox) -> Self {
        Self {
            bbox,
            ..Self::default()
        }
    }

    /// Attach landmarks
    pub fn with_landmarks(mut self, landmarks: Landmarks) -> Self {
        self.landmarks = Some(landmarks);
        self
    }

    /// Attach a detection confidence
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Attach eye keypoints
    pub fn with_eye_keypoints(mut self, left: Point, right: Point) -> Self {
        self.eye_keypoints = Some((left, right));
        self
    }

    /// Attach an eye count
    pub fn with_eye_count(mut self, count: usize) -> Self {
        self.eye_count = Some(count);
        self
    }

    /// Eye positions, from keypoints or else from landmarks
    pub fn eyes(&self) -> Option<(Point, Point)> {
        self.eye_keypoints
            .or_else(|| self.landmarks.as_ref().map(Landmarks::eye_centers))
    }
}

/// Face detection backend
///
/// Detections are returned in the backend's order of preference; the first
/// one is treated as the primary face. Backends are shared across threads, so
/// `detect` takes `&self` and implementations must be `Send + Sync`.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in an intensity grid
    fn detect(&self, frame: &GrayImage) -> Vec<FaceDetection>;
}

impl<F> FaceDetector for F
where
    F: Fn(&GrayImage) -> Vec<FaceDetection> + Send + Sync,
{
    fn detect(&self, frame: &GrayImage) -> Vec<FaceDetection> {
        self(frame)
    }
}

/// Backend that never finds a face
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaceDetector;

impl FaceDetector for NoFaceDetector {
    fn detect(&self, _frame: &GrayImage) -> Vec<FaceDetection> {
        Vec::new()
    }
}
