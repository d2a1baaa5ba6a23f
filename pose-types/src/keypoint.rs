//! Keypoint and pose types.

use serde::{Deserialize, Serialize};

/// A single pose keypoint in pixel coordinates.
///
/// Unlike detector outputs, dataset keypoints carry no confidence; joint
/// visibility is tracked separately as a per-joint flag.
///
/// # Example
///
/// ```
/// use pose_types::Keypoint;
///
/// let elbow = Keypoint::new(120.5, 88.0);
/// assert!((elbow.x - 120.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Keypoint {
    /// X coordinate in pixels.
    pub x: f32,
    /// Y coordinate in pixels.
    pub y: f32,
}

impl Keypoint {
    /// Creates a new keypoint.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the keypoint shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An ordered set of keypoints for one image.
///
/// The ordering follows the dataset's skeleton convention; index `j` is
/// joint `j` everywhere in the pipeline.
///
/// # Example
///
/// ```
/// use pose_types::Pose;
///
/// let pose = Pose::from_xy(&[[10.0, 20.0], [30.0, 40.0]]);
/// assert_eq!(pose.len(), 2);
///
/// let (min_x, min_y, max_x, max_y) = pose.bounding_box().unwrap();
/// assert!((min_x - 10.0).abs() < 1e-6);
/// assert!((max_y - 40.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose {
    points: Vec<Keypoint>,
}

impl Pose {
    /// Creates a pose from keypoints.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(points: Vec<Keypoint>) -> Self {
        Self { points }
    }

    /// Creates a pose from `[x, y]` pairs.
    #[must_use]
    pub fn from_xy(pairs: &[[f32; 2]]) -> Self {
        Self {
            points: pairs.iter().map(|&[x, y]| Keypoint::new(x, y)).collect(),
        }
    }

    /// Returns the number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the pose has no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Gets a keypoint by joint index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Keypoint> {
        self.points.get(index)
    }

    /// Returns a reference to the keypoints.
    #[must_use]
    pub fn points(&self) -> &[Keypoint] {
        &self.points
    }

    /// Computes the axis-aligned bounding box of all keypoints.
    ///
    /// Returns `(min_x, min_y, max_x, max_y)` in pixels, or `None` for an
    /// empty pose.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(f32, f32, f32, f32)> {
        if self.points.is_empty() {
            return None;
        }

        let min_x = self.points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = self
            .points
            .iter()
            .map(|p| p.x)
            .fold(f32::NEG_INFINITY, f32::max);
        let min_y = self.points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = self
            .points
            .iter()
            .map(|p| p.y)
            .fold(f32::NEG_INFINITY, f32::max);

        Some((min_x, min_y, max_x, max_y))
    }

    /// Returns the pose with every keypoint shifted by `(dx, dy)`.
    ///
    /// Used to re-express coordinates after cropping; the original pose is
    /// left untouched.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            points: self.points.iter().map(|p| p.translated(dx, dy)).collect(),
        }
    }
}
