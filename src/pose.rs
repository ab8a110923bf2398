use crate::math::{heading_vector, wrap_angle, Point2d, Vector2d};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The position and heading of a vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// The world space coordinates of the centre of the vehicle.
    pub pos: Point2d,
    /// The heading in radians, in the range `[0, 2π)`.
    pub theta: f64,
}

impl Pose {
    /// Creates a new pose, wrapping the heading into `[0, 2π)`.
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            pos: Point2d::new(x, y),
            theta: wrap_angle(theta),
        }
    }

    /// A unit vector aligned with the heading.
    pub fn heading(&self) -> Vector2d {
        heading_vector(self.theta)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
