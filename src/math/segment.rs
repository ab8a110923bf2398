use super::{cross, Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A straight line segment between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineSegment2d {
    pub start: Point2d,
    pub end: Point2d,
}

impl LineSegment2d {
    /// Creates a line segment from its two end points.
    pub const fn from_ends(start: Point2d, end: Point2d) -> Self {
        Self { start, end }
    }

    /// The (unnormalised) vector from `start` to `end`.
    pub fn direction(&self) -> Vector2d {
        self.end - self.start
    }

    /// The length of the segment.
    pub fn length(&self) -> f64 {
        self.direction().magnitude()
    }

    /// Whether both end points have finite coordinates.
    pub fn is_finite(&self) -> bool {
        [self.start, self.end]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Finds the point where this segment crosses `other`, if any.
    ///
    /// Solves `start + t * r = other.start + u * s` and accepts the
    /// solution only when both `t` and `u` lie in `[0, 1]`.
    /// Parallel and collinear segments never intersect.
    pub fn intersect(&self, other: &LineSegment2d) -> Option<Point2d> {
        let r = self.direction();
        let s = other.direction();
        let denom = cross(r, s);
        if denom == 0.0 {
            return None;
        }

        let qp = other.start - self.start;
        let t = cross(qp, s) / denom;
        let u = cross(qp, r) / denom;
        if Interval::UNIT.contains(t) && Interval::UNIT.contains(u) {
            Some(self.start + t * r)
        } else {
            None
        }
    }
}
