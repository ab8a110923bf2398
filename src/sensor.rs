use crate::math::{heading_vector, LineSegment2d};
use crate::pose::Pose;
use cgmath::prelude::*;

/// A distance sensor fixed to the vehicle, casting a single ray.
#[derive(Clone, Copy, Debug)]
pub struct Sensor {
    /// The angle of the ray relative to the vehicle heading, in radians.
    offset: f64,
    /// How far beyond the vehicle boundary the sensor can see.
    range: f64,
    /// The last computed reading, in `(0, 1]`.
    reading: f64,
}

impl Sensor {
    /// Creates a sensor that has not yet detected anything.
    pub fn new(offset: f64, range: f64) -> Self {
        Self {
            offset,
            range,
            reading: 1.0,
        }
    }

    /// The angle of the ray relative to the vehicle heading.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The last computed reading.
    pub fn reading(&self) -> f64 {
        self.reading
    }

    /// The ray cast by the sensor when the vehicle is at `pose`.
    ///
    /// The ray starts at the vehicle centre and has length `range + radius`,
    /// so it reaches `range` beyond the vehicle boundary.
    pub fn ray(&self, pose: &Pose, radius: f64) -> LineSegment2d {
        let dir = heading_vector(pose.theta + self.offset);
        LineSegment2d::from_ends(pose.pos, pose.pos + (self.range + radius) * dir)
    }

    /// Recomputes and caches the reading for a vehicle at `pose`.
    ///
    /// The reading is the squared distance to the nearest obstacle hit by the
    /// ray, divided by the squared ray length. It is exactly 1 when nothing is hit.
    pub fn compute_reading(&mut self, pose: &Pose, radius: f64, obstacles: &[LineSegment2d]) -> f64 {
        let ray = self.ray(pose, radius);
        let max_dist2 = (self.range + radius).powi(2);
        let min_dist2 = obstacles
            .iter()
            .filter_map(|obstacle| ray.intersect(obstacle))
            .map(|point| ray.start.distance2(point))
            .fold(max_dist2, f64::min);
        self.reading = min_dist2 / max_dist2;
        self.reading
    }
}
