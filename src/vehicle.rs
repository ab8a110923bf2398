pub use self::dynamics::{integrate, WheelSpeeds};
use crate::math::{heading_vector, LineSegment2d, Point2d};
use crate::pose::Pose;
use crate::sensor::Sensor;
use crate::{Error, Result};
use cgmath::prelude::*;
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::f64::consts::TAU;

mod dynamics;

/// Sensor rings up to this size are stored inline.
type SensorRing = SmallVec<[Sensor; 16]>;

/// The attributes of a simulated vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleAttributes {
    /// Radius of the vehicle's disc, equal to half the wheel base, in m.
    pub radius: f64,
    /// The wheel speed produced by a motor activation of 1, in m/s.
    pub max_speed: f64,
    /// How far beyond the vehicle boundary the sensors can see, in m.
    pub sensor_range: f64,
    /// The number of sensors, spaced evenly around the vehicle.
    pub sensor_count: usize,
    /// The number of sides of the polygon used for collision testing.
    pub collision_sides: usize,
}

impl Default for VehicleAttributes {
    fn default() -> Self {
        Self {
            radius: 0.17,
            max_speed: 0.5,
            sensor_range: 0.5,
            sensor_count: 12,
            collision_sides: 16,
        }
    }
}

impl VehicleAttributes {
    /// Checks that the attributes describe a usable vehicle.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.radius) {
            return Err(Error::InvalidConfig("vehicle radius must be positive"));
        }
        if !self.max_speed.is_finite() {
            return Err(Error::InvalidConfig("max speed must be finite"));
        }
        if !positive(self.sensor_range) {
            return Err(Error::InvalidConfig("sensor range must be positive"));
        }
        if self.sensor_count == 0 {
            return Err(Error::InvalidConfig("vehicle needs at least one sensor"));
        }
        if self.collision_sides < 3 {
            return Err(Error::InvalidConfig("collision polygon needs at least 3 sides"));
        }
        Ok(())
    }
}

/// A simulated differential-drive vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// The vehicle's attributes.
    attributes: VehicleAttributes,
    /// The current pose.
    pose: Pose,
    /// The wheel speeds commanded on the last tick.
    speeds: WheelSpeeds,
    /// The sensor ring, ordered by angular offset.
    sensors: SensorRing,
    /// The latest readings of each sensor, in the same order.
    readings: Vec<f64>,
}

impl Vehicle {
    /// Creates a new vehicle at the origin.
    pub fn new(attributes: &VehicleAttributes) -> Result<Self> {
        attributes.validate()?;
        let count = attributes.sensor_count;
        let sensors = (0..count)
            .map(|i| Sensor::new(i as f64 * TAU / count as f64, attributes.sensor_range))
            .collect::<SensorRing>();
        Ok(Self {
            attributes: *attributes,
            pose: Pose::default(),
            speeds: WheelSpeeds::default(),
            sensors,
            readings: vec![1.0; count],
        })
    }

    /// The vehicle's attributes.
    pub fn attributes(&self) -> &VehicleAttributes {
        &self.attributes
    }

    /// The radius of the vehicle's disc in m.
    pub fn radius(&self) -> f64 {
        self.attributes.radius
    }

    /// The current pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The coordinates of the centre of the vehicle.
    pub fn position(&self) -> Point2d {
        self.pose.pos
    }

    /// The current wheel speeds in m/s.
    pub fn speeds(&self) -> WheelSpeeds {
        self.speeds
    }

    /// The sensors, in ring order.
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// The latest sensor readings, in ring order.
    pub fn readings(&self) -> &[f64] {
        &self.readings
    }

    /// Teleports the vehicle and stops its wheels.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
        self.speeds = WheelSpeeds::default();
    }

    /// Moves the vehicle without changing its wheel speeds.
    pub(crate) fn move_to(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Sets the wheel speeds from a pair of motor activations.
    /// Activations are scaled by the max speed and not clamped.
    pub fn apply_command(&mut self, activations: [f64; 2]) {
        let [left, right] = activations.map(|a| a * self.attributes.max_speed);
        self.speeds = WheelSpeeds { left, right };
    }

    /// Computes where the vehicle would be after `dt` seconds at its current wheel speeds.
    pub fn next_pose(&self, dt: f64) -> Pose {
        integrate(self.pose, self.speeds, self.attributes.radius, dt)
    }

    /// Recomputes all sensor readings from the current pose.
    pub fn refresh_sensors(&mut self, obstacles: &[LineSegment2d]) {
        let (pose, radius) = (self.pose, self.attributes.radius);
        for (sensor, reading) in self.sensors.iter_mut().zip(self.readings.iter_mut()) {
            *reading = sensor.compute_reading(&pose, radius, obstacles);
        }
    }

    /// The edges of the regular polygon inscribed in the vehicle's disc.
    ///
    /// The polygon is fixed in world space and does not turn with the heading,
    /// so turning on the spot can never push the footprint into an obstacle.
    pub fn outline(&self) -> impl Iterator<Item = LineSegment2d> + '_ {
        let sides = self.attributes.collision_sides;
        (0..sides)
            .map(move |i| {
                let angle = i as f64 * TAU / sides as f64;
                self.pose.pos + self.attributes.radius * heading_vector(angle)
            })
            .circular_tuple_windows()
            .map(|(a, b)| LineSegment2d::from_ends(a, b))
    }

    /// Whether any obstacle touches the vehicle at its current pose.
    ///
    /// An obstacle collides if it crosses the outline polygon, or if either
    /// of its end points lies within the disc.
    pub fn collides_with(&self, obstacles: &[LineSegment2d]) -> bool {
        let radius2 = self.attributes.radius.powi(2);
        obstacles.iter().any(|obstacle| {
            self.outline().any(|edge| edge.intersect(obstacle).is_some())
                || [obstacle.start, obstacle.end]
                    .iter()
                    .any(|p| p.distance2(self.pose.pos) <= radius2)
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn vehicle() -> Vehicle {
        Vehicle::new(&VehicleAttributes::default()).unwrap()
    }

    #[test]
    fn sensors_evenly_spaced() {
        let veh = vehicle();
        assert_eq!(veh.sensors().len(), 12);
        assert_eq!(veh.readings(), &[1.0; 12][..]);
        for (i, pair) in veh.sensors().windows(2).enumerate() {
            assert_approx_eq!(pair[1].offset() - pair[0].offset(), TAU / 12.0);
            assert_approx_eq!(pair[0].offset(), i as f64 * TAU / 12.0);
        }
    }

    #[test]
    fn rejects_bad_attributes() {
        let bad = [
            VehicleAttributes { radius: 0.0, ..Default::default() },
            VehicleAttributes { sensor_count: 0, ..Default::default() },
            VehicleAttributes { sensor_range: f64::NAN, ..Default::default() },
            VehicleAttributes { collision_sides: 2, ..Default::default() },
            VehicleAttributes { max_speed: f64::INFINITY, ..Default::default() },
        ];
        for attributes in bad {
            assert!(matches!(Vehicle::new(&attributes), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn command_scales_without_clamping() {
        let mut veh = vehicle();
        veh.apply_command([1.0, -3.0]);
        assert_eq!(veh.speeds(), WheelSpeeds::new(0.5, -1.5));
    }

    #[test]
    fn outline_is_closed_polygon() {
        let veh = vehicle();
        assert_eq!(veh.attributes(), &VehicleAttributes::default());
        let edges = veh.outline().collect::<Vec<_>>();
        assert_eq!(edges.len(), 16);
        assert_eq!(edges.last().unwrap().end, edges[0].start);
        for edge in &edges {
            assert_approx_eq!(edge.start.distance(veh.position()), 0.17);
        }
    }

    #[test]
    fn outline_ignores_heading() {
        let mut veh = vehicle();
        veh.set_pose(Pose::new(1.0, 1.0, 0.0));
        let reference = veh.outline().collect::<Vec<_>>();

        // Between the flat edge (r cos(π/16)) and the corner (r) of the polygon
        let wall = LineSegment2d::from_ends(Point2d::new(1.168, 0.0), Point2d::new(1.168, 2.0));
        let touching = veh.collides_with(&[wall]);

        for i in 0..64 {
            veh.move_to(Pose::new(1.0, 1.0, i as f64 * TAU / 64.0));
            assert_eq!(veh.outline().collect::<Vec<_>>(), reference);
            assert_eq!(veh.collides_with(&[wall]), touching);
        }
    }

    #[test]
    fn collision_with_crossing_wall() {
        let mut veh = vehicle();
        veh.set_pose(Pose::new(1.0, 1.0, 0.0));
        let near = LineSegment2d::from_ends(Point2d::new(1.1, 0.0), Point2d::new(1.1, 2.0));
        let far = LineSegment2d::from_ends(Point2d::new(1.5, 0.0), Point2d::new(1.5, 2.0));
        assert!(veh.collides_with(&[far, near]));
        assert!(!veh.collides_with(&[far]));
    }

    #[test]
    fn collision_with_contained_obstacle() {
        let mut veh = vehicle();
        veh.set_pose(Pose::new(1.0, 1.0, 0.0));
        let crumb = LineSegment2d::from_ends(Point2d::new(1.0, 1.0), Point2d::new(1.05, 1.0));
        assert!(veh.collides_with(&[crumb]));
    }

    #[test]
    fn refresh_updates_readings() {
        let mut veh = vehicle();
        veh.set_pose(Pose::new(0.0, 0.0, 0.0));
        let wall = LineSegment2d::from_ends(Point2d::new(0.335, -5.0), Point2d::new(0.335, 5.0));
        veh.refresh_sensors(&[wall]);
        // sensor 0 faces the wall at half its reach
        assert_approx_eq!(veh.readings()[0], 0.25);
        assert_eq!(veh.readings()[6], 1.0);
        assert_eq!(veh.sensors()[0].reading(), veh.readings()[0]);
    }
}
