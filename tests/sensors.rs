//! Tests of the sensor ring against randomly generated obstacles.

use drive_sim::{
    math::{LineSegment2d, Point2d},
    Pose, Vehicle, VehicleAttributes,
};
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

fn random_segment(rng: &mut impl Rng, extent: f64) -> LineSegment2d {
    let mut point = || Point2d::new(rng.gen_range(0.0..extent), rng.gen_range(0.0..extent));
    LineSegment2d::from_ends(point(), point())
}

/// Test that readings stay within `(0, 1]` wherever the vehicle is not colliding.
#[test]
fn readings_in_unit_interval() {
    let mut rng = rand::rngs::StdRng::from_seed(*b"Sensors never lie, only the wall");
    let mut veh = Vehicle::new(&VehicleAttributes::default()).unwrap();
    let mut checked = 0;

    for _ in 0..200 {
        let obstacles = (0..8).map(|_| random_segment(&mut rng, 3.0)).collect::<Vec<_>>();
        let pose = Pose::new(
            rng.gen_range(0.0..3.0),
            rng.gen_range(0.0..3.0),
            rng.gen_range(0.0..TAU),
        );
        veh.set_pose(pose);
        if veh.collides_with(&obstacles) {
            continue;
        }
        veh.refresh_sensors(&obstacles);
        for &reading in veh.readings() {
            assert!(reading > 0.0 && reading <= 1.0, "reading {}", reading);
        }
        checked += 1;
    }
    assert!(checked > 20);
}

/// Test that every sensor saturates at exactly 1 when all obstacles are out of reach.
#[test]
fn saturates_beyond_reach() {
    let attributes = VehicleAttributes::default();
    let reach = attributes.sensor_range + attributes.radius;
    let mut veh = Vehicle::new(&attributes).unwrap();
    veh.set_pose(Pose::new(0.0, 0.0, 1.0));

    let d = reach + 1e-6;
    let square = [
        Point2d::new(-d, -d),
        Point2d::new(d, -d),
        Point2d::new(d, d),
        Point2d::new(-d, d),
    ];
    let walls = (0..4)
        .map(|i| LineSegment2d::from_ends(square[i], square[(i + 1) % 4]))
        .collect::<Vec<_>>();
    veh.refresh_sensors(&walls);
    assert!(veh.readings().iter().all(|&r| r == 1.0));

    // Pulling the walls within reach makes every sensor see them
    let walls = walls
        .iter()
        .map(|w| LineSegment2d::from_ends(w.start * 0.5, w.end * 0.5))
        .collect::<Vec<_>>();
    veh.refresh_sensors(&walls);
    assert!(veh.readings().iter().all(|&r| r < 1.0));
}
