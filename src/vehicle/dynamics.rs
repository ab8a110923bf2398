use crate::math::{rot90, wrap_angle, Vector2d};
use crate::pose::Pose;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The speeds of the two drive wheels, in m/s.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WheelSpeeds {
    pub left: f64,
    pub right: f64,
}

impl WheelSpeeds {
    pub const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }
}

/// Advances a differential-drive pose by `dt` seconds of constant wheel speeds.
///
/// The motion is the exact circular arc about the instantaneous centre of
/// curvature (ICC), so no error accumulates across steps.
///
/// # Parameters
/// * `pose` - The pose at the start of the step
/// * `speeds` - The wheel speeds, held constant over the step
/// * `radius` - Half the wheel base
/// * `dt` - The time step in seconds
pub fn integrate(pose: Pose, speeds: WheelSpeeds, radius: f64, dt: f64) -> Pose {
    let WheelSpeeds { left, right } = speeds;

    if left == right {
        return Pose {
            pos: pose.pos + dt * left * pose.heading(),
            theta: pose.theta,
        };
    }

    // Signed distance from the vehicle centre to the ICC.
    // The overrides are applied in order, so a zero wheel wins over opposite speeds.
    let mut icc_dist = radius * (left + right) / (right - left);
    if right == -left {
        icc_dist = 0.0;
    }
    if right == 0.0 || left == 0.0 {
        icc_dist = radius;
    }

    let omega = (right - left) / (2.0 * radius);
    let icc = pose.pos + icc_dist * rot90(pose.heading());

    let (sin, cos) = (omega * dt).sin_cos();
    let v = pose.pos - icc;
    let rotated = Vector2d::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y);

    Pose {
        pos: icc + rotated,
        theta: wrap_angle(pose.theta + omega * dt),
    }
}
