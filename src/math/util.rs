use super::Vector2d;
use std::f64::consts::TAU;

/// Rotates a vector 90 degrees anti-clockwise.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// The unit vector pointing along the given heading in radians.
pub fn heading_vector(theta: f64) -> Vector2d {
    Vector2d::new(theta.cos(), theta.sin())
}

/// Wraps an angle in radians into the range `[0, 2π)`.
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // `rem_euclid` can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// The 2D cross product (z component of the 3D cross product).
pub fn cross(a: Vector2d, b: Vector2d) -> f64 {
    a.x * b.y - a.y * b.x
}
