//! Angle normalization helpers used by the coordinate codec and the goal test.

use std::f64::consts::PI;

/// Normalize an angle into `[0, 2π)`.
pub fn normalize_angle_positive(angle: f64) -> f64 {
    angle.rem_euclid(2.0 * PI)
}

/// Normalize an angle into `(-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = normalize_angle_positive(angle);
    if a > PI {
        a - 2.0 * PI
    } else {
        a
    }
}

/// Magnitude of the shortest rotation taking `from` to `to`.
pub fn shortest_angle_dist(from: f64, to: f64) -> f64 {
    normalize_angle(to - from).abs()
}
