//! 2D vector primitives shared by the force, angle and scenario code

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// Euclidean distance between two points
pub fn distance(a: &NVec2, b: &NVec2) -> f64 {
    (b - a).norm()
}

/// Unit vector pointing from `from` to `to`
/// Returns `None` when the points coincide (direction undefined)
pub fn unit_direction(from: &NVec2, to: &NVec2) -> Option<NVec2> {
    let d = to - from;
    let r = d.norm();
    if r > 0.0 && r.is_finite() {
        Some(d / r)
    } else {
        None
    }
}

/// Signed angle of `point` as seen from `origin`, in (-pi, pi]
///
/// `atan2` can return exactly -pi (negative zero y, negative x); that value is
/// folded onto +pi so both ends of the branch cut map to one angle.
pub fn polar_angle(origin: &NVec2, point: &NVec2) -> f64 {
    let d = point - origin;
    let theta = d.y.atan2(d.x);
    if theta == -std::f64::consts::PI {
        std::f64::consts::PI
    } else {
        theta
    }
}

/// z-component of the 2D cross product `a x b`
pub fn cross(a: &NVec2, b: &NVec2) -> f64 {
    a.x * b.y - a.y * b.x
}
