//! Two-body orbit helpers: Kepler periods, vis-viva, measured periods

use std::f64::consts::PI;

use crate::simulation::states::System;

use super::resonance::revolution_indices;

/// Kepler's third law, T = 2 pi sqrt(a^3 / mu) with mu = G M
pub fn kepler_period(semi_major_axis: f64, mu: f64) -> f64 {
    2.0 * PI * (semi_major_axis.powi(3) / mu).sqrt()
}

/// Vis-viva speed at radius `r` on an orbit of semi-major axis `a`
pub fn vis_viva_speed(r: f64, a: f64, mu: f64) -> f64 {
    (mu * (2.0 / r - 1.0 / a)).sqrt()
}

/// Semi-major axis from a relative state, vis-viva inverted:
/// 1/a = 2/r - v^2/mu. `None` for unbound (parabolic or hyperbolic) states.
pub fn semi_major_axis_from_state(r: f64, v: f64, mu: f64) -> Option<f64> {
    let inv_a = 2.0 / r - v * v / mu;
    if inv_a > 0.0 && inv_a.is_finite() {
        Some(1.0 / inv_a)
    } else {
        None
    }
}

/// Orbital period of `body` around `central` treating the pair as isolated
pub fn two_body_period(sys: &System, central: usize, body: usize, g: f64) -> Option<f64> {
    let c = &sys.bodies[central];
    let b = &sys.bodies[body];
    let r = (b.x - c.x).norm();
    let v = (b.v - c.v).norm();
    let mu = g * (c.mass() + b.mass());
    if r <= 0.0 {
        return None;
    }
    semi_major_axis_from_state(r, v, mu).map(|a| kepler_period(a, mu))
}

/// Shortest bound two-body period around `central`, with the body index
pub fn shortest_orbital_period(sys: &System, central: usize, g: f64) -> Option<(usize, f64)> {
    (0..sys.len())
        .filter(|&i| i != central)
        .filter_map(|i| two_body_period(sys, central, i, g).map(|t| (i, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Average period from a revolution count over `elapsed` seconds
pub fn measured_period(revolutions: u64, elapsed: f64) -> Option<f64> {
    if revolutions == 0 {
        None
    } else {
        Some(elapsed / revolutions as f64)
    }
}

/// Period from the spacing of revolution crossings in an angle series
///
/// Uses the time between the first and last crossing, so a partial orbit at
/// either end of the run does not bias the result. Needs two crossings.
pub fn period_from_crossings(angles: &[f64], sample_interval: f64) -> Option<f64> {
    let idx = revolution_indices(angles);
    if idx.len() < 2 {
        return None;
    }
    let first = idx[0];
    let last = idx[idx.len() - 1];
    Some((last - first) as f64 * sample_interval / (idx.len() - 1) as f64)
}
