//! Core state types for the N-body simulation.
//!
//! - `Body`   – one point mass: name, position, velocity, mass
//! - `System` – the ordered collection of bodies for one run
//!
//! The system does not carry time; the stepping loop tracks the step index
//! and elapsed time is `step * dt`.

use super::vector::{cross, NVec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String, // stable identity, unique within a system
    pub x: NVec2, // position (m)
    pub v: NVec2, // velocity (m/s)
    m: f64, // mass (kg), fixed once the system is built
}

impl Body {
    pub fn new(name: impl Into<String>, x: NVec2, v: NVec2, m: f64) -> Self {
        Self {
            name: name.into(),
            x,
            v,
            m,
        }
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // ordered; indices are stable for the whole run
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Number of unordered pairs, n(n-1)/2
    pub fn pair_count(&self) -> usize {
        let n = self.bodies.len();
        n * n.saturating_sub(1) / 2
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name == name)
    }

    /// Index of the most massive body (first one on ties)
    pub fn most_massive(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, b) in self.bodies.iter().enumerate() {
            match best {
                Some(k) if self.bodies[k].m >= b.m => {}
                _ => best = Some(i),
            }
        }
        best
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Vector sum of m * v over all bodies
    pub fn total_momentum(&self) -> NVec2 {
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.momentum())
    }

    /// Sum of m * (r x v) about the origin
    pub fn total_angular_momentum(&self) -> f64 {
        self.bodies.iter().map(|b| b.m * cross(&b.x, &b.v)).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    pub fn center_of_mass(&self) -> NVec2 {
        let m = self.total_mass();
        if m <= 0.0 {
            return NVec2::zeros();
        }
        self.bodies
            .iter()
            .fold(NVec2::zeros(), |acc, b| acc + b.x * b.m)
            / m
    }

    /// First pair (i < j) whose positions coincide exactly
    pub fn first_coincident_pair(&self) -> Option<(usize, usize)> {
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.bodies[i].x == self.bodies[j].x {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// First body whose position or velocity is not finite
    pub fn first_non_finite(&self) -> Option<usize> {
        self.bodies.iter().position(|b| {
            !(b.x.x.is_finite() && b.x.y.is_finite() && b.v.x.is_finite() && b.v.y.is_finite())
        })
    }
}
