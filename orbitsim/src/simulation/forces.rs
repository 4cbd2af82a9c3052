//! Force contributors for the n-body engine
//!
//! Forces (not accelerations) are accumulated per body so that each unordered
//! pair is evaluated once and applied with opposite signs to both members.
//! That keeps the summed force over the system exactly zero and total
//! momentum conserved to floating-point precision.

use crate::error::NumericalFault;
use crate::simulation::states::System;
use crate::simulation::vector::NVec2;

/// Collection of force terms (gravity, later perhaps drag or tides)
/// Each term implements [`ForceTerm`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute the net force on every body in `sys`
    /// - `out[i]` is overwritten with the sum of contributions from all terms
    pub fn accumulate_forces(&self, sys: &System, out: &mut [NVec2]) -> Result<(), NumericalFault> {
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.accumulate(sys, out)?;
        }
        Ok(())
    }

    /// Allocating convenience wrapper around [`ForceSet::accumulate_forces`]
    pub fn forces(&self, sys: &System) -> Result<Vec<NVec2>, NumericalFault> {
        let mut out = vec![NVec2::zeros(); sys.len()];
        self.accumulate_forces(sys, &mut out)?;
        Ok(out)
    }

    /// Total potential energy of all terms that define one
    pub fn potential_energy(&self, sys: &System) -> f64 {
        self.terms.iter().map(|t| t.potential_energy(sys)).sum()
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A force source operating on a [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait ForceTerm {
    fn accumulate(&self, sys: &System, out: &mut [NVec2]) -> Result<(), NumericalFault>;

    fn potential_energy(&self, _sys: &System) -> f64 {
        0.0
    }
}

/// Which pairs of bodies attract each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Every pair interacts
    Full,
    /// Only pairs containing the central body interact; the smaller bodies
    /// ignore each other
    Restricted { central: usize },
}

impl Interaction {
    pub fn from_flag(include_mutual_gravity: bool, central: usize) -> Self {
        if include_mutual_gravity {
            Interaction::Full
        } else {
            Interaction::Restricted { central }
        }
    }

    pub fn interacts(&self, i: usize, j: usize) -> bool {
        match *self {
            Interaction::Full => true,
            Interaction::Restricted { central } => i == central || j == central,
        }
    }
}

/// Force exerted by body `j` on body `i` (the force on `j` is `-force`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairForce {
    pub i: usize,
    pub j: usize,
    pub force: NVec2,
}

/// 2D Newtonian gravity, direct pairwise sum, no softening
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub interaction: Interaction, // pair predicate (full or restricted model)
}

impl NewtonianGravity {
    pub fn new(g: f64, include_mutual_gravity: bool, central: usize) -> Self {
        Self {
            g,
            interaction: Interaction::from_flag(include_mutual_gravity, central),
        }
    }

    /// Force on body `i` due to body `j`
    ///
    /// `pair_force(sys, i, j) == -pair_force(sys, j, i)` holds bit for bit:
    /// the separation flips sign exactly and the magnitude uses the
    /// commutative product `mi * mj`.
    pub fn pair_force(&self, sys: &System, i: usize, j: usize) -> Result<NVec2, NumericalFault> {
        let bi = &sys.bodies[i];
        let bj = &sys.bodies[j];

        // d points from i to j, so i is pulled along +d
        let d = bj.x - bi.x;
        let r2 = d.norm_squared();
        if !r2.is_finite() {
            return Err(NumericalFault::NonFiniteState { body: i });
        }
        if r2 == 0.0 {
            return Err(NumericalFault::CoincidentBodies {
                i: i.min(j),
                j: i.max(j),
            });
        }
        let r = r2.sqrt();

        // |F| = G mi mj / r^2, direction d / r
        let magnitude = self.g * (bi.mass() * bj.mass()) / r2;
        Ok(d * (magnitude / r))
    }

    /// Every interacting unordered pair (i < j) in fixed order
    pub fn pair_forces(&self, sys: &System) -> Result<Vec<PairForce>, NumericalFault> {
        let n = sys.len();
        let mut pairs = Vec::with_capacity(sys.pair_count());
        for i in 0..n {
            for j in (i + 1)..n {
                if !self.interaction.interacts(i, j) {
                    continue;
                }
                let force = self.pair_force(sys, i, j)?;
                pairs.push(PairForce { i, j, force });
            }
        }
        Ok(pairs)
    }
}

impl ForceTerm for NewtonianGravity {
    fn accumulate(&self, sys: &System, out: &mut [NVec2]) -> Result<(), NumericalFault> {
        let n = sys.len();

        // Loop over each unordered pair (i, j) with i < j; the fixed order
        // makes the floating-point summation reproducible
        for i in 0..n {
            for j in (i + 1)..n {
                if !self.interaction.interacts(i, j) {
                    continue;
                }
                let f = self.pair_force(sys, i, j)?;
                out[i] += f;
                out[j] -= f;
            }
        }
        Ok(())
    }

    fn potential_energy(&self, sys: &System) -> f64 {
        let n = sys.len();
        let mut u = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                if !self.interaction.interacts(i, j) {
                    continue;
                }
                let bi = &sys.bodies[i];
                let bj = &sys.bodies[j];
                let r = (bj.x - bi.x).norm();
                if r > 0.0 {
                    u -= self.g * bi.mass() * bj.mass() / r;
                }
            }
        }
        u
    }
}
