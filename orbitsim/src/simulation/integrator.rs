//! Fixed-step time integrators for the N-body system
//!
//! Provides semi-implicit (symplectic) Euler, the default, and velocity
//! Verlet. Both are deterministic step functions: the same system and the
//! same forces always give the same next state.

use crate::configuration::config::IntegratorConfig;
use crate::error::NumericalFault;

use super::forces::ForceSet;
use super::params::Parameters;
use super::states::System;
use super::vector::NVec2;

/// Apply one semi-implicit Euler update given the forces at the current state
///
/// Velocity first, `v += (F / m) dt`, then position with the *updated*
/// velocity, `x += v dt`. Using the old velocity for the position would be
/// explicit Euler, whose energy error drifts secularly.
pub fn symplectic_euler(sys: &mut System, forces: &[NVec2], dt: f64) {
    for (b, f) in sys.bodies.iter_mut().zip(forces.iter()) {
        let a = *f / b.mass();
        b.v += a * dt;
        b.x += b.v * dt;
    }
}

/// Reusable force buffers so the stepping loop does not allocate per step
#[derive(Debug, Clone)]
pub struct StepBuffers {
    f_old: Vec<NVec2>,
    f_new: Vec<NVec2>,
}

impl StepBuffers {
    pub fn new(n: usize) -> Self {
        Self {
            f_old: vec![NVec2::zeros(); n],
            f_new: vec![NVec2::zeros(); n],
        }
    }

    /// Forces evaluated at the start of the most recent step
    pub fn last_forces(&self) -> &[NVec2] {
        &self.f_old
    }

    fn ensure_len(&mut self, n: usize) {
        if self.f_old.len() != n {
            self.f_old.resize(n, NVec2::zeros());
            self.f_new.resize(n, NVec2::zeros());
        }
    }
}

/// Advance the system by one step of semi-implicit Euler
pub fn symplectic_euler_step(sys: &mut System, forces: &ForceSet, params: &Parameters, buf: &mut StepBuffers) -> Result<(), NumericalFault> {
    buf.ensure_len(sys.len());
    forces.accumulate_forces(sys, &mut buf.f_old)?;
    symplectic_euler(sys, &buf.f_old, params.dt);
    Ok(())
}

/// Advance the system by one step using velocity-Verlet
/// Uses two force evaluations per step
pub fn verlet_step(sys: &mut System, forces: &ForceSet, params: &Parameters, buf: &mut StepBuffers) -> Result<(), NumericalFault> {
    buf.ensure_len(sys.len());
    let dt = params.dt;
    let half_dt = 0.5 * dt;

    // F_n from x_n
    forces.accumulate_forces(sys, &mut buf.f_old)?;

    // Kick: v_n+1/2 = v_n + (dt/2) F_n / m
    for (b, f) in sys.bodies.iter_mut().zip(buf.f_old.iter()) {
        b.v += *f / b.mass() * half_dt;
    }

    // Drift: x_n+1 = x_n + dt v_n+1/2
    for b in sys.bodies.iter_mut() {
        b.x += b.v * dt;
    }

    // F_n+1 from x_n+1
    forces.accumulate_forces(sys, &mut buf.f_new)?;

    // Second kick: v_n+1 = v_n+1/2 + (dt/2) F_n+1 / m
    for (b, f) in sys.bodies.iter_mut().zip(buf.f_new.iter()) {
        b.v += *f / b.mass() * half_dt;
    }
    Ok(())
}

/// Advance by one step with the configured integrator and reject any
/// non-finite result
pub fn advance(sys: &mut System, forces: &ForceSet, params: &Parameters, buf: &mut StepBuffers) -> Result<(), NumericalFault> {
    match params.integrator {
        IntegratorConfig::SymplecticEuler => symplectic_euler_step(sys, forces, params, buf)?,
        IntegratorConfig::Verlet => verlet_step(sys, forces, params, buf)?,
    }
    match sys.first_non_finite() {
        Some(body) => Err(NumericalFault::NonFiniteState { body }),
        None => Ok(()),
    }
}
