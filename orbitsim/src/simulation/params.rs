//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `g`,
//! - fixed step size `dt` and the number of steps,
//! - the integrator that advances the state

use crate::configuration::config::IntegratorConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub dt: f64, // step size (s)
    pub total_steps: u64, // number of steps in the run
    pub integrator: IntegratorConfig, // symplectic euler or verlet
}

impl Parameters {
    /// Elapsed simulated time at the start of `step`
    pub fn elapsed(&self, step: u64) -> f64 {
        step as f64 * self.dt
    }

    /// Simulated time covered by the whole run
    pub fn duration(&self) -> f64 {
        self.elapsed(self.total_steps)
    }

    /// How many steps fit in `period`; the stability guideline asks for >= 1000
    pub fn steps_per_period(&self, period: f64) -> f64 {
        period / self.dt
    }
}
