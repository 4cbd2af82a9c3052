//! Stepping loop and run lifecycle
//!
//! `Initialized` -> `Stepping` -> `Completed` -> `Analyzed`, or
//! `Stepping` -> `Failed` when a step faults
//!
//! - [`Simulation`]   owns the scenario and runs the loop (Initialized, Stepping)
//! - [`CompletedRun`] holds the recorded trajectory and angle series (Completed)
//! - [`AnalyzedRun`]  adds the resonance report (Analyzed)
//!
//! Each step observes first (sampler, angle tracker), then evaluates forces
//! and advances the state. A failed step aborts the run; no partial output
//! is returned and the simulation refuses every further step.

use std::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::analysis::resonance::{self, ResonanceReport, RunningRatio};
use crate::error::{ConfigError, SimError};
use crate::simulation::angles::OrbitAngleTracker;
use crate::simulation::integrator::{advance, StepBuffers};
use crate::simulation::params::Parameters;
use crate::simulation::sampler::{Sampler, TrajectorySample};
use crate::simulation::scenario::{AnglePlan, Scenario};
use crate::simulation::states::System;

/// Force-model settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    pub include_mutual_gravity: bool, // false = only pairs with the central body interact
    pub central: usize, // dominant body index
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Initialized,
    Stepping,
    Completed,
    Analyzed,
    /// A step faulted; the state may be half-advanced and is not stepped again
    Failed,
}

pub struct Simulation {
    scenario: Scenario,
    sampler: Sampler,
    tracker: OrbitAngleTracker,
    buffers: StepBuffers,
    step: u64,
    phase: RunPhase,
    failure: Option<SimError>,
}

impl Simulation {
    pub fn new(scenario: Scenario) -> Self {
        let n = scenario.system.len();
        let sampler = Sampler::new(
            scenario.sampling.stride,
            scenario.parameters.total_steps,
            scenario.sampling.window,
        );
        let tracker = OrbitAngleTracker::new(scenario.angles.reference, n, scenario.angles.stride);
        Self {
            scenario,
            sampler,
            tracker,
            buffers: StepBuffers::new(n),
            step: 0,
            phase: RunPhase::Initialized,
            failure: None,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Index of the next step to run
    pub fn step_index(&self) -> u64 {
        self.step
    }

    pub fn system(&self) -> &System {
        &self.scenario.system
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// The fault that stopped the run, if any
    pub fn failure(&self) -> Option<&SimError> {
        self.failure.as_ref()
    }

    /// Observe the state at the start of the current step, then advance it
    ///
    /// After a fault every call returns that same error without touching
    /// the state or the recorded samples.
    pub fn step_once(&mut self) -> Result<(), SimError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.phase = RunPhase::Stepping;
        let step = self.step;
        let time_s = self.scenario.parameters.elapsed(step);

        self.sampler.observe(step, time_s, &self.scenario.system);
        self.tracker.observe(step, &self.scenario.system);

        let Scenario {
            system,
            parameters,
            forces,
            ..
        } = &mut self.scenario;
        if let Err(fault) = advance(system, forces, parameters, &mut self.buffers) {
            let err = SimError::Numerical { step, fault };
            self.phase = RunPhase::Failed;
            self.failure = Some(err.clone());
            return Err(err);
        }

        self.step += 1;
        Ok(())
    }

    /// Run all configured steps
    pub fn run(self) -> Result<CompletedRun, SimError> {
        self.run_until(|| false)
    }

    /// Run all configured steps, checking `cancel` before each one
    pub fn run_with_cancel(self, cancel: &AtomicBool) -> Result<CompletedRun, SimError> {
        self.run_until(|| cancel.load(Ordering::Relaxed))
    }

    fn run_until<F: Fn() -> bool>(mut self, cancelled: F) -> Result<CompletedRun, SimError> {
        if let Some(err) = self.failure.take() {
            return Err(err);
        }
        let total = self.scenario.parameters.total_steps;
        while self.step < total {
            if cancelled() {
                return Err(SimError::Cancelled { step: self.step });
            }
            self.step_once()?;
        }
        self.phase = RunPhase::Completed;

        info!(
            "run completed: {} steps, {} trajectory samples, {} angle samples",
            self.step,
            self.sampler.samples().len(),
            self.tracker.steps().len()
        );

        let names = self.scenario.body_names();
        Ok(CompletedRun {
            names,
            parameters: self.scenario.parameters,
            angle_plan: self.scenario.angles,
            seed: self.scenario.seed,
            trajectory: self.sampler.into_samples(),
            tracker: self.tracker,
            final_state: self.scenario.system,
            steps_completed: self.step,
        })
    }
}

/// A run that finished every step; nothing mutates after this point
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub names: Vec<String>,
    pub parameters: Parameters,
    pub angle_plan: AnglePlan,
    pub seed: Option<u64>,
    pub trajectory: Vec<TrajectorySample>,
    pub tracker: OrbitAngleTracker,
    pub final_state: System,
    pub steps_completed: u64,
}

impl CompletedRun {
    pub fn phase(&self) -> RunPhase {
        RunPhase::Completed
    }

    /// Seconds between two angle samples
    pub fn angle_interval(&self) -> f64 {
        self.tracker.stride() as f64 * self.parameters.dt
    }

    /// Angle series of `body` around the reference body
    pub fn angles(&self, body: usize) -> Option<&[f64]> {
        self.tracker.series(body)
    }

    /// Compare the configured analysis pair
    pub fn analyze(self) -> Result<AnalyzedRun, ConfigError> {
        let (a, b) = self.angle_plan.pair.ok_or(ConfigError::InvalidAnalysisPair {
            reason: "no analysis section configured",
        })?;
        self.analyze_pair(a, b)
    }

    /// Compare any two tracked bodies
    pub fn analyze_pair(self, a: usize, b: usize) -> Result<AnalyzedRun, ConfigError> {
        let series_a = self.tracked_series(a)?;
        let series_b = self.tracked_series(b)?;
        let report = resonance::analyze(series_a, series_b);
        let running = resonance::running_ratios(series_a, series_b);

        info!(
            "{} : {} revolutions = {} : {} (ratio {})",
            self.names[a],
            self.names[b],
            report.revolutions_body_a,
            report.revolutions_body_b,
            report
                .reduced()
                .map(|r| format!("{} = {:.4}", r, report.ratio.unwrap_or(f64::NAN)))
                .unwrap_or_else(|| "undefined".to_string())
        );

        Ok(AnalyzedRun {
            body_a: a,
            body_b: b,
            report,
            running,
            run: self,
        })
    }

    fn tracked_series(&self, body: usize) -> Result<&[f64], ConfigError> {
        if body >= self.names.len() {
            return Err(ConfigError::BodyIndexOutOfRange { index: body, count: self.names.len() });
        }
        self.tracker.series(body).ok_or(ConfigError::InvalidAnalysisPair {
            reason: "pair contains the reference body",
        })
    }
}

/// Terminal state: the completed run plus its resonance analysis
#[derive(Debug, Clone)]
pub struct AnalyzedRun {
    pub body_a: usize,
    pub body_b: usize,
    pub report: ResonanceReport,
    pub running: Vec<RunningRatio>, // one entry per newly completed revolution
    pub run: CompletedRun,
}

impl AnalyzedRun {
    pub fn phase(&self) -> RunPhase {
        RunPhase::Analyzed
    }

    /// Running ratio at every angle sample, for plotting convergence
    pub fn ratio_history(&self) -> Vec<RunningRatio> {
        match (self.run.angles(self.body_a), self.run.angles(self.body_b)) {
            (Some(a), Some(b)) => resonance::ratio_history(a, b),
            _ => Vec::new(),
        }
    }
}
