pub mod error;
pub mod simulation;
pub mod configuration;
pub mod analysis;
pub mod export;
pub mod benchmark;

pub use error::{ConfigError, NumericalFault, SimError};

pub use simulation::vector::{NVec2, distance, unit_direction, polar_angle};
pub use simulation::states::{Body, System};
pub use simulation::params::Parameters;
pub use simulation::forces::{ForceSet, ForceTerm, Interaction, NewtonianGravity, PairForce};
pub use simulation::integrator::{symplectic_euler, advance, StepBuffers};
pub use simulation::sampler::{Sampler, TrajectorySample};
pub use simulation::angles::OrbitAngleTracker;
pub use simulation::scenario::{Scenario, SamplingPlan, AnglePlan, orbital_state};
pub use simulation::engine::{Engine, Simulation, CompletedRun, AnalyzedRun, RunPhase};

pub use analysis::resonance::{
    count_revolutions, simplify, Ratio, ResonanceAnalyzer, ResonanceReport, RevolutionCounter, RunningRatio,
};
pub use analysis::period::{kepler_period, measured_period, period_from_crossings};

pub use configuration::config::{
    ScenarioConfig, EngineConfig, ParametersConfig, SamplingConfig, AnalysisConfig, BodyConfig,
    BodyRef, IntegratorConfig, InitialState, PhaseConfig, PhaseKeyword, SampleWindow,
    DEFAULT_GRAVITATIONAL_CONSTANT,
};

pub use benchmark::benchmark::{bench_forces, bench_steps};
