//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator and force model (full vs. restricted gravity)
//! - [`ParametersConfig`] – time step, step count, physical constant, random seed
//! - [`SamplingConfig`]   – trajectory sampling stride and window
//! - [`AnalysisConfig`]   – which bodies the resonance analysis compares
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A Jupiter/Io/Europa scenario matching these types:
//!
//! ```yaml
//! engine:
//!   integrator: symplectic_euler   # or "verlet"
//!   include_mutual_gravity: true   # false -> only the central body attracts the others
//!
//! parameters:
//!   time_step_seconds: 60.0
//!   total_steps: 14400000
//!   seed: 42                       # fixes every `phase_angle_rad: random`
//!
//! sampling:
//!   sample_stride: 240
//!   sample_window: { kind: last_k, k: 100000 }
//!
//! analysis:
//!   reference: Jupiter
//!   pair: [Io, Europa]
//!
//! bodies:
//!   - name: Jupiter
//!     mass_kg: 1.898e27
//!     position_m: [0.0, 0.0]
//!     velocity_m_s: [0.0, 0.0]
//!   - name: Io
//!     mass_kg: 8.93e22
//!     semi_major_axis_m: 4.22e8
//!     eccentricity: 0.0041
//!     reference_mass_kg: 1.898e27
//!     phase_angle_rad: random
//! ```
//!
//! The scenario builder maps this configuration into the runtime
//! representation and performs all validation.

use serde::Deserialize;

/// Newtonian gravitational constant in SI units (m^3 kg^-1 s^-2)
pub const DEFAULT_GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Which integrator advances the system
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "symplectic_euler")] // velocity first, then position with the new velocity; one force evaluation
    SymplecticEuler,

    #[serde(rename = "verlet")] // velocity Verlet (kick-drift-kick); two force evaluations per step
    Verlet,
}

/// A body referenced either by its name or by its zero-based index
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum BodyRef {
    Index(usize),
    Name(String),
}

impl std::fmt::Display for BodyRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyRef::Index(i) => write!(f, "#{}", i),
            BodyRef::Name(n) => write!(f, "{}", n),
        }
    }
}

/// Engine configuration: how bodies interact and how the state is advanced
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig, // time integrator
    #[serde(default = "default_true")]
    pub include_mutual_gravity: bool, // `false` - only pairs involving the central body interact
    #[serde(default)]
    pub central_body: Option<BodyRef>, // dominant mass; defaults to the most massive body
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::default(),
            include_mutual_gravity: true,
            central_body: None,
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: f64,
    pub time_step_seconds: f64, // fixed step size
    pub total_steps: u64,
    #[serde(default)]
    pub seed: Option<u64>, // seed for random phases; drawn at build time when absent
}

/// Which part of the run the trajectory sampler keeps
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleWindow {
    #[default]
    All,
    FirstK { k: u64 },          // steps [0, k)
    LastK { k: u64 },           // steps [total - k, total)
    FirstAndLastK { k: u64 },   // union of the two above
    Range { from: u64, to: u64 }, // steps [from, to)
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SamplingConfig {
    #[serde(default = "default_stride")]
    pub sample_stride: u64, // record every n-th step
    #[serde(default)]
    pub sample_window: SampleWindow,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_stride: default_stride(),
            sample_window: SampleWindow::All,
        }
    }
}

/// Resonance analysis settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub reference: BodyRef, // angles are measured around this body
    pub pair: [BodyRef; 2], // ratio is revolutions(pair[0]) : revolutions(pair[1])
    #[serde(default)]
    pub angle_stride: Option<u64>, // defaults to the sampling stride
}

/// Initial phase on the orbit: a fixed angle or `random`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum PhaseConfig {
    Angle(f64),
    Keyword(PhaseKeyword),
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKeyword {
    Random,
}

/// How a body's initial position and velocity are given
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum InitialState {
    /// Explicit coordinates
    Cartesian {
        position_m: Vec<f64>,
        velocity_m_s: Vec<f64>,
    },
    /// Orbital elements; state derived through the vis-viva relation
    Orbital {
        semi_major_axis_m: f64,
        eccentricity: f64,
        reference_mass_kg: f64,
        phase_angle_rad: PhaseConfig,
        #[serde(default)]
        center_body: Option<String>, // offset by this (earlier) body's initial state
    },
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub mass_kg: f64,
    #[serde(flatten)]
    pub initial: InitialState,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub analysis: Option<AnalysisConfig>,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Parse a scenario from a YAML string
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// Parse a scenario from any reader (file, buffer)
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }
}

fn default_true() -> bool {
    true
}

fn default_gravitational_constant() -> f64 {
    DEFAULT_GRAVITATIONAL_CONSTANT
}

fn default_stride() -> u64 {
    1
}
