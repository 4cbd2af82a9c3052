//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing), validates it, and produces the
//! runtime bundle `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at step 0)
//! - active force set (`ForceSet`)
//! - sampling and angle-tracking plans
//!
//! Every configuration error is reported here, before any stepping starts.

use std::collections::HashSet;
use std::f64::consts::TAU;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::analysis::period::{shortest_orbital_period, vis_viva_speed};
use crate::configuration::config::{
    BodyConfig, BodyRef, InitialState, PhaseConfig, SampleWindow, ScenarioConfig,
};
use crate::error::ConfigError;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};
use crate::simulation::vector::NVec2;

/// Smallest number of steps per shortest orbit considered safe
pub const MIN_STEPS_PER_PERIOD: f64 = 1000.0;

/// Trajectory sampling settings after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    pub stride: u64,
    pub window: SampleWindow,
}

/// Angle tracking settings after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnglePlan {
    pub reference: usize, // angles are measured around this body
    pub stride: u64,
    pub pair: Option<(usize, usize)>, // bodies compared by the resonance analysis
}

/// Fully-initialized simulation scenario
///
/// This is the runtime bundle constructed from a [`ScenarioConfig`]; the
/// stepping loop in `engine` consumes it.
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub sampling: SamplingPlan,
    pub angles: AnglePlan,
    pub system: System,
    pub forces: ForceSet,
    pub seed: Option<u64>, // seed behind random phases; `None` if the caller supplied the RNG
}

impl Scenario {
    /// Build with a `ChaChaRng` seeded from `parameters.seed`, or from a
    /// freshly drawn seed that is logged and kept on the scenario
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let seed = cfg.parameters.seed.unwrap_or_else(rand::random);
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let mut scenario = Self::build_scenario_with_rng(cfg, &mut rng)?;
        scenario.seed = Some(seed);
        info!("random phase seed: {}", seed);
        Ok(scenario)
    }

    /// Build using the given random source for `phase_angle_rad: random`
    pub fn build_scenario_with_rng<R: Rng>(cfg: ScenarioConfig, rng: &mut R) -> Result<Self, ConfigError> {
        // Parameters first: nothing else is worth checking if these are wrong
        let p_cfg = &cfg.parameters;
        let g = p_cfg.gravitational_constant;
        if !(g > 0.0 && g.is_finite()) {
            return Err(ConfigError::NonPositiveGravitationalConstant { g });
        }
        let dt = p_cfg.time_step_seconds;
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(ConfigError::NonPositiveTimeStep { dt });
        }
        if p_cfg.total_steps == 0 {
            return Err(ConfigError::ZeroTotalSteps);
        }
        if cfg.sampling.sample_stride == 0 {
            return Err(ConfigError::ZeroSampleStride);
        }

        let parameters = Parameters {
            g,
            dt,
            total_steps: p_cfg.total_steps,
            integrator: cfg.engine.integrator,
        };

        // Bodies: map `BodyConfig` -> runtime `Body`
        if cfg.bodies.len() < 2 {
            return Err(ConfigError::TooFewBodies { count: cfg.bodies.len() });
        }
        let mut seen = HashSet::new();
        for bc in &cfg.bodies {
            if !seen.insert(bc.name.as_str()) {
                return Err(ConfigError::DuplicateBodyName { name: bc.name.clone() });
            }
        }
        let mut bodies: Vec<Body> = Vec::with_capacity(cfg.bodies.len());
        for bc in &cfg.bodies {
            let body = build_body(bc, &bodies, &cfg, g, rng)?;
            bodies.push(body);
        }
        let system = System::new(bodies);

        if let Some((i, j)) = system.first_coincident_pair() {
            return Err(ConfigError::CoincidentBodies {
                a: system.bodies[i].name.clone(),
                b: system.bodies[j].name.clone(),
            });
        }

        // Engine (runtime) from EngineConfig
        let central = match &cfg.engine.central_body {
            Some(r) => resolve(&system, r)?,
            None => system.most_massive().unwrap_or(0),
        };
        let engine = Engine {
            include_mutual_gravity: cfg.engine.include_mutual_gravity,
            central,
        };

        // Sampling
        let sampling = SamplingPlan {
            stride: cfg.sampling.sample_stride,
            window: cfg.sampling.sample_window,
        };
        if sampling.window.sample_count(parameters.total_steps, sampling.stride) == 0 {
            return Err(ConfigError::EmptySampleWindow);
        }

        let angles = build_angle_plan(&cfg, &system, central)?;

        // Forces: one gravity term; the flag picks full or restricted pairs
        let forces = ForceSet::new().with(NewtonianGravity::new(g, engine.include_mutual_gravity, central));

        info!(
            "scenario: {} bodies, dt = {} s, {} steps ({:.3} days), {} gravity, integrator {:?}",
            system.len(),
            parameters.dt,
            parameters.total_steps,
            parameters.duration() / 86_400.0,
            if engine.include_mutual_gravity { "full" } else { "restricted" },
            parameters.integrator,
        );
        check_time_step(&system, central, &parameters, angles.stride);

        Ok(Self {
            engine,
            parameters,
            sampling,
            angles,
            system,
            forces,
            seed: None,
        })
    }

    /// Body names in system order
    pub fn body_names(&self) -> Vec<String> {
        self.system.bodies.iter().map(|b| b.name.clone()).collect()
    }
}

/// Position and velocity on an orbit around a body of `reference_mass`
/// sitting at the origin at rest
///
/// r = a (1 - e^2) / (1 + e cos theta); speed from vis-viva, direction
/// perpendicular to the radius vector (counterclockwise).
pub fn orbital_state(g: f64, a: f64, e: f64, reference_mass: f64, theta: f64) -> (NVec2, NVec2) {
    let r = a * (1.0 - e * e) / (1.0 + e * theta.cos());
    let (s, c) = theta.sin_cos();
    let v = vis_viva_speed(r, a, g * reference_mass);
    (NVec2::new(r * c, r * s), NVec2::new(-v * s, v * c))
}

fn build_body<R: Rng>(bc: &BodyConfig, built: &[Body], cfg: &ScenarioConfig, g: f64, rng: &mut R) -> Result<Body, ConfigError> {
    let name = bc.name.clone();
    if !(bc.mass_kg > 0.0 && bc.mass_kg.is_finite()) {
        return Err(ConfigError::NonPositiveMass { body: name, mass: bc.mass_kg });
    }

    match &bc.initial {
        InitialState::Cartesian { position_m, velocity_m_s } => {
            let x = to_vec2(position_m).ok_or_else(|| ConfigError::InvalidVector { body: name.clone(), field: "position_m" })?;
            let v = to_vec2(velocity_m_s).ok_or_else(|| ConfigError::InvalidVector { body: name.clone(), field: "velocity_m_s" })?;
            Ok(Body::new(name, x, v, bc.mass_kg))
        }
        InitialState::Orbital {
            semi_major_axis_m: a,
            eccentricity: e,
            reference_mass_kg,
            phase_angle_rad,
            center_body,
        } => {
            let (a, e) = (*a, *e);
            if !(a > 0.0 && a.is_finite()) {
                return Err(ConfigError::NonPositiveSemiMajorAxis { body: name, a });
            }
            if !(0.0..1.0).contains(&e) {
                return Err(ConfigError::EccentricityOutOfRange { body: name, e });
            }
            if !(*reference_mass_kg > 0.0 && reference_mass_kg.is_finite()) {
                return Err(ConfigError::NonPositiveReferenceMass { body: name, mass: *reference_mass_kg });
            }
            let theta = match phase_angle_rad {
                PhaseConfig::Angle(t) if t.is_finite() => *t,
                PhaseConfig::Angle(_) => return Err(ConfigError::NonFinitePhase { body: name }),
                PhaseConfig::Keyword(_) => rng.random_range(0.0..TAU),
            };

            let (mut x, mut v) = orbital_state(g, a, e, *reference_mass_kg, theta);

            if let Some(center) = center_body {
                let host = built.iter().find(|b| &b.name == center).ok_or_else(|| {
                    if cfg.bodies.iter().any(|b| &b.name == center) {
                        ConfigError::CenterNotDeclaredBefore { body: name.clone(), center: center.clone() }
                    } else {
                        ConfigError::UnknownBody { name: center.clone() }
                    }
                })?;
                x += host.x;
                v += host.v;
            }

            debug!(
                "{}: a = {:.4e} m, e = {}, theta = {:.6} rad -> r = {:.4e} m, |v| = {:.4e} m/s",
                name,
                a,
                e,
                theta,
                x.norm(),
                v.norm()
            );
            Ok(Body::new(name, x, v, bc.mass_kg))
        }
    }
}

fn to_vec2(values: &[f64]) -> Option<NVec2> {
    match values {
        [x, y] if x.is_finite() && y.is_finite() => Some(NVec2::new(*x, *y)),
        _ => None,
    }
}

/// Map a name or index onto a body index
pub fn resolve(sys: &System, r: &BodyRef) -> Result<usize, ConfigError> {
    match r {
        BodyRef::Index(i) if *i < sys.len() => Ok(*i),
        BodyRef::Index(i) => Err(ConfigError::BodyIndexOutOfRange { index: *i, count: sys.len() }),
        BodyRef::Name(n) => sys.index_of(n).ok_or_else(|| ConfigError::UnknownBody { name: n.clone() }),
    }
}

fn build_angle_plan(cfg: &ScenarioConfig, system: &System, central: usize) -> Result<AnglePlan, ConfigError> {
    let Some(a_cfg) = &cfg.analysis else {
        return Ok(AnglePlan {
            reference: central,
            stride: cfg.sampling.sample_stride,
            pair: None,
        });
    };

    let reference = resolve(system, &a_cfg.reference)?;
    let first = resolve(system, &a_cfg.pair[0])?;
    let second = resolve(system, &a_cfg.pair[1])?;
    if first == second {
        return Err(ConfigError::InvalidAnalysisPair { reason: "pair names the same body twice" });
    }
    if first == reference || second == reference {
        return Err(ConfigError::InvalidAnalysisPair { reason: "pair contains the reference body" });
    }
    let stride = a_cfg.angle_stride.unwrap_or(cfg.sampling.sample_stride);
    if stride == 0 {
        return Err(ConfigError::ZeroAngleStride);
    }
    Ok(AnglePlan {
        reference,
        stride,
        pair: Some((first, second)),
    })
}

/// Log whether dt and the angle stride suit the fastest orbit
fn check_time_step(system: &System, central: usize, parameters: &Parameters, angle_stride: u64) {
    let Some((body, period)) = shortest_orbital_period(system, central, parameters.g) else {
        debug!("no bound orbit around the central body; time step not checked");
        return;
    };
    let steps = parameters.steps_per_period(period);
    debug!(
        "shortest period: {} at {:.4e} s ({:.0} steps per orbit)",
        system.bodies[body].name, period, steps
    );
    if steps < MIN_STEPS_PER_PERIOD {
        warn!(
            "dt = {} s gives only {:.0} steps per orbit of {} (guideline: >= {})",
            parameters.dt, steps, system.bodies[body].name, MIN_STEPS_PER_PERIOD
        );
    }
    if (angle_stride as f64) > steps / 4.0 {
        warn!(
            "angle stride of {} steps exceeds a quarter orbit of {}; revolution counts may alias",
            angle_stride, system.bodies[body].name
        );
    }
}
