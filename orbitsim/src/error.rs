//! Error types for scenario construction and the stepping loop
//!
//! - [`ConfigError`]     – rejected before any simulation work starts
//! - [`NumericalFault`]  – raised inside a step (coincident bodies, non-finite state)
//! - [`SimError`]        – what a run returns; wraps the two above plus cancellation

/// Invalid scenario configuration, detected at construction time
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Fewer than two bodies were declared
    TooFewBodies {
        count: usize,
    },
    /// Mass must be finite and strictly positive
    NonPositiveMass {
        body: String,
        mass: f64,
    },
    /// Semi-major axis must be finite and strictly positive
    NonPositiveSemiMajorAxis {
        body: String,
        a: f64,
    },
    /// Eccentricity must lie in [0, 1)
    EccentricityOutOfRange {
        body: String,
        e: f64,
    },
    /// Reference mass used for the vis-viva relation must be positive
    NonPositiveReferenceMass {
        body: String,
        mass: f64,
    },
    /// Phase angle must be finite
    NonFinitePhase {
        body: String,
    },
    /// Cartesian position or velocity has the wrong arity or a non-finite component
    InvalidVector {
        body: String,
        field: &'static str,
    },
    NonPositiveTimeStep {
        dt: f64,
    },
    NonPositiveGravitationalConstant {
        g: f64,
    },
    ZeroTotalSteps,
    ZeroSampleStride,
    ZeroAngleStride,
    /// Sample window selects no steps at all
    EmptySampleWindow,
    DuplicateBodyName {
        name: String,
    },
    /// A body was referenced by a name that is not declared
    UnknownBody {
        name: String,
    },
    /// A body was referenced by an index past the end of the body list
    BodyIndexOutOfRange {
        index: usize,
        count: usize,
    },
    /// `center_body` must refer to a body declared earlier in the list
    CenterNotDeclaredBefore {
        body: String,
        center: String,
    },
    /// Two bodies start at the same position
    CoincidentBodies {
        a: String,
        b: String,
    },
    /// The analysis pair must name two distinct bodies, neither being the reference
    InvalidAnalysisPair {
        reason: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::TooFewBodies { count } => {
                write!(f, "at least two bodies are required, got {}", count)
            }
            ConfigError::NonPositiveMass { body, mass } => {
                write!(f, "body '{}': mass must be > 0, got {}", body, mass)
            }
            ConfigError::NonPositiveSemiMajorAxis { body, a } => {
                write!(f, "body '{}': semi-major axis must be > 0, got {}", body, a)
            }
            ConfigError::EccentricityOutOfRange { body, e } => {
                write!(f, "body '{}': eccentricity must be in [0, 1), got {}", body, e)
            }
            ConfigError::NonPositiveReferenceMass { body, mass } => {
                write!(f, "body '{}': reference mass must be > 0, got {}", body, mass)
            }
            ConfigError::NonFinitePhase { body } => {
                write!(f, "body '{}': phase angle is not finite", body)
            }
            ConfigError::InvalidVector { body, field } => {
                write!(f, "body '{}': `{}` must be two finite numbers", body, field)
            }
            ConfigError::NonPositiveTimeStep { dt } => {
                write!(f, "time step must be > 0, got {}", dt)
            }
            ConfigError::NonPositiveGravitationalConstant { g } => {
                write!(f, "gravitational constant must be > 0, got {}", g)
            }
            ConfigError::ZeroTotalSteps => write!(f, "total_steps must be > 0"),
            ConfigError::ZeroSampleStride => write!(f, "sample_stride must be > 0"),
            ConfigError::ZeroAngleStride => write!(f, "angle_stride must be > 0"),
            ConfigError::EmptySampleWindow => write!(f, "sample window selects no steps"),
            ConfigError::DuplicateBodyName { name } => {
                write!(f, "body name '{}' is declared more than once", name)
            }
            ConfigError::UnknownBody { name } => write!(f, "no body named '{}'", name),
            ConfigError::BodyIndexOutOfRange { index, count } => {
                write!(f, "body index {} out of range for {} bodies", index, count)
            }
            ConfigError::CenterNotDeclaredBefore { body, center } => {
                write!(f, "body '{}': center body '{}' must be declared before it", body, center)
            }
            ConfigError::CoincidentBodies { a, b } => {
                write!(f, "bodies '{}' and '{}' start at the same position", a, b)
            }
            ConfigError::InvalidAnalysisPair { reason } => {
                write!(f, "invalid analysis pair: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Numerical fault raised while evaluating forces or advancing the state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericalFault {
    /// Zero separation between bodies `i` and `j`; the force is undefined
    CoincidentBodies {
        i: usize,
        j: usize,
    },
    /// Position or velocity of `body` stopped being finite
    NonFiniteState {
        body: usize,
    },
}

impl std::fmt::Display for NumericalFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericalFault::CoincidentBodies { i, j } => {
                write!(f, "bodies {} and {} coincide (zero separation)", i, j)
            }
            NumericalFault::NonFiniteState { body } => {
                write!(f, "state of body {} is no longer finite", body)
            }
        }
    }
}

impl std::error::Error for NumericalFault {}

/// Failure of a whole run. No partial results accompany any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    Config(ConfigError),
    /// A step failed; the run was aborted at `step`
    Numerical {
        step: u64,
        fault: NumericalFault,
    },
    /// Cancellation was observed at the boundary before `step`
    Cancelled {
        step: u64,
    },
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::Config(e) => write!(f, "configuration error: {}", e),
            SimError::Numerical { step, fault } => {
                write!(f, "numerical fault at step {}: {}", step, fault)
            }
            SimError::Cancelled { step } => write!(f, "run cancelled before step {}", step),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Config(e) => Some(e),
            SimError::Numerical { fault, .. } => Some(fault),
            SimError::Cancelled { .. } => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        SimError::Config(e)
    }
}
