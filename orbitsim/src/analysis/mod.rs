pub mod period;
pub mod resonance;
