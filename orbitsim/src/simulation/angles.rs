//! Angular position of each body around a reference body
//!
//! At every `stride`-th step the tracker records `atan2(dy, dx)` of each
//! tracked body relative to the reference. It knows nothing about
//! revolutions; counting lives in `analysis::resonance`.

use super::states::System;
use super::vector::polar_angle;

#[derive(Debug, Clone)]
pub struct OrbitAngleTracker {
    reference: usize,
    stride: u64,
    tracked: Vec<usize>, // body indices, in system order
    steps: Vec<u64>, // step index of every sampling instant
    series: Vec<Vec<f64>>, // series[k] belongs to tracked[k]
}

impl OrbitAngleTracker {
    /// Track every body except `reference`
    pub fn new(reference: usize, body_count: usize, stride: u64) -> Self {
        let tracked: Vec<usize> = (0..body_count).filter(|&i| i != reference).collect();
        let series = vec![Vec::new(); tracked.len()];
        Self {
            reference,
            stride: stride.max(1),
            tracked,
            steps: Vec::new(),
            series,
        }
    }

    pub fn reference(&self) -> usize {
        self.reference
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn tracked(&self) -> &[usize] {
        &self.tracked
    }

    /// Current angle of `body` around the reference, in (-pi, pi]
    pub fn angle(sys: &System, reference: usize, body: usize) -> f64 {
        polar_angle(&sys.bodies[reference].x, &sys.bodies[body].x)
    }

    /// Record one angle per tracked body when `step` is on the cadence
    pub fn observe(&mut self, step: u64, sys: &System) -> bool {
        if step % self.stride != 0 {
            return false;
        }
        self.steps.push(step);
        for (k, &body) in self.tracked.iter().enumerate() {
            self.series[k].push(Self::angle(sys, self.reference, body));
        }
        true
    }

    /// Step indices of the sampling instants
    pub fn steps(&self) -> &[u64] {
        &self.steps
    }

    /// Angle series of `body`; `None` for the reference or an unknown index
    pub fn series(&self, body: usize) -> Option<&[f64]> {
        self.tracked
            .iter()
            .position(|&i| i == body)
            .map(|k| self.series[k].as_slice())
    }
}
