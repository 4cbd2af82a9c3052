//! Trajectory sampling
//!
//! The sampler observes the system at the start of every step and copies
//! the state of all bodies when the step index is a multiple of the stride
//! and falls inside the configured window. Samples are append-only.

use std::ops::Range;

use crate::configuration::config::SampleWindow;

use super::states::System;
use super::vector::NVec2;

/// State of every body at one sampling instant
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySample {
    pub step: u64, // step index; the state is the one before this step is applied
    pub time_s: f64, // step * dt
    pub positions: Vec<NVec2>, // in system order
    pub velocities: Vec<NVec2>, // in system order
}

impl SampleWindow {
    /// Disjoint, sorted step ranges selected out of `0..total`
    pub fn ranges(&self, total: u64) -> Vec<Range<u64>> {
        let raw = match *self {
            SampleWindow::All => vec![0..total],
            SampleWindow::FirstK { k } => vec![0..k.min(total)],
            SampleWindow::LastK { k } => vec![total.saturating_sub(k)..total],
            SampleWindow::FirstAndLastK { k } => {
                let head = 0..k.min(total);
                let tail = total.saturating_sub(k)..total;
                if tail.start <= head.end {
                    vec![0..total]
                } else {
                    vec![head, tail]
                }
            }
            SampleWindow::Range { from, to } => vec![from.min(total)..to.min(total)],
        };
        raw.into_iter().filter(|r| r.start < r.end).collect()
    }

    /// Number of steps in `0..total` this window keeps at the given stride
    pub fn sample_count(&self, total: u64, stride: u64) -> u64 {
        let stride = stride.max(1);
        self.ranges(total).iter().map(|r| multiples_in(r, stride)).sum()
    }
}

/// Number of multiples of `stride` inside `range`
fn multiples_in(range: &Range<u64>, stride: u64) -> u64 {
    range.end.div_ceil(stride) - range.start.div_ceil(stride)
}

#[derive(Debug, Clone)]
pub struct Sampler {
    stride: u64,
    windows: Vec<Range<u64>>,
    samples: Vec<TrajectorySample>,
}

impl Sampler {
    /// `stride` must be > 0; validated by the scenario builder
    pub fn new(stride: u64, total_steps: u64, window: SampleWindow) -> Self {
        // grows as samples arrive, never reserved for the whole run
        Self {
            stride: stride.max(1),
            windows: window.ranges(total_steps),
            samples: Vec::new(),
        }
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Whether the state at the start of `step` is recorded
    pub fn should_record(&self, step: u64) -> bool {
        step % self.stride == 0 && self.windows.iter().any(|r| r.contains(&step))
    }

    /// How many samples a complete run produces
    pub fn expected_len(&self) -> u64 {
        self.windows
            .iter()
            .map(|r| multiples_in(r, self.stride))
            .sum()
    }

    /// Copy the state if `step` is selected; never mutates `sys`
    pub fn observe(&mut self, step: u64, time_s: f64, sys: &System) -> bool {
        if !self.should_record(step) {
            return false;
        }
        self.samples.push(TrajectorySample {
            step,
            time_s,
            positions: sys.bodies.iter().map(|b| b.x).collect(),
            velocities: sys.bodies.iter().map(|b| b.v).collect(),
        });
        true
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<TrajectorySample> {
        self.samples
    }
}
