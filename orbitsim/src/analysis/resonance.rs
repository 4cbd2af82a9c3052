//! Revolution counting and mean-motion resonance ratios
//!
//! A revolution is counted every time an angle series steps from a negative
//! value to a non-negative one between consecutive samples, i.e. the body
//! crosses the positive x-axis of the reference frame moving counterclockwise.
//!
//! This is an approximation and is kept as such:
//! - a stride longer than half an orbit can skip crossings (aliasing);
//! - a body moving clockwise is counted where it wraps from -pi to pi on the
//!   negative x-axis; a body that reverses direction may be miscounted.
//! Neither case panics.

use serde::Serialize;

/// Whether the step `prev -> next` completes a counterclockwise revolution
pub fn is_revolution(prev: f64, next: f64) -> bool {
    prev < 0.0 && next >= 0.0
}

/// Number of negative -> non-negative transitions in `angles`
pub fn count_revolutions(angles: &[f64]) -> u64 {
    angles
        .windows(2)
        .filter(|w| is_revolution(w[0], w[1]))
        .count() as u64
}

/// Sample indices at which a revolution completes (index of the non-negative sample)
pub fn revolution_indices(angles: &[f64]) -> Vec<usize> {
    angles
        .windows(2)
        .enumerate()
        .filter(|(_, w)| is_revolution(w[0], w[1]))
        .map(|(k, _)| k + 1)
        .collect()
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Reduced integer ratio `numerator : denominator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ratio {
    pub numerator: u64,
    pub denominator: u64,
}

impl Ratio {
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl std::fmt::Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

/// Reduce `n1 : n2` by their gcd
///
/// `None` when `n2 == 0` (ratio undefined). `0 : n` reduces to `0 : 1`.
pub fn simplify(n1: u64, n2: u64) -> Option<Ratio> {
    if n2 == 0 {
        return None;
    }
    let g = gcd(n1, n2);
    Some(Ratio {
        numerator: n1 / g,
        denominator: n2 / g,
    })
}

/// Incremental revolution counter over one angle series
///
/// After `k` pushes, `count()` equals `count_revolutions` on the first `k` samples.
#[derive(Debug, Clone, Default)]
pub struct RevolutionCounter {
    last: Option<f64>,
    count: u64,
}

impl RevolutionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next angle; `true` if it completes a revolution
    pub fn push(&mut self, angle: f64) -> bool {
        let completed = matches!(self.last, Some(prev) if is_revolution(prev, angle));
        if completed {
            self.count += 1;
        }
        self.last = Some(angle);
        completed
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// Structured result of comparing two bodies' revolution counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResonanceReport {
    pub revolutions_body_a: u64,
    pub revolutions_body_b: u64,
    pub ratio_numerator: Option<u64>,
    pub ratio_denominator: Option<u64>,
    pub ratio: Option<f64>, // unreduced n_a / n_b; `None` while undefined
}

impl ResonanceReport {
    pub fn from_counts(revolutions_body_a: u64, revolutions_body_b: u64) -> Self {
        let reduced = simplify(revolutions_body_a, revolutions_body_b);
        Self {
            revolutions_body_a,
            revolutions_body_b,
            ratio_numerator: reduced.map(|r| r.numerator),
            ratio_denominator: reduced.map(|r| r.denominator),
            ratio: reduced.map(|_| revolutions_body_a as f64 / revolutions_body_b as f64),
        }
    }

    pub fn reduced(&self) -> Option<Ratio> {
        match (self.ratio_numerator, self.ratio_denominator) {
            (Some(numerator), Some(denominator)) => Some(Ratio { numerator, denominator }),
            _ => None,
        }
    }
}

/// Running ratio after a newly completed revolution of either body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunningRatio {
    pub sample_index: usize,
    pub revolutions_a: u64,
    pub revolutions_b: u64,
    pub ratio: Option<f64>,
}

/// Compares two angle series sampled at the same instants
///
/// Feed samples one instant at a time with [`ResonanceAnalyzer::push`];
/// the batch functions below are built on the same counters so a prefix of
/// length `k` always yields the batch answer for that prefix.
#[derive(Debug, Clone, Default)]
pub struct ResonanceAnalyzer {
    a: RevolutionCounter,
    b: RevolutionCounter,
    samples: usize,
}

impl ResonanceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sampling instant. Returns the running ratio when either body
    /// completed a revolution at this instant.
    pub fn push(&mut self, angle_a: f64, angle_b: f64) -> Option<RunningRatio> {
        let index = self.samples;
        self.samples += 1;
        let done_a = self.a.push(angle_a);
        let done_b = self.b.push(angle_b);
        if done_a || done_b {
            Some(self.running(index))
        } else {
            None
        }
    }

    pub fn samples_seen(&self) -> usize {
        self.samples
    }

    pub fn revolutions(&self) -> (u64, u64) {
        (self.a.count(), self.b.count())
    }

    pub fn report(&self) -> ResonanceReport {
        ResonanceReport::from_counts(self.a.count(), self.b.count())
    }

    fn running(&self, sample_index: usize) -> RunningRatio {
        let (na, nb) = self.revolutions();
        RunningRatio {
            sample_index,
            revolutions_a: na,
            revolutions_b: nb,
            ratio: if nb > 0 { Some(na as f64 / nb as f64) } else { None },
        }
    }
}

/// Batch analysis over the common prefix of both series
pub fn analyze(a: &[f64], b: &[f64]) -> ResonanceReport {
    let n = a.len().min(b.len());
    ResonanceReport::from_counts(count_revolutions(&a[..n]), count_revolutions(&b[..n]))
}

/// One entry per sampling instant at which either body completed a revolution
pub fn running_ratios(a: &[f64], b: &[f64]) -> Vec<RunningRatio> {
    let mut analyzer = ResonanceAnalyzer::new();
    a.iter()
        .zip(b.iter())
        .filter_map(|(&x, &y)| analyzer.push(x, y))
        .collect()
}

/// Running ratio at every sampling instant after the first
/// (`None` until body b completes its first revolution)
pub fn ratio_history(a: &[f64], b: &[f64]) -> Vec<RunningRatio> {
    let mut analyzer = ResonanceAnalyzer::new();
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    for (k, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
        analyzer.push(x, y);
        if k > 0 {
            out.push(analyzer.running(k));
        }
    }
    out
}
