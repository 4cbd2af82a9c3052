use std::f64::consts::{PI, TAU};

use approx::assert_relative_eq;

use orbitsim::analysis::period::{measured_period, period_from_crossings, semi_major_axis_from_state};
use orbitsim::analysis::resonance::{analyze, ratio_history, revolution_indices, running_ratios};
use orbitsim::{
    count_revolutions, polar_angle, simplify, NVec2, Ratio, ResonanceAnalyzer, ResonanceReport,
    RevolutionCounter,
};

/// Angle series of a body doing `samples_per_orbit` samples per revolution,
/// wrapped into (-pi, pi]
pub fn circular_angles(samples_per_orbit: f64, phase: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let theta = phase + TAU * n as f64 / samples_per_orbit;
            let wrapped = theta.sin().atan2(theta.cos());
            if wrapped == -PI { PI } else { wrapped }
        })
        .collect()
}

// ==================================================================================
// Revolution counting
// ==================================================================================

#[test]
fn counts_negative_to_non_negative_transitions() {
    let angles = [-0.1, 0.1, -0.2, 0.3, -0.05, 0.05];
    assert_eq!(count_revolutions(&angles), 3);
    assert_eq!(revolution_indices(&angles), vec![1, 3, 5]);
}

#[test]
fn zero_counts_as_non_negative() {
    assert_eq!(count_revolutions(&[-0.1, 0.0]), 1);
    assert_eq!(count_revolutions(&[0.0, -0.1]), 0);
}

#[test]
fn short_series_have_no_revolutions() {
    assert_eq!(count_revolutions(&[]), 0);
    assert_eq!(count_revolutions(&[-1.0]), 0);
}

#[test]
fn clockwise_motion_counts_at_negative_x_axis() {
    // the wrap from -pi to pi looks like a crossing
    let mut cw = circular_angles(20.0, 0.1, 201);
    cw.reverse();
    assert_eq!(count_revolutions(&cw), 10);
    assert!(revolution_indices(&cw).iter().all(|&k| cw[k] > 2.5));
}

#[test]
fn counter_matches_batch_on_every_prefix() {
    let angles = circular_angles(37.0, 0.3, 500);
    let mut counter = RevolutionCounter::new();

    assert_eq!(counter.count(), count_revolutions(&angles[..0]));
    for k in 1..=angles.len() {
        counter.push(angles[k - 1]);
        assert_eq!(counter.count(), count_revolutions(&angles[..k]), "prefix {}", k);
    }
}

#[test]
fn counts_one_per_orbit() {
    // 0.1 + 2 pi * 400 / 20 passes 20 full turns
    let angles = circular_angles(20.0, 0.1, 401);
    assert_eq!(count_revolutions(&angles), 20);
}

// ==================================================================================
// Ratio reduction
// ==================================================================================

#[test]
fn simplify_reduces_by_gcd() {
    assert_eq!(simplify(6, 3), Some(Ratio { numerator: 2, denominator: 1 }));
    assert_eq!(simplify(462, 231), Some(Ratio { numerator: 2, denominator: 1 }));
    assert_eq!(simplify(4, 6), Some(Ratio { numerator: 2, denominator: 3 }));
    assert_eq!(simplify(7, 7), Some(Ratio { numerator: 1, denominator: 1 }));
}

#[test]
fn simplify_zero_cases() {
    assert_eq!(simplify(0, 5), Some(Ratio { numerator: 0, denominator: 1 }));
    assert_eq!(simplify(5, 0), None);
    assert_eq!(simplify(0, 0), None);
}

#[test]
fn ratio_display() {
    let r = simplify(462, 231).unwrap();
    assert_eq!(r.to_string(), "2:1");
    assert_relative_eq!(r.as_f64(), 2.0);
}

#[test]
fn report_keeps_unreduced_ratio() {
    let report = ResonanceReport::from_counts(462, 231);
    assert_eq!(report.ratio_numerator, Some(2));
    assert_eq!(report.ratio_denominator, Some(1));
    assert_relative_eq!(report.ratio.unwrap(), 2.0);

    let report = ResonanceReport::from_counts(3, 0);
    assert_eq!(report.reduced(), None);
    assert_eq!(report.ratio, None);
}

// ==================================================================================
// Resonance analysis
// ==================================================================================

#[test]
fn two_to_one_resonance() {
    let a = circular_angles(20.0, 0.1, 401);
    let b = circular_angles(40.0, 0.1, 401);

    let report = analyze(&a, &b);
    assert_eq!(report.revolutions_body_a, 20);
    assert_eq!(report.revolutions_body_b, 10);
    assert_eq!(report.reduced(), Some(Ratio { numerator: 2, denominator: 1 }));
}

#[test]
fn analyze_uses_common_prefix() {
    let a = circular_angles(20.0, 0.1, 401);
    let b = circular_angles(40.0, 0.1, 201);

    assert_eq!(analyze(&a, &b), analyze(&a[..201], &b));
}

#[test]
fn incremental_analyzer_matches_batch_prefixes() {
    let a = circular_angles(13.0, 0.7, 300);
    let b = circular_angles(29.0, -2.0, 300);
    let mut analyzer = ResonanceAnalyzer::new();

    for k in 1..=a.len() {
        analyzer.push(a[k - 1], b[k - 1]);
        assert_eq!(analyzer.samples_seen(), k);
        assert_eq!(analyzer.report(), analyze(&a[..k], &b[..k]), "prefix {}", k);
    }
}

#[test]
fn running_ratios_one_entry_per_event() {
    let a = circular_angles(20.0, 0.1, 401);
    let b = circular_angles(40.0, 0.1, 401);

    let running = running_ratios(&a, &b);
    // every crossing of b coincides with one of a
    assert_eq!(running.len(), 20);

    let first = running[0];
    assert_eq!(first.sample_index, 20);
    assert_eq!((first.revolutions_a, first.revolutions_b), (1, 0));
    assert_eq!(first.ratio, None);

    let last = running[running.len() - 1];
    assert_eq!((last.revolutions_a, last.revolutions_b), (20, 10));
    assert_relative_eq!(last.ratio.unwrap(), 2.0);
}

#[test]
fn ratio_history_covers_every_sample_after_the_first() {
    let a = circular_angles(20.0, 0.1, 101);
    let b = circular_angles(40.0, 0.1, 101);

    let history = ratio_history(&a, &b);
    assert_eq!(history.len(), 100);
    assert_eq!(history[0].sample_index, 1);
    assert_eq!(history[99].sample_index, 100);
    assert_eq!((history[99].revolutions_a, history[99].revolutions_b), (5, 2));
}

// ==================================================================================
// Angles and periods
// ==================================================================================

#[test]
fn polar_angle_is_in_half_open_range() {
    let origin = NVec2::new(1.0, 1.0);
    assert_relative_eq!(polar_angle(&origin, &NVec2::new(2.0, 1.0)), 0.0);
    assert_relative_eq!(polar_angle(&origin, &NVec2::new(1.0, 2.0)), PI / 2.0);
    assert_relative_eq!(polar_angle(&origin, &NVec2::new(1.0, 0.0)), -PI / 2.0);

    // atan2 gives -pi for a negative-zero y component
    let angle = polar_angle(&NVec2::zeros(), &NVec2::new(-1.0, -0.0));
    assert_eq!(angle, PI);

    for k in 0..360 {
        let t = (k as f64).to_radians();
        let a = polar_angle(&origin, &(origin + NVec2::new(t.cos(), t.sin())));
        assert!(a > -PI && a <= PI, "angle {} out of range", a);
    }
}

#[test]
fn period_from_crossing_spacing() {
    let angles = circular_angles(50.0, 0.2, 1000);
    let period = period_from_crossings(&angles, 10.0).unwrap();
    assert_relative_eq!(period, 500.0, max_relative = 1e-12);

    assert_eq!(period_from_crossings(&angles[..60], 10.0), None);
}

#[test]
fn measured_period_needs_a_revolution() {
    assert_eq!(measured_period(0, 100.0), None);
    assert_relative_eq!(measured_period(4, 100.0).unwrap(), 25.0);
}

#[test]
fn semi_major_axis_inverts_vis_viva() {
    let mu = 1.0;
    // circular orbit: v^2 = mu / r
    assert_relative_eq!(semi_major_axis_from_state(2.0, (0.5f64).sqrt(), mu).unwrap(), 2.0, max_relative = 1e-12);
    // escape speed is unbound
    assert_eq!(semi_major_axis_from_state(2.0, 1.0, mu), None);
}
