//! Wall-clock throughput of the force accumulator and the full step
//!
//! Output is plain `N,...` lines; paste into a spreadsheet to graph.

use std::time::Instant;

use crate::configuration::config::{IntegratorConfig, DEFAULT_GRAVITATIONAL_CONSTANT};
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::integrator::{advance, StepBuffers};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, System};
use crate::simulation::vector::NVec2;

/// Central mass plus `n - 1` light bodies on circular orbits, deterministic
fn make_system(n: usize) -> System {
    let g = DEFAULT_GRAVITATIONAL_CONSTANT;
    let m_central = 2.0e30;
    let mut bodies = Vec::with_capacity(n);
    bodies.push(Body::new("central", NVec2::zeros(), NVec2::zeros(), m_central));

    for i in 1..n {
        let i_f = i as f64;
        // deterministic radii and phases, no rand needed
        let r = 1.0e11 * (1.0 + 0.37 * i_f);
        let theta = i_f * 2.399963; // golden angle
        let v = (g * m_central / r).sqrt();
        let (s, c) = theta.sin_cos();
        bodies.push(Body::new(
            format!("b{}", i),
            NVec2::new(r * c, r * s),
            NVec2::new(-v * s, v * c),
            1.0e24,
        ));
    }
    System::new(bodies)
}

fn make_params(integrator: IntegratorConfig) -> Parameters {
    Parameters {
        g: DEFAULT_GRAVITATIONAL_CONSTANT,
        dt: 3600.0,
        total_steps: 0,
        integrator,
    }
}

/// Time one force evaluation for growing N
pub fn bench_forces() {
    println!("N,forces_us");
    for n in [2usize, 3, 4, 8, 16, 32, 64, 128] {
        let sys = make_system(n);
        let forces = ForceSet::new().with(NewtonianGravity::new(DEFAULT_GRAVITATIONAL_CONSTANT, true, 0));
        let mut out = vec![NVec2::zeros(); n];
        let reps = 20_000 / n.max(1) + 1;

        // Warm up
        if forces.accumulate_forces(&sys, &mut out).is_err() {
            println!("{},fault", n);
            continue;
        }

        let t0 = Instant::now();
        for _ in 0..reps {
            if forces.accumulate_forces(&sys, &mut out).is_err() {
                println!("{},fault", n);
                break;
            }
        }
        let us = t0.elapsed().as_secs_f64() * 1.0e6 / reps as f64;
        println!("{},{:.3}", n, us);
    }
}

/// Time a full step for both integrators for growing N
pub fn bench_steps() {
    println!("N,symplectic_euler_us,verlet_us");
    for n in [2usize, 3, 4, 8, 16, 32, 64, 128] {
        let steps = 20_000 / n.max(1) + 1;
        let euler = time_steps(n, steps, IntegratorConfig::SymplecticEuler);
        let verlet = time_steps(n, steps, IntegratorConfig::Verlet);
        match (euler, verlet) {
            (Some(e), Some(v)) => println!("{},{:.3},{:.3}", n, e, v),
            _ => println!("{},fault,fault", n),
        }
    }
}

/// Microseconds per step, `None` if a step faulted
fn time_steps(n: usize, steps: usize, integrator: IntegratorConfig) -> Option<f64> {
    let mut sys = make_system(n);
    let params = make_params(integrator);
    let forces = ForceSet::new().with(NewtonianGravity::new(params.g, true, 0));
    let mut buf = StepBuffers::new(n);

    let t0 = Instant::now();
    for _ in 0..steps {
        advance(&mut sys, &forces, &params, &mut buf).ok()?;
    }
    Some(t0.elapsed().as_secs_f64() * 1.0e6 / steps as f64)
}
