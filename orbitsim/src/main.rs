use orbitsim::{ScenarioConfig, Scenario, Simulation, ResonanceReport};
use orbitsim::{bench_forces, bench_steps};
use orbitsim::export::csv::{save_ratio_history, save_trajectory};

use clap::Parser;
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "N-body orbit integration and mean-motion resonance analysis")]
struct Args {
    /// Scenario file; looked up in `scenarios/` unless it is an existing path
    #[arg(short, long = "file", default_value = "jupiter_io_europa.yaml")]
    file_name: String,

    /// Write the trajectory table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the running revolution ratio to this CSV file
    #[arg(long)]
    ratio_csv: Option<PathBuf>,

    /// Override `parameters.seed`
    #[arg(long)]
    seed: Option<u64>,

    /// Override `parameters.total_steps`
    #[arg(long)]
    steps: Option<u64>,

    /// Run the throughput benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

#[derive(Serialize)]
struct RunSummary {
    scenario: String,
    seed: Option<u64>,
    steps: u64,
    trajectory_samples: usize,
    body_a: Option<String>,
    body_b: Option<String>,
    resonance: Option<ResonanceReport>,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let direct = PathBuf::from(file_name);
    let config_path = if direct.is_file() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.bench {
        bench_forces();
        bench_steps();
        return Ok(());
    }

    let mut scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    if let Some(seed) = args.seed {
        scenario_cfg.parameters.seed = Some(seed);
    }
    if let Some(steps) = args.steps {
        scenario_cfg.parameters.total_steps = steps;
    }

    let scenario = Scenario::build_scenario(scenario_cfg)?;
    let has_pair = scenario.angles.pair.is_some();
    let completed = Simulation::new(scenario).run()?;

    if let Some(path) = &args.csv {
        save_trajectory(path, &completed.names, &completed.trajectory)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("trajectory written to {}", path.display());
    }

    let mut summary = RunSummary {
        scenario: args.file_name.clone(),
        seed: completed.seed,
        steps: completed.steps_completed,
        trajectory_samples: completed.trajectory.len(),
        body_a: None,
        body_b: None,
        resonance: None,
    };

    if has_pair {
        let analyzed = completed.analyze()?;
        if let Some(path) = &args.ratio_csv {
            save_ratio_history(path, &analyzed.ratio_history(), analyzed.run.angle_interval())
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("running ratio written to {}", path.display());
        }
        summary.body_a = Some(analyzed.run.names[analyzed.body_a].clone());
        summary.body_b = Some(analyzed.run.names[analyzed.body_b].clone());
        summary.resonance = Some(analyzed.report);
    }

    print!("{}", serde_yaml::to_string(&summary)?);

    Ok(())
}
