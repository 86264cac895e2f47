//! Network SIR Simulation
//!
//! Runs one seeded epidemic over a contact network and writes the
//! timeline, network and summary for the replay tool.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use sir_core::config::{Config, Topology};
use sir_core::output::{self, RunSummary, DEFAULT_OUTPUT_DIR};
use sir_core::{runner, SimResult};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "sir_sim")]
#[command(about = "Discrete-time SIR epidemic on a contact network")]
struct Args {
    /// Config file (defaults to sir.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Day budget
    #[arg(long)]
    days: Option<u32>,

    /// Number of nodes for generated topologies
    #[arg(long)]
    population: Option<usize>,

    /// Per-contact daily infection probability
    #[arg(long)]
    infection: Option<f64>,

    /// Per-node daily recovery probability
    #[arg(long)]
    recovery: Option<f64>,

    /// Infected nodes at day 0
    #[arg(long)]
    initial_cases: Option<usize>,

    /// Contact network source
    #[arg(long, value_enum)]
    topology: Option<Topology>,

    /// Network JSON file (implies --topology file)
    #[arg(long)]
    network: Option<PathBuf>,

    /// Directory for timeline, network and summary files
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(days) = self.days {
            config.simulation.days = days;
        }
        if let Some(size) = self.population {
            config.population.size = size;
        }
        if let Some(p) = self.infection {
            config.disease.infection_probability = p;
        }
        if let Some(p) = self.recovery {
            config.disease.recovery_probability = p;
        }
        if let Some(n) = self.initial_cases {
            config.population.initial_cases = n;
        }
        if let Some(topology) = self.topology {
            config.network.topology = topology;
        }
        if let Some(path) = &self.network {
            config.network.topology = Topology::File;
            config.network.path = Some(path.clone());
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> SimResult<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };
    args.apply(&mut config);

    let (validated, network) = runner::prepare(config)?;
    tracing::info!(
        "Seed {}, {} days, p_infect {}, p_recover {}, {} initial cases",
        validated.seed,
        validated.days,
        validated.disease.infection_probability(),
        validated.disease.recovery_probability(),
        validated.initial_cases
    );

    let run = runner::execute(&validated, &network)?;
    let files = output::write_run(&args.output_dir, &network, &run)?;

    let summary = RunSummary::from_run(&run, network.graph().mean_degree());
    tracing::info!(
        "Day {}: S={} I={} R={} (peak {} infected on day {}, attack rate {:.1}%)",
        summary.final_day,
        summary.final_susceptible,
        summary.final_infected,
        summary.final_recovered,
        summary.peak_infected,
        summary.peak_day,
        summary.attack_rate * 100.0
    );
    if let Some(r0) = summary.basic_reproduction_number {
        tracing::info!("Estimated R0 {:.2}", r0);
    }
    tracing::info!(
        "Wrote {:?}, {:?} and {:?}",
        files.timeline,
        files.network,
        files.summary
    );
    Ok(())
}
