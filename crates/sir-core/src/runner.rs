//! Simulation Runner
//!
//! Glue between a validated configuration and the engine: builds the
//! contact network the config asks for, then runs one seeded simulation
//! over it from start to finish.

use serde::Serialize;
use std::sync::Arc;

use sir_events::{NodeId, Timeline};

use crate::config::{Config, Fingerprint, Topology, ValidatedConfig};
use crate::engine::{RunOutcome, Simulation};
use crate::error::{SimError, SimResult};
use crate::network::ContactNetwork;

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationRun {
    pub fingerprint: Fingerprint,
    pub config: ValidatedConfig,
    pub seeded: Vec<NodeId>,
    pub outcome: RunOutcome,
    pub timeline: Timeline,
}

/// Validates `config` and builds the network it describes.
///
/// For file networks the population size is taken from the file.
pub fn prepare(mut config: Config) -> SimResult<(ValidatedConfig, ContactNetwork)> {
    let network = match config.network.topology {
        Topology::Complete => ContactNetwork::complete(config.population.size),
        Topology::Isolated => ContactNetwork::isolated(config.population.size),
        Topology::File => {
            let path = config.network.path.as_ref().ok_or_else(|| {
                SimError::invalid("network.path", "required when topology is \"file\"")
            })?;
            let network = ContactNetwork::from_file(path)?;
            config.population.size = network.node_count();
            network
        }
    };
    let validated = config.validate()?;
    tracing::info!(
        "Prepared {} network: {} nodes, {} edges (mean degree {:.2})",
        validated.topology,
        network.node_count(),
        network.graph().edge_count(),
        network.graph().mean_degree()
    );
    Ok((validated, network))
}

/// Runs one simulation for `config` over `network`.
pub fn execute(config: &ValidatedConfig, network: &ContactNetwork) -> SimResult<SimulationRun> {
    let mut sim = Simulation::new(Arc::clone(network.graph()), config.disease, config.seed)?;
    let seeded = sim.seed_initial_cases(config.initial_cases);
    let outcome = sim.run(config.days);

    match outcome {
        RunOutcome::Quiescent { day } => tracing::info!(
            "Epidemic died out on day {} (budget {} days)",
            day,
            config.days
        ),
        RunOutcome::BudgetExhausted { day } => {
            tracing::info!("Reached day budget at day {}", day)
        }
    }

    Ok(SimulationRun {
        fingerprint: config.fingerprint(network.graph()),
        config: config.clone(),
        seeded,
        outcome,
        timeline: sim.into_timeline(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_prepare_fixture_topology() {
        let mut config = Config::default();
        config.population.size = 25;
        config.network.topology = Topology::Isolated;
        let (validated, network) = prepare(config).unwrap();
        assert_eq!(validated.population, 25);
        assert_eq!(network.node_count(), 25);
        assert_eq!(network.graph().edge_count(), 0);
    }

    #[test]
    fn test_prepare_file_overrides_population() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.json");
        let doc = sir_events::fixtures::sample_network();
        fs::write(&path, doc.to_json_pretty().unwrap()).unwrap();

        let mut config = Config::default();
        config.network.topology = Topology::File;
        config.network.path = Some(path);
        let (validated, network) = prepare(config).unwrap();
        assert_eq!(validated.population, 4);
        assert_eq!(validated.initial_cases, 4);
        assert_eq!(network.node_count(), 4);
    }

    #[test]
    fn test_prepare_file_requires_path() {
        let mut config = Config::default();
        config.network.topology = Topology::File;
        assert!(prepare(config).is_err());
    }

    #[test]
    fn test_execute_records_run() {
        let mut config = Config::default();
        config.population.size = 50;
        config.population.initial_cases = 3;
        config.disease.recovery_probability = 0.5;
        let (validated, network) = prepare(config).unwrap();

        let run = execute(&validated, &network).unwrap();
        assert_eq!(run.seeded.len(), 3);
        assert_eq!(run.timeline.stats[0].infected, 0);
        let day_one = run.timeline.stats[1];
        assert!(day_one.infected + day_one.recovered >= 3);
        assert_eq!(run.timeline.last_day(), Some(run.outcome.day()));
        assert_eq!(run.fingerprint, validated.fingerprint(network.graph()));
    }
}
