//! Run Export
//!
//! Writes a finished run to an output directory for the replay tool:
//!
//! ```text
//! output/
//! ├── timeline.json   per-day stats and node-state snapshots
//! ├── network.json    graph and layout the run used
//! └── summary.json    headline numbers
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SimResult;
use crate::network::ContactNetwork;
use crate::runner::SimulationRun;

use super::stats::RunSummary;

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const TIMELINE_FILE: &str = "timeline.json";
pub const NETWORK_FILE: &str = "network.json";
pub const SUMMARY_FILE: &str = "summary.json";

/// Paths written by [`write_run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub timeline: PathBuf,
    pub network: PathBuf,
    pub summary: PathBuf,
}

/// Writes timeline, network and summary files into `dir`, creating it if needed.
pub fn write_run(
    dir: impl AsRef<Path>,
    network: &ContactNetwork,
    run: &SimulationRun,
) -> SimResult<WrittenFiles> {
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let files = WrittenFiles {
        timeline: dir.join(TIMELINE_FILE),
        network: dir.join(NETWORK_FILE),
        summary: dir.join(SUMMARY_FILE),
    };

    fs::write(&files.timeline, run.timeline.to_json()?)?;
    fs::write(&files.network, network.to_document().to_json_pretty()?)?;
    let summary = RunSummary::from_run(run, network.graph().mean_degree());
    write_json(&files.summary, &summary)?;

    tracing::debug!("Wrote run {} to {:?}", run.fingerprint, dir);
    Ok(files)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> SimResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::runner::{execute, prepare};
    use sir_events::{NetworkDocument, Timeline};

    #[test]
    fn test_write_run_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("output");

        let mut config = Config::default();
        config.population.size = 30;
        config.simulation.days = 15;
        let (validated, network) = prepare(config).unwrap();
        let run = execute(&validated, &network).unwrap();

        let files = write_run(&out, &network, &run).unwrap();

        let timeline = Timeline::from_json(&fs::read_to_string(&files.timeline).unwrap()).unwrap();
        assert_eq!(timeline, run.timeline);

        let doc = NetworkDocument::from_json(&fs::read_to_string(&files.network).unwrap()).unwrap();
        assert_eq!(doc.node_count(), 30);
        assert_eq!(doc.edges.len(), 435);

        let summary: RunSummary =
            serde_json::from_str(&fs::read_to_string(&files.summary).unwrap()).unwrap();
        assert_eq!(summary.population, 30);
        assert_eq!(summary.fingerprint, run.fingerprint.to_hex());
    }
}
