//! Run loading and replay export.
//!
//! Reads the `timeline.json` and `network.json` a simulation run left
//! behind and writes the replay bundle next to them (or elsewhere).

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use sir_events::{NetworkDocument, Timeline};

use crate::curve::EpidemicCurve;
use crate::error::{ReplayError, ReplayResult};
use crate::scene::ReplayScene;

pub const TIMELINE_FILE: &str = "timeline.json";
pub const NETWORK_FILE: &str = "network.json";
pub const REPLAY_FILE: &str = "replay.json";
pub const CURVE_FILE: &str = "epidemic_curve.csv";

/// A network and the timeline recorded over it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRun {
    pub network: NetworkDocument,
    pub timeline: Timeline,
}

/// Loads both run files from `dir`.
pub fn load_run(dir: impl AsRef<Path>) -> ReplayResult<LoadedRun> {
    let dir = dir.as_ref();
    let network: NetworkDocument = load_json(&dir.join(NETWORK_FILE))?;
    let timeline: Timeline = load_json(&dir.join(TIMELINE_FILE))?;
    tracing::info!(
        "Loaded {} nodes and {} recorded days from {:?}",
        network.node_count(),
        timeline.len(),
        dir
    );
    Ok(LoadedRun { network, timeline })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> ReplayResult<T> {
    let content = fs::read_to_string(path).map_err(|e| ReplayError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| ReplayError::json(path, e))
}

/// Paths written by [`write_replay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFiles {
    pub scene: PathBuf,
    pub curve: PathBuf,
}

/// Writes the scene bundle and curve CSV into `dir`, creating it if needed.
pub fn write_replay(
    dir: impl AsRef<Path>,
    scene: &ReplayScene,
    curve: &EpidemicCurve,
) -> ReplayResult<ReplayFiles> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| ReplayError::io(dir, e))?;

    let files = ReplayFiles {
        scene: dir.join(REPLAY_FILE),
        curve: dir.join(CURVE_FILE),
    };
    let json = scene.to_json().map_err(|e| ReplayError::json(&files.scene, e))?;
    fs::write(&files.scene, json).map_err(|e| ReplayError::io(&files.scene, e))?;
    fs::write(&files.curve, curve.to_csv()).map_err(|e| ReplayError::io(&files.curve, e))?;

    tracing::debug!("Wrote {:?} and {:?}", files.scene, files.curve);
    Ok(files)
}
