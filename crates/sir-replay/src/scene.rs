//! Replay Scene
//!
//! Flattens a network and its recorded timeline into the bundle a 3D
//! viewer animates: scaled node positions, edge index pairs, adjacency
//! for neighbour highlighting, one state-code frame per day and the
//! per-day counts for the HUD.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sir_events::{HealthState, NetworkDocument, NodeId, StatsRecord, Timeline};

/// Position scale and node-size multiplier for a population size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneScale {
    pub position: f64,
    pub size_multiplier: f64,
}

impl SceneScale {
    /// Larger populations spread wider with smaller nodes.
    pub fn for_population(node_count: usize) -> Self {
        let (position, size_multiplier) = if node_count < 200 {
            (150.0, 4.0)
        } else if node_count < 1000 {
            (250.0, 1.5)
        } else {
            (350.0, 0.8)
        };
        Self {
            position,
            size_multiplier,
        }
    }

    pub fn node_size(&self, degree: usize) -> f64 {
        (1.0 + degree as f64 * 0.1) * self.size_multiplier
    }
}

/// A node as the viewer draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub size: f64,
}

/// Everything the viewer needs to replay one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScene {
    /// Unique per build, used as the viewer's container id
    pub scene_id: String,
    pub start_paused: bool,
    pub scale: SceneScale,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<[usize; 2]>,
    pub adjacency: Vec<Vec<usize>>,
    /// One string of state codes per recorded day
    pub history: Vec<String>,
    pub stats: Vec<StatsRecord>,
}

impl ReplayScene {
    /// Builds a scene; an empty timeline yields a single all-Susceptible frame.
    pub fn build(network: &NetworkDocument, timeline: &Timeline) -> Self {
        let node_count = network.node_count();
        let scale = SceneScale::for_population(node_count);

        let mut edges = Vec::with_capacity(network.edges.len());
        let mut adjacency = vec![Vec::new(); node_count];
        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(network.edges.len());
        for &[u, v] in &network.edges {
            let key = (u.min(v), u.max(v));
            if u == v || u >= node_count || v >= node_count || !seen.insert(key) {
                continue;
            }
            edges.push([u, v]);
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        if edges.len() < network.edges.len() {
            tracing::debug!(
                "Skipped {} invalid or repeated edges",
                network.edges.len() - edges.len()
            );
        }

        let nodes = network
            .nodes
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let [x, y, z] = record.position;
                SceneNode {
                    id: NodeId(record.id).to_string(),
                    x: x * scale.position,
                    y: y * scale.position,
                    z: z * scale.position,
                    size: scale.node_size(adjacency[index].len()),
                }
            })
            .collect();

        Self {
            scene_id: format!("net-{}", Uuid::new_v4().simple()),
            start_paused: false,
            scale,
            nodes,
            edges,
            adjacency,
            history: history_frames(timeline, node_count),
            stats: timeline.stats.clone(),
        }
    }

    /// Sets whether the viewer starts paused.
    pub fn paused(mut self, paused: bool) -> Self {
        self.start_paused = paused;
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn frame_count(&self) -> usize {
        self.history.len()
    }

    pub fn frame(&self, index: usize) -> Option<&str> {
        self.history.get(index).map(String::as_str)
    }

    /// Stats for a frame; frames past the recorded stats have none.
    pub fn stats_for_frame(&self, index: usize) -> Option<&StatsRecord> {
        self.stats.get(index)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Frames sized to the network; nodes a snapshot does not cover show as S.
fn history_frames(timeline: &Timeline, node_count: usize) -> Vec<String> {
    let mut frames = timeline.history_matrix();
    if frames.is_empty() {
        frames.push(String::new());
    }
    let susceptible = HealthState::Susceptible.code();
    for frame in &mut frames {
        // One ASCII code per node.
        frame.truncate(node_count);
        let missing = node_count - frame.len();
        frame.extend(std::iter::repeat(susceptible).take(missing));
    }
    frames
}
