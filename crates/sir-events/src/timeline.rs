//! Timeline Types
//!
//! Serialization structs for the per-day history of a simulation run.
//!
//! A timeline holds one aggregate [`StatsRecord`] and one full
//! [`StateSnapshot`] per simulated day, starting with day 0. The
//! presentation layer reads these and nothing else.

use serde::{Deserialize, Serialize};

use crate::{HealthState, NodeId};

/// Aggregate compartment counts for one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub day: u32,
    #[serde(rename = "S")]
    pub susceptible: usize,
    #[serde(rename = "I")]
    pub infected: usize,
    #[serde(rename = "R")]
    pub recovered: usize,
}

impl StatsRecord {
    /// Creates a new StatsRecord.
    pub fn new(day: u32, susceptible: usize, infected: usize, recovered: usize) -> Self {
        Self {
            day,
            susceptible,
            infected,
            recovered,
        }
    }

    /// Total population covered by this record.
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered
    }

    /// Count for a single compartment.
    pub fn count(&self, state: HealthState) -> usize {
        match state {
            HealthState::Susceptible => self.susceptible,
            HealthState::Infected => self.infected,
            HealthState::Recovered => self.recovered,
        }
    }
}

/// Every node's state on one simulated day.
///
/// Serialized as a string of state codes, one character per node in
/// node-index order (e.g. `"SSIR"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub day: u32,
    #[serde(with = "state_codes")]
    pub states: Vec<HealthState>,
}

impl StateSnapshot {
    /// Creates a snapshot from an owned copy of the per-node states.
    pub fn new(day: u32, states: Vec<HealthState>) -> Self {
        Self { day, states }
    }

    /// Number of nodes covered by the snapshot.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if the snapshot covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State of a node, if it exists.
    pub fn state_of(&self, node: NodeId) -> Option<HealthState> {
        self.states.get(node.index()).copied()
    }

    /// Number of nodes in the given state.
    pub fn count(&self, state: HealthState) -> usize {
        self.states.iter().filter(|s| **s == state).count()
    }

    /// Compartment counts derived from the snapshot.
    pub fn to_stats(&self) -> StatsRecord {
        StatsRecord::new(
            self.day,
            self.count(HealthState::Susceptible),
            self.count(HealthState::Infected),
            self.count(HealthState::Recovered),
        )
    }

    /// The snapshot as a code string, one character per node.
    pub fn codes(&self) -> String {
        self.states.iter().map(|s| s.code()).collect()
    }
}

/// Ordered per-day history of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub stats: Vec<StatsRecord>,
    pub snapshots: Vec<StateSnapshot>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one day's record and snapshot.
    pub fn push(&mut self, stats: StatsRecord, snapshot: StateSnapshot) {
        debug_assert_eq!(stats.day, snapshot.day);
        self.stats.push(stats);
        self.snapshots.push(snapshot);
    }

    /// Number of recorded days, including day 0.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// The last recorded day.
    pub fn last_day(&self) -> Option<u32> {
        self.stats.last().map(|s| s.day)
    }

    /// Stats for the last recorded day.
    pub fn final_stats(&self) -> Option<&StatsRecord> {
        self.stats.last()
    }

    /// Stats for a specific day.
    pub fn stats_at(&self, day: u32) -> Option<&StatsRecord> {
        self.stats.get(day as usize).filter(|s| s.day == day)
    }

    /// Snapshot for a specific day.
    pub fn snapshot_at(&self, day: u32) -> Option<&StateSnapshot> {
        self.snapshots.get(day as usize).filter(|s| s.day == day)
    }

    /// Earliest day with the highest infected count.
    pub fn peak_infected(&self) -> Option<&StatsRecord> {
        self.stats
            .iter()
            .fold(None, |best: Option<&StatsRecord>, s| match best {
                Some(b) if b.infected >= s.infected => Some(b),
                _ => Some(s),
            })
    }

    /// Replay frames: one code string per recorded day.
    pub fn history_matrix(&self) -> Vec<String> {
        self.snapshots.iter().map(StateSnapshot::codes).collect()
    }

    /// Serializes the timeline to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the timeline to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a timeline from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

mod state_codes {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::HealthState;

    pub fn serialize<S>(states: &[HealthState], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let codes: String = states.iter().map(|s| s.code()).collect();
        serializer.serialize_str(&codes)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<HealthState>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let codes = String::deserialize(deserializer)?;
        codes
            .chars()
            .map(|c| {
                HealthState::from_code(c)
                    .ok_or_else(|| D::Error::custom(format!("unknown state code {:?}", c)))
            })
            .collect()
    }
}
