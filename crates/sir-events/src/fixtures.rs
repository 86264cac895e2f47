//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // sir-events = { path = "../sir-events", features = ["test-fixtures"] }
//!
//! use sir_events::fixtures;
//!
//! let timeline = fixtures::sample_timeline();
//! let network = fixtures::sample_network();
//! ```

use crate::{NetworkDocument, Timeline};

/// Returns the sample timeline from the fixtures file.
///
/// A four-node path graph (0-1-2-3) seeded at node 0, recorded for days 0-3:
/// - day 0: `ISSS`
/// - day 1: `IISS`
/// - day 2: `RIIS`
/// - day 3: `RRII`
pub fn sample_timeline() -> Timeline {
    let json = include_str!("../tests/fixtures/sample_timeline.json");
    Timeline::from_json(json).expect("Failed to parse sample_timeline.json")
}

/// Returns the sample network from the fixtures file.
///
/// The four-node path graph matching [`sample_timeline`], laid out along
/// the x axis.
pub fn sample_network() -> NetworkDocument {
    let json = include_str!("../tests/fixtures/sample_network.json");
    NetworkDocument::from_json(json).expect("Failed to parse sample_network.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_timeline_is_consistent() {
        let timeline = sample_timeline();
        assert_eq!(timeline.len(), 4);
        for (stats, snapshot) in timeline.stats.iter().zip(&timeline.snapshots) {
            assert_eq!(*stats, snapshot.to_stats());
            assert_eq!(stats.total(), 4);
        }
    }

    #[test]
    fn test_sample_network_matches_timeline() {
        let network = sample_network();
        let timeline = sample_timeline();
        assert_eq!(network.node_count(), timeline.snapshots[0].len());
        assert_eq!(network.edges.len(), 3);
    }
}
