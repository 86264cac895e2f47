//! Shared data types and serialization for the network SIR simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod network;
pub mod state;
pub mod timeline;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export state types
pub use state::{HealthState, NodeId, ParseStateError};

// Re-export timeline types
pub use timeline::{StateSnapshot, StatsRecord, Timeline};

// Re-export network file types
pub use network::{NetworkDocument, NodeRecord};
