//! Core simulation logic: contact network, disease model, SIR engine, runs.

pub mod cache;
pub mod compartments;
pub mod config;
pub mod disease;
pub mod engine;
pub mod error;
pub mod network;
pub mod output;
pub mod runner;

pub use cache::RunCache;
pub use compartments::Compartments;
pub use config::{Config, ConfigError, Fingerprint, Topology, ValidatedConfig};
pub use disease::DiseaseModel;
pub use engine::{DayChanges, RunOutcome, Simulation};
pub use error::{SimError, SimResult};
pub use network::{ContactGraph, ContactNetwork, Layout, NetworkError};
pub use output::RunSummary;
pub use runner::SimulationRun;
