//! Configuration System
//!
//! Loads run parameters from `sir.toml` so a scenario can be adjusted
//! without recompiling. Every section falls back to the demo defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::disease::{check_probability, DiseaseModel};
use crate::error::{SimError, SimResult};
use crate::network::ContactGraph;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "sir.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub population: PopulationConfig,
    pub disease: DiseaseConfig,
    pub network: NetworkConfig,
}

/// Run length and randomness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Day budget for the run
    pub days: u32,
    /// Seed for the simulation RNG
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { days: 100, seed: 42 }
    }
}

/// Population size and seeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of nodes; replaced by the file's node count for file networks
    pub size: usize,
    /// Infected nodes at day 0
    pub initial_cases: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 600,
            initial_cases: 5,
        }
    }
}

/// Per-day transition probabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseConfig {
    pub infection_probability: f64,
    pub recovery_probability: f64,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            infection_probability: 0.05,
            recovery_probability: 0.02,
        }
    }
}

/// Where the contact network comes from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub topology: Topology,
    /// Network JSON file, required when `topology = "file"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Contact network source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Every node touches every other node
    #[default]
    Complete,
    /// No contacts at all
    Isolated,
    /// Graph and layout read from a network file
    File,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Complete => write!(f, "complete"),
            Topology::Isolated => write!(f, "isolated"),
            Topology::File => write!(f, "file"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every parameter and clamp the initial case count.
    pub fn validate(&self) -> SimResult<ValidatedConfig> {
        if self.population.size == 0 {
            return Err(SimError::invalid("population.size", "must be positive"));
        }
        if self.simulation.days == 0 {
            return Err(SimError::invalid("simulation.days", "must be positive"));
        }
        check_probability("disease.infection_probability", self.disease.infection_probability)?;
        check_probability("disease.recovery_probability", self.disease.recovery_probability)?;
        if self.network.topology == Topology::File && self.network.path.is_none() {
            return Err(SimError::invalid(
                "network.path",
                "required when topology is \"file\"",
            ));
        }

        let disease = DiseaseModel::new(
            self.disease.infection_probability,
            self.disease.recovery_probability,
        )?;
        let initial_cases = self.population.initial_cases.min(self.population.size);
        if initial_cases < self.population.initial_cases {
            tracing::debug!(
                "Clamped initial cases from {} to population size {}",
                self.population.initial_cases,
                self.population.size
            );
        }

        Ok(ValidatedConfig {
            days: self.simulation.days,
            seed: self.simulation.seed,
            population: self.population.size,
            initial_cases,
            disease,
            topology: self.network.topology,
            network_path: self.network.path.clone(),
        })
    }
}

/// Configuration that has passed [`Config::validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedConfig {
    pub days: u32,
    pub seed: u64,
    pub population: usize,
    pub initial_cases: usize,
    pub disease: DiseaseModel,
    pub topology: Topology,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_path: Option<PathBuf>,
}

impl ValidatedConfig {
    /// Stable hash identifying this configuration run over `graph`.
    pub fn fingerprint(&self, graph: &ContactGraph) -> Fingerprint {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.days.to_le_bytes());
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(&(self.population as u64).to_le_bytes());
        hasher.update(&(self.initial_cases as u64).to_le_bytes());
        hasher.update(&self.disease.infection_probability().to_bits().to_le_bytes());
        hasher.update(&self.disease.recovery_probability().to_bits().to_le_bytes());
        hasher.update(self.topology.to_string().as_bytes());
        hasher.update(graph.content_hash().as_bytes());
        Fingerprint(hasher.finalize())
    }
}

/// blake3 digest of a validated configuration and its contact graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(blake3::Hash);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
