//! Error types for the simulation core.

use thiserror::Error;

use crate::config::ConfigError;
use crate::network::NetworkError;

/// Errors raised while configuring or preparing a simulation.
///
/// Nothing here is raised by [`Simulation::step`](crate::Simulation::step):
/// once construction succeeds, stepping cannot fail.
#[derive(Debug, Error)]
pub enum SimError {
    /// A probability, population size or day budget is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The contact network could not be built.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The configuration file could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Shorthand for [`SimError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;
