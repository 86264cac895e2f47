use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading run files or writing replay output.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReplayError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReplayError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ReplayError::Json {
            path: path.into(),
            source,
        }
    }
}

pub type ReplayResult<T> = Result<T, ReplayError>;
