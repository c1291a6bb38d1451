use std::path::PathBuf;
use thiserror::Error;

/// Failure to persist the history file. The in-memory store stays
/// authoritative when this is returned.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("failed to write history file {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AliasError {
    #[error("alias must not be empty")]
    EmptyAlias,

    #[error("no history entry for {0}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("empty path")]
    EmptyPath,

    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Non-fatal problem the host should surface to the user.
#[derive(Debug)]
pub enum Warning {
    HistoryNotSaved(HistoryError),
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::HistoryNotSaved(e) => write!(f, "history not saved: {}", e),
        }
    }
}
