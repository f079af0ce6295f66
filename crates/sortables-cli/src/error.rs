use std::path::PathBuf;

use sortables_bridge::{BridgeError, ConfigError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Bridge(#[from] BridgeError),

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: invalid drag event: {source}")]
    Script {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to install log subscriber: {message}")]
    Logging { message: String },
}

impl CliError {
    /// Process exit code: 2 for bad input files, 1 for everything else.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Script { .. } | Self::Bridge(BridgeError::Config(_)) => 2,
            _ => 1,
        }
    }
}
