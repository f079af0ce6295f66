use std::path::PathBuf;

use sortables_core::ModelError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Problems with the inbound configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("header argument must be a string or null when multi_containers is false")]
    HeaderNotString,

    #[error("items must be a list of strings when multi_containers is false")]
    ItemsNotStrings,

    #[error("items must be a list of container objects when multi_containers is true")]
    ItemsNotContainers,

    #[error("container #{index} is malformed: {source}")]
    InvalidContainer {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid arrangement: {0}")]
    Model(#[from] ModelError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures talking to the host.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("host supplied no configuration")]
    NoConfig,
}
