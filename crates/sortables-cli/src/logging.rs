#![forbid(unsafe_code)]

//! Log subscriber setup.
//!
//! Logs go to stderr so stdout stays a clean stream of host messages. The
//! filter comes from `RUST_LOG` and defaults to `warn`.

use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `RUST_LOG`, falling back to `warn`.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Calling it twice is an error.
pub fn init(json: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|error| CliError::Logging {
        message: error.to_string(),
    })
}
