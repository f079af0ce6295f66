#![forbid(unsafe_code)]

//! Command-line host for sortable widgets.
//!
//! `sortables validate` checks a configuration file; `sortables replay` mounts
//! a widget over a configuration and a script of drag events, printing every
//! host message as a JSON line.

pub mod cli;
pub mod error;
pub mod logging;
pub mod replay;
pub mod validate;

pub use cli::{Cli, Commands, run, run_from_env, wants_json_errors};
pub use error::{CliError, Result};
