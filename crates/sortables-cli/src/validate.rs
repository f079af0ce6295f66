#![forbid(unsafe_code)]

//! `sortables validate`: check a configuration file without mounting.

use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sortables_bridge::{ConfigError, Direction, SortRequest, SortableArgs};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Widget arguments (JSON).
    pub path: PathBuf,

    /// Treat the file as a sort request
    /// (`{"items", "header", "multi_containers", "direction"}`) instead of
    /// widget arguments.
    #[arg(long)]
    pub request: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// What a valid configuration contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub status: &'static str,
    pub containers: usize,
    pub items: usize,
    pub direction: Direction,
    pub headers: Vec<Option<String>>,
}

pub fn run_validate(args: ValidateArgs) -> Result<()> {
    let summary = validate_file(&args)?;
    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "ok: {} containers, {} items ({})",
            summary.containers,
            summary.items,
            summary.direction.as_str()
        );
    }
    Ok(())
}

/// Load and validate the file named by `args`.
pub fn validate_file(args: &ValidateArgs) -> Result<Summary> {
    let widget_args = if args.request {
        let content = std::fs::read_to_string(&args.path).map_err(|source| CliError::Open {
            path: args.path.clone(),
            source,
        })?;
        request_args(&serde_json::from_str(&content)?)?
    } else {
        SortableArgs::from_json_file(&args.path)?
    };
    let model = widget_args.to_model()?;
    tracing::debug!(path = %args.path.display(), "configuration valid");
    Ok(Summary {
        status: "ok",
        containers: model.len(),
        items: model.item_count(),
        direction: widget_args.direction,
        headers: widget_args.items.iter().map(|c| c.header.clone()).collect(),
    })
}

/// Interpret a request object the way a host call would.
fn request_args(value: &Value) -> std::result::Result<SortableArgs, ConfigError> {
    let multi = value
        .get("multi_containers")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let items = value.get("items").unwrap_or(&Value::Null);
    let request = SortRequest::from_json(items, value.get("header"), multi)?;
    let direction = match value.get("direction") {
        Some(direction) => Direction::deserialize(direction)?,
        None => Direction::default(),
    };
    let custom_style = value
        .get("custom_style")
        .and_then(Value::as_str)
        .map(str::to_owned);
    Ok(request.to_args(direction, custom_style))
}
