#![forbid(unsafe_code)]

//! `sortables replay`: drive a widget from a script of drag events.
//!
//! The script is JSON lines, one [`DragEvent`] per line:
//!
//! ```text
//! {"event":"start","item":"2"}
//! {"event":"over","active":"2","over":"B"}
//! {"event":"end","active":"2","over":"B"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Every message the
//! widget sends to its host is written to stdout as a JSON line.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use sortables_bridge::{ContainerDescription, JsonLinesBridge, SortableWidget};
use sortables_core::{DragEvent, SensorConfig, Transition};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Widget arguments (JSON). Further documents in the file are applied as
    /// resets when the script says `{"event":"reload"}`.
    #[arg(long = "args")]
    pub args_path: PathBuf,

    /// Drag event script (JSON lines).
    #[arg(long = "events")]
    pub events_path: PathBuf,

    /// Report this frame height before replaying.
    #[arg(long)]
    pub height: Option<u32>,

    /// Finish with a `{"type":"final"}` line holding counts and the resulting
    /// arrangement.
    #[arg(long = "final")]
    pub print_final: bool,
}

/// Counts gathered while replaying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub events: usize,
    pub ignored: usize,
    pub commits: usize,
    pub reloads: usize,
    #[serde(rename = "final")]
    pub final_value: Vec<ContainerDescription>,
}

/// One script line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Drag(DragEvent),
    Reload,
}

pub fn run_replay(args: ReplayArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let report = replay_to(&args, stdout.lock())?;
    tracing::info!(
        events = report.events,
        ignored = report.ignored,
        commits = report.commits,
        "replay finished"
    );
    Ok(())
}

/// Replay `args` writing host messages to `out`.
pub fn replay_to<W: Write>(args: &ReplayArgs, out: W) -> Result<ReplayReport> {
    let config = File::open(&args.args_path).map_err(|source| CliError::Open {
        path: args.args_path.clone(),
        source,
    })?;
    let steps = read_script(&args.events_path)?;

    let bridge = JsonLinesBridge::new(BufReader::new(config), out);
    let mut widget = SortableWidget::mount(bridge, SensorConfig::default())?;
    if let Some(height) = args.height {
        widget.report_height(height)?;
    }

    let mut report = ReplayReport::default();
    for step in steps {
        match step {
            Step::Drag(event) => {
                report.events += 1;
                match widget.handle(event)? {
                    Transition::Ignored(reason) => {
                        tracing::debug!(?reason, "script event ignored");
                        report.ignored += 1;
                    }
                    Transition::Committed(_) => report.commits += 1,
                    _ => {}
                }
            }
            Step::Reload => {
                widget.reload()?;
                report.reloads += 1;
            }
        }
    }

    report.final_value = widget.describe();
    if args.print_final {
        let mut out = widget.into_bridge().into_writer();
        let summary = serde_json::json!({ "type": "final", "report": &report });
        serde_json::to_writer(&mut out, &summary)?;
        out.write_all(b"\n")?;
        out.flush()?;
    }
    Ok(report)
}

fn read_script(path: &Path) -> Result<Vec<Step>> {
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut steps = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        steps.push(parse_step(trimmed).map_err(|source| CliError::Script {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?);
    }
    Ok(steps)
}

fn parse_step(line: &str) -> std::result::Result<Step, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(line)?;
    if value.get("event").and_then(serde_json::Value::as_str) == Some("reload") {
        return Ok(Step::Reload);
    }
    Ok(Step::Drag(serde_json::from_value(value)?))
}
