use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::logging;
use crate::replay::{ReplayArgs, run_replay};
use crate::validate::{ValidateArgs, run_validate};

const LOG_JSON_FLAG: &str = "--log-json";

#[derive(Debug, Parser)]
#[command(
    name = "sortables",
    about = "Validate sortable configurations and replay drag scripts",
    version
)]
pub struct Cli {
    /// Emit logs (stderr) and errors as JSON.
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a configuration file and summarize it.
    Validate(ValidateArgs),

    /// Mount a widget and replay a drag event script against it.
    Replay(ReplayArgs),
}

/// Whether errors should be printed as JSON, decided before argument parsing.
#[must_use]
pub fn wants_json_errors() -> bool {
    std::env::args().any(|arg| arg == LOG_JSON_FLAG)
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json)?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Validate(args) => run_validate(args),
        Commands::Replay(args) => run_replay(args),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{Cli, Commands, run};
    use crate::error::CliError;
    use crate::validate::ValidateArgs;

    #[test]
    fn parses_replay_flags() {
        let cli = Cli::try_parse_from([
            "sortables",
            "replay",
            "--args",
            "args.json",
            "--events",
            "events.jsonl",
            "--height",
            "240",
            "--final",
            "--log-json",
        ])
        .unwrap();
        assert!(cli.log_json);
        let Commands::Replay(args) = cli.command else {
            panic!("expected replay");
        };
        assert_eq!(args.args_path, PathBuf::from("args.json"));
        assert_eq!(args.height, Some(240));
        assert!(args.print_final);
    }

    #[test]
    fn validate_missing_file_is_an_input_error() {
        let result = run(Cli {
            log_json: false,
            command: Commands::Validate(ValidateArgs {
                path: PathBuf::from("/definitely/not/here.json"),
                request: false,
                json: false,
            }),
        });
        let error = result.unwrap_err();
        assert!(matches!(error, CliError::Config(_)));
        assert_eq!(error.exit_code(), 2);
    }
}
