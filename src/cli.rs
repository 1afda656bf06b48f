//! CLI argument parsing.
//!
//! The CLI only selects inputs; suite semantics live in `suite` and `report`.
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Highest verbosity level the reporter distinguishes.
pub const MAX_VERBOSITY: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "checkup",
    version,
    about = "Run a declarative suite of shell checks and report a weighted score",
    after_help = "Verbosity:\n  -v    show scenario descriptions\n  -vv   show scripts and output of failed scenarios\n  -vvv  show scripts and output of every scenario\n\nExamples:\n  checkup --suite checks.yaml\n  checkup --suite checks.yaml --working-directory /srv/app -vv\n  checkup --suite checks.yaml --shell 'bash -e'"
)]
pub struct RootArgs {
    /// Suite definition (YAML); defaults to the suite built into the binary
    #[arg(long, value_name = "PATH")]
    pub suite: Option<PathBuf>,

    /// Working directory for scenarios that do not set their own
    #[arg(long, value_name = "DIR")]
    pub working_directory: Option<PathBuf>,

    /// Increase report verbosity (repeat up to three times)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Shell command used to run scripts (default: bash from PATH, else /bin/sh)
    #[arg(long, value_name = "CMD")]
    pub shell: Option<String>,

    /// Directory for per-script temporary areas (default: system temp directory)
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,
}

impl RootArgs {
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(MAX_VERBOSITY)
    }
}
