use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod report;
mod suite;
mod templates;
mod util;

use cli::RootArgs;
use output::Style;
use report::{ReportOptions, Reporter, SuiteSummary};
use suite::{load_suite, resolve_suite, run_suite, ScriptExecutor};

fn main() -> Result<()> {
    init_tracing();
    let args = RootArgs::parse();

    let file = load_suite(args.suite.as_deref())?;
    let mut suite = resolve_suite(file, args.working_directory.as_deref())
        .context("resolve suite definition")?;
    let mut executor = match args.shell.as_deref() {
        Some(command) => ScriptExecutor::from_command_line(command)?,
        None => ScriptExecutor::default_shell(),
    };
    if let Some(dir) = args.temp_dir.as_deref() {
        executor = executor.with_temp_root(dir);
    }
    tracing::debug!(shell = ?executor.shell(), "selected shell");

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(
        stdout.lock(),
        ReportOptions {
            verbosity: args.verbosity(),
            style: Style::from_env(),
        },
    );

    reporter.header(&suite)?;
    let elapsed = run_suite(&mut suite, &executor, |suite, id| {
        reporter.scenario(suite, id)
    })?;
    reporter.footer(&suite)?;
    reporter.summary(&SuiteSummary::from_suite(&suite, elapsed))?;
    reporter.into_inner().flush().context("flush report")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
