//! Human-readable suite report.
//!
//! The reporter writes a header before the run, one status line per displayable
//! scenario as it finishes, and a summary once the run is over.
mod score;

pub use score::{Score, SuiteSummary};

use crate::output::{Style, FAILURE_GLYPH, GREEN, RED, RESET, SUCCESS_GLYPH};
use crate::suite::{Scenario, ScenarioId, ScenarioOutcome, Suite};
use crate::util::format_duration;
use anyhow::{Context, Result};
use std::io::Write;

pub const SEPARATOR: &str =
    "-----------------------------------------------------------------------------------";

/// Verbosity at which a scenario's description is printed.
pub const VERBOSITY_DESCRIPTION: u8 = 1;
/// Verbosity at which failed scenarios print their scripts and output.
pub const VERBOSITY_FAILED_DETAIL: u8 = 2;
/// Verbosity at which every scenario prints its scripts and output.
pub const VERBOSITY_ALL_DETAIL: u8 = 3;

/// Report rendering settings.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub verbosity: u8,
    pub style: Style,
}

/// Streams report lines to a writer.
pub struct Reporter<W: Write> {
    out: W,
    options: ReportOptions,
    sequence: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, options: ReportOptions) -> Self {
        Self {
            out,
            options,
            sequence: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Suite name and test count, followed by a separator when tests exist.
    pub fn header(&mut self, suite: &Suite) -> Result<()> {
        let count = suite.displayable_count();
        let line = match count {
            0 => format!("[ {} ], no tests to run", suite.name),
            1 => format!("[ {} ], 1 test", suite.name),
            n => format!("[ {} ], 1..{n} tests", suite.name),
        };
        self.raw(&line)?;
        if count > 0 {
            self.styled(SEPARATOR)?;
        }
        Ok(())
    }

    /// Status line, plus description and detail blocks as verbosity allows.
    /// Hidden scenarios produce no output.
    pub fn scenario(&mut self, suite: &Suite, id: ScenarioId) -> Result<()> {
        let scenario = suite.scenario(id);
        if !scenario.displayable {
            return Ok(());
        }
        self.sequence += 1;

        let line = status_line(self.sequence, scenario);
        self.styled(&line)?;

        let verbosity = self.options.verbosity;
        if verbosity >= VERBOSITY_DESCRIPTION {
            if let Some(description) = scenario.description.as_deref() {
                for line in description.trim().lines() {
                    self.raw(&format!("    {line}"))?;
                }
            }
        }
        if (verbosity >= VERBOSITY_FAILED_DETAIL && scenario.outcome.is_failed())
            || verbosity >= VERBOSITY_ALL_DETAIL
        {
            self.detail(suite, scenario)?;
        }
        Ok(())
    }

    /// Closing separator after the last scenario.
    pub fn footer(&mut self, suite: &Suite) -> Result<()> {
        if suite.displayable_count() > 0 {
            self.styled(SEPARATOR)?;
        }
        Ok(())
    }

    /// Totals line; omitted when nothing was counted.
    pub fn summary(&mut self, summary: &SuiteSummary) -> Result<()> {
        if summary.total == 0 {
            return Ok(());
        }
        let score = summary
            .score
            .percent()
            .map(|percent| format!("{percent:.2}%"))
            .unwrap_or_else(|| "n/a".to_string());
        let elapsed = format_duration(summary.elapsed);
        let line = if summary.failed > 0 {
            format!(
                "{} (of {}) tests passed, {RED}{} tests failed,{RESET} rated as {score}, spent {elapsed}",
                summary.successful, summary.total, summary.failed
            )
        } else {
            format!(
                "{GREEN}{} (of {}) tests passed, {} tests failed, rated as {score}, spent {elapsed}{RESET}",
                summary.successful, summary.total, summary.failed
            )
        };
        self.styled(&line)
    }

    fn detail(&mut self, suite: &Suite, scenario: &Scenario) -> Result<()> {
        for helper in &scenario.before {
            self.helper_detail(suite.scenario(*helper))?;
        }

        self.raw("~~~~~")?;
        self.raw(&format!(">> stdout:\n{}", scenario.outcome.stdout.trim()))?;
        self.raw(&outcome_line(&scenario.outcome))?;
        self.raw("~~~~~")?;

        for helper in &scenario.after {
            self.helper_detail(suite.scenario(*helper))?;
        }
        Ok(())
    }

    fn helper_detail(&mut self, helper: &Scenario) -> Result<()> {
        self.raw(&format!("(run: {})", helper.display_name()))?;
        self.raw(&format!(">> script:\n{}", helper.script.trim()))?;
        self.raw(&format!(">> stdout:\n{}", helper.outcome.stdout))?;
        self.raw(&outcome_line(&helper.outcome))?;
        self.raw("---")
    }

    fn styled(&mut self, line: &str) -> Result<()> {
        let line = self.options.style.apply(line);
        self.raw(&line)
    }

    fn raw(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}").context("write report")
    }
}

fn status_line(sequence: usize, scenario: &Scenario) -> String {
    let label = scenario.label.as_deref().unwrap_or_default();
    let duration = scenario
        .outcome
        .duration
        .map(format_duration)
        .unwrap_or_else(|| "not run".to_string());
    if scenario.outcome.is_success() {
        let phrase = scenario
            .secret_phrase
            .as_deref()
            .map(|phrase| format!(", secret phrase: {phrase}"))
            .unwrap_or_default();
        format!("{GREEN}{SUCCESS_GLYPH} {sequence:2}  {label}, {duration}{phrase}{RESET}")
    } else {
        format!("{RED}{FAILURE_GLYPH} {sequence:2}  {label}, {duration}{RESET}")
    }
}

fn outcome_line(outcome: &ScenarioOutcome) -> String {
    if outcome.is_success() {
        return ">> exit status 0 (successful)".to_string();
    }
    match outcome.failure.as_deref() {
        Some(failure) => format!(">> {failure} (failure)"),
        None => ">> not run (no script)".to_string(),
    }
}
