//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Suite file written to a scratch directory that doubles as the working
/// directory for its scenarios.
pub struct SuiteFixture {
    pub dir: TempDir,
    pub suite_path: PathBuf,
}

/// Captured result of one `checkup` invocation.
#[derive(Debug)]
pub struct CheckupRun {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl SuiteFixture {
    /// Write `yaml` to `suite.yaml` inside a fresh temp dir.
    pub fn new(yaml: &str) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let suite_path = dir.path().join("suite.yaml");
        std::fs::write(&suite_path, yaml)?;
        Ok(Self { dir, suite_path })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run `checkup` against this suite with plain (uncoloured) output.
    pub fn run(&self, extra_args: &[&str]) -> anyhow::Result<CheckupRun> {
        let output = Command::new(checkup_bin())
            .arg("--suite")
            .arg(&self.suite_path)
            .arg("--working-directory")
            .arg(self.dir.path())
            .args(extra_args)
            .env_remove("TERM")
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .output()?;
        Ok(CheckupRun::from_output(output))
    }
}

impl CheckupRun {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// The final summary line of the report.
    pub fn summary_line(&self) -> Option<&str> {
        self.stdout
            .lines()
            .rev()
            .find(|line| line.contains("tests passed"))
    }
}

pub fn checkup_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_checkup"))
}

/// Scripts need a POSIX shell; tests skip themselves when none is installed.
pub fn skip_if_shell_missing() -> bool {
    let missing = which::which("sh").is_err();
    if missing {
        eprintln!("Skipping: sh not available");
    }
    missing
}
