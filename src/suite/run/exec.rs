use crate::suite::{Scenario, ScenarioStatus, ScriptRun};
use crate::templates::render_shell_script;
use anyhow::{anyhow, Context, Result};
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;

const FALLBACK_SHELL: &str = "/bin/sh";
const TEMP_PREFIX: &str = "check-up.";

/// Runs scenario scripts in a shell subprocess.
///
/// Each call gets its own temporary directory holding the rendered script and
/// the combined output file; the directory is removed before the call returns.
#[derive(Debug, Clone)]
pub struct ScriptExecutor {
    shell: Vec<String>,
    temp_root: Option<PathBuf>,
}

impl ScriptExecutor {
    /// `shell` is the interpreter program followed by its arguments; the
    /// script path is appended as the last argument.
    pub fn new(shell: Vec<String>) -> Result<Self> {
        if !shell.first().is_some_and(|program| !program.trim().is_empty()) {
            return Err(anyhow!("shell command is empty"));
        }
        Ok(Self {
            shell,
            temp_root: None,
        })
    }

    /// Parse a shell command line such as `bash -e`.
    pub fn from_command_line(command: &str) -> Result<Self> {
        let words = shell_words::split(command)
            .with_context(|| format!("parse shell command {command:?}"))?;
        Self::new(words)
    }

    /// `bash` from `PATH`, or `/bin/sh` when bash is not installed.
    pub fn default_shell() -> Self {
        let program = which::which("bash")
            .map(|path| path.display().to_string())
            .unwrap_or_else(|_| FALLBACK_SHELL.to_string());
        Self {
            shell: vec![program],
            temp_root: None,
        }
    }

    /// Create execution areas under `dir` instead of the system temp directory.
    pub fn with_temp_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(dir.into());
        self
    }

    pub fn shell(&self) -> &[String] {
        &self.shell
    }

    /// Execute the scenario's script. Returns `None` when there is no script.
    ///
    /// Launch and IO errors are folded into a failed run rather than returned.
    pub fn execute(&self, scenario: &Scenario) -> Option<ScriptRun> {
        if !scenario.has_script() {
            return None;
        }

        let started = Instant::now();
        let run = match self.run_script(scenario) {
            Ok((status, output)) => {
                let stdout = String::from_utf8_lossy(&output).trim().to_string();
                if status.success() {
                    ScriptRun {
                        status: ScenarioStatus::Success,
                        stdout,
                        failure: None,
                        elapsed: started.elapsed(),
                    }
                } else {
                    ScriptRun {
                        status: ScenarioStatus::Failed,
                        stdout,
                        failure: Some(exit_status_string(&status)),
                        elapsed: started.elapsed(),
                    }
                }
            }
            Err(err) => ScriptRun {
                status: ScenarioStatus::Failed,
                stdout: String::new(),
                failure: Some(format!("{err:#}")),
                elapsed: started.elapsed(),
            },
        };

        tracing::debug!(
            scenario = scenario.display_name(),
            status = ?run.status,
            elapsed_ms = run.elapsed.as_millis() as u64,
            exit = run.failure.as_deref().unwrap_or("exit status 0"),
            "script finished"
        );
        Some(run)
    }

    fn run_script(&self, scenario: &Scenario) -> Result<(ExitStatus, Vec<u8>)> {
        let (program, args) = self
            .shell
            .split_first()
            .ok_or_else(|| anyhow!("shell command is empty"))?;

        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX);
        let area = match self.temp_root.as_deref() {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .context("create temporary execution area")?;
        let script_path = area.path().join("script.sh");
        let output_path = area.path().join("output.log");

        fs::write(&script_path, render_shell_script(&scenario.script))
            .with_context(|| format!("write {}", script_path.display()))?;
        let stdout = File::create(&output_path)
            .with_context(|| format!("create {}", output_path.display()))?;
        let stderr = stdout.try_clone().context("share output file with stderr")?;

        let status = Command::new(program)
            .args(args)
            .arg(&script_path)
            .current_dir(&scenario.working_dir)
            .envs(scenario.environment())
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .with_context(|| {
                format!(
                    "spawn {program} in {}",
                    scenario.working_dir.display()
                )
            })?;

        let output = fs::read(&output_path)
            .with_context(|| format!("read {}", output_path.display()))?;

        let area_path = area.path().to_path_buf();
        if let Err(err) = area.close() {
            tracing::warn!(
                path = %area_path.display(),
                error = %err,
                "failed to remove temporary execution area"
            );
        }
        Ok((status, output))
    }
}

fn exit_status_string(status: &ExitStatus) -> String {
    if let Some(code) = status.code() {
        return format!("exit status {code}");
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("signal: {signal}");
        }
    }
    "terminated without exit code".to_string()
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
