//! Suite definition types and resolved scenario records.
//!
//! `SuiteFile`/`ScenarioSpec` mirror the YAML as written; `Suite`/`Scenario`
//! are the normalized arena the runner and reporter work against.
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Suite definition file as authored.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SuiteFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cases: Vec<ScenarioSpec>,
}

/// Single scenario record before resolution.
///
/// Unknown keys are ignored so older suites carrying unused fields still load.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScenarioSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "case")]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    /// Environment that later scenarios inherit until another one replaces it.
    #[serde(default)]
    pub global_env: Option<BTreeMap<String, String>>,
    /// Environment applied to this scenario only.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub workdir: Option<PathBuf>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub before: Vec<String>,
    #[serde(default)]
    pub after: Vec<String>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub secret_phrase: Option<String>,
}

/// Stable handle into a resolved suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScenarioId(usize);

impl ScenarioId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Execution state of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioStatus {
    #[default]
    Unrun,
    Success,
    Failed,
}

/// Result of a single script execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    pub status: ScenarioStatus,
    /// Trimmed combined stdout/stderr.
    pub stdout: String,
    /// `None` on success, otherwise the exit detail or launch error.
    pub failure: Option<String>,
    pub elapsed: Duration,
}

/// Runtime fields of a scenario. Only the executor and runner write these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub status: ScenarioStatus,
    pub stdout: String,
    pub failure: Option<String>,
    pub duration: Option<Duration>,
}

impl ScenarioOutcome {
    pub fn is_success(&self) -> bool {
        self.status == ScenarioStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status == ScenarioStatus::Failed
    }

    /// Store the result of one script run. `duration` is owned by the runner
    /// and left as is.
    pub(crate) fn record(&mut self, run: ScriptRun) {
        self.status = run.status;
        self.stdout = run.stdout;
        self.failure = run.failure;
    }
}

/// Normalized scenario with inheritance applied and helpers resolved.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub script: String,
    pub inherited_env: BTreeMap<String, String>,
    pub local_env: BTreeMap<String, String>,
    pub working_dir: PathBuf,
    pub weight: u32,
    pub before: Vec<ScenarioId>,
    pub after: Vec<ScenarioId>,
    pub skip: bool,
    pub secret_phrase: Option<String>,
    pub displayable: bool,
    pub runnable: bool,
    pub outcome: ScenarioOutcome,
}

impl Scenario {
    pub fn has_script(&self) -> bool {
        !self.script.trim().is_empty()
    }

    /// Whether the runner executes this scenario as a top-level entry.
    pub fn is_eligible(&self) -> bool {
        !self.skip && self.runnable
    }

    /// Variables overlaid on the process environment; local ones win.
    pub fn environment(&self) -> BTreeMap<String, String> {
        let mut env = self.inherited_env.clone();
        env.extend(self.local_env.clone());
        env
    }

    /// Name used in logs and detail blocks.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or("<anonymous>")
    }
}

/// Resolved suite: an arena of scenarios addressed by `ScenarioId`.
#[derive(Debug, Clone)]
pub struct Suite {
    pub name: String,
    scenarios: Vec<Scenario>,
}

impl Suite {
    pub(crate) fn new(name: String, scenarios: Vec<Scenario>) -> Self {
        Self { name, scenarios }
    }

    pub fn scenario(&self, id: ScenarioId) -> &Scenario {
        &self.scenarios[id.index()]
    }

    pub fn scenario_mut(&mut self, id: ScenarioId) -> &mut Scenario {
        &mut self.scenarios[id.index()]
    }

    pub fn scenarios(&self) -> impl Iterator<Item = (ScenarioId, &Scenario)> {
        self.scenarios
            .iter()
            .enumerate()
            .map(|(index, scenario)| (ScenarioId(index), scenario))
    }

    /// Eligible scenarios in declaration order.
    pub fn eligible_ids(&self) -> Vec<ScenarioId> {
        self.scenarios()
            .filter(|(_, scenario)| scenario.is_eligible())
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of eligible scenarios that appear in the report.
    pub fn displayable_count(&self) -> usize {
        self.scenarios
            .iter()
            .filter(|scenario| scenario.is_eligible() && scenario.displayable)
            .count()
    }
}
