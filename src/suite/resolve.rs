//! Suite normalization: inheritance, eligibility, weights, and helper lookup.
//!
//! Resolution is the only place helper names are interpreted. Once it succeeds
//! every `before`/`after` entry is a valid `ScenarioId`.
use super::{Scenario, ScenarioId, ScenarioOutcome, ScenarioSpec, Suite, SuiteFile};
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Normalize a parsed suite file.
///
/// `working_dir_override` seeds the working-directory chain in place of the
/// process working directory.
pub fn resolve_suite(file: SuiteFile, working_dir_override: Option<&Path>) -> Result<Suite> {
    let names = index_names(&file.cases)?;

    let mut inherited_env: BTreeMap<String, String> = BTreeMap::new();
    let mut inherited_dir: Option<PathBuf> = working_dir_override
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf);

    let mut scenarios = Vec::with_capacity(file.cases.len());
    for (index, spec) in file.cases.into_iter().enumerate() {
        if let Some(env) = spec.global_env.as_ref() {
            inherited_env = env.clone();
        }

        let own_dir = spec
            .workdir
            .as_ref()
            .filter(|dir| !dir.as_os_str().is_empty());
        let working_dir = match own_dir {
            Some(dir) => {
                inherited_dir = Some(dir.clone());
                dir.clone()
            }
            None => match inherited_dir.as_ref() {
                Some(dir) => dir.clone(),
                None => {
                    let cwd = std::env::current_dir().context("read current directory")?;
                    inherited_dir = Some(cwd.clone());
                    cwd
                }
            },
        };

        let name = non_empty(spec.name);
        let label = non_empty(spec.label);
        let displayable = label.is_some();
        let runnable = displayable || name.is_none();
        let weight = match spec.weight {
            Some(weight) if displayable && weight > 0 => weight,
            _ if displayable => 1,
            _ => 0,
        };

        let context_name = name
            .clone()
            .or_else(|| label.clone())
            .unwrap_or_else(|| format!("#{}", index + 1));
        let before = resolve_refs(&names, &spec.before)
            .with_context(|| format!("resolve before helpers of scenario {context_name}"))?;
        let after = resolve_refs(&names, &spec.after)
            .with_context(|| format!("resolve after helpers of scenario {context_name}"))?;

        scenarios.push(Scenario {
            name,
            label,
            description: non_empty(spec.description),
            script: spec.script.unwrap_or_default(),
            inherited_env: inherited_env.clone(),
            local_env: spec.env,
            working_dir,
            weight,
            before,
            after,
            skip: spec.skip,
            secret_phrase: non_empty(spec.secret_phrase),
            displayable,
            runnable,
            outcome: ScenarioOutcome::default(),
        });
    }

    tracing::debug!(
        suite = %file.name,
        scenarios = scenarios.len(),
        "resolved suite"
    );
    Ok(Suite::new(file.name, scenarios))
}

fn index_names(specs: &[ScenarioSpec]) -> Result<BTreeMap<String, ScenarioId>> {
    let mut names = BTreeMap::new();
    for (index, spec) in specs.iter().enumerate() {
        let Some(name) = spec.name.as_deref().filter(|name| !name.is_empty()) else {
            continue;
        };
        if names
            .insert(name.to_string(), ScenarioId::new(index))
            .is_some()
        {
            return Err(anyhow!("duplicate scenario name {name:?}"));
        }
    }
    Ok(names)
}

fn resolve_refs(
    names: &BTreeMap<String, ScenarioId>,
    refs: &[String],
) -> Result<Vec<ScenarioId>> {
    refs.iter()
        .map(|name| {
            names
                .get(name)
                .copied()
                .ok_or_else(|| anyhow!("unknown scenario name {name:?}"))
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
