//! Sequential suite execution.
//!
//! Each eligible scenario runs its before helpers, its own script, then its
//! after helpers. Nothing overlaps; a failing step never stops the suite.
mod exec;

use super::{ScenarioId, Suite};
use anyhow::Result;
use std::time::{Duration, Instant};

pub use exec::ScriptExecutor;

/// Run every eligible scenario in declaration order.
///
/// `on_finished` is called after each eligible scenario completes, while its
/// helpers still hold the results produced for it. Returns the elapsed time of
/// the whole run.
pub fn run_suite<F>(
    suite: &mut Suite,
    executor: &ScriptExecutor,
    mut on_finished: F,
) -> Result<Duration>
where
    F: FnMut(&Suite, ScenarioId) -> Result<()>,
{
    let started = Instant::now();
    let eligible = suite.eligible_ids();
    tracing::info!(
        suite = %suite.name,
        eligible = eligible.len(),
        "running suite"
    );

    for id in eligible {
        run_scenario(suite, executor, id);
        on_finished(suite, id)?;
    }

    let elapsed = started.elapsed();
    tracing::info!(
        suite = %suite.name,
        elapsed_ms = elapsed.as_millis() as u64,
        "suite finished"
    );
    Ok(elapsed)
}

/// Run one scenario with its helpers and record its total duration.
///
/// A scenario without a script is left untouched, helpers included.
pub fn run_scenario(suite: &mut Suite, executor: &ScriptExecutor, id: ScenarioId) {
    let scenario = suite.scenario(id);
    if !scenario.has_script() {
        tracing::debug!(scenario = scenario.display_name(), "no script; skipping");
        return;
    }
    let before = scenario.before.clone();
    let after = scenario.after.clone();

    let started = Instant::now();
    for helper in before {
        run_step(suite, executor, helper);
    }
    run_step(suite, executor, id);
    for helper in after {
        run_step(suite, executor, helper);
    }
    suite.scenario_mut(id).outcome.duration = Some(started.elapsed());
}

fn run_step(suite: &mut Suite, executor: &ScriptExecutor, id: ScenarioId) {
    if let Some(run) = executor.execute(suite.scenario(id)) {
        suite.scenario_mut(id).outcome.record(run);
    }
}
