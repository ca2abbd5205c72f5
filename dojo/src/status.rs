//! Orchestration for a single `dojo status` check.
//!
//! One invocation runs the state machine exactly once: load progress,
//! evaluate the current step's goal against live repository state, advance on
//! success, persist. Evaluation never mutates progress; persistence happens
//! only after a transition.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::evaluator::{CheckResult, check_results, step_satisfied};
use crate::core::transition::{Transition, advance};
use crate::io::config::load_config;
use crate::io::inspect::RepoInspector;
use crate::io::paths::DojoPaths;
use crate::io::progress::{load_progress, save_progress};
use crate::io::scenarios::load_scenario;
use crate::scenario::Scenario;

/// Structured result of one status check, consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusOutcome {
    pub scenario: Scenario,
    pub transition: Transition,
    /// Per-predicate diagnostics for an unsatisfied legacy step.
    pub diagnostics: Vec<CheckResult>,
}

/// Run the step state machine once and persist any transition.
pub fn run_status(root: &Path) -> Result<StatusOutcome> {
    let paths = DojoPaths::new(root);
    let config = load_config(&paths.config_path)?;
    let mut progress = load_progress(&paths.progress_path)?;
    let scenario = load_scenario(
        &paths.scenarios_dir(&config.scenarios_dir),
        &progress.scenario,
    )?;
    let inspector = RepoInspector::new(&paths.repo_dir);

    let step_count = scenario.steps.len();
    let index = progress.step_index;
    let transition = advance(index, step_count, || {
        step_satisfied(&scenario.steps[index], &inspector)
    })?;

    match transition {
        Transition::Advanced { to, .. } => {
            progress.step_index = to;
            save_progress(&paths.progress_path, &progress).context("persist progress")?;
            info!(scenario = %scenario.id, step = to, "step satisfied, advanced");
        }
        Transition::Unsatisfied { index } => {
            debug!(scenario = %scenario.id, step = index, "step not satisfied");
        }
        Transition::AlreadyComplete => {
            debug!(scenario = %scenario.id, "scenario already complete");
        }
    }

    let diagnostics = match transition {
        Transition::Unsatisfied { index } => check_results(&scenario.steps[index], &inspector)?,
        _ => Vec::new(),
    };

    Ok(StatusOutcome {
        scenario,
        transition,
        diagnostics,
    })
}
