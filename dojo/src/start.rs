//! Orchestration for `dojo start`.
//!
//! Starting a scenario: ensure the sandbox repository exists, resolve the
//! scenario definition, and reset persisted progress to step 0.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::io::config::load_config;
use crate::io::paths::DojoPaths;
use crate::io::progress::{ProgressState, save_progress};
use crate::io::sandbox::ensure_sandbox;
use crate::io::scenarios::load_scenario;
use crate::scenario::Scenario;

/// Outcome of `dojo start`.
#[derive(Debug, Clone, PartialEq)]
pub struct StartOutcome {
    pub scenario: Scenario,
    pub repo_dir: PathBuf,
}

/// Start (or restart) a scenario in `root`.
///
/// Restarting always resets progress to step 0; the sandbox repository itself
/// is preserved so the learner keeps their history.
pub fn start_scenario(root: &Path, scenario_id: Option<&str>) -> Result<StartOutcome> {
    let paths = DojoPaths::new(root);
    let config = load_config(&paths.config_path)?;
    let id = scenario_id.unwrap_or(&config.default_scenario);
    debug!(scenario = id, "starting scenario");

    // Resolve the scenario before touching any state so an unknown id fails
    // without side effects.
    let scenario = load_scenario(&paths.scenarios_dir(&config.scenarios_dir), id)?;

    ensure_sandbox(&paths)?;
    let progress = ProgressState::begin(id)?;
    save_progress(&paths.progress_path, &progress).context("persist fresh progress")?;

    info!(scenario = id, steps = scenario.steps.len(), "scenario started");
    Ok(StartOutcome {
        repo_dir: paths.repo_dir,
        scenario,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::progress::load_progress;
    use crate::test_support::TestProject;

    #[test]
    fn start_seeds_sandbox_and_writes_fresh_progress() {
        let project = TestProject::new().expect("project");
        let outcome = project.start("branch-basics").expect("start");

        assert_eq!(outcome.scenario.id, "branch-basics");
        assert!(outcome.repo_dir.join(".git").exists());

        let progress = load_progress(&project.paths().progress_path).expect("progress");
        assert_eq!(progress.scenario, "branch-basics");
        assert_eq!(progress.step_index, 0);
    }

    #[test]
    fn unknown_scenario_fails_without_writing_progress() {
        let project = TestProject::new().expect("project");
        let err = project.start("no-such-scenario").unwrap_err();
        assert!(err.to_string().contains("scenario not found"));
        assert!(!project.paths().progress_path.exists());
    }

    #[test]
    fn restart_resets_step_index() {
        let project = TestProject::new().expect("project");
        project.start("branch-basics").expect("start");

        let paths = project.paths();
        let mut progress = load_progress(&paths.progress_path).expect("progress");
        progress.step_index = 2;
        save_progress(&paths.progress_path, &progress).expect("save");

        project.start("branch-basics").expect("restart");
        let progress = load_progress(&paths.progress_path).expect("progress");
        assert_eq!(progress.step_index, 0);
    }
}
