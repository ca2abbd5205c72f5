//! Scenario definition loading.
//!
//! Scenario files are external collaborators: the loader resolves an id to
//! `<scenarios_dir>/<id>.json`, falling back to the built-in set compiled
//! into the binary. Files are validated only to the extent of the fields
//! actually read.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use crate::scenario::Scenario;

const BRANCH_BASICS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../scenarios/branch-basics.json"
));
const COMMIT_FLOW: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../scenarios/commit-flow.json"
));

/// Built-in scenarios shipped with the trainer, by id.
const BUILTINS: [(&str, &str); 2] = [
    ("branch-basics", BRANCH_BASICS),
    ("commit-flow", COMMIT_FLOW),
];

/// Load a scenario by id, preferring files under `scenarios_dir`.
pub fn load_scenario(scenarios_dir: &Path, id: &str) -> Result<Scenario> {
    let path = scenarios_dir.join(format!("{id}.json"));
    let contents = if path.exists() {
        debug!(path = %path.display(), "loading scenario file");
        fs::read_to_string(&path).with_context(|| format!("read scenario {}", path.display()))?
    } else if let Some((_, raw)) = BUILTINS.iter().find(|(name, _)| *name == id) {
        debug!(id, "using built-in scenario");
        (*raw).to_string()
    } else {
        return Err(anyhow!(
            "scenario not found: '{id}' (no {} and no built-in by that id)",
            path.display()
        ));
    };
    let mut scenario: Scenario =
        serde_json::from_str(&contents).with_context(|| format!("parse scenario '{id}'"))?;
    scenario.id = id.to_string();
    if scenario.steps.is_empty() {
        return Err(anyhow!("scenario '{id}' has no steps"));
    }
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Check, GoalSpec, StructuredGoal};

    #[test]
    fn builtin_branch_basics_parses() {
        let temp = tempfile::tempdir().expect("tempdir");
        let scenario = load_scenario(temp.path(), "branch-basics").expect("load");
        assert_eq!(scenario.id, "branch-basics");
        assert_eq!(scenario.steps.len(), 3);
        assert_eq!(
            scenario.steps[0].checks,
            vec![Check::CurrentBranchIs {
                args: ["feature".to_string()]
            }]
        );
    }

    #[test]
    fn builtin_commit_flow_uses_structured_goals() {
        let temp = tempfile::tempdir().expect("tempdir");
        let scenario = load_scenario(temp.path(), "commit-flow").expect("load");
        assert!(matches!(
            scenario.steps[0].goal,
            GoalSpec::Structured(StructuredGoal::Observation { .. })
        ));
    }

    #[test]
    fn scenario_file_overrides_builtin() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("branch-basics.json");
        fs::write(&path, r#"{ "steps": [{ "goal": "custom" }] }"#).expect("write");
        let scenario = load_scenario(temp.path(), "branch-basics").expect("load");
        assert_eq!(scenario.steps.len(), 1);
        assert_eq!(scenario.steps[0].goal_text(), "custom");
    }

    #[test]
    fn unknown_id_names_the_searched_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_scenario(temp.path(), "nope").unwrap_err();
        assert!(err.to_string().contains("scenario not found"));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn empty_scenario_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("empty.json");
        fs::write(&path, r#"{ "steps": [] }"#).expect("write");
        let err = load_scenario(temp.path(), "empty").unwrap_err();
        assert!(err.to_string().contains("no steps"));
    }
}
