//! Learner-facing text rendering.
//!
//! Pure formatting over the structured outcomes produced by the orchestration
//! layer. Nothing in here decides whether a step is satisfied; it only
//! explains what the engine already decided.

use clap::ValueEnum;

use crate::core::compare::BranchComparison;
use crate::core::snapshot::{FileCategory, RepoSnapshot};
use crate::core::transition::Transition;
use crate::io::inspect::BranchOverview;
use crate::scenario::Scenario;
use crate::start::StartOutcome;
use crate::status::StatusOutcome;

/// Git operation the `explain` command can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    BranchCreate,
    BranchSwitch,
    FileEdit,
    GitAdd,
    GitCommit,
    GitMerge,
}

/// Render the outcome of `dojo start`.
pub fn start_report(outcome: &StartOutcome) -> String {
    let mut buf = String::new();
    buf.push_str(&format!(
        "Scenario '{}' loaded ({} steps).\n",
        outcome.scenario.id,
        outcome.scenario.steps.len()
    ));
    buf.push_str(&format!("Sandbox: {}\n\n", outcome.repo_dir.display()));
    buf.push_str(&format!(
        "First goal: {}\n",
        outcome.scenario.steps[0].goal_text()
    ));
    buf.push_str("Work inside the sandbox, then run `dojo status` to check progress.");
    buf
}

/// Render the outcome of one status check.
pub fn status_report(outcome: &StatusOutcome) -> String {
    let scenario = &outcome.scenario;
    match outcome.transition {
        Transition::AlreadyComplete => format!(
            "Scenario '{}' is complete. Run `dojo start` to begin another.",
            scenario.id
        ),
        Transition::Advanced { from, to, complete } => {
            let mut buf = String::new();
            buf.push_str(&format!(
                "Goal reached: {}\n",
                scenario.steps[from].goal_text()
            ));
            if let Some(explain) = &scenario.steps[from].explain {
                buf.push_str(&format!("\n{explain}\n"));
            }
            if complete {
                buf.push_str(&format!(
                    "\nScenario '{}' complete. Nice work!",
                    scenario.id
                ));
            } else {
                buf.push_str(&format!(
                    "\nNext goal: {}",
                    scenario.steps[to].goal_text()
                ));
            }
            buf
        }
        Transition::Unsatisfied { index } => {
            let mut buf = String::new();
            buf.push_str(&format!(
                "Current goal: {}\n",
                scenario.steps[index].goal_text()
            ));
            buf.push_str("Not satisfied yet.\n");
            for check in &outcome.diagnostics {
                let mark = if check.satisfied { "ok" } else { "--" };
                buf.push_str(&format!("  [{mark}] {}\n", check.label));
            }
            buf.push_str("Run `dojo hint` for help.");
            buf
        }
    }
}

/// Render hints for the current step.
pub fn hint_report(scenario: &Scenario, step_index: usize) -> String {
    let Some(step) = scenario.steps.get(step_index) else {
        return format!(
            "Scenario '{}' is complete; no more hints.",
            scenario.id
        );
    };
    let mut buf = String::new();
    buf.push_str(&format!("Current goal: {}\n", step.goal_text()));
    if step.hints.is_empty() {
        buf.push_str("No hints for this step.\n");
    } else {
        buf.push_str("Hints:\n");
        for hint in &step.hints {
            buf.push_str(&format!("- {hint}\n"));
        }
    }
    if let Some(explain) = &step.explain {
        buf.push_str(&format!("\n{explain}"));
    }
    buf.trim_end().to_string()
}

/// Render the working tree and all-branches view.
pub fn worktree_report(snapshot: &RepoSnapshot, overviews: &[BranchOverview]) -> String {
    let mut buf = String::new();
    buf.push_str(&format!("On branch {}\n\n", snapshot.branch));

    buf.push_str("Branches:\n");
    for overview in overviews {
        let marker = if overview.current { "*" } else { " " };
        buf.push_str(&format!("{marker} {}\n", overview.name));
        if overview.files.is_empty() {
            buf.push_str("    files: (none)\n");
        } else {
            buf.push_str(&format!("    files: {}\n", overview.files.join(", ")));
        }
        if let Some(latest) = overview.recent_commits.first() {
            buf.push_str(&format!("    latest: {latest}\n"));
        }
    }

    buf.push_str(&format!(
        "\nWorking tree ({} branch):\n",
        snapshot.branch
    ));
    if snapshot.worktree_files.is_empty() {
        buf.push_str("  (no files)\n");
    }
    for file in &snapshot.worktree_files {
        let state = match snapshot.category_of(file) {
            Some(FileCategory::Staged) => "staged",
            Some(FileCategory::Modified) => "modified",
            Some(FileCategory::Created) => "newly added",
            Some(FileCategory::Deleted) => "deleted",
            Some(FileCategory::NotAdded) => "untracked",
            Some(FileCategory::Conflicted) => "conflicted",
            None => "committed",
        };
        buf.push_str(&format!("  {file} ({state})\n"));
    }
    buf.trim_end().to_string()
}

/// Render a merge preview, or its absence.
pub fn merge_preview_report(
    base: &str,
    target: &str,
    preview: Option<&BranchComparison>,
) -> String {
    let Some(preview) = preview else {
        return format!(
            "Merge preview unavailable for '{target}' into '{base}' (do both branches exist?)"
        );
    };
    let mut buf = String::new();
    buf.push_str(&format!("Merge preview: {target} -> {base}\n"));
    buf.push_str(&format!("Common ancestor: {}\n\n", preview.merge_base));

    buf.push_str("Files that would change:\n");
    if preview.changes.is_empty() {
        buf.push_str("  (none: already merged or identical)\n");
    }
    for change in &preview.changes {
        buf.push_str(&format!(
            "  {} {} ({})\n",
            change.code, change.path, change.label
        ));
    }

    if !preview.target_commits.is_empty() {
        buf.push_str(&format!("\nCommits only on {target}:\n"));
        for commit in &preview.target_commits {
            buf.push_str(&format!("  {commit}\n"));
        }
    }
    if !preview.base_commits.is_empty() {
        buf.push_str(&format!("\nCommits only on {base}:\n"));
        for commit in &preview.base_commits {
            buf.push_str(&format!("  {commit}\n"));
        }
    }
    buf.trim_end().to_string()
}

/// Static teaching text for a git operation.
pub fn explain_operation(operation: Operation) -> &'static str {
    match operation {
        Operation::BranchCreate => {
            "Creating a branch adds a new movable pointer at the current commit.\n\
             It starts a separate line of development; the working tree does not\n\
             change until you switch to it."
        }
        Operation::BranchSwitch => {
            "Checking out a branch moves HEAD and rewrites the working tree to\n\
             that branch's latest commit. Uncommitted edits must be committed or\n\
             stashed first."
        }
        Operation::FileEdit => {
            "Editing a file changes only the working tree. Git sees the change\n\
             but records nothing until you stage it with `git add`."
        }
        Operation::GitAdd => {
            "`git add` copies the change into the staging area, the exact\n\
             snapshot that will go into the next commit. The branch itself has\n\
             not moved yet."
        }
        Operation::GitCommit => {
            "`git commit` records the staged snapshot on the current branch and\n\
             advances the branch pointer by one commit. Working tree, staging\n\
             area, and branch are now in sync."
        }
        Operation::GitMerge => {
            "`git merge` integrates another branch into the current one. If the\n\
             current branch has not moved since they diverged, git fast-forwards;\n\
             otherwise it creates a merge commit combining both histories."
        }
    }
}

/// One-line catalog of operations `explain` understands.
pub fn operation_catalog() -> String {
    let names: Vec<String> = Operation::value_variants()
        .iter()
        .filter_map(|op| op.to_possible_value())
        .map(|value| value.get_name().to_string())
        .collect();
    format!(
        "Pick an operation to explain with --operation <kind>: {}",
        names.join(", ")
    )
}
