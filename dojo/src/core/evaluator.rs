//! Goal and predicate evaluation against live repository state.
//!
//! Evaluation is a read-only function of freshly captured state plus the
//! step's static arguments. Repository access goes through the [`Inspect`]
//! capability so goals that need no snapshot never trigger one, and so tests
//! can evaluate against fakes.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::core::snapshot::RepoSnapshot;
use crate::scenario::{Check, FileOperation, GoalSpec, Step, StructuredGoal};

/// Capability to query live repository state on demand.
pub trait Inspect {
    /// Fresh point-in-time snapshot. Errors are fatal to the status check.
    fn snapshot(&self) -> Result<RepoSnapshot>;
    /// Names of all local branches.
    fn branch_names(&self) -> Result<Vec<String>>;
    /// Whether `topic` appears in the branches merged into `base`.
    fn is_merged(&self, base: &str, topic: &str) -> Result<bool>;
    /// Content of a sandbox file, or `None` when it does not exist.
    fn file_content(&self, path: &str) -> Result<Option<String>>;
}

/// Outcome of one predicate, for the diagnostic view next to an unsatisfied
/// step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub label: String,
    pub satisfied: bool,
}

/// Aggregate gate: is the step's goal satisfied right now?
///
/// Legacy check lists AND together and short-circuit on the first failure;
/// structured goals follow their kind's rules. Unknown kinds are unsatisfied.
pub fn step_satisfied(step: &Step, repo: &dyn Inspect) -> Result<bool> {
    match &step.goal {
        GoalSpec::Text(_) => {
            for check in &step.checks {
                if !check_satisfied(check, repo)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        GoalSpec::Structured(goal) => structured_satisfied(goal, repo),
    }
}

/// Evaluate each legacy predicate individually, without short-circuiting.
///
/// The gate and the explanation are different questions: `step_satisfied`
/// answers "advance?", this answers "which checks are holding the learner
/// back?". Structured goals have no per-check breakdown.
pub fn check_results(step: &Step, repo: &dyn Inspect) -> Result<Vec<CheckResult>> {
    let GoalSpec::Text(_) = &step.goal else {
        return Ok(Vec::new());
    };
    let mut results = Vec::with_capacity(step.checks.len());
    for check in &step.checks {
        results.push(CheckResult {
            label: check.describe(),
            satisfied: check_satisfied(check, repo)?,
        });
    }
    Ok(results)
}

/// Evaluate one predicate. Unrecognized predicates are never satisfied.
pub fn check_satisfied(check: &Check, repo: &dyn Inspect) -> Result<bool> {
    match check {
        Check::CurrentBranchIs { args: [branch] } => Ok(repo.snapshot()?.branch == *branch),
        Check::NoUncommittedChanges => Ok(repo.snapshot()?.is_clean()),
        Check::IsMerged { args: [base, topic] } => repo.is_merged(base, topic),
        Check::Unknown => Ok(false),
    }
}

fn structured_satisfied(goal: &StructuredGoal, repo: &dyn Inspect) -> Result<bool> {
    match goal {
        StructuredGoal::Observation { .. } => Ok(true),
        StructuredGoal::GitCommand { commands, .. } => {
            for command in commands {
                if !command_effect_observed(command, repo)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        StructuredGoal::FileOperations { files, .. } => {
            for op in files {
                if !file_effect_observed(op, repo)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        StructuredGoal::Unknown => Ok(false),
    }
}

static BRANCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git\s+branch\s+([^\s-]\S*)").unwrap());
static CHECKOUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git\s+(?:checkout|switch)\s+(?:-[bc]\s+)?(\S+)").unwrap());

/// Check a command's expected effect, not its history.
///
/// Commands mentioning `commit` require a clean worktree; `git branch <name>`
/// requires the branch to exist; `git checkout <name>` (or `git switch`)
/// requires it to be the current branch. Any other command is not a blocking
/// condition.
fn command_effect_observed(command: &str, repo: &dyn Inspect) -> Result<bool> {
    let command = command.trim();
    if command.contains("commit") {
        return Ok(repo.snapshot()?.is_clean());
    }
    if let Some(caps) = BRANCH_RE.captures(command) {
        let name = caps[1].to_string();
        return Ok(repo.branch_names()?.iter().any(|branch| *branch == name));
    }
    if let Some(caps) = CHECKOUT_RE.captures(command) {
        return Ok(repo.snapshot()?.branch == caps[1]);
    }
    Ok(true)
}

fn file_effect_observed(op: &FileOperation, repo: &dyn Inspect) -> Result<bool> {
    if op.action != "create" && op.action != "modify" {
        return Ok(true);
    }
    let Some(content) = repo.file_content(&op.path)? else {
        return Ok(false);
    };
    match &op.content {
        Some(expected) => Ok(content.contains(expected.trim())),
        None => Ok(true),
    }
}
