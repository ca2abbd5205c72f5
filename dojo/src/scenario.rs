//! Scenario definitions: ordered steps, goals, and predicate checks.
//!
//! Two generations of goal schema coexist in scenario files. Legacy steps
//! carry a prose `goal` string plus a `checks` predicate list; newer steps
//! carry a structured goal object tagged by `kind`. Scenario files are
//! hand-authored, so unknown predicate or goal kinds must still deserialize
//! (and later evaluate to unsatisfied) rather than fail the whole load.

use serde::Deserialize;

/// An ordered tutorial unit. Step order is execution order and is never
/// reordered after load.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Scenario {
    /// Resolved from the requested scenario id, not read from the file.
    #[serde(skip)]
    pub id: String,
    pub steps: Vec<Step>,
}

/// One teaching unit: a goal, hints shown on demand, and an optional
/// explanation shown when the goal is reached. A step is satisfied or not;
/// there is no partial completion.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Step {
    pub goal: GoalSpec,
    /// Legacy predicate list; ignored when `goal` is structured.
    #[serde(default)]
    pub checks: Vec<Check>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub explain: Option<String>,
}

impl Step {
    /// Human-facing goal text.
    pub fn goal_text(&self) -> &str {
        match &self.goal {
            GoalSpec::Text(text) => text,
            GoalSpec::Structured(goal) => goal.description(),
        }
    }
}

/// Goal field, polymorphic over the two schema generations.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GoalSpec {
    /// Legacy generation: prose description; the sibling `checks` list gates
    /// the step.
    Text(String),
    /// Structured generation: self-describing goal object tagged by `kind`.
    Structured(StructuredGoal),
}

/// Structured goal variants.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuredGoal {
    /// Teaching moment with no mechanical gate; always satisfied.
    Observation {
        #[serde(default)]
        description: String,
    },
    /// Satisfied when every listed command's expected effect is observed.
    GitCommand {
        #[serde(default)]
        description: String,
        #[serde(default)]
        commands: Vec<String>,
    },
    /// Satisfied when every listed file operation's effect is observed.
    FileOperations {
        #[serde(default)]
        description: String,
        #[serde(default)]
        files: Vec<FileOperation>,
    },
    /// Unrecognized goal kind; evaluates to unsatisfied.
    #[serde(other)]
    Unknown,
}

impl StructuredGoal {
    pub fn description(&self) -> &str {
        match self {
            StructuredGoal::Observation { description }
            | StructuredGoal::GitCommand { description, .. }
            | StructuredGoal::FileOperations { description, .. } => description,
            StructuredGoal::Unknown => "(unrecognized goal)",
        }
    }
}

/// A single expected file effect within a `file_operations` goal.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FileOperation {
    /// Path relative to the sandbox repository root.
    pub path: String,
    /// `create` or `modify` require the file to exist; anything else is not a
    /// blocking condition.
    #[serde(default)]
    pub action: String,
    /// Fragment the file content must contain, if given.
    #[serde(default)]
    pub content: Option<String>,
}

/// An atomic, named condition over repository state.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "predicate")]
pub enum Check {
    #[serde(rename = "currentBranchIs")]
    CurrentBranchIs { args: [String; 1] },
    #[serde(rename = "noUncommittedChanges")]
    NoUncommittedChanges,
    #[serde(rename = "isMerged")]
    IsMerged { args: [String; 2] },
    /// Unrecognized predicate; evaluates to unsatisfied.
    #[serde(other)]
    Unknown,
}

impl Check {
    /// Short label for the per-check diagnostic view.
    pub fn describe(&self) -> String {
        match self {
            Check::CurrentBranchIs { args: [branch] } => {
                format!("current branch is '{branch}'")
            }
            Check::NoUncommittedChanges => "no uncommitted changes".to_string(),
            Check::IsMerged { args: [base, topic] } => {
                format!("'{topic}' is merged into '{base}'")
            }
            Check::Unknown => "unrecognized check".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_step(json: &str) -> Step {
        serde_json::from_str(json).expect("parse step")
    }

    #[test]
    fn parses_legacy_step_with_checks() {
        let step = parse_step(
            r#"{
                "goal": "Create a branch",
                "checks": [{ "predicate": "currentBranchIs", "args": ["feature"] }],
                "hints": ["use git checkout -b"]
            }"#,
        );
        assert_eq!(step.goal_text(), "Create a branch");
        assert_eq!(
            step.checks,
            vec![Check::CurrentBranchIs {
                args: ["feature".to_string()]
            }]
        );
        assert_eq!(step.hints.len(), 1);
        assert_eq!(step.explain, None);
    }

    #[test]
    fn parses_structured_observation_step() {
        let step = parse_step(
            r#"{ "goal": { "kind": "observation", "description": "look around" } }"#,
        );
        assert_eq!(step.goal_text(), "look around");
        assert!(step.checks.is_empty());
    }

    #[test]
    fn parses_structured_git_command_step() {
        let step = parse_step(
            r#"{
                "goal": {
                    "kind": "git_command",
                    "description": "commit it",
                    "commands": ["git add .", "git commit -m 'x'"]
                }
            }"#,
        );
        let GoalSpec::Structured(StructuredGoal::GitCommand { commands, .. }) = &step.goal else {
            panic!("expected git_command goal");
        };
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn parses_structured_file_operations_step() {
        let step = parse_step(
            r#"{
                "goal": {
                    "kind": "file_operations",
                    "description": "make a file",
                    "files": [{ "path": "a.txt", "action": "create", "content": "hi" }]
                }
            }"#,
        );
        let GoalSpec::Structured(StructuredGoal::FileOperations { files, .. }) = &step.goal else {
            panic!("expected file_operations goal");
        };
        assert_eq!(files[0].path, "a.txt");
        assert_eq!(files[0].content.as_deref(), Some("hi"));
    }

    #[test]
    fn unknown_goal_kind_parses_as_unknown() {
        let step = parse_step(r#"{ "goal": { "kind": "quiz", "question": "?" } }"#);
        assert_eq!(step.goal, GoalSpec::Structured(StructuredGoal::Unknown));
    }

    #[test]
    fn unknown_predicate_parses_as_unknown() {
        let step = parse_step(
            r#"{
                "goal": "tricky",
                "checks": [{ "predicate": "bogusPredicate", "args": ["x"] }]
            }"#,
        );
        assert_eq!(step.checks, vec![Check::Unknown]);
    }

    #[test]
    fn scenario_steps_keep_file_order() {
        let scenario: Scenario = serde_json::from_str(
            r#"{ "steps": [
                { "goal": "first" },
                { "goal": "second" },
                { "goal": "third" }
            ] }"#,
        )
        .expect("parse scenario");
        let texts: Vec<&str> = scenario.steps.iter().map(Step::goal_text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
