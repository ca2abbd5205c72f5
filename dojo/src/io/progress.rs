//! Learner progress persistence.
//!
//! The progress record is the sole source of truth for the learner's position
//! and is owned exclusively by this store. Saving is a full overwrite; it is
//! not transactional with the evaluation that preceded it, and concurrent
//! invocations are last-writer-wins (see DESIGN.md).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

/// Persisted learner position within a scenario (`.dojo/progress.json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressState {
    /// Scenario identifier the sandbox was started with.
    pub scenario: String,
    /// RFC 3339 timestamp of `dojo start`.
    pub started_at: String,
    /// Current step index, 0-based; equal to the step count once complete.
    pub step_index: usize,
}

impl ProgressState {
    /// Fresh progress at step 0, stamped with the current time.
    pub fn begin(scenario: impl Into<String>) -> Result<Self> {
        let started_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("format start timestamp")?;
        Ok(Self {
            scenario: scenario.into(),
            started_at,
            step_index: 0,
        })
    }
}

/// Load progress from disk.
///
/// A missing file means the sandbox was never started; the error names the
/// remedial command instead of silently defaulting.
pub fn load_progress(path: &Path) -> Result<ProgressState> {
    debug!(path = %path.display(), "loading progress");
    if !path.exists() {
        return Err(anyhow!("sandbox not initialized (run `dojo start` first)"));
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read progress {}", path.display()))?;
    let state: ProgressState = serde_json::from_str(&contents)
        .with_context(|| format!("parse progress {}", path.display()))?;
    debug!(scenario = %state.scenario, step_index = state.step_index, "progress loaded");
    Ok(state)
}

/// Overwrite persisted progress (temp file + rename).
pub fn save_progress(path: &Path, state: &ProgressState) -> Result<()> {
    debug!(path = %path.display(), scenario = %state.scenario, step_index = state.step_index, "saving progress");
    let mut buf = serde_json::to_string_pretty(state)?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("progress path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp progress {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace progress {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verifies write → read preserves all fields.
    #[test]
    fn progress_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("progress.json");

        let state = ProgressState {
            scenario: "branch-basics".to_string(),
            started_at: "2026-01-01T00:00:00Z".to_string(),
            step_index: 2,
        };

        save_progress(&path, &state).expect("save");
        let loaded = load_progress(&path).expect("load");
        assert_eq!(loaded, state);
    }

    /// Guards against accidental changes to the persisted field ordering.
    #[test]
    fn serialized_form_is_stable() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("progress.json");

        let state = ProgressState {
            scenario: "branch-basics".to_string(),
            started_at: "2026-01-01T00:00:00Z".to_string(),
            step_index: 0,
        };
        save_progress(&path, &state).expect("save");
        let contents = fs::read_to_string(&path).expect("read");
        let expected = "{\n  \"scenario\": \"branch-basics\",\n  \"started_at\": \"2026-01-01T00:00:00Z\",\n  \"step_index\": 0\n}\n";
        assert_eq!(contents, expected);
    }

    #[test]
    fn missing_file_names_the_remedial_command() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_progress(&temp.path().join("progress.json")).unwrap_err();
        assert!(err.to_string().contains("dojo start"));
    }

    #[test]
    fn begin_stamps_a_parseable_timestamp() {
        let state = ProgressState::begin("commit-flow").expect("begin");
        assert_eq!(state.step_index, 0);
        assert_eq!(state.scenario, "commit-flow");
        assert!(state.started_at.contains('T'));
    }
}
