//! Git adapter for the training sandbox.
//!
//! The trainer checks outcomes against a real repository, so we keep a small,
//! explicit wrapper around `git` subprocess calls rather than simulating
//! version control.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument, warn};

use crate::core::compare::trim_branch_marker;
use crate::core::snapshot::StatusEntry;

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Return the current branch name (errors on detached HEAD).
    #[instrument(skip_all)]
    pub fn current_branch(&self) -> Result<String> {
        let out = self.run_capture(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let name = out.trim().to_string();
        if name == "HEAD" {
            warn!("detached HEAD detected");
            return Err(anyhow!("detached HEAD (check out a branch first)"));
        }
        debug!(branch = %name, "current branch");
        Ok(name)
    }

    /// Get status entries (including untracked) in porcelain format.
    pub fn status_porcelain(&self) -> Result<Vec<StatusEntry>> {
        let out = self.run_capture(&["status", "--porcelain=v1", "-uall"])?;
        let mut entries = Vec::new();
        for line in out.lines() {
            if line.trim().is_empty() {
                continue;
            }
            entries.push(parse_status_line(line)?);
        }
        Ok(entries)
    }

    /// Names of all local branches, markers stripped.
    pub fn branch_names(&self) -> Result<Vec<String>> {
        let out = self.run_capture(&["branch", "--list"])?;
        Ok(branch_lines(&out))
    }

    /// Local branches whose tips are reachable from `base`.
    pub fn merged_branches(&self, base: &str) -> Result<Vec<String>> {
        let out = self.run_capture(&["branch", "--merged", base])?;
        Ok(branch_lines(&out))
    }

    /// Nearest common ancestor commit of two branches (full id).
    pub fn merge_base(&self, base: &str, target: &str) -> Result<String> {
        let out = self.run_capture(&["merge-base", base, target])?;
        Ok(out.trim().to_string())
    }

    /// Oneline commit summaries for a revision range.
    pub fn log_oneline(&self, range: &str) -> Result<String> {
        self.run_capture(&["log", "--oneline", range])
    }

    /// Most recent oneline commits reachable from `rev`.
    pub fn recent_commits(&self, rev: &str, limit: usize) -> Result<String> {
        let n = limit.to_string();
        self.run_capture(&["log", "--oneline", "-n", &n, rev])
    }

    /// Name-status diff between two branch tips.
    pub fn diff_name_status(&self, base: &str, target: &str) -> Result<String> {
        self.run_capture(&["diff", "--name-status", base, target])
    }

    /// Tracked files at a branch tip, without switching branches.
    pub fn files_in_branch(&self, branch: &str) -> Result<Vec<String>> {
        let out = self.run_capture(&["ls-tree", "-r", "--name-only", branch])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Full history graph across all branches, for the diagram view.
    pub fn graph(&self) -> Result<String> {
        self.run_capture(&[
            "log",
            "--oneline",
            "--decorate",
            "--graph",
            "--all",
            "--date-order",
        ])
    }

    /// Initialize a repository in the working directory.
    pub fn init(&self) -> Result<()> {
        self.run_checked(&["init"])?;
        Ok(())
    }

    /// Set a repository-local config value.
    pub fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.run_checked(&["config", key, value])?;
        Ok(())
    }

    /// Rename the current branch.
    pub fn rename_branch(&self, name: &str) -> Result<()> {
        self.run_checked(&["branch", "-M", name])?;
        Ok(())
    }

    /// Stage all changes (respects .gitignore).
    pub fn add_all(&self) -> Result<()> {
        self.run_checked(&["add", "-A"])?;
        Ok(())
    }

    /// Commit staged changes with a message.
    #[instrument(skip_all)]
    pub fn commit(&self, message: &str) -> Result<()> {
        debug!("committing staged changes");
        self.run_checked(&["commit", "-m", message])?;
        Ok(())
    }

    fn run_capture(&self, args: &[&str]) -> Result<String> {
        let output = self.run_checked(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}

fn branch_lines(out: &str) -> Vec<String> {
    out.lines()
        .map(trim_branch_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_status_line(line: &str) -> Result<StatusEntry> {
    if let Some(path) = line.strip_prefix("?? ") {
        return Ok(StatusEntry {
            code: "??".to_string(),
            path: path.trim().to_string(),
        });
    }
    if line.len() < 4 {
        return Err(anyhow!("unexpected porcelain line: '{line}'"));
    }
    let code = line[..2].to_string();
    let mut path = line[3..].trim().to_string();
    if let Some((_, new)) = path.split_once("->") {
        path = new.trim().to_string();
    }
    Ok(StatusEntry { code, path })
}
