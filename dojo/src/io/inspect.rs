//! Live repository inspection: snapshot builder, branch comparator, and the
//! [`Inspect`] capability implementation backed by real git queries.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::core::compare::{BranchComparison, oneline_commits, parse_name_status};
use crate::core::evaluator::Inspect;
use crate::core::snapshot::{RepoSnapshot, classify};
use crate::io::git::Git;

/// Per-branch summary for the worktree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOverview {
    pub name: String,
    pub current: bool,
    pub files: Vec<String>,
    pub recent_commits: Vec<String>,
}

/// Queries live sandbox state on demand.
///
/// Holds no cached state: every snapshot reflects the repository at the
/// moment of the call.
#[derive(Debug, Clone)]
pub struct RepoInspector {
    git: Git,
}

impl RepoInspector {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            git: Git::new(repo_dir),
        }
    }

    /// Fresh snapshot of branch, categorized status, and worktree listing.
    ///
    /// Branch and status failures propagate; nothing downstream can proceed
    /// without them. The worktree walk degrades to an empty listing instead,
    /// since the directory may legitimately not exist yet.
    pub fn snapshot(&self) -> Result<RepoSnapshot> {
        let branch = self.git.current_branch()?;
        let entries = self.git.status_porcelain()?;
        Ok(classify(branch, entries, self.worktree_files()))
    }

    /// Names of all local branches.
    pub fn branch_names(&self) -> Result<Vec<String>> {
        self.git.branch_names()
    }

    /// Whether `topic` appears in the branches merged into `base`.
    ///
    /// A bad base name is a scenario-authoring problem, not a crash: an
    /// unavailable merged-branch list reads as empty.
    pub fn is_merged(&self, base: &str, topic: &str) -> bool {
        let merged = match self.git.merged_branches(base) {
            Ok(list) => list,
            Err(err) => {
                debug!(base, error = %format!("{err:#}"), "merged-branch query failed");
                Vec::new()
            }
        };
        merged.iter().any(|branch| branch == topic)
    }

    /// Content of a sandbox file, or `None` when it does not exist.
    pub fn file_content(&self, path: &str) -> Result<Option<String>> {
        let full = self.git.workdir().join(path);
        if !full.is_file() {
            return Ok(None);
        }
        let contents =
            fs::read_to_string(&full).with_context(|| format!("read {}", full.display()))?;
        Ok(Some(contents))
    }

    /// Compare two branches relative to their merge-base.
    ///
    /// Any git failure (most commonly a branch name that does not exist)
    /// yields `None`: callers treat the preview as unavailable rather than
    /// surfacing an error to the learner.
    #[instrument(skip(self))]
    pub fn compare(&self, base: &str, target: &str) -> Option<BranchComparison> {
        match self.try_compare(base, target) {
            Ok(comparison) => Some(comparison),
            Err(err) => {
                debug!(error = %format!("{err:#}"), "branch comparison unavailable");
                None
            }
        }
    }

    fn try_compare(&self, base: &str, target: &str) -> Result<BranchComparison> {
        let merge_base = self.git.merge_base(base, target)?;
        let base_commits =
            oneline_commits(&self.git.log_oneline(&format!("{merge_base}..{base}"))?);
        let target_commits =
            oneline_commits(&self.git.log_oneline(&format!("{merge_base}..{target}"))?);
        let changes = parse_name_status(&self.git.diff_name_status(base, target)?);
        let mut short = merge_base;
        short.truncate(7);
        Ok(BranchComparison {
            merge_base: short,
            base_commits,
            target_commits,
            changes,
        })
    }

    /// Per-branch file and commit summaries for the worktree view.
    ///
    /// Individual branch queries that fail degrade to empty lists.
    pub fn branch_overviews(&self, current_branch: &str) -> Vec<BranchOverview> {
        let names = self.git.branch_names().unwrap_or_default();
        names
            .into_iter()
            .map(|name| {
                let files = self.git.files_in_branch(&name).unwrap_or_default();
                let recent_commits = self
                    .git
                    .recent_commits(&name, 3)
                    .map(|out| oneline_commits(&out))
                    .unwrap_or_default();
                BranchOverview {
                    current: name == current_branch,
                    name,
                    files,
                    recent_commits,
                }
            })
            .collect()
    }

    /// Recursive worktree listing, `.git` excluded, sorted for determinism.
    ///
    /// Untracked files are deliberately included; the listing covers whatever
    /// is on disk, not just what git tracks.
    fn worktree_files(&self) -> Vec<String> {
        let root = self.git.workdir();
        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != ".git")
        {
            let Ok(entry) = entry else { continue };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(root) {
                files.push(rel.to_string_lossy().into_owned());
            }
        }
        files.sort();
        files
    }
}

impl Inspect for RepoInspector {
    fn snapshot(&self) -> Result<RepoSnapshot> {
        RepoInspector::snapshot(self)
    }

    fn branch_names(&self) -> Result<Vec<String>> {
        RepoInspector::branch_names(self)
    }

    fn is_merged(&self, base: &str, topic: &str) -> Result<bool> {
        Ok(RepoInspector::is_merged(self, base, topic))
    }

    fn file_content(&self, path: &str) -> Result<Option<String>> {
        RepoInspector::file_content(self, path)
    }
}
