//! Point-in-time repository snapshot and porcelain status classification.

/// Parsed `git status --porcelain` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// 2-letter XY code, or "??" for untracked.
    pub code: String,
    /// Path for the changed file.
    pub path: String,
}

/// Status bucket a changed path is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Staged,
    Modified,
    Created,
    Deleted,
    NotAdded,
    Conflicted,
}

/// A point-in-time read of branch, categorized status, and worktree listing.
///
/// Rebuilt fresh on every query. The six category lists are disjoint by
/// construction: each changed path lands in exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSnapshot {
    pub branch: String,
    pub staged: Vec<String>,
    pub modified: Vec<String>,
    pub created: Vec<String>,
    pub deleted: Vec<String>,
    pub not_added: Vec<String>,
    pub conflicted: Vec<String>,
    /// Full recursive worktree listing (tracked or not), excluding `.git`.
    pub worktree_files: Vec<String>,
}

impl RepoSnapshot {
    /// True when nothing is staged, modified, untracked, deleted, created,
    /// or conflicted.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.modified.is_empty()
            && self.created.is_empty()
            && self.deleted.is_empty()
            && self.not_added.is_empty()
            && self.conflicted.is_empty()
    }

    /// Category of a path, if it appears in any status list.
    pub fn category_of(&self, path: &str) -> Option<FileCategory> {
        let buckets = [
            (FileCategory::Conflicted, &self.conflicted),
            (FileCategory::NotAdded, &self.not_added),
            (FileCategory::Created, &self.created),
            (FileCategory::Deleted, &self.deleted),
            (FileCategory::Modified, &self.modified),
            (FileCategory::Staged, &self.staged),
        ];
        for (category, paths) in buckets {
            if paths.iter().any(|p| p == path) {
                return Some(category);
            }
        }
        None
    }
}

/// Build a snapshot from the current branch, porcelain entries, and worktree
/// listing.
pub fn classify(
    branch: String,
    entries: Vec<StatusEntry>,
    worktree_files: Vec<String>,
) -> RepoSnapshot {
    let mut snapshot = RepoSnapshot {
        branch,
        worktree_files,
        ..RepoSnapshot::default()
    };
    for entry in entries {
        let bucket = match categorize(&entry.code) {
            FileCategory::Staged => &mut snapshot.staged,
            FileCategory::Modified => &mut snapshot.modified,
            FileCategory::Created => &mut snapshot.created,
            FileCategory::Deleted => &mut snapshot.deleted,
            FileCategory::NotAdded => &mut snapshot.not_added,
            FileCategory::Conflicted => &mut snapshot.conflicted,
        };
        bucket.push(entry.path);
    }
    snapshot
}

/// Assign a porcelain XY code to exactly one category.
///
/// Precedence: conflicted, untracked, created, deleted, worktree-modified,
/// then anything else still staged in the index (renames, copies, staged
/// modifications).
fn categorize(code: &str) -> FileCategory {
    if code == "??" {
        return FileCategory::NotAdded;
    }
    let mut chars = code.chars();
    let x = chars.next().unwrap_or(' ');
    let y = chars.next().unwrap_or(' ');
    if x == 'U' || y == 'U' || (x == 'A' && y == 'A') || (x == 'D' && y == 'D') {
        FileCategory::Conflicted
    } else if x == 'A' {
        FileCategory::Created
    } else if x == 'D' || y == 'D' {
        FileCategory::Deleted
    } else if y == 'M' || y == 'T' {
        FileCategory::Modified
    } else {
        FileCategory::Staged
    }
}
