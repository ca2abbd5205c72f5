//! Branch comparison data: merge-base, one-sided commit lists, and file-level
//! change classification.

/// Computed diff between two branches relative to their merge-base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchComparison {
    /// Short merge-base commit id.
    pub merge_base: String,
    /// Oneline commits unique to the base branch, newest first.
    pub base_commits: Vec<String>,
    /// Oneline commits unique to the target branch, newest first.
    pub target_commits: Vec<String>,
    /// File-level changes between the two tips, in diff order.
    pub changes: Vec<FileChange>,
}

/// A single changed path with its one-letter diff status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub code: char,
    pub path: String,
    /// Human label for the status code.
    pub label: String,
}

/// Map a diff status letter to its human label; unknown codes pass through
/// verbatim.
pub fn change_label(code: char) -> String {
    match code {
        'A' => "added".to_string(),
        'M' => "modified".to_string(),
        'D' => "deleted".to_string(),
        'R' => "renamed".to_string(),
        'C' => "copied".to_string(),
        other => other.to_string(),
    }
}

/// Parse one `diff --name-status` line.
///
/// Rename and copy lines carry a similarity score on the code and two paths;
/// the new path wins, matching what the learner sees in the worktree.
pub fn parse_name_status_line(line: &str) -> Option<FileChange> {
    let mut fields = line.split('\t');
    let code = fields.next()?.trim().chars().next()?;
    let first_path = fields.next()?.trim();
    if first_path.is_empty() {
        return None;
    }
    let path = fields
        .next()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(first_path);
    Some(FileChange {
        code,
        path: path.to_string(),
        label: change_label(code),
    })
}

/// Parse a full `--name-status` diff body, skipping blank lines.
pub fn parse_name_status(diff: &str) -> Vec<FileChange> {
    diff.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_name_status_line)
        .collect()
}

/// Split oneline log output into trimmed, non-empty commit summaries.
pub fn oneline_commits(out: &str) -> Vec<String> {
    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip the current-branch (`*`) and linked-worktree (`+`) markers from a
/// `git branch` output line.
pub fn trim_branch_marker(line: &str) -> &str {
    line.trim().trim_start_matches(['*', '+']).trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cover_known_codes_and_pass_through_others() {
        assert_eq!(change_label('A'), "added");
        assert_eq!(change_label('M'), "modified");
        assert_eq!(change_label('D'), "deleted");
        assert_eq!(change_label('R'), "renamed");
        assert_eq!(change_label('C'), "copied");
        assert_eq!(change_label('T'), "T");
    }

    #[test]
    fn parses_added_and_deleted_lines_in_order() {
        let changes = parse_name_status("A\tx.txt\nD\ty.txt\n");
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].code, 'A');
        assert_eq!(changes[0].path, "x.txt");
        assert_eq!(changes[0].label, "added");
        assert_eq!(changes[1].code, 'D');
        assert_eq!(changes[1].path, "y.txt");
        assert_eq!(changes[1].label, "deleted");
    }

    #[test]
    fn rename_line_uses_new_path() {
        let change = parse_name_status_line("R100\told.txt\tnew.txt").expect("parse");
        assert_eq!(change.code, 'R');
        assert_eq!(change.path, "new.txt");
        assert_eq!(change.label, "renamed");
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert!(parse_name_status("\n\n").is_empty());
    }

    #[test]
    fn oneline_commits_drops_empty_lines() {
        let commits = oneline_commits("abc1234 first\n\ndef5678 second\n");
        assert_eq!(commits, vec!["abc1234 first", "def5678 second"]);
    }

    #[test]
    fn branch_markers_are_trimmed() {
        assert_eq!(trim_branch_marker("* main"), "main");
        assert_eq!(trim_branch_marker("+ linked"), "linked");
        assert_eq!(trim_branch_marker("  feature"), "feature");
    }
}
