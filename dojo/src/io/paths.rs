//! Canonical sandbox layout under `.dojo/`.

use std::path::PathBuf;

/// All canonical paths within `.dojo/` for a project root.
#[derive(Debug, Clone)]
pub struct DojoPaths {
    pub root: PathBuf,
    pub dojo_dir: PathBuf,
    /// The disposable git repository the learner manipulates.
    pub repo_dir: PathBuf,
    pub progress_path: PathBuf,
    pub config_path: PathBuf,
}

impl DojoPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let dojo_dir = root.join(".dojo");
        Self {
            repo_dir: dojo_dir.join("repo"),
            progress_path: dojo_dir.join("progress.json"),
            config_path: dojo_dir.join("config.toml"),
            dojo_dir,
            root,
        }
    }

    /// Scenario search directory for a configured relative path.
    pub fn scenarios_dir(&self, configured: &str) -> PathBuf {
        self.root.join(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_under_dojo_dir() {
        let paths = DojoPaths::new("/tmp/project");
        assert_eq!(paths.dojo_dir, PathBuf::from("/tmp/project/.dojo"));
        assert_eq!(paths.repo_dir, PathBuf::from("/tmp/project/.dojo/repo"));
        assert_eq!(
            paths.progress_path,
            PathBuf::from("/tmp/project/.dojo/progress.json")
        );
        assert_eq!(
            paths.scenarios_dir("scenarios"),
            PathBuf::from("/tmp/project/scenarios")
        );
    }
}
