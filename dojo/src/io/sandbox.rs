//! Sandbox bootstrapping: a disposable git repository the learner can break.

use std::fs;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};

use crate::io::git::Git;
use crate::io::paths::DojoPaths;

const SEED_README: &str = "# Dojo Sandbox\n\nPractice repository. Everything in here is disposable.\n";

/// Ensure the sandbox repository exists, creating and seeding it on first use.
///
/// Idempotent: an existing repository is left untouched so repeated `start`
/// invocations keep the learner's history.
pub fn ensure_sandbox(paths: &DojoPaths) -> Result<()> {
    if paths.repo_dir.join(".git").exists() {
        debug!(repo = %paths.repo_dir.display(), "sandbox repository already present");
        return Ok(());
    }
    info!(repo = %paths.repo_dir.display(), "creating sandbox repository");
    fs::create_dir_all(&paths.repo_dir)
        .with_context(|| format!("create sandbox {}", paths.repo_dir.display()))?;
    let git = Git::new(&paths.repo_dir);
    git.init()?;
    // Local identity so the seed commit works without global git config.
    git.set_config("user.name", "dojo")?;
    git.set_config("user.email", "dojo@localhost")?;
    fs::write(paths.repo_dir.join("README.md"), SEED_README)
        .with_context(|| format!("seed {}", paths.repo_dir.display()))?;
    git.add_all()?;
    git.commit("chore: initial commit")?;
    git.rename_branch("main")?;
    Ok(())
}

/// Error unless the sandbox repository exists.
pub fn require_sandbox(paths: &DojoPaths) -> Result<()> {
    if paths.repo_dir.join(".git").exists() {
        return Ok(());
    }
    Err(anyhow!("sandbox not initialized (run `dojo start` first)"))
}
