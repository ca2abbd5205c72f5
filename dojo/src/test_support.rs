//! Test-only helpers for exercising the trainer against real repositories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::io::paths::DojoPaths;
use crate::start::{StartOutcome, start_scenario};

/// A temporary project root with its own sandbox repository.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new().context("create tempdir")?,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn paths(&self) -> DojoPaths {
        DojoPaths::new(self.root())
    }

    /// Write a scenario definition under `scenarios/`.
    pub fn write_scenario(&self, id: &str, body: &str) -> Result<PathBuf> {
        let dir = self.root().join("scenarios");
        fs::create_dir_all(&dir).context("create scenarios dir")?;
        let path = dir.join(format!("{id}.json"));
        fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Start a scenario, bootstrapping the sandbox.
    pub fn start(&self, id: &str) -> Result<StartOutcome> {
        start_scenario(self.root(), Some(id))
    }

    /// Run a git command inside the sandbox repository.
    pub fn git(&self, args: &[&str]) -> Result<()> {
        let repo = self.paths().repo_dir;
        let status = Command::new("git")
            .args(args)
            .current_dir(&repo)
            .status()
            .with_context(|| format!("spawn git {args:?}"))?;
        if !status.success() {
            return Err(anyhow!("git {args:?} failed in {}", repo.display()));
        }
        Ok(())
    }

    /// Write a file inside the sandbox repository.
    pub fn write_file(&self, rel: &str, contents: &str) -> Result<()> {
        let path = self.paths().repo_dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("create parent dir")?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }
}
