//! Trainer configuration stored under `.dojo/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Trainer configuration (TOML).
///
/// This file is edited by humans. Missing fields default to sensible values,
/// and a missing file means all defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DojoConfig {
    /// Scenario started when `--scenario` is not given.
    pub default_scenario: String,

    /// Directory searched for scenario definition files, relative to the
    /// project root, before falling back to the built-in set.
    pub scenarios_dir: String,
}

impl Default for DojoConfig {
    fn default() -> Self {
        Self {
            default_scenario: "branch-basics".to_string(),
            scenarios_dir: "scenarios".to_string(),
        }
    }
}

impl DojoConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_scenario.trim().is_empty() {
            return Err(anyhow!("default_scenario must not be empty"));
        }
        if self.scenarios_dir.trim().is_empty() {
            return Err(anyhow!("scenarios_dir must not be empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DojoConfig::default()`.
pub fn load_config(path: &Path) -> Result<DojoConfig> {
    if !path.exists() {
        let cfg = DojoConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DojoConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
