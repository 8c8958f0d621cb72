//! Application configuration.

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use tabwatch_coordinator::CoordinatorConfig;
use tabwatch_research::ResearchConfig;

/// Top-level configuration, loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Coordinator timings and channel capacities.
    #[serde(default)]
    pub coordinator: CoordinatorConfig,

    /// Analysis-server endpoint and timeout.
    #[serde(default)]
    pub research: ResearchConfig,

    /// Where persisted state lives. In-memory when unset.
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration, falling back to defaults when the file does not
    /// exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }
}
