//! Project-level configuration support
//!
//! Loads per-project configuration from `anticopypaster.toml` or
//! `.anticopypasterrc.json` in the project root.
//!
//! # Configuration Format
//!
//! ```toml
//! # anticopypaster.toml
//!
//! [flagging]
//! sensitivity = 50  # 0-100, higher flags fewer fragments
//!
//! [[categories]]
//! name = "size"
//! indices = [0]
//! reduction = "sum"  # sum, mean, max, min
//! ```

use crate::trigger::{MetricCategory, TriggerEngine, TriggerResult};
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub const TOML_FILENAME: &str = "anticopypaster.toml";
pub const JSON_FILENAME: &str = ".anticopypasterrc.json";

/// Project-level configuration loaded from anticopypaster.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Flagging behaviour
    #[serde(default)]
    pub flagging: FlaggingConfig,

    /// Metric categories; the built-in size category when empty
    #[serde(default)]
    pub categories: Vec<MetricCategory>,
}

/// Settings that control when a fragment gets flagged
#[derive(Debug, Clone, Deserialize)]
pub struct FlaggingConfig {
    /// Sensitivity 0-100 (default: 50). Validated when used, not when loaded.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: u32,
}

impl Default for FlaggingConfig {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
        }
    }
}

fn default_sensitivity() -> u32 {
    50
}

/// Load project configuration from the project root.
///
/// Searches for configuration files in this order:
/// 1. `anticopypaster.toml`
/// 2. `.anticopypasterrc.json`
///
/// Returns default configuration if no config file is found or the one
/// found can't be parsed.
pub fn load_project_config(project_path: &Path) -> ProjectConfig {
    for name in [TOML_FILENAME, JSON_FILENAME] {
        let path = project_path.join(name);
        if !path.exists() {
            continue;
        }
        match ProjectConfig::from_path(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

impl ProjectConfig {
    /// Load an explicit config file; JSON if the extension says so, TOML otherwise.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let config = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?
        };
        Ok(config)
    }

    pub fn sensitivity(&self) -> u32 {
        self.flagging.sensitivity
    }

    /// Build a trigger engine from the configured categories.
    pub fn build_engine(&self) -> TriggerResult<TriggerEngine> {
        if self.categories.is_empty() {
            return Ok(TriggerEngine::default());
        }
        TriggerEngine::new(self.categories.clone())
    }
}
