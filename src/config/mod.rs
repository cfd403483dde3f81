//! Configuration module
//!
//! Project-level settings (anticopypaster.toml): the sensitivity used when
//! no explicit value is given, and the metric categories to evaluate.

mod project_config;

pub use project_config::{
    load_project_config, FlaggingConfig, ProjectConfig, JSON_FILENAME, TOML_FILENAME,
};
