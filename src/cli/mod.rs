//! CLI command definitions and handlers

mod check;
mod profile;

use anyhow::{Context, Result};
use anticopypaster::config::{load_project_config, ProjectConfig};
use anticopypaster::MetricVector;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Parse and validate sensitivity (0-100)
fn parse_sensitivity(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n > 100 {
        Err("sensitivity cannot exceed 100".to_string())
    } else {
        Ok(n)
    }
}

/// AntiCopyPaster - flag size-anomalous code fragments
#[derive(Parser, Debug)]
#[command(name = "anticopypaster")]
#[command(
    version,
    about = "Quartile-based copy-paste trigger: flags code fragments whose metrics stand out from the project's history",
    after_help = "\
Examples:
  anticopypaster check --history history.json --candidate fragment.json
  anticopypaster check -H history.json -c fragment.json --sensitivity 75 --format json
  anticopypaster profile --history history.json"
)]
pub struct Cli {
    /// Config file (default: anticopypaster.toml or .anticopypasterrc.json in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decide whether a candidate fragment would be flagged
    Check {
        /// JSON file with the history: an array of 78-number arrays
        #[arg(long, short = 'H')]
        history: PathBuf,

        /// JSON file with the candidate's 78-number array
        #[arg(long, short = 'c')]
        candidate: PathBuf,

        /// Sensitivity 0-100 (default: from config, else 50)
        #[arg(long, short = 's', env = "ANTICOPYPASTER_SENSITIVITY", value_parser = parse_sensitivity)]
        sensitivity: Option<u32>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Exit with code 1 if the candidate is flagged
        #[arg(long)]
        fail_on_flag: bool,
    },

    /// Show per-category distribution statistics for a history file
    Profile {
        /// JSON file with the history: an array of 78-number arrays
        #[arg(long, short = 'H')]
        history: PathBuf,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            history,
            candidate,
            sensitivity,
            format,
            fail_on_flag,
        } => {
            let sensitivity = sensitivity.unwrap_or_else(|| config.sensitivity());
            check::run(&config, &history, &candidate, sensitivity, &format, fail_on_flag)
        }
        Commands::Profile { history } => profile::run(&config, &history),
    }
}

fn resolve_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => ProjectConfig::from_path(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}

/// Read a JSON array of metric vectors
fn load_history(path: &Path) -> Result<Vec<MetricVector>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    let history: Vec<MetricVector> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid history file {}", path.display()))?;
    tracing::info!("Loaded {} history vectors from {}", history.len(), path.display());
    Ok(history)
}

/// Read a single metric vector
fn load_vector(path: &Path) -> Result<MetricVector> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read candidate file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid candidate file {}", path.display()))
}
