//! Profile command - distribution statistics per category

use super::load_history;
use anticopypaster::config::ProjectConfig;
use anticopypaster::trigger::DistributionSummary;
use anyhow::Result;
use console::style;
use std::path::Path;

pub fn run(config: &ProjectConfig, history_path: &Path) -> Result<()> {
    let engine = config.build_engine()?;
    let history = load_history(history_path)?;

    println!("\nHistory profile ({} fragments)\n", style(history.len()).cyan());

    for category in engine.categories() {
        let values: Vec<f64> = history.iter().map(|v| category.reduce(v)).collect();
        match DistributionSummary::from_values(&values) {
            Ok(d) => println!(
                "  {}: n={} min={} Q1={} Q2={} Q3={} max={} mean={:.2}",
                style(&category.name).bold(),
                d.count,
                d.min,
                d.quartiles.q1,
                d.quartiles.q2,
                d.quartiles.q3,
                d.max,
                d.mean
            ),
            Err(_) => println!(
                "  {}: {}",
                style(&category.name).bold(),
                style("no data").dim()
            ),
        }
    }
    Ok(())
}
