//! Check command - run the trigger engine on one candidate

use super::{load_history, load_vector};
use anticopypaster::config::ProjectConfig;
use anticopypaster::trigger::Verdict;
use anyhow::Result;
use console::style;
use std::path::Path;

pub fn run(
    config: &ProjectConfig,
    history_path: &Path,
    candidate_path: &Path,
    sensitivity: u32,
    format: &str,
    fail_on_flag: bool,
) -> Result<()> {
    let engine = config.build_engine()?;
    let history = load_history(history_path)?;
    let candidate = load_vector(candidate_path)?;

    let verdict = engine.evaluate(&history, Some(&candidate), sensitivity)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&verdict)?),
        _ => print_text(&verdict, history.len()),
    }

    if fail_on_flag && verdict.triggered {
        eprintln!("Failing due to --fail-on-flag");
        std::process::exit(1);
    }
    Ok(())
}

fn print_text(verdict: &Verdict, history_len: usize) {
    let headline = if verdict.triggered {
        style("FLAGGED").red().bold()
    } else {
        style("not flagged").green()
    };
    println!(
        "{} (sensitivity {}, {} history fragments)",
        headline,
        style(verdict.sensitivity).cyan(),
        history_len
    );

    for outcome in &verdict.categories {
        let marker = if outcome.triggered {
            style("!").red()
        } else {
            style("-").dim()
        };
        println!("  {} {}", marker, outcome.to_note());
    }
}
