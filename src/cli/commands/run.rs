//! Batch runner
//!
//! Reads host items from a file or stdin, runs them in order and prints one
//! JSON output per produced item.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use log::debug;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::{connect, print_json};
use crate::api::Operation;
use crate::config::Config;

#[derive(Args)]
pub struct RunCommands {
    /// JSON file with the items to run, read from stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Report failing items as `{"error": ...}` instead of stopping
    #[arg(long)]
    pub continue_on_fail: bool,
    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

pub async fn handle_run_command(args: RunCommands, config: &Config) -> Result<()> {
    let text = read_input(args.input.as_deref())?;
    let operations = parse_operations(&text)?;

    if operations.is_empty() {
        eprintln!("{}", "No items to run".yellow());
        return Ok(());
    }

    let adapter = connect(config)?;
    let continue_on_fail = args.continue_on_fail || config.settings.continue_on_fail;

    eprintln!("▶ Running {} items", operations.len().to_string().cyan());
    let start = Instant::now();
    let outputs = adapter.execute_items(&operations, continue_on_fail).await?;
    let failed = outputs.iter().filter(|output| output.is_error()).count();

    print_json(&outputs, args.pretty)?;

    let summary = format!(
        "{} outputs in {:.2}s",
        outputs.len(),
        start.elapsed().as_secs_f64()
    );
    if failed > 0 {
        eprintln!("⚠ {} ({} failed)", summary.yellow(), failed.to_string().red());
    } else {
        eprintln!("✓ {}", summary.green());
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file does not exist: {}", path.display());
            }
            debug!("Reading items from {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read items from stdin")?;
            Ok(buffer)
        }
    }
}

/// Items as a JSON array, a single object, or one object per line
pub fn parse_operations(text: &str) -> Result<Vec<Operation>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("Failed to parse items array");
    }

    if let Ok(operation) = serde_json::from_str::<Operation>(trimmed) {
        return Ok(vec![operation]);
    }

    trimmed
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).with_context(|| format!("Failed to parse item on line {}", index + 1))
        })
        .collect()
}
