use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use super::{connect, print_json};
use crate::config::Config;
use crate::trigger::{PollState, TriggerEvent, poll};

#[derive(Args)]
pub struct PollCommands {
    /// Event to watch, e.g. `orders.created`
    #[arg(short, long)]
    pub event: String,
    /// Id to start after when no previous poll is known
    #[arg(long, default_value_t = 0)]
    pub starting_id: u64,
    /// Last id returned by a previous poll, takes precedence over --state
    #[arg(long)]
    pub last_id: Option<u64>,
    /// JSON file the poll state is read from and written back to
    #[arg(long)]
    pub state: Option<PathBuf>,
    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

pub async fn handle_poll_command(args: PollCommands, config: &Config) -> Result<()> {
    let event: TriggerEvent = args.event.parse()?;

    let mut state = match &args.state {
        Some(path) => load_state(path)?,
        None => PollState::default(),
    };
    if let Some(last_id) = args.last_id {
        state.last_checked_id = Some(last_id);
    }

    let adapter = connect(config)?;
    let items = poll(adapter.transport(), &event, args.starting_id, &mut state).await?;

    if let Some(path) = &args.state {
        save_state(path, &state)?;
    }

    print_json(
        &json!({"items": items, "last_checked_id": state.last_checked_id}),
        args.pretty,
    )?;

    if items.is_empty() {
        eprintln!("{}", format!("No new {} records", event.resource()).dimmed());
    } else {
        eprintln!("✓ {} new {} records", items.len().to_string().green(), event.resource());
    }
    Ok(())
}

fn load_state(path: &Path) -> Result<PollState> {
    if !path.exists() {
        return Ok(PollState::default());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read poll state: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse poll state: {}", path.display()))
}

fn save_state(path: &Path, state: &PollState) -> Result<()> {
    let content = serde_json::to_string_pretty(state).context("Failed to serialize poll state")?;
    fs::write(path, content).with_context(|| format!("Failed to write poll state: {}", path.display()))
}
