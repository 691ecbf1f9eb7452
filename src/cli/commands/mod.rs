pub mod config;
pub mod options;
pub mod poll;
pub mod query;
pub mod run;

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{Adapter, PrestashopClient};
use crate::config::Config;

pub use config::handle_config_command;
pub use options::handle_options_command;
pub use poll::handle_poll_command;
pub use query::handle_query_command;
pub use run::handle_run_command;

/// Adapter for the current shop
pub(crate) fn connect(config: &Config) -> Result<Adapter> {
    let shop = config.require_current_shop()?;
    let timeout = Duration::from_secs(config.settings.request_timeout_secs);
    let client = PrestashopClient::new(shop, timeout)?;

    Ok(Adapter::new(Arc::new(client)).with_default_query_limit(config.settings.default_query_limit))
}

/// Write command results to stdout; status lines go to stderr
pub(crate) fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;

    println!("{}", rendered);
    Ok(())
}
