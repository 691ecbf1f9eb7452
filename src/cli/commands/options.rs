use anyhow::Result;
use clap::Args;
use colored::*;

use super::{connect, print_json};
use crate::api::Lookup;
use crate::api::lookups::attribute_options;
use crate::config::Config;

#[derive(Args)]
pub struct OptionsCommands {
    /// Option list to load
    #[arg(value_enum)]
    pub lookup: Lookup,
    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

pub async fn handle_options_command(args: OptionsCommands, config: &Config) -> Result<()> {
    // Attribute lists are static, no shop needed
    let options = match args.lookup.attribute_kind() {
        Some(kind) => attribute_options(kind),
        None => {
            let adapter = connect(config)?;
            adapter.lookups().load(args.lookup).await?
        }
    };

    print_json(&options, args.pretty)?;
    eprintln!("{} options", options.len().to_string().cyan());
    Ok(())
}
