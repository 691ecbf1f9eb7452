use anyhow::Result;
use clap::Parser;
use log::info;

use prestashop_cli::cli::commands::{
    handle_config_command, handle_options_command, handle_poll_command, handle_query_command,
    handle_run_command,
};
use prestashop_cli::cli::{Cli, Commands};
use prestashop_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    info!("Starting prestashop-cli");

    let config = Config::load()?;

    match cli.command {
        // Edits the persisted file, so environment shops stay out of it
        Commands::Config(args) => handle_config_command(args, config).await,
        Commands::Run(args) => handle_run_command(args, &config.with_env_overrides()).await,
        Commands::Poll(args) => handle_poll_command(args, &config.with_env_overrides()).await,
        Commands::Options(args) => handle_options_command(args, &config.with_env_overrides()).await,
        Commands::Query(args) => handle_query_command(args, &config.with_env_overrides()).await,
    }
}
