use super::commands::config::ConfigCommands;
use super::commands::options::OptionsCommands;
use super::commands::poll::PollCommands;
use super::commands::query::QueryCommands;
use super::commands::run::RunCommands;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "prestashop-cli")]
#[command(about = "A CLI tool for running operations against the PrestaShop webservice")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a batch of resource operations
    Run(RunCommands),
    /// Poll for newly created records
    Poll(PollCommands),
    /// List selectable options (languages, shops, attributes, ...)
    Options(OptionsCommands),
    /// Preview the compiled query string of a collection read
    Query(QueryCommands),
    /// Shop connection and settings management
    Config(ConfigCommands),
}
