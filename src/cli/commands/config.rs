use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;

use crate::api::OutputFormat;
use crate::config::Config;

/// Shop entry used when `--shop` is omitted and none is selected yet
const DEFAULT_SHOP: &str = "default";

#[derive(Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Show configured shops and settings
    Show,
    /// Set the base URL of a shop
    SetUrl {
        /// Shop URL, e.g. https://shop.example.com
        url: String,
        /// Shop name (defaults to the current shop)
        #[arg(long)]
        shop: Option<String>,
    },
    /// Set the webservice key of a shop
    SetKey {
        /// Webservice API key
        key: String,
        /// Shop name (defaults to the current shop)
        #[arg(long)]
        shop: Option<String>,
    },
    /// Set the response format of a shop
    SetFormat {
        #[arg(value_enum)]
        format: OutputFormat,
        /// Shop name (defaults to the current shop)
        #[arg(long)]
        shop: Option<String>,
    },
    /// Select the current shop
    Select {
        /// Shop name
        name: String,
    },
    /// Remove a shop
    Remove {
        /// Shop name
        name: String,
    },
}

pub async fn handle_config_command(args: ConfigCommands, mut config: Config) -> Result<()> {
    match args.command {
        ConfigSubcommands::Show => {
            show_config(&config);
            return Ok(());
        }
        ConfigSubcommands::SetUrl { url, shop } => {
            let name = target_shop(&config, shop);
            config.shop_entry(&name).base_url = url.trim_end_matches('/').to_string();
            println!("✓ Base URL of '{}' updated", name.cyan());
        }
        ConfigSubcommands::SetKey { key, shop } => {
            let name = target_shop(&config, shop);
            config.shop_entry(&name).api_key = key;
            println!("✓ API key of '{}' updated", name.cyan());
        }
        ConfigSubcommands::SetFormat { format, shop } => {
            let name = target_shop(&config, shop);
            config.shop_entry(&name).output_format = format;
            println!("✓ Output format of '{}' set to {}", name.cyan(), format.as_str());
        }
        ConfigSubcommands::Select { name } => {
            config.set_current_shop(name.clone())?;
            println!("✓ Current shop is now '{}'", name.cyan());
        }
        ConfigSubcommands::Remove { name } => {
            config.remove_shop(&name)?;
            println!("✓ Removed shop '{}'", name.cyan());
        }
    }

    config.save()
}

fn target_shop(config: &Config, shop: Option<String>) -> String {
    shop.or_else(|| config.current_shop.clone())
        .unwrap_or_else(|| DEFAULT_SHOP.to_string())
}

fn show_config(config: &Config) {
    println!("{}", "Shops".bold());
    if config.shops.is_empty() {
        println!("  {}", "none configured".dimmed());
    }

    let mut names: Vec<&String> = config.shops.keys().collect();
    names.sort();
    for name in names {
        let shop = &config.shops[name];
        let marker = if config.current_shop.as_ref() == Some(name) { "*" } else { " " };
        println!(
            "{} {} {} [{}] key {}",
            marker.green(),
            name.cyan(),
            shop.base_url,
            shop.output_format.as_str(),
            mask_key(&shop.api_key).dimmed()
        );
    }

    println!();
    println!("{}", "Settings".bold());
    println!("  request_timeout_secs = {}", config.settings.request_timeout_secs);
    println!("  default_query_limit  = {}", config.settings.default_query_limit);
    println!("  continue_on_fail     = {}", config.settings.continue_on_fail);
}

/// Last four characters of a key, the rest starred
fn mask_key(key: &str) -> String {
    let visible = key.chars().count().saturating_sub(4);
    key.chars()
        .enumerate()
        .map(|(index, c)| if index < visible { '*' } else { c })
        .collect()
}
