use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::constants::OutputFormat;

/// Name of the shop entry synthesised from environment variables
pub const ENV_SHOP: &str = ".env";

pub const ENV_BASE_URL: &str = "PRESTASHOP_BASE_URL";
pub const ENV_API_KEY: &str = "PRESTASHOP_API_KEY";
pub const ENV_OUTPUT_FORMAT: &str = "PRESTASHOP_OUTPUT_FORMAT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    pub base_url: String,
    pub api_key: String,
    #[serde(default)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    pub current_shop: Option<String>,
    #[serde(default)]
    pub shops: HashMap<String, ShopConfig>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Default `limit` for `get_all` operations that do not set one (0 = unlimited)
    #[serde(default)]
    pub default_query_limit: u32,
    #[serde(default)]
    pub continue_on_fail: bool,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            default_query_limit: 0,
            continue_on_fail: false,
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("prestashop-cli")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".prestashop-cli")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using default config");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!("Loaded config with {} shops", config.shops.len());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", config_path);

        let mut persisted = self.clone();
        persisted.shops.remove(ENV_SHOP);
        if persisted.current_shop.as_deref() == Some(ENV_SHOP) {
            persisted.current_shop = None;
        }

        let config_content =
            toml::to_string_pretty(&persisted).context("Failed to serialize config to TOML")?;

        fs::write(config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    /// Layer `PRESTASHOP_*` variables (and a `.env` file) over the loaded config
    pub fn with_env_overrides(mut self) -> Self {
        dotenvy::dotenv().ok();
        self.apply_env(|name| std::env::var(name).ok());
        self
    }

    /// Apply overrides from any variable source.
    ///
    /// A base URL plus API key defines the `.env` shop and selects it; an
    /// output format alone switches the format of whichever shop is current.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let base_url = lookup(ENV_BASE_URL).filter(|value| !value.is_empty());
        let api_key = lookup(ENV_API_KEY).filter(|value| !value.is_empty());

        match (base_url, api_key) {
            (Some(base_url), Some(api_key)) => {
                debug!("Using shop credentials from environment");
                self.shops.insert(
                    ENV_SHOP.to_string(),
                    ShopConfig {
                        base_url,
                        api_key,
                        output_format: OutputFormat::default(),
                    },
                );
                self.current_shop = Some(ENV_SHOP.to_string());
            }
            (Some(_), None) | (None, Some(_)) => {
                warn!("Ignoring partial environment credentials, need both {} and {}", ENV_BASE_URL, ENV_API_KEY);
            }
            (None, None) => {}
        }

        if let Some(format) = lookup(ENV_OUTPUT_FORMAT) {
            match format.parse::<OutputFormat>() {
                Ok(format) => {
                    if let Some(shop) = self.current_shop_mut() {
                        shop.output_format = format;
                    }
                }
                Err(e) => warn!("{}", e),
            }
        }
    }

    pub fn add_shop(&mut self, name: String, shop: ShopConfig) {
        info!("Adding shop: {}", name);
        self.shops.insert(name.clone(), shop);

        if self.current_shop.is_none() {
            self.current_shop = Some(name.clone());
            info!("Set {} as current shop", name);
        }
    }

    /// Shop entry by name, created empty when missing
    pub fn shop_entry(&mut self, name: &str) -> &mut ShopConfig {
        if self.current_shop.is_none() {
            self.current_shop = Some(name.to_string());
        }
        self.shops.entry(name.to_string()).or_insert_with(|| ShopConfig {
            base_url: String::new(),
            api_key: String::new(),
            output_format: OutputFormat::default(),
        })
    }

    pub fn get_current_shop(&self) -> Option<&ShopConfig> {
        let current = self.current_shop.as_ref()?;
        self.shops.get(current)
    }

    fn current_shop_mut(&mut self) -> Option<&mut ShopConfig> {
        let current = self.current_shop.clone()?;
        self.shops.get_mut(&current)
    }

    /// Current shop, or an error telling the user how to configure one
    pub fn require_current_shop(&self) -> Result<&ShopConfig> {
        let shop = self.get_current_shop().with_context(|| {
            format!(
                "No shop configured. Run `prestashop-cli config set-url` and `config set-key`, or set {} and {}",
                ENV_BASE_URL, ENV_API_KEY
            )
        })?;
        if shop.base_url.is_empty() || shop.api_key.is_empty() {
            anyhow::bail!("Shop '{}' is missing its base URL or API key", self.current_shop.as_deref().unwrap_or_default());
        }
        Ok(shop)
    }

    pub fn set_current_shop(&mut self, name: String) -> Result<()> {
        if !self.shops.contains_key(&name) {
            anyhow::bail!("Shop '{}' not found", name);
        }

        info!("Setting current shop to: {}", name);
        self.current_shop = Some(name);
        Ok(())
    }

    pub fn remove_shop(&mut self, name: &str) -> Result<()> {
        if self.shops.remove(name).is_none() {
            anyhow::bail!("Shop '{}' not found", name);
        }

        info!("Removing shop: {}", name);
        if self.current_shop.as_deref() == Some(name) {
            warn!("Removed current shop, clearing current selection");
            self.current_shop = None;
        }
        Ok(())
    }
}
