//! Application configuration.
//!
//! Settings live in `config.json` in the data directory. Each section is
//! optional; a missing file or section falls back to defaults, so the tool
//! works without running `mest init` first.
//!
//! ```json
//! {
//!   "shift": { "default_shift": "B", "operator": "kim" },
//!   "server": { "api_url": "http://mes.local:3000" }
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mest::libs::config::Config;
//!
//! let config = Config::read()?;
//! let shift = config.default_shift();
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::shift::Shift;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Entry of the module picker in the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ShiftConfig {
    #[serde(default)]
    pub default_shift: Shift,
    /// Name recorded with status changes sent to the server.
    #[serde(default)]
    pub operator: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ServerConfig {
    pub api_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<ShiftConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl ShiftConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "shift".to_string(),
            name: "Shift".to_string(),
        }
    }

    pub fn init(config: &Option<ShiftConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleShift);

        let shifts: Vec<&str> = Shift::ALL.iter().map(|s| s.as_str()).collect();
        let current = Shift::ALL.iter().position(|s| *s == config.default_shift).unwrap_or(0);
        let selected = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDefaultShift.to_string())
            .items(&shifts)
            .default(current)
            .interact()?;

        Ok(Self {
            default_shift: Shift::ALL[selected],
            operator: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptOperator.to_string())
                .default(config.operator)
                .allow_empty(true)
                .interact_text()?,
        })
    }
}

impl ServerConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "server".to_string(),
            name: "MES server".to_string(),
        }
    }

    pub fn init(config: &Option<ServerConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleServer);

        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptServerApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
        })
    }
}

impl Config {
    /// Loads the configuration, or defaults when no file exists yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive wizard; current values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [ShiftConfig::module(), ServerConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "shift" => config.shift = Some(ShiftConfig::init(&config.shift)?),
                "server" => config.server = Some(ServerConfig::init(&config.server)?),
                _ => {}
            }
        }

        Ok(config)
    }

    pub fn default_shift(&self) -> Shift {
        self.shift.as_ref().map(|s| s.default_shift).unwrap_or_default()
    }

    pub fn operator(&self) -> &str {
        self.shift.as_ref().map(|s| s.operator.as_str()).unwrap_or("")
    }

    pub fn api_url(&self) -> Option<&str> {
        self.server.as_ref().map(|s| s.api_url.trim()).filter(|url| !url.is_empty())
    }
}
