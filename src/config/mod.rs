//! # Configuration Management Module
//!
//! Type-safe TOML configuration with serde defaults for every optional
//! section.
//!
//! ## Configuration Structure
//!
//! - [`ServerConfig`] - where the server keeps its world folders
//! - [`StorageConfig`] - where the world registry lives
//! - [`GeneratorsConfig`] - installed chunk generator plugins
//! - [`PermissionsConfig`] - console level and per-node overrides
//! - [`MessagesConfig`] - message overrides and colour output
//! - [`LoggingConfig`] - logging level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use worldhub::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("World container: {}", config.server.world_container);
//!
//!     Config::create_default("config.example.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [server]
//! world_container = "./worlds"
//!
//! [storage]
//! data_dir = "./data"
//!
//! [generators]
//! available = ["CleanroomGenerator"]
//!
//! [permissions]
//! console_level = 4
//!
//! [permissions.overrides]
//! "worldhub.core.import" = 4
//!
//! [logging]
//! level = "info"
//! file = "worldhub.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::fs;

use crate::command::perms::LEVEL_OWNER;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub generators: GeneratorsConfig,
    #[serde(default)]
    pub permissions: PermissionsConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Folder the server loads worlds from; each world is a direct child.
    pub world_container: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            world_container: "./worlds".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Holds `worlds.json`.
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorsConfig {
    /// Installed generator plugin names. Matching is case sensitive.
    #[serde(default)]
    pub available: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// Permission level of commands run from the console.
    #[serde(default = "default_console_level")]
    pub console_level: u8,
    /// Permission node -> required level.
    #[serde(default)]
    pub overrides: HashMap<String, u8>,
}

fn default_console_level() -> u8 {
    LEVEL_OWNER
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            console_level: default_console_level(),
            overrides: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Optional TOML file of message template overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Colour console output when stdout is a terminal.
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            file: None,
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("worldhub.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// Parse `level`, falling back to `Info` for unknown values.
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.level.parse::<log::LevelFilter>() {
            Ok(level) => level,
            Err(_) => {
                eprintln!("Invalid logging level '{}', defaulting to info", self.level);
                log::LevelFilter::Info
            }
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
