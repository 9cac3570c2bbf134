//! Configuration infrastructure
//!
//! Layered: built-in defaults, then an optional config file, then
//! `SQUAD_SCRAPER_*` environment variables (`__` separates nesting, e.g.
//! `SQUAD_SCRAPER_SCRAPER__REQUEST_TIMEOUT_SECONDS=10`).

use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::domain::constants::http::{
    DEFAULT_ACCEPT_LANGUAGE, DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
};

pub const ENV_PREFIX: &str = "SQUAD_SCRAPER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Squad page fetching and table discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub request_timeout_seconds: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// CSS selector for candidate roster tables
    pub table_selector: String,
    /// Whole-run deadline; the run is cancelled when it elapses
    pub run_timeout_seconds: Option<u64>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            table_selector: "table".to_string(),
            run_timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:squad_scraper.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON structured logging
    pub json_format: bool,
    /// Enable console output (stderr)
    pub console_output: bool,
    /// Enable daily rolling file output
    pub file_output: bool,
    pub log_dir: PathBuf,
    pub file_prefix: String,
    /// Per-module level overrides, e.g. `squad_scraper::infrastructure = "debug"`
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: PathBuf::from("logs"),
            file_prefix: "squad_scraper".to_string(),
            module_filters: HashMap::new(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Load configuration, optionally from a file (format by extension)
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;

        if let Some(path) = path {
            info!("Loaded configuration from: {}", path);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scraper = &self.scraper;
        if scraper.request_timeout_seconds == 0 {
            return Err(validation("scraper.request_timeout_seconds must be greater than 0"));
        }
        if scraper.run_timeout_seconds == Some(0) {
            return Err(validation("scraper.run_timeout_seconds must be greater than 0"));
        }
        if scraper.user_agent.trim().is_empty() {
            return Err(validation("scraper.user_agent must not be empty"));
        }
        if let Err(e) = Selector::parse(&scraper.table_selector) {
            return Err(validation(&format!(
                "scraper.table_selector '{}' is not a valid CSS selector: {e}",
                scraper.table_selector
            )));
        }

        if self.database.url.trim().is_empty() {
            return Err(validation("database.url must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(validation("database.max_connections must be greater than 0"));
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(validation(&format!(
                "logging.level '{}' must be one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

fn validation(message: &str) -> ConfigError {
    ConfigError::Validation {
        message: message.to_string(),
    }
}
