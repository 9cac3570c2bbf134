//! Infrastructure layer for database connections, parsing, and external integrations
//!
//! This module provides the SQLite and in-memory repositories, the squad page
//! HTTP client, roster table parsing, CSV export, configuration and logging.

pub mod athlete_repository;
pub mod config;
pub mod database_connection;
pub mod export;
pub mod http_client;
pub mod logging;
pub mod memory_repository;
pub mod parsing;
pub mod parsing_error;

// Re-export commonly used items
pub use athlete_repository::SqliteAthleteRepository;
pub use config::{AppConfig, ConfigError, DatabaseConfig, LoggingConfig, ScraperConfig};
pub use database_connection::DatabaseConnection;
pub use http_client::{FetchError, HttpClient, HttpClientConfig, PageFetcher};
pub use logging::{init_logging, init_logging_with_config};
pub use memory_repository::InMemoryAthleteRepository;
pub use parsing::{RosterTable, RosterTableReader};
pub use parsing_error::{ExtractionError, ExtractionResult};
