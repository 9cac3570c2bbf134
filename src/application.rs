//! Application layer module
//!
//! This module contains the squad scrape orchestrator, its observer hooks
//! and the club-level use case that drives them.

pub mod events;
pub mod squad_scraper;
pub mod use_cases;

pub use events::{CommitStats, ScrapeObserver, ScrapeStage, TracingObserver};
pub use squad_scraper::SquadScraper;
pub use use_cases::{ScrapeClubUseCase, ScrapeError};
