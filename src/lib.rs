//! Squad Scraper - football roster table ingestion
//!
//! Fetches a club's squad page, classifies each roster table as goalkeepers
//! or field players, normalizes every row into an `AthleteRecord` and
//! reconciles the result with previously stored athletes.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ScrapeClubUseCase, ScrapeError, SquadScraper};
pub use domain::{AthleteRecord, ErrorDescriptor, PlayerRole, ScrapeOutcome};
