//! Application use cases for squad scraping
//!
//! Resolves a club to its source page, runs the scraper under an optional
//! whole-run deadline and turns fatal outcomes into operation errors.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::application::squad_scraper::SquadScraper;
use crate::domain::outcome::ScrapeOutcome;
use crate::domain::repositories::ClubRepository;

/// Operation-level failures; everything else is data in `ScrapeOutcome`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("club {0} not found")]
    ClubNotFound(i64),

    #[error("club {0} has no scrape source URL configured")]
    MissingSourceUrl(i64),

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("repository error: {0}")]
    Repository(String),
}

pub struct ScrapeClubUseCase {
    clubs: Arc<dyn ClubRepository>,
    scraper: SquadScraper,
    run_timeout: Option<Duration>,
}

impl ScrapeClubUseCase {
    pub fn new(clubs: Arc<dyn ClubRepository>, scraper: SquadScraper) -> Self {
        Self {
            clubs,
            scraper,
            run_timeout: None,
        }
    }

    #[must_use]
    pub const fn with_run_timeout(mut self, run_timeout: Option<Duration>) -> Self {
        self.run_timeout = run_timeout;
        self
    }

    pub async fn execute(
        &self,
        club_id: i64,
        cancellation_token: &CancellationToken,
    ) -> Result<ScrapeOutcome, ScrapeError> {
        let club = self
            .clubs
            .get_club(club_id)
            .await
            .map_err(|e| ScrapeError::Repository(format!("{e:#}")))?
            .ok_or(ScrapeError::ClubNotFound(club_id))?;

        let url = club
            .source_url()
            .ok_or(ScrapeError::MissingSourceUrl(club_id))?
            .to_string();

        info!("🚀 Starting squad scrape for club {} ({})", club.name, club.id);

        // Child token: the deadline cancels this run only, never the caller
        let run_token = cancellation_token.child_token();
        let timer = self.run_timeout.map(|timeout| {
            let token = run_token.clone();
            tokio::spawn(async move {
                tokio::select! {
                    () = tokio::time::sleep(timeout) => {
                        warn!("⏰ Run timeout of {:?} elapsed, cancelling scrape", timeout);
                        token.cancel();
                    }
                    () = token.cancelled() => {}
                }
            })
        });

        let outcome = self.scraper.scrape_squad(&url, club_id, &run_token).await;

        if let Some(timer) = timer {
            timer.abort();
        }

        if let Some(fatal) = outcome.fatal_error() {
            return Err(ScrapeError::Fetch {
                url: fatal.identifier.clone(),
                message: fatal.reason.clone(),
            });
        }

        let summary = outcome.summary();
        info!(
            "🏁 Squad scrape finished for club {}: {} goalkeepers, {} field players, {} errors",
            club.id, summary.goalkeepers, summary.field_players, summary.errors
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::club::Club;
    use crate::infrastructure::http_client::{FetchError, PageFetcher};
    use crate::infrastructure::memory_repository::InMemoryAthleteRepository;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl PageFetcher for Unreachable {
        async fn fetch_page(&self, url: &str, _token: &CancellationToken) -> Result<String, FetchError> {
            Err(FetchError::Status {
                status: 503,
                url: url.to_string(),
            })
        }
    }

    async fn use_case(club: Option<Club>) -> ScrapeClubUseCase {
        let repo = Arc::new(InMemoryAthleteRepository::new());
        if let Some(club) = club {
            repo.insert_club(club).await;
        }
        let scraper = SquadScraper::new(Arc::new(Unreachable), repo.clone()).unwrap();
        ScrapeClubUseCase::new(repo, scraper)
    }

    #[tokio::test]
    async fn test_unknown_club() {
        let use_case = use_case(None).await;
        let result = use_case.execute(7, &CancellationToken::new()).await;
        assert_eq!(result, Err(ScrapeError::ClubNotFound(7)));
    }

    #[tokio::test]
    async fn test_blank_source_url_is_refused() {
        let use_case = use_case(Some(Club {
            id: 7,
            name: "Vasco".to_string(),
            scrape_source_url: Some("   ".to_string()),
        }))
        .await;
        let result = use_case.execute(7, &CancellationToken::new()).await;
        assert_eq!(result, Err(ScrapeError::MissingSourceUrl(7)));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_fatal() {
        let use_case = use_case(Some(Club {
            id: 7,
            name: "Vasco".to_string(),
            scrape_source_url: Some("https://example.com/squad".to_string()),
        }))
        .await;
        let result = use_case.execute(7, &CancellationToken::new()).await;
        assert!(matches!(
            result,
            Err(ScrapeError::Fetch { ref url, .. }) if url == "https://example.com/squad"
        ));
    }
}
