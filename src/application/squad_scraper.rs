//! Squad scrape orchestration
//!
//! FETCH -> PARSE -> per table (CLASSIFY -> per row EXTRACT) -> RECONCILE/COMMIT.
//! Only the fetch can fail the run; everything after it is reported as
//! descriptors in the returned `ScrapeOutcome`.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use crate::application::events::{CommitStats, ScrapeObserver, ScrapeStage, TracingObserver};
use crate::domain::athlete::{AthleteRecord, PlayerRole};
use crate::domain::outcome::{ErrorDescriptor, ErrorKind, ScrapeOutcome};
use crate::domain::repositories::AthleteRepository;
use crate::infrastructure::http_client::{FetchError, PageFetcher};
use crate::infrastructure::parsing::{
    RosterTableReader, RowContext, classify, extract, is_blank_row,
};

/// How a record reached the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reconciled {
    Inserted,
    Updated,
}

/// Extracted records in page order, one per athlete name
#[derive(Default)]
struct Batch {
    records: Vec<AthleteRecord>,
    by_name: HashMap<String, usize>,
}

impl Batch {
    /// Later rows for the same athlete replace earlier ones. Returns whether
    /// an earlier row was replaced.
    fn push(&mut self, record: AthleteRecord) -> bool {
        if let Some(&index) = self.by_name.get(&record.name) {
            self.records[index] = record;
            true
        } else {
            self.by_name.insert(record.name.clone(), self.records.len());
            self.records.push(record);
            false
        }
    }
}

fn cancelled_descriptor(stage: ScrapeStage) -> ErrorDescriptor {
    ErrorDescriptor::new(
        stage.as_str(),
        ErrorKind::Cancelled,
        format!("scrape cancelled during {stage}"),
    )
}

fn split_by_role(records: Vec<AthleteRecord>, outcome: &mut ScrapeOutcome) {
    for record in records {
        match record.role() {
            PlayerRole::Goalkeeper => outcome.goalkeepers.push(record),
            PlayerRole::FieldPlayer => outcome.field_players.push(record),
        }
    }
}

pub struct SquadScraper {
    fetcher: Arc<dyn PageFetcher>,
    repository: Arc<dyn AthleteRepository>,
    observer: Arc<dyn ScrapeObserver>,
    table_reader: RosterTableReader,
}

impl SquadScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, repository: Arc<dyn AthleteRepository>) -> Result<Self> {
        Ok(Self {
            fetcher,
            repository,
            observer: Arc::new(TracingObserver),
            table_reader: RosterTableReader::new()?,
        })
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ScrapeObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn with_table_reader(mut self, table_reader: RosterTableReader) -> Self {
        self.table_reader = table_reader;
        self
    }

    /// Scrape one club's squad page and persist the result.
    ///
    /// Never fails: a fetch failure yields an empty outcome with a single
    /// `Fetch` descriptor, and cancellation yields the partial outcome plus a
    /// `Cancelled` descriptor.
    pub async fn scrape_squad(
        &self,
        url: &str,
        club_id: i64,
        cancellation_token: &CancellationToken,
    ) -> ScrapeOutcome {
        let run_id = Uuid::new_v4();
        let span = info_span!("squad_scrape", run_id = %run_id, club_id);
        self.run(url, club_id, cancellation_token)
            .instrument(span)
            .await
    }

    async fn run(&self, url: &str, club_id: i64, cancellation_token: &CancellationToken) -> ScrapeOutcome {
        self.observer.fetch_started(url, club_id);
        let body = match self.fetcher.fetch_page(url, cancellation_token).await {
            Ok(body) => body,
            Err(FetchError::Cancelled) => {
                self.observer.cancelled(ScrapeStage::Fetch);
                return ScrapeOutcome {
                    errors: vec![cancelled_descriptor(ScrapeStage::Fetch)],
                    ..ScrapeOutcome::default()
                };
            }
            Err(error) => {
                self.observer.fetch_failed(url, &error);
                return ScrapeOutcome::fetch_failed(url, error.to_string());
            }
        };

        let mut outcome = ScrapeOutcome::default();
        let batch = self.extract_page(&body, club_id, cancellation_token, &mut outcome);

        if cancellation_token.is_cancelled() {
            self.observer.cancelled(ScrapeStage::Extract);
            split_by_role(batch.records, &mut outcome);
            outcome.errors.push(cancelled_descriptor(ScrapeStage::Extract));
            return outcome;
        }

        self.commit(batch.records, cancellation_token, &mut outcome).await;
        outcome
    }

    /// Classify every table and extract every row, checking for cancellation
    /// between tables and rows. Row failures land in `outcome.errors`.
    fn extract_page(
        &self,
        body: &str,
        club_id: i64,
        cancellation_token: &CancellationToken,
        outcome: &mut ScrapeOutcome,
    ) -> Batch {
        let tables = self.table_reader.read_document(body);
        self.observer.tables_found(tables.len());

        let mut batch = Batch::default();
        for (table_offset, table) in tables.iter().enumerate() {
            if cancellation_token.is_cancelled() {
                break;
            }
            let table_index = table_offset + 1;

            let Some(role) = classify(&table.header, table.first_row()) else {
                let columns = if table.header.is_empty() {
                    table.first_row().map_or(0, <[String]>::len)
                } else {
                    table.header.len()
                };
                self.observer.table_skipped(table_index, columns);
                continue;
            };
            self.observer.table_classified(table_index, role, table.rows.len());

            for (row_offset, cells) in table.rows.iter().enumerate() {
                if cancellation_token.is_cancelled() {
                    break;
                }
                let context = RowContext::new(table_index, row_offset + 1, cells);

                if is_blank_row(cells) {
                    debug!(table_index, row_index = context.row_index, "Skipping blank row");
                    continue;
                }

                match extract(cells, role) {
                    Ok(mut record) => {
                        record.club_id = club_id;
                        let name = record.name.clone();
                        if batch.push(record) {
                            self.observer
                                .row_superseded(&name, table_index, context.row_index);
                        }
                    }
                    Err(error) => {
                        let descriptor =
                            ErrorDescriptor::new(context.identifier(), error.kind(), error.to_string());
                        self.observer.row_failed(&descriptor);
                        outcome.errors.push(descriptor);
                    }
                }
            }
        }
        batch
    }

    /// Reconcile and persist each record; per-record failures become
    /// `Persistence` descriptors keyed by athlete name.
    async fn commit(
        &self,
        records: Vec<AthleteRecord>,
        cancellation_token: &CancellationToken,
        outcome: &mut ScrapeOutcome,
    ) {
        let mut stats = CommitStats::default();
        let mut committed = Vec::with_capacity(records.len());
        let mut cancelled = false;

        for record in records {
            if cancellation_token.is_cancelled() {
                cancelled = true;
                break;
            }

            match self.reconcile(&record).await {
                Ok((stored, Reconciled::Inserted)) => {
                    stats.inserted += 1;
                    committed.push(stored);
                }
                Ok((stored, Reconciled::Updated)) => {
                    stats.updated += 1;
                    committed.push(stored);
                }
                Err(error) => {
                    stats.failed += 1;
                    outcome.errors.push(ErrorDescriptor::new(
                        record.name.clone(),
                        ErrorKind::Persistence,
                        format!("{error:#}"),
                    ));
                }
            }
        }

        outcome.persisted = true;
        split_by_role(committed, outcome);
        self.observer.commit_finished(stats);

        if cancelled {
            self.observer.cancelled(ScrapeStage::Commit);
            outcome.errors.push(cancelled_descriptor(ScrapeStage::Commit));
        }
    }

    /// Update the stored record for `(name, club)` in place, or insert it
    async fn reconcile(&self, record: &AthleteRecord) -> Result<(AthleteRecord, Reconciled)> {
        match self
            .repository
            .find_by_name_and_club(&record.name, record.club_id)
            .await?
        {
            Some(mut existing) => {
                self.repository.update(&existing, record).await?;
                existing.overwrite_from(record);
                Ok((existing, Reconciled::Updated))
            }
            None => {
                let saved = self.repository.save(record).await?;
                Ok((saved, Reconciled::Inserted))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_repository::InMemoryAthleteRepository;
    use async_trait::async_trait;

    struct StaticPage(&'static str);

    #[async_trait]
    impl PageFetcher for StaticPage {
        async fn fetch_page(&self, _url: &str, _token: &CancellationToken) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    const PAGE: &str = r"
        <table>
          <thead><tr><th>NOME</th><th>POS</th><th>IDADE</th><th>ALT</th><th>P</th><th>NAC</th>
          <th>J</th><th>SUB</th><th>D</th><th>GS</th></tr></thead>
          <tbody>
            <tr><td>1 Hugo Souza</td><td>G</td><td>25</td><td>1.96 m</td><td>90 kg</td>
            <td>Brasil</td><td>10</td><td>0</td><td>30</td><td>8</td></tr>
            <tr><td>1 Hugo Souza</td><td>G</td><td>25</td><td>1.96 m</td><td>90 kg</td>
            <td>Brasil</td><td>12</td><td>0</td><td>33</td><td>9</td></tr>
          </tbody>
        </table>
    ";

    #[tokio::test]
    async fn test_duplicate_rows_collapse_to_last() {
        let repo = Arc::new(InMemoryAthleteRepository::new());
        let scraper = SquadScraper::new(Arc::new(StaticPage(PAGE)), repo.clone()).unwrap();

        let outcome = scraper
            .scrape_squad("https://example.com", 1, &CancellationToken::new())
            .await;

        assert_eq!(outcome.goalkeepers.len(), 1);
        assert_eq!(outcome.goalkeepers[0].games, 12);
        assert_eq!(outcome.goalkeepers[0].saves(), 33);
        assert!(outcome.errors.is_empty());
        assert_eq!(repo.len().await, 1);
    }

    #[derive(Default)]
    struct SupersededRows(std::sync::Mutex<Vec<(String, usize, usize)>>);

    impl ScrapeObserver for SupersededRows {
        fn row_superseded(&self, name: &str, table_index: usize, row_index: usize) {
            self.0
                .lock()
                .unwrap()
                .push((name.to_string(), table_index, row_index));
        }
    }

    #[tokio::test]
    async fn test_duplicate_row_is_reported_to_observer() {
        let repo = Arc::new(InMemoryAthleteRepository::new());
        let observer = Arc::new(SupersededRows::default());
        let scraper = SquadScraper::new(Arc::new(StaticPage(PAGE)), repo)
            .unwrap()
            .with_observer(observer.clone());

        let outcome = scraper
            .scrape_squad("https://example.com", 1, &CancellationToken::new())
            .await;

        assert!(outcome.errors.is_empty());
        assert_eq!(
            *observer.0.lock().unwrap(),
            vec![("Hugo Souza".to_string(), 1, 2)]
        );
    }

    #[tokio::test]
    async fn test_cancelled_before_fetch_returns_descriptor() {
        let repo = Arc::new(InMemoryAthleteRepository::new());
        let scraper = SquadScraper::new(Arc::new(StaticPage(PAGE)), repo.clone()).unwrap();
        let token = CancellationToken::new();
        token.cancel();

        // The stub ignores the token, so cancellation is seen during extraction
        let outcome = scraper.scrape_squad("https://example.com", 1, &token).await;
        assert!(outcome.is_cancelled());
        assert!(!outcome.persisted);
        assert!(repo.is_empty().await);
    }
}
