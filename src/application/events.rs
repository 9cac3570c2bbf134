//! Observability hooks for squad scrapes
//!
//! The orchestrator reports to a `ScrapeObserver` at fixed points instead of
//! logging directly, so callers can collect progress however they like.

use std::fmt;
use tracing::{debug, info, warn};

use crate::domain::athlete::PlayerRole;
use crate::domain::outcome::ErrorDescriptor;
use crate::infrastructure::http_client::FetchError;

/// Pipeline stage a scrape was in when something happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStage {
    Fetch,
    Extract,
    Commit,
}

impl ScrapeStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Extract => "extract",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for ScrapeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commit phase counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitStats {
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Receives scrape progress. Every hook defaults to a no-op.
pub trait ScrapeObserver: Send + Sync {
    fn fetch_started(&self, _url: &str, _club_id: i64) {}

    fn fetch_failed(&self, _url: &str, _error: &FetchError) {}

    fn tables_found(&self, _count: usize) {}

    fn table_classified(&self, _table_index: usize, _role: PlayerRole, _rows: usize) {}

    fn table_skipped(&self, _table_index: usize, _columns: usize) {}

    fn row_failed(&self, _descriptor: &ErrorDescriptor) {}

    /// A later row for `name` replaced an earlier one in the same page
    fn row_superseded(&self, _name: &str, _table_index: usize, _row_index: usize) {}

    fn commit_finished(&self, _stats: CommitStats) {}

    fn cancelled(&self, _stage: ScrapeStage) {}
}

/// Default observer: structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScrapeObserver for TracingObserver {
    fn fetch_started(&self, url: &str, club_id: i64) {
        info!(url, club_id, "🌐 Fetching squad page");
    }

    fn fetch_failed(&self, url: &str, error: &FetchError) {
        warn!(url, error = %error, "❌ Squad page fetch failed");
    }

    fn tables_found(&self, count: usize) {
        debug!(count, "Roster tables found");
    }

    fn table_classified(&self, table_index: usize, role: PlayerRole, rows: usize) {
        info!(table_index, role = %role, rows, "📋 Table classified");
    }

    fn table_skipped(&self, table_index: usize, columns: usize) {
        debug!(table_index, columns, "Table skipped: no role signal");
    }

    fn row_failed(&self, descriptor: &ErrorDescriptor) {
        warn!(
            identifier = %descriptor.identifier,
            kind = ?descriptor.kind,
            reason = %descriptor.reason,
            "⚠️ Row rejected"
        );
    }

    fn row_superseded(&self, name: &str, table_index: usize, row_index: usize) {
        warn!(name, table_index, row_index, "🔁 Duplicate roster row replaced an earlier one");
    }

    fn commit_finished(&self, stats: CommitStats) {
        info!(
            inserted = stats.inserted,
            updated = stats.updated,
            failed = stats.failed,
            "✅ Commit finished"
        );
    }

    fn cancelled(&self, stage: ScrapeStage) {
        warn!(stage = %stage, "🛑 Scrape cancelled");
    }
}
