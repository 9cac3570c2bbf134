//! Scrape results and the non-fatal error descriptors accumulated on the way

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::athlete::AthleteRecord;

/// Failure category of a single descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Fetch,
    InsufficientColumns,
    EmptyName,
    EmptyPosition,
    UnrecognizedPosition,
    NumericCoercion,
    Persistence,
    Cancelled,
}

/// One non-fatal failure: who it concerns and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub identifier: String,
    pub kind: ErrorKind,
    pub reason: String,
}

impl ErrorDescriptor {
    pub fn new(identifier: impl Into<String>, kind: ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.identifier, self.reason)
    }
}

/// Result of one squad scrape invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub goalkeepers: Vec<AthleteRecord>,
    #[serde(rename = "fieldPlayers")]
    pub field_players: Vec<AthleteRecord>,
    pub errors: Vec<ErrorDescriptor>,
    /// Whether the records above went through the repository
    pub persisted: bool,
}

impl ScrapeOutcome {
    /// Empty outcome carrying the single top-level fetch failure
    pub fn fetch_failed(url: &str, reason: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorDescriptor::new(url, ErrorKind::Fetch, reason)],
            ..Self::default()
        }
    }

    /// The fetch failure that aborted this run, if any
    pub fn fatal_error(&self) -> Option<&ErrorDescriptor> {
        self.errors.iter().find(|e| e.kind == ErrorKind::Fetch)
    }

    pub fn is_cancelled(&self) -> bool {
        self.errors.iter().any(|e| e.kind == ErrorKind::Cancelled)
    }

    pub fn total_records(&self) -> usize {
        self.goalkeepers.len() + self.field_players.len()
    }

    pub fn records(&self) -> impl Iterator<Item = &AthleteRecord> {
        self.goalkeepers.iter().chain(self.field_players.iter())
    }

    pub fn summary(&self) -> OutcomeSummary {
        let distinct_positions: BTreeSet<&str> =
            self.records().map(|r| r.position.as_str()).collect();
        let distinct_nationalities: BTreeSet<&str> = self
            .records()
            .map(|r| r.nationality.as_str())
            .filter(|n| !n.is_empty())
            .collect();

        OutcomeSummary {
            goalkeepers: self.goalkeepers.len(),
            field_players: self.field_players.len(),
            errors: self.errors.len(),
            distinct_positions: distinct_positions.into_iter().map(str::to_string).collect(),
            distinct_nationalities: distinct_nationalities
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Counts reported at the service boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub goalkeepers: usize,
    #[serde(rename = "fieldPlayers")]
    pub field_players: usize,
    pub errors: usize,
    #[serde(rename = "distinctPositions")]
    pub distinct_positions: Vec<String>,
    #[serde(rename = "distinctNationalities")]
    pub distinct_nationalities: Vec<String>,
}
