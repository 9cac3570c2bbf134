//! Repository interfaces for squad persistence
//!
//! The scraper only needs identity lookup and upsert. Implementations must
//! keep concurrent scrapes of the same club from failing on each other:
//! `save` on an identity stored since the lookup overwrites it.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::athlete::AthleteRecord;
use crate::domain::club::Club;

#[async_trait]
pub trait AthleteRepository: Send + Sync {
    /// Current record for `(name, club_id)`, if any
    async fn find_by_name_and_club(&self, name: &str, club_id: i64) -> Result<Option<AthleteRecord>>;

    /// Insert a record and return it with its id. An existing
    /// `(name, club_id)` is overwritten and keeps its id.
    async fn save(&self, record: &AthleteRecord) -> Result<AthleteRecord>;

    /// Overwrite the mutable fields of `existing` with `fields`
    async fn update(&self, existing: &AthleteRecord, fields: &AthleteRecord) -> Result<()>;
}

#[async_trait]
pub trait ClubRepository: Send + Sync {
    async fn get_club(&self, club_id: i64) -> Result<Option<Club>>;
}
