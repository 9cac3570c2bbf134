//! Memory-based repository
//!
//! Backs the scraper in tests and dry runs. Saves can be made to fail for
//! chosen athlete names to exercise per-record persistence errors.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::athlete::AthleteRecord;
use crate::domain::club::Club;
use crate::domain::repositories::{AthleteRepository, ClubRepository};

#[derive(Debug, Default)]
pub struct InMemoryAthleteRepository {
    athletes: RwLock<HashMap<(i64, String), AthleteRecord>>,
    clubs: RwLock<HashMap<i64, Club>>,
    failing_names: HashSet<String>,
    next_id: AtomicI64,
}

impl InMemoryAthleteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes for these athlete names
    #[must_use]
    pub fn failing_on<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub async fn insert_club(&self, club: Club) {
        self.clubs.write().await.insert(club.id, club);
    }

    /// Stored athletes of a club, ordered by jersey number then name
    pub async fn list_by_club(&self, club_id: i64) -> Vec<AthleteRecord> {
        let mut athletes: Vec<AthleteRecord> = self
            .athletes
            .read()
            .await
            .values()
            .filter(|record| record.club_id == club_id)
            .cloned()
            .collect();
        athletes.sort_by(|a, b| {
            a.jersey_number
                .cmp(&b.jersey_number)
                .then_with(|| a.name.cmp(&b.name))
        });
        athletes
    }

    pub async fn len(&self) -> usize {
        self.athletes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.athletes.read().await.is_empty()
    }

    fn check_writable(&self, name: &str) -> Result<()> {
        if self.failing_names.contains(name) {
            return Err(anyhow!("Simulated write failure for athlete '{}'", name));
        }
        Ok(())
    }
}

#[async_trait]
impl AthleteRepository for InMemoryAthleteRepository {
    async fn find_by_name_and_club(&self, name: &str, club_id: i64) -> Result<Option<AthleteRecord>> {
        Ok(self
            .athletes
            .read()
            .await
            .get(&(club_id, name.to_string()))
            .cloned())
    }

    async fn save(&self, record: &AthleteRecord) -> Result<AthleteRecord> {
        self.check_writable(&record.name)?;

        let key = (record.club_id, record.name.clone());
        let mut athletes = self.athletes.write().await;
        if let Some(stored) = athletes.get_mut(&key) {
            stored.overwrite_from(record);
            return Ok(stored.clone());
        }

        let mut saved = record.clone();
        saved.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        athletes.insert(key, saved.clone());
        Ok(saved)
    }

    async fn update(&self, existing: &AthleteRecord, fields: &AthleteRecord) -> Result<()> {
        self.check_writable(&existing.name)?;

        let mut athletes = self.athletes.write().await;
        let stored = athletes
            .get_mut(&(existing.club_id, existing.name.clone()))
            .ok_or_else(|| {
                anyhow!(
                    "Athlete '{}' of club {} no longer exists",
                    existing.name,
                    existing.club_id
                )
            })?;
        stored.overwrite_from(fields);
        Ok(())
    }
}

#[async_trait]
impl ClubRepository for InMemoryAthleteRepository {
    async fn get_club(&self, club_id: i64) -> Result<Option<Club>> {
        Ok(self.clubs.read().await.get(&club_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::athlete::PlayerRole;

    fn record(name: &str, club_id: i64) -> AthleteRecord {
        let mut record = AthleteRecord::new(name, PlayerRole::FieldPlayer);
        record.club_id = club_id;
        record
    }

    #[tokio::test]
    async fn test_save_assigns_ids_and_overwrites_duplicates() {
        let repo = InMemoryAthleteRepository::new();
        let first = repo.save(&record("A", 1)).await.unwrap();
        let second = repo.save(&record("B", 1)).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));

        let mut again = record("A", 1);
        again.games = 4;
        let resaved = repo.save(&again).await.unwrap();
        assert_eq!(resaved.id, Some(1));
        assert_eq!(resaved.games, 4);

        // Same name, different club is a different athlete
        assert!(repo.save(&record("A", 2)).await.is_ok());
        assert_eq!(repo.len().await, 3);
    }

    #[tokio::test]
    async fn test_update_keeps_identity() {
        let repo = InMemoryAthleteRepository::new();
        let existing = repo.save(&record("A", 1)).await.unwrap();
        let mut fields = record("A", 1);
        fields.games = 9;
        repo.update(&existing, &fields).await.unwrap();

        let stored = repo.find_by_name_and_club("A", 1).await.unwrap().unwrap();
        assert_eq!(stored.id, existing.id);
        assert_eq!(stored.games, 9);
    }

    #[tokio::test]
    async fn test_failing_names() {
        let repo = InMemoryAthleteRepository::new().failing_on(["Broken"]);
        assert!(repo.save(&record("Broken", 1)).await.is_err());
        assert!(repo.save(&record("Fine", 1)).await.is_ok());
        assert_eq!(repo.list_by_club(1).await.len(), 1);
    }
}
