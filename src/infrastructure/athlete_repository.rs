//! SQLite repository for clubs and their athletes
//!
//! Athlete identity is `(name, club_id)`, enforced by a UNIQUE constraint.
//! Role-specific stats share one row; the inactive group is stored as zero.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::domain::athlete::{AthleteRecord, RoleStats};
use crate::domain::club::Club;
use crate::domain::repositories::{AthleteRepository, ClubRepository};

const ATHLETE_COLUMNS: &str = "id, club_id, name, role, jersey_number, position, age, height_m, \
    weight_kg, nationality, games, substitutions, saves, goals_conceded, goals, total_shots, \
    shots_on_goal, assists, fouls_committed, fouls_suffered, yellow_cards, red_cards";

#[derive(Clone)]
pub struct SqliteAthleteRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAthleteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Register a club and return its id
    pub async fn create_club(&self, name: &str, scrape_source_url: Option<&str>) -> Result<i64> {
        let result = sqlx::query("INSERT INTO clubs (name, scrape_source_url) VALUES (?, ?)")
            .bind(name)
            .bind(scrape_source_url)
            .execute(&*self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Every athlete of a club, ordered by jersey number then name
    pub async fn list_by_club(&self, club_id: i64) -> Result<Vec<AthleteRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes WHERE club_id = ? ORDER BY jersey_number, name"
        ))
        .bind(club_id)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(athlete_from_row).collect()
    }
}

fn athlete_from_row(row: &SqliteRow) -> Result<AthleteRecord> {
    let role: String = row.try_get("role")?;
    let stats = match role.as_str() {
        "goalkeeper" => RoleStats::Goalkeeper {
            saves: row.try_get("saves")?,
            goals_conceded: row.try_get("goals_conceded")?,
        },
        "field_player" => RoleStats::FieldPlayer {
            goals: row.try_get("goals")?,
            total_shots: row.try_get("total_shots")?,
            shots_on_goal: row.try_get("shots_on_goal")?,
        },
        other => return Err(anyhow!("Unknown athlete role in database: {}", other)),
    };

    Ok(AthleteRecord {
        id: Some(row.try_get("id")?),
        club_id: row.try_get("club_id")?,
        name: row.try_get("name")?,
        jersey_number: row.try_get("jersey_number")?,
        position: row.try_get("position")?,
        age: row.try_get("age")?,
        height_m: row.try_get("height_m")?,
        weight_kg: row.try_get("weight_kg")?,
        nationality: row.try_get("nationality")?,
        games: row.try_get("games")?,
        substitutions: row.try_get("substitutions")?,
        assists: row.try_get("assists")?,
        fouls_committed: row.try_get("fouls_committed")?,
        fouls_suffered: row.try_get("fouls_suffered")?,
        yellow_cards: row.try_get("yellow_cards")?,
        red_cards: row.try_get("red_cards")?,
        stats,
    })
}

#[async_trait]
impl AthleteRepository for SqliteAthleteRepository {
    async fn find_by_name_and_club(&self, name: &str, club_id: i64) -> Result<Option<AthleteRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes WHERE name = ? AND club_id = ?"
        ))
        .bind(name)
        .bind(club_id)
        .fetch_optional(&*self.pool)
        .await?;

        row.as_ref().map(athlete_from_row).transpose()
    }

    /// Insert, or overwrite the row a concurrent scrape of the same club
    /// stored after our lookup. The stored id is kept on conflict.
    async fn save(&self, record: &AthleteRecord) -> Result<AthleteRecord> {
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO athletes
            (club_id, name, role, jersey_number, position, age, height_m, weight_kg, nationality,
             games, substitutions, saves, goals_conceded, goals, total_shots, shots_on_goal,
             assists, fouls_committed, fouls_suffered, yellow_cards, red_cards)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (name, club_id) DO UPDATE SET
                role = excluded.role,
                jersey_number = excluded.jersey_number,
                position = excluded.position,
                age = excluded.age,
                height_m = excluded.height_m,
                weight_kg = excluded.weight_kg,
                nationality = excluded.nationality,
                games = excluded.games,
                substitutions = excluded.substitutions,
                saves = excluded.saves,
                goals_conceded = excluded.goals_conceded,
                goals = excluded.goals,
                total_shots = excluded.total_shots,
                shots_on_goal = excluded.shots_on_goal,
                assists = excluded.assists,
                fouls_committed = excluded.fouls_committed,
                fouls_suffered = excluded.fouls_suffered,
                yellow_cards = excluded.yellow_cards,
                red_cards = excluded.red_cards,
                updated_at = CURRENT_TIMESTAMP
            RETURNING id
            ",
        )
        .bind(record.club_id)
        .bind(&record.name)
        .bind(record.role().as_str())
        .bind(record.jersey_number)
        .bind(&record.position)
        .bind(record.age)
        .bind(record.height_m)
        .bind(record.weight_kg)
        .bind(&record.nationality)
        .bind(record.games)
        .bind(record.substitutions)
        .bind(record.saves())
        .bind(record.goals_conceded())
        .bind(record.goals())
        .bind(record.total_shots())
        .bind(record.shots_on_goal())
        .bind(record.assists)
        .bind(record.fouls_committed)
        .bind(record.fouls_suffered)
        .bind(record.yellow_cards)
        .bind(record.red_cards)
        .fetch_one(&*self.pool)
        .await?;

        let mut saved = record.clone();
        saved.id = Some(id);
        Ok(saved)
    }

    async fn update(&self, existing: &AthleteRecord, fields: &AthleteRecord) -> Result<()> {
        let result = sqlx::query(
            r"
            UPDATE athletes SET
                role = ?, jersey_number = ?, position = ?, age = ?, height_m = ?, weight_kg = ?,
                nationality = ?, games = ?, substitutions = ?, saves = ?, goals_conceded = ?,
                goals = ?, total_shots = ?, shots_on_goal = ?, assists = ?, fouls_committed = ?,
                fouls_suffered = ?, yellow_cards = ?, red_cards = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE name = ? AND club_id = ?
            ",
        )
        .bind(fields.role().as_str())
        .bind(fields.jersey_number)
        .bind(&fields.position)
        .bind(fields.age)
        .bind(fields.height_m)
        .bind(fields.weight_kg)
        .bind(&fields.nationality)
        .bind(fields.games)
        .bind(fields.substitutions)
        .bind(fields.saves())
        .bind(fields.goals_conceded())
        .bind(fields.goals())
        .bind(fields.total_shots())
        .bind(fields.shots_on_goal())
        .bind(fields.assists)
        .bind(fields.fouls_committed)
        .bind(fields.fouls_suffered)
        .bind(fields.yellow_cards)
        .bind(fields.red_cards)
        .bind(&existing.name)
        .bind(existing.club_id)
        .execute(&*self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(anyhow!(
                "Athlete '{}' of club {} no longer exists",
                existing.name,
                existing.club_id
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ClubRepository for SqliteAthleteRepository {
    async fn get_club(&self, club_id: i64) -> Result<Option<Club>> {
        let row = sqlx::query("SELECT id, name, scrape_source_url FROM clubs WHERE id = ?")
            .bind(club_id)
            .fetch_optional(&*self.pool)
            .await?;

        row.map(|row| -> Result<Club> {
            Ok(Club {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                scrape_source_url: row.try_get("scrape_source_url")?,
            })
        })
        .transpose()
    }
}
