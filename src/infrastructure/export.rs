//! CSV export of scraped squads
//!
//! One file per role, headed with the source site's column labels.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::athlete::AthleteRecord;
use crate::domain::constants::labels::{FIELD_PLAYER_COLUMNS, GOALKEEPER_COLUMNS};
use crate::domain::outcome::ScrapeOutcome;

pub const GOALKEEPERS_FILE: &str = "goalkeepers.csv";
pub const FIELD_PLAYERS_FILE: &str = "field_players.csv";

fn shared_prefix(record: &AthleteRecord) -> Vec<String> {
    vec![
        record.name.clone(),
        record.jersey_number.to_string(),
        record.position.clone(),
        record.age.to_string(),
        format!("{:.2}", record.height_m),
        format!("{:.1}", record.weight_kg),
        record.nationality.clone(),
        record.games.to_string(),
        record.substitutions.to_string(),
    ]
}

fn discipline_suffix(record: &AthleteRecord) -> [String; 4] {
    [
        record.fouls_committed.to_string(),
        record.fouls_suffered.to_string(),
        record.yellow_cards.to_string(),
        record.red_cards.to_string(),
    ]
}

pub fn write_goalkeepers_csv<W: Write>(writer: W, records: &[AthleteRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(GOALKEEPER_COLUMNS)?;
    for record in records {
        let mut row = shared_prefix(record);
        row.push(record.saves().to_string());
        row.push(record.goals_conceded().to_string());
        row.push(record.assists.to_string());
        row.extend(discipline_suffix(record));
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_field_players_csv<W: Write>(writer: W, records: &[AthleteRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(FIELD_PLAYER_COLUMNS)?;
    for record in records {
        let mut row = shared_prefix(record);
        row.push(record.goals().to_string());
        row.push(record.assists.to_string());
        row.push(record.total_shots().to_string());
        row.push(record.shots_on_goal().to_string());
        row.extend(discipline_suffix(record));
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write both role files into `dir`, creating it if needed
pub fn write_outcome_csv(dir: &Path, outcome: &ScrapeOutcome) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let goalkeepers_path = dir.join(GOALKEEPERS_FILE);
    let file = File::create(&goalkeepers_path)
        .with_context(|| format!("Failed to create {}", goalkeepers_path.display()))?;
    write_goalkeepers_csv(file, &outcome.goalkeepers)?;

    let field_players_path = dir.join(FIELD_PLAYERS_FILE);
    let file = File::create(&field_players_path)
        .with_context(|| format!("Failed to create {}", field_players_path.display()))?;
    write_field_players_csv(file, &outcome.field_players)?;

    info!(
        "📄 Exported {} goalkeepers and {} field players to {}",
        outcome.goalkeepers.len(),
        outcome.field_players.len(),
        dir.display()
    );
    Ok((goalkeepers_path, field_players_path))
}
