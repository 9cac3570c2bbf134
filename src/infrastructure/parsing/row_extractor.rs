//! Roster row -> `AthleteRecord`
//!
//! Cells are read by fixed position (see `domain::constants::columns`).
//! Columns missing at the end of a short row take the cleaner's absent
//! default instead of failing the row.

use tracing::trace;

use super::field_cleaner::{FieldKind, clean};
use super::name_splitter::split;
use crate::domain::athlete::{AthleteRecord, PlayerRole, Position, RoleStats};
use crate::domain::constants::columns::{
    AGE, GAMES, HEIGHT, MIN_ROW_CELLS, NAME, NATIONALITY, POSITION, SUBSTITUTIONS, WEIGHT,
};
use crate::infrastructure::parsing_error::{ExtractionError, ExtractionResult};

/// Positional view over one row's cells
struct RowCells<'a> {
    cells: &'a [String],
}

impl<'a> RowCells<'a> {
    const fn new(cells: &'a [String]) -> Self {
        Self { cells }
    }

    fn raw(&self, index: usize) -> Option<&'a str> {
        self.cells.get(index).map(String::as_str)
    }

    fn text(&self, index: usize) -> String {
        clean(self.raw(index), FieldKind::Text)
    }

    fn int(&self, index: usize, field: &'static str) -> ExtractionResult<u32> {
        let cleaned = clean(self.raw(index), FieldKind::Numeric);
        // Integral part only; "28.0" counts as 28
        let integral = cleaned.split('.').next().unwrap_or_default();
        integral
            .parse::<u32>()
            .map_err(|_| ExtractionError::NumericCoercion {
                field,
                value: cleaned.clone(),
            })
    }

    fn float(&self, index: usize, field: &'static str) -> ExtractionResult<f64> {
        let cleaned = clean(self.raw(index), FieldKind::Numeric);
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ExtractionError::NumericCoercion {
                field,
                value: cleaned,
            })
    }
}

/// True for spacer rows where every cell is blank
pub fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.trim().is_empty())
}

/// Extract one record from a row of a table classified as `role`.
///
/// The returned record has no club assigned yet.
pub fn extract(cells: &[String], role: PlayerRole) -> ExtractionResult<AthleteRecord> {
    if cells.len() < MIN_ROW_CELLS {
        return Err(ExtractionError::InsufficientColumns {
            found: cells.len(),
            required: MIN_ROW_CELLS,
        });
    }

    let row = RowCells::new(cells);

    let (name, jersey_number) = split(row.raw(NAME).unwrap_or_default());
    if name.is_empty() {
        return Err(ExtractionError::EmptyName);
    }

    let position = row.text(POSITION).to_uppercase();
    if position.is_empty() {
        return Err(ExtractionError::EmptyPosition);
    }
    if Position::from_code(&position).is_none() {
        return Err(ExtractionError::UnrecognizedPosition(position));
    }

    let mut record = AthleteRecord::new(name, role);
    record.jersey_number = jersey_number;
    record.position = position;
    record.age = row.int(AGE, "age")?;
    record.height_m = row.float(HEIGHT, "height")?;
    record.weight_kg = row.float(WEIGHT, "weight")?;
    record.nationality = row.text(NATIONALITY);
    record.games = row.int(GAMES, "games")?;
    record.substitutions = row.int(SUBSTITUTIONS, "substitutions")?;

    match role {
        PlayerRole::Goalkeeper => {
            use crate::domain::constants::columns::goalkeeper as col;
            record.stats = RoleStats::Goalkeeper {
                saves: row.int(col::SAVES, "saves")?,
                goals_conceded: row.int(col::GOALS_CONCEDED, "goals_conceded")?,
            };
            record.assists = row.int(col::ASSISTS, "assists")?;
            record.fouls_committed = row.int(col::FOULS_COMMITTED, "fouls_committed")?;
            record.fouls_suffered = row.int(col::FOULS_SUFFERED, "fouls_suffered")?;
            record.yellow_cards = row.int(col::YELLOW_CARDS, "yellow_cards")?;
            record.red_cards = row.int(col::RED_CARDS, "red_cards")?;
        }
        PlayerRole::FieldPlayer => {
            use crate::domain::constants::columns::field_player as col;
            record.stats = RoleStats::FieldPlayer {
                goals: row.int(col::GOALS, "goals")?,
                total_shots: row.int(col::TOTAL_SHOTS, "total_shots")?,
                shots_on_goal: row.int(col::SHOTS_ON_GOAL, "shots_on_goal")?,
            };
            record.assists = row.int(col::ASSISTS, "assists")?;
            record.fouls_committed = row.int(col::FOULS_COMMITTED, "fouls_committed")?;
            record.fouls_suffered = row.int(col::FOULS_SUFFERED, "fouls_suffered")?;
            record.yellow_cards = row.int(col::YELLOW_CARDS, "yellow_cards")?;
            record.red_cards = row.int(col::RED_CARDS, "red_cards")?;
        }
    }

    trace!(name = %record.name, role = %role, "row extracted");
    Ok(record)
}
