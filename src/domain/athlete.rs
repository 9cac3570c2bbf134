//! Athlete entities scraped from squad roster tables

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which stat columns a roster table carries. Decided once per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Goalkeeper,
    FieldPlayer,
}

impl PlayerRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Goalkeeper => "goalkeeper",
            Self::FieldPlayer => "field_player",
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pitch position as published by the source site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// Parse an upstream position code (`G`, `D`, `M`, `A`, plus English variants).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "G" | "GK" | "GOL" => Some(Self::Goalkeeper),
            "D" | "DF" | "DEF" => Some(Self::Defender),
            "M" | "MF" | "MEI" => Some(Self::Midfielder),
            "A" | "F" | "FW" | "ATA" => Some(Self::Forward),
            _ => None,
        }
    }

    /// Localized label used by the source site
    pub const fn label(self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goleiro",
            Self::Defender => "Defensor",
            Self::Midfielder => "Meio-Campista",
            Self::Forward => "Atacante",
        }
    }
}

/// Role-specific stat group. Exactly one group exists per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleStats {
    Goalkeeper {
        saves: u32,
        goals_conceded: u32,
    },
    FieldPlayer {
        goals: u32,
        total_shots: u32,
        shots_on_goal: u32,
    },
}

impl RoleStats {
    /// Zeroed stat group for a role
    pub const fn empty(role: PlayerRole) -> Self {
        match role {
            PlayerRole::Goalkeeper => Self::Goalkeeper {
                saves: 0,
                goals_conceded: 0,
            },
            PlayerRole::FieldPlayer => Self::FieldPlayer {
                goals: 0,
                total_shots: 0,
                shots_on_goal: 0,
            },
        }
    }

    pub const fn role(&self) -> PlayerRole {
        match self {
            Self::Goalkeeper { .. } => PlayerRole::Goalkeeper,
            Self::FieldPlayer { .. } => PlayerRole::FieldPlayer,
        }
    }
}

/// One normalized roster entry.
///
/// Created by the row extractor with `club_id == 0` and `id == None`; the
/// squad scraper assigns the club and the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteRecord {
    pub id: Option<i64>,
    #[serde(rename = "clubId")]
    pub club_id: i64,
    pub name: String,
    #[serde(rename = "jerseyNumber")]
    pub jersey_number: u32,
    pub position: String,
    pub age: u32,
    #[serde(rename = "heightM")]
    pub height_m: f64,
    #[serde(rename = "weightKg")]
    pub weight_kg: f64,
    pub nationality: String,
    pub games: u32,
    pub substitutions: u32,
    pub assists: u32,
    #[serde(rename = "foulsCommitted")]
    pub fouls_committed: u32,
    #[serde(rename = "foulsSuffered")]
    pub fouls_suffered: u32,
    #[serde(rename = "yellowCards")]
    pub yellow_cards: u32,
    #[serde(rename = "redCards")]
    pub red_cards: u32,
    pub stats: RoleStats,
}

impl AthleteRecord {
    /// Blank record for a role; every attribute at its documented default
    pub fn new(name: impl Into<String>, role: PlayerRole) -> Self {
        Self {
            id: None,
            club_id: 0,
            name: name.into(),
            jersey_number: 0,
            position: String::new(),
            age: 0,
            height_m: 0.0,
            weight_kg: 0.0,
            nationality: String::new(),
            games: 0,
            substitutions: 0,
            assists: 0,
            fouls_committed: 0,
            fouls_suffered: 0,
            yellow_cards: 0,
            red_cards: 0,
            stats: RoleStats::empty(role),
        }
    }

    pub const fn role(&self) -> PlayerRole {
        self.stats.role()
    }

    pub fn position_label(&self) -> Option<&'static str> {
        Position::from_code(&self.position).map(Position::label)
    }

    pub const fn saves(&self) -> u32 {
        match self.stats {
            RoleStats::Goalkeeper { saves, .. } => saves,
            RoleStats::FieldPlayer { .. } => 0,
        }
    }

    pub const fn goals_conceded(&self) -> u32 {
        match self.stats {
            RoleStats::Goalkeeper { goals_conceded, .. } => goals_conceded,
            RoleStats::FieldPlayer { .. } => 0,
        }
    }

    pub const fn goals(&self) -> u32 {
        match self.stats {
            RoleStats::FieldPlayer { goals, .. } => goals,
            RoleStats::Goalkeeper { .. } => 0,
        }
    }

    pub const fn total_shots(&self) -> u32 {
        match self.stats {
            RoleStats::FieldPlayer { total_shots, .. } => total_shots,
            RoleStats::Goalkeeper { .. } => 0,
        }
    }

    pub const fn shots_on_goal(&self) -> u32 {
        match self.stats {
            RoleStats::FieldPlayer { shots_on_goal, .. } => shots_on_goal,
            RoleStats::Goalkeeper { .. } => 0,
        }
    }

    /// Overwrite every mutable attribute with the freshly scraped values.
    /// Identity (`id`, `club_id`, `name`) is kept; last scrape wins.
    pub fn overwrite_from(&mut self, scraped: &Self) {
        self.jersey_number = scraped.jersey_number;
        self.position.clone_from(&scraped.position);
        self.age = scraped.age;
        self.height_m = scraped.height_m;
        self.weight_kg = scraped.weight_kg;
        self.nationality.clone_from(&scraped.nationality);
        self.games = scraped.games;
        self.substitutions = scraped.substitutions;
        self.assists = scraped.assists;
        self.fouls_committed = scraped.fouls_committed;
        self.fouls_suffered = scraped.fouls_suffered;
        self.yellow_cards = scraped.yellow_cards;
        self.red_cards = scraped.red_cards;
        self.stats = scraped.stats.clone();
    }
}
