//! Roster table constants
//!
//! Column offsets and header markers of the upstream squad pages. The column
//! order is an external, unversioned contract of the source site; these
//! offsets follow the latest observed layout.

/// Positional contract shared by both roster table kinds
pub mod columns {
    /// Cells required before any row is considered (name through substitutions)
    pub const MIN_ROW_CELLS: usize = 8;

    pub const NAME: usize = 0;
    pub const POSITION: usize = 1;
    pub const AGE: usize = 2;
    pub const HEIGHT: usize = 3;
    pub const WEIGHT: usize = 4;
    pub const NATIONALITY: usize = 5;
    pub const GAMES: usize = 6;
    pub const SUBSTITUTIONS: usize = 7;

    /// Goalkeeper table: D, GS, A, FC, FS, CA, CV
    pub mod goalkeeper {
        pub const SAVES: usize = 8;
        pub const GOALS_CONCEDED: usize = 9;
        pub const ASSISTS: usize = 10;
        pub const FOULS_COMMITTED: usize = 11;
        pub const FOULS_SUFFERED: usize = 12;
        pub const YELLOW_CARDS: usize = 13;
        pub const RED_CARDS: usize = 14;
    }

    /// Field player table: G, A, TC, CG, FC, FS, CA, CV
    pub mod field_player {
        pub const GOALS: usize = 8;
        pub const ASSISTS: usize = 9;
        pub const TOTAL_SHOTS: usize = 10;
        pub const SHOTS_ON_GOAL: usize = 11;
        pub const FOULS_COMMITTED: usize = 12;
        pub const FOULS_SUFFERED: usize = 13;
        pub const YELLOW_CARDS: usize = 14;
        pub const RED_CARDS: usize = 15;
    }
}

/// Table classification signals
pub mod classifier {
    /// Header labels only goalkeeper tables carry (compared uppercased)
    pub const GOALKEEPER_MARKERS: &[&str] = &["GS", "D", "SV", "GA", "SAVES", "GOALS CONCEDED"];

    /// Header labels only field player tables carry (compared uppercased)
    pub const FIELD_PLAYER_MARKERS: &[&str] =
        &["G", "TC", "CG", "SH", "GOALS", "SHOTS", "SHOTS ON TARGET"];

    /// Tables with at most this many columns hold goalkeepers
    pub const GOALKEEPER_MAX_COLUMNS: usize = 14;
}

/// Upstream column labels, used for CSV export
pub mod labels {
    pub const GOALKEEPER_COLUMNS: &[&str] = &[
        "NOME", "C", "POS", "IDADE", "ALT", "P", "NAC", "J", "SUB", "D", "GS", "A", "FC", "FS",
        "CA", "CV",
    ];

    pub const FIELD_PLAYER_COLUMNS: &[&str] = &[
        "NOME", "C", "POS", "IDADE", "ALT", "P", "NAC", "J", "SUB", "G", "A", "TC", "CG", "FC",
        "FS", "CA", "CV",
    ];
}

/// HTTP defaults for the squad page fetch
pub mod http {
    /// Single attempt, bounded
    pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    pub const DEFAULT_ACCEPT: &str =
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

    pub const DEFAULT_ACCEPT_LANGUAGE: &str = "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7";

    pub const MAX_REDIRECTS: usize = 10;
}
