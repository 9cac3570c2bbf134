//! Roster parsing pipeline
//!
//! HTML page -> `RosterTable`s -> per-table role -> per-row `AthleteRecord`.
//! Everything in here is pure, synchronous computation.

pub mod context;
pub mod field_cleaner;
pub mod name_splitter;
pub mod roster_table;
pub mod row_extractor;
pub mod table_classifier;

pub use context::RowContext;
pub use field_cleaner::{FieldKind, clean};
pub use name_splitter::split;
pub use roster_table::{RosterTable, RosterTableReader};
pub use row_extractor::{extract, is_blank_row};
pub use table_classifier::classify;
