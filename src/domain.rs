//! Domain module - squad entities, outcomes and repository contracts
//!
//! Each module is its own file in the domain/ directory; commonly used items
//! are re-exported here for convenience.

pub mod athlete;
pub mod club;
pub mod constants;
pub mod outcome;
pub mod repositories;

pub use athlete::{AthleteRecord, PlayerRole, Position, RoleStats};
pub use club::Club;
pub use outcome::{ErrorDescriptor, ErrorKind, OutcomeSummary, ScrapeOutcome};
pub use repositories::{AthleteRepository, ClubRepository};
