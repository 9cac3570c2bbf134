//! Row extraction error types
//!
//! Every variant is per-row and non-fatal: the squad scraper turns it into an
//! `ErrorDescriptor` and keeps going.

use thiserror::Error;

use crate::domain::outcome::ErrorKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("insufficient columns: found {found}, required {required}")]
    InsufficientColumns { found: usize, required: usize },

    #[error("empty name")]
    EmptyName,

    #[error("empty position")]
    EmptyPosition,

    #[error("unrecognized position '{0}'")]
    UnrecognizedPosition(String),

    /// The field cleaner handed back something that is not a numeric literal
    #[error("numeric coercion failed for {field}: '{value}'")]
    NumericCoercion { field: &'static str, value: String },
}

impl ExtractionError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientColumns { .. } => ErrorKind::InsufficientColumns,
            Self::EmptyName => ErrorKind::EmptyName,
            Self::EmptyPosition => ErrorKind::EmptyPosition,
            Self::UnrecognizedPosition(_) => ErrorKind::UnrecognizedPosition,
            Self::NumericCoercion { .. } => ErrorKind::NumericCoercion,
        }
    }
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;
