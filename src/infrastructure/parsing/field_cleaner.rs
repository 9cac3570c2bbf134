//! Raw cell normalization
//!
//! Turns a table cell into a string the caller can coerce: numeric cells keep
//! only their first number (`"1.83 m"` -> `"1.83"`), text cells are trimmed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder the source site prints for missing stats
pub const ABSENT_SENTINEL: &str = "--";

// ASCII digits only; `\d` would also match other scripts' digits
#[allow(clippy::expect_used)]
static NUMBER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+(\.[0-9]+)?").expect("number pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Text,
}

/// Normalize a raw cell. Never fails.
///
/// Absent input (`None`, blank, or `"--"`) becomes `"0"` for numeric cells
/// and `""` for text cells.
pub fn clean(raw: Option<&str>, kind: FieldKind) -> String {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() || trimmed == ABSENT_SENTINEL {
        return match kind {
            FieldKind::Numeric => "0".to_string(),
            FieldKind::Text => String::new(),
        };
    }

    match kind {
        FieldKind::Numeric => NUMBER_RUN
            .find(trimmed)
            .map_or_else(|| "0".to_string(), |m| m.as_str().to_string()),
        FieldKind::Text => trimmed.to_string(),
    }
}
