//! Goalkeeper / field player table classification
//!
//! Header text is the preferred signal. When it carries no known marker the
//! column count decides, since goalkeeper tables have fewer stat columns.

use crate::domain::athlete::PlayerRole;
use crate::domain::constants::classifier::{
    FIELD_PLAYER_MARKERS, GOALKEEPER_MARKERS, GOALKEEPER_MAX_COLUMNS,
};
use crate::domain::constants::columns::MIN_ROW_CELLS;

/// Decide the role of a roster table.
///
/// Returns `None` when there is no decisive signal: no header marker and a
/// structural column count (header cells, else first row cells) too small to
/// hold a roster row.
pub fn classify(header: &[String], first_row: Option<&[String]>) -> Option<PlayerRole> {
    if let Some(role) = classify_by_markers(header) {
        return Some(role);
    }

    let column_count = if header.is_empty() {
        first_row.map_or(0, <[String]>::len)
    } else {
        header.len()
    };
    classify_by_column_count(column_count)
}

/// First decisive header marker; goalkeeper markers take precedence
pub fn classify_by_markers(header: &[String]) -> Option<PlayerRole> {
    let labels: Vec<String> = header.iter().map(|cell| cell.trim().to_uppercase()).collect();
    let has_any = |markers: &[&str]| labels.iter().any(|label| markers.contains(&label.as_str()));

    if has_any(GOALKEEPER_MARKERS) {
        Some(PlayerRole::Goalkeeper)
    } else if has_any(FIELD_PLAYER_MARKERS) {
        Some(PlayerRole::FieldPlayer)
    } else {
        None
    }
}

/// Structural fallback: `<= 14` columns is a goalkeeper table
pub const fn classify_by_column_count(column_count: usize) -> Option<PlayerRole> {
    if column_count < MIN_ROW_CELLS {
        None
    } else if column_count <= GOALKEEPER_MAX_COLUMNS {
        Some(PlayerRole::Goalkeeper)
    } else {
        Some(PlayerRole::FieldPlayer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cells(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_gs_header_is_goalkeeper_regardless_of_width() {
        let mut header = cells(&["NOME", "POS", "GS"]);
        assert_eq!(classify(&header, None), Some(PlayerRole::Goalkeeper));

        header.extend(cells(&["X"; 20]));
        assert_eq!(classify(&header, None), Some(PlayerRole::Goalkeeper));
    }

    #[test]
    fn test_saves_marker_is_case_insensitive() {
        let header = cells(&["Name", "Pos", "Saves"]);
        assert_eq!(classify(&header, None), Some(PlayerRole::Goalkeeper));
    }

    #[test]
    fn test_field_player_markers() {
        let header = cells(&[
            "NOME", "POS", "IDADE", "ALT", "P", "NAC", "J", "SUB", "G", "A", "TC", "CG",
        ]);
        assert_eq!(classify(&header, None), Some(PlayerRole::FieldPlayer));
    }

    #[rstest]
    #[case(8, Some(PlayerRole::Goalkeeper))]
    #[case(14, Some(PlayerRole::Goalkeeper))]
    #[case(15, Some(PlayerRole::FieldPlayer))]
    #[case(16, Some(PlayerRole::FieldPlayer))]
    #[case(7, None)]
    #[case(0, None)]
    fn test_column_count_fallback(#[case] width: usize, #[case] expected: Option<PlayerRole>) {
        let header: Vec<String> = (0..width).map(|i| format!("C{i}")).collect();
        assert_eq!(classify(&header, None), expected);
    }

    #[test]
    fn test_headerless_table_uses_first_row() {
        let row: Vec<String> = (0..16).map(|i| i.to_string()).collect();
        assert_eq!(classify(&[], Some(row.as_slice())), Some(PlayerRole::FieldPlayer));
        assert_eq!(classify(&[], Some(&row[..10])), Some(PlayerRole::Goalkeeper));
        assert_eq!(classify(&[], None), None);
    }
}
