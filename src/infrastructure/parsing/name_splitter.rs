//! Name / jersey number separation
//!
//! The squad page prints the shirt number in the same cell as the player's
//! name, in several shapes. Strategies are tried in a fixed order and the
//! first match wins.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Longest digit run accepted as a trailing jersey number
const MAX_TRAILING_DIGITS: usize = 3;
const MAX_TRAILING_NUMBER: u32 = 999;

#[allow(clippy::expect_used)]
fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("splitter pattern is valid")
}

/// `10 Nome Sobrenome`
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| pattern(r"^([0-9]+)\s+(.+)$"));
/// `Nome Sobrenome (10)`
static PARENTHESIZED_NUMBER: Lazy<Regex> = Lazy::new(|| pattern(r"^(.+?)\s*\(([0-9]+)\)$"));
/// `Nome Sobrenome10` or `Nome Sobrenome 10`
static TRAILING_NUMBER: Lazy<Regex> = Lazy::new(|| pattern(r"^(.+?)\s*([0-9]+)$"));
/// `Nome Sobrenome #10`
static HASH_NUMBER: Lazy<Regex> = Lazy::new(|| pattern(r"^(.+?)\s*#([0-9]+)$"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    LeadingNumber,
    Parenthesized,
    Trailing,
    Hash,
}

const STRATEGIES: [Strategy; 4] = [
    Strategy::LeadingNumber,
    Strategy::Parenthesized,
    Strategy::Trailing,
    Strategy::Hash,
];

impl Strategy {
    fn apply(self, text: &str) -> Option<(String, u32)> {
        match self {
            Self::LeadingNumber => {
                let caps = LEADING_NUMBER.captures(text)?;
                accept(&caps, 2, 1)
            }
            Self::Parenthesized => {
                let caps = PARENTHESIZED_NUMBER.captures(text)?;
                accept(&caps, 1, 2)
            }
            Self::Trailing => {
                let caps = TRAILING_NUMBER.captures(text)?;
                let digits = caps.get(2)?.as_str();
                // Leave `Name #10` to the hash strategy
                if digits.len() > MAX_TRAILING_DIGITS || caps.get(1)?.as_str().ends_with('#') {
                    return None;
                }
                accept(&caps, 1, 2).filter(|(_, number)| *number <= MAX_TRAILING_NUMBER)
            }
            Self::Hash => {
                let caps = HASH_NUMBER.captures(text)?;
                accept(&caps, 1, 2)
            }
        }
    }
}

fn accept(caps: &Captures<'_>, name_group: usize, number_group: usize) -> Option<(String, u32)> {
    let number = caps.get(number_group)?.as_str().parse::<u32>().ok()?;
    let name = caps.get(name_group)?.as_str().trim().to_string();
    Some((name, number))
}

/// Split a combined cell into `(display name, jersey number)`.
///
/// Total: unmatched input comes back trimmed with number 0, blank input as
/// `("", 0)`.
pub fn split(raw: &str) -> (String, u32) {
    let text = raw.trim();
    if text.is_empty() {
        return (String::new(), 0);
    }

    STRATEGIES
        .iter()
        .find_map(|strategy| strategy.apply(text))
        .unwrap_or_else(|| (text.to_string(), 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("10 Nome Sobrenome", "Nome Sobrenome", 10)]
    #[case("Nome Sobrenome (7)", "Nome Sobrenome", 7)]
    #[case("Nome Sobrenome(7)", "Nome Sobrenome", 7)]
    #[case("Nome Sobrenome23", "Nome Sobrenome", 23)]
    #[case("Nome Sobrenome 23", "Nome Sobrenome", 23)]
    #[case("Nome Sobrenome #9", "Nome Sobrenome", 9)]
    #[case("Nome Sobrenome #2025", "Nome Sobrenome", 2025)]
    #[case("Nome Sobrenome2025", "Nome Sobrenome2025", 0)]
    #[case("Nome Sobrenome", "Nome Sobrenome", 0)]
    #[case("  João Silva  ", "João Silva", 0)]
    #[case("", "", 0)]
    #[case("   ", "", 0)]
    fn test_split(#[case] raw: &str, #[case] name: &str, #[case] number: u32) {
        assert_eq!(split(raw), (name.to_string(), number));
    }

    #[test]
    fn test_leading_number_wins_over_trailing() {
        assert_eq!(split("9 Gabriel 2"), ("Gabriel 2".to_string(), 9));
    }

    #[test]
    fn test_oversized_leading_number_falls_through() {
        // Does not fit a u32, so no strategy accepts it
        let (name, number) = split("99999999999 Nome");
        assert_eq!(name, "99999999999 Nome");
        assert_eq!(number, 0);
    }

    proptest! {
        #[test]
        fn split_is_total(raw in "\\PC*") {
            let (name, _number) = split(&raw);
            prop_assert!(name.len() <= raw.len());
        }

        #[test]
        fn leading_number_round_trips(number in 0u32..1000, name in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]") {
            let (parsed_name, parsed_number) = split(&format!("{number} {name}"));
            prop_assert_eq!(parsed_number, number);
            prop_assert_eq!(parsed_name, name.trim().to_string());
        }
    }
}
