//! HTML roster table reader
//!
//! Locates every table on a squad page and returns its header cells and
//! data rows as trimmed, whitespace-normalized text.

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// One `<table>` worth of text. Ephemeral: consumed once by extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RosterTable {
    pub fn first_row(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

/// Compiled selectors for table discovery
#[derive(Debug, Clone)]
pub struct RosterTableReader {
    table_selector: Selector,
    head_cell_selector: Selector,
    any_header_cell_selector: Selector,
    row_selector: Selector,
    data_cell_selector: Selector,
}

impl RosterTableReader {
    /// Reader matching every `<table>` element
    pub fn new() -> Result<Self> {
        Self::with_table_selector("table")
    }

    /// Reader restricted to tables matching `table_selector` (e.g. `table.Table`)
    pub fn with_table_selector(table_selector: &str) -> Result<Self> {
        Ok(Self {
            table_selector: compile_selector(table_selector)?,
            head_cell_selector: compile_selector("thead th")?,
            any_header_cell_selector: compile_selector("th")?,
            row_selector: compile_selector("tbody tr")?,
            data_cell_selector: compile_selector("td")?,
        })
    }

    /// Parse a page body and read every matching table, in document order
    pub fn read_document(&self, body: &str) -> Vec<RosterTable> {
        let document = Html::parse_document(body);
        let tables: Vec<RosterTable> = document
            .select(&self.table_selector)
            .map(|table| self.read_table(table))
            .collect();

        debug!("Found {} tables in document", tables.len());
        tables
    }

    fn read_table(&self, table: ElementRef<'_>) -> RosterTable {
        let mut header: Vec<String> = table.select(&self.head_cell_selector).map(cell_text).collect();
        if header.is_empty() {
            header = table
                .select(&self.any_header_cell_selector)
                .map(cell_text)
                .collect();
        }

        // Rows without data cells are header rows living in <tbody>
        let rows = table
            .select(&self.row_selector)
            .map(|row| {
                row.select(&self.data_cell_selector)
                    .map(cell_text)
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();

        RosterTable { header, rows }
    }
}

fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("Invalid CSS selector '{selector}': {e}"))
}

/// Concatenated text of a cell with whitespace runs collapsed
fn cell_text(cell: ElementRef<'_>) -> String {
    let raw: String = cell.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUAD_PAGE: &str = r#"
        <html><body>
          <table class="Table">
            <thead><tr><th>NOME</th><th>POS</th><th>GS</th></tr></thead>
            <tbody>
              <tr><td><a href="/p/1">Hugo   Souza</a><span>1</span></td><td>G</td><td>12</td></tr>
              <tr><td>Rossi</td><td>G</td><td>--</td></tr>
            </tbody>
          </table>
          <table>
            <tr><th>A</th><th>B</th></tr>
            <tr><td>x</td><td>y</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_reads_every_table_in_order() {
        let reader = RosterTableReader::new().unwrap();
        let tables = reader.read_document(SQUAD_PAGE);
        assert_eq!(tables.len(), 2);

        assert_eq!(tables[0].header, vec!["NOME", "POS", "GS"]);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[0].rows[0], vec!["Hugo Souza1", "G", "12"]);
        assert_eq!(tables[0].rows[1][2], "--");

        // No <thead>: header comes from any <th>, header row is not a data row
        assert_eq!(tables[1].header, vec!["A", "B"]);
        assert_eq!(tables[1].rows, vec![vec!["x".to_string(), "y".to_string()]]);
    }

    #[test]
    fn test_custom_table_selector() {
        let reader = RosterTableReader::with_table_selector("table.Table").unwrap();
        assert_eq!(reader.read_document(SQUAD_PAGE).len(), 1);
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        assert!(RosterTableReader::with_table_selector("table[").is_err());
    }

    #[test]
    fn test_page_without_tables() {
        let reader = RosterTableReader::new().unwrap();
        assert!(reader.read_document("<p>nothing</p>").is_empty());
    }
}
