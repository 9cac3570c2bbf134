//! Row location context for error reporting

/// Where a row sits on the page, 1-based as an operator would count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowContext<'a> {
    pub table_index: usize,
    pub row_index: usize,
    /// First cell as scraped, before name/number splitting
    pub raw_name: Option<&'a str>,
}

impl<'a> RowContext<'a> {
    pub fn new(table_index: usize, row_index: usize, cells: &'a [String]) -> Self {
        Self {
            table_index,
            row_index,
            raw_name: cells.first().map(|c| c.trim()).filter(|c| !c.is_empty()),
        }
    }

    /// Best-effort identifier: the raw name cell, else the table/row position
    pub fn identifier(&self) -> String {
        self.raw_name.map_or_else(
            || format!("table {} row {}", self.table_index, self.row_index),
            str::to_string,
        )
    }
}
