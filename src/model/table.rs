//! Table types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A table reconstructed as a fixed grid.
///
/// Every row holds exactly `col_count` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of columns in every row
    pub col_count: usize,

    /// How the grid shape was obtained
    pub layout: TableLayout,
}

impl Table {
    /// Create a `row_count` x `col_count` grid of empty cells.
    pub fn grid(row_count: usize, col_count: usize, layout: TableLayout) -> Self {
        let rows = (0..row_count)
            .map(|_| TableRow::new((0..col_count).map(|_| TableCell::empty()).collect()))
            .collect();
        Self {
            rows,
            col_count,
            layout,
        }
    }

    /// Place cells in row-major order.
    ///
    /// Cells beyond the grid capacity are discarded; missing cells stay empty.
    pub fn fill_row_major(&mut self, cells: impl IntoIterator<Item = TableCell>) {
        if self.col_count == 0 {
            return;
        }
        let capacity = self.rows.len() * self.col_count;
        for (idx, cell) in cells.into_iter().take(capacity).enumerate() {
            self.rows[idx / self.col_count].cells[idx % self.col_count] = cell;
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.col_count
    }

    /// Get a cell by row and column.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Check if the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.col_count == 0
    }

    /// Whether the grid shape was guessed rather than declared.
    pub fn is_approximate(&self) -> bool {
        self.layout == TableLayout::Approximate
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Origin of a table's row/column shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableLayout {
    /// Row and column counts came from the table structure record.
    Declared,
    /// Column count was guessed from the number of cells; the visual
    /// layout of the source is not guaranteed.
    Approximate,
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content (paragraphs)
    pub paragraphs: Vec<Paragraph>,

    /// Number of rows this cell spans
    pub rowspan: u16,

    /// Number of columns this cell spans
    pub colspan: u16,
}

impl TableCell {
    /// Create an empty cell.
    pub fn empty() -> Self {
        Self {
            paragraphs: Vec::new(),
            rowspan: 1,
            colspan: 1,
        }
    }

    /// Create a cell with a single plain paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self::with_content(vec![Paragraph::with_text(text)])
    }

    /// Create a cell with multiple paragraphs.
    pub fn with_content(paragraphs: Vec<Paragraph>) -> Self {
        Self {
            paragraphs,
            ..Self::empty()
        }
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: u16) -> Self {
        self.colspan = span.max(1);
        self
    }

    /// Set rowspan and return self.
    pub fn rowspan(mut self, span: u16) -> Self {
        self.rowspan = span.max(1);
        self
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.is_empty())
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.rowspan > 1 || self.colspan > 1
    }
}

impl Default for TableCell {
    fn default() -> Self {
        Self::empty()
    }
}
