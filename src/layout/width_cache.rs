//! Measured-width storage.
//!
//! Two maps: the resolved width per column (authoritative, matches the
//! column header), and the last width applied to each (row, column) cell.
//! Once resolved, a column's width equals the maximum natural width among
//! all currently realized cells in that column plus its header.

use std::collections::HashMap;

/// Per-column and per-cell measured-width cache. Pure data.
#[derive(Debug, Default)]
pub struct WidthCache {
    /// Resolved column widths, keyed by column index.
    column_widths: HashMap<usize, i32>,
    /// Last-applied cell widths, keyed by row then column.
    cell_widths: HashMap<usize, HashMap<usize, i32>>,
}

impl WidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved width of a column's header, if one has been negotiated.
    pub fn column_width(&self, column: usize) -> Option<i32> {
        self.column_widths.get(&column).copied()
    }

    pub fn set_column_width(&mut self, column: usize, width: i32) {
        self.column_widths.insert(column, width);
    }

    /// Drop a single column's resolved width so it is remeasured on the
    /// next fit pass.
    pub fn remove_column_width(&mut self, column: usize) {
        self.column_widths.remove(&column);
    }

    /// Last width applied to a single cell.
    pub fn cell_width(&self, row: usize, column: usize) -> Option<i32> {
        self.cell_widths.get(&row).and_then(|r| r.get(&column)).copied()
    }

    pub fn set_cell_width(&mut self, row: usize, column: usize, width: i32) {
        self.cell_widths.entry(row).or_default().insert(column, width);
    }

    /// Record one width for every cell of a column across `row_count` rows.
    pub fn set_column_cells_width(&mut self, column: usize, row_count: usize, width: i32) {
        for row in 0..row_count {
            self.set_cell_width(row, column, width);
        }
    }

    /// Drop everything. Used when the column or cell dataset is replaced
    /// wholesale.
    pub fn clear(&mut self) {
        self.column_widths.clear();
        self.cell_widths.clear();
    }
}
