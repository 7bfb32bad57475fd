//! Row and column show/hide with state capture.
//!
//! Hiding physically removes the row/column from the adapter after capturing
//! its header item and full cell list, keyed by the original position in an
//! ordered map. Showing reinserts the captured snapshot verbatim at the
//! original index and discards the record.

use std::collections::BTreeMap;

use tracing::debug;

use crate::adapter::TableAdapter;

/// Snapshot of a hidden row.
#[derive(Clone)]
pub struct HiddenRow<A: TableAdapter> {
    pub header: A::RowHeader,
    pub cells: Vec<A::Cell>,
}

/// Snapshot of a hidden column.
#[derive(Clone)]
pub struct HiddenColumn<A: TableAdapter> {
    pub header: A::ColumnHeader,
    pub cells: Vec<A::Cell>,
}

/// Tracks hidden rows/columns so they can be restored verbatim.
pub struct VisibilityTracker<A: TableAdapter> {
    hidden_rows: BTreeMap<usize, HiddenRow<A>>,
    hidden_columns: BTreeMap<usize, HiddenColumn<A>>,
}

impl<A: TableAdapter> Default for VisibilityTracker<A> {
    fn default() -> Self {
        Self {
            hidden_rows: BTreeMap::new(),
            hidden_columns: BTreeMap::new(),
        }
    }
}

impl<A: TableAdapter> VisibilityTracker<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hide_row(&mut self, adapter: &mut A, row: usize) {
        let (Some(header), Some(cells)) = (adapter.row_header(row).cloned(), adapter.row_items(row))
        else {
            debug!(row, "hide requested for a row that does not exist");
            return;
        };
        self.hidden_rows.insert(row, HiddenRow { header, cells });
        adapter.remove_row(row);
    }

    pub fn show_row(&mut self, adapter: &mut A, row: usize) {
        self.reinsert_row(adapter, row);
        self.hidden_rows.remove(&row);
    }

    pub fn show_all_hidden_rows(&mut self, adapter: &mut A) {
        let rows: Vec<usize> = self.hidden_rows.keys().copied().collect();
        for row in rows {
            self.reinsert_row(adapter, row);
        }
        self.clear_hidden_rows();
    }

    /// Discard hidden-row records without reinserting them.
    pub fn clear_hidden_rows(&mut self) {
        self.hidden_rows.clear();
    }

    pub fn is_row_visible(&self, row: usize) -> bool {
        !self.hidden_rows.contains_key(&row)
    }

    pub fn hide_column(&mut self, adapter: &mut A, column: usize) {
        let (Some(header), Some(cells)) = (
            adapter.column_header(column).cloned(),
            adapter.column_items(column),
        ) else {
            debug!(column, "hide requested for a column that does not exist");
            return;
        };
        self.hidden_columns
            .insert(column, HiddenColumn { header, cells });
        adapter.remove_column(column);
    }

    pub fn show_column(&mut self, adapter: &mut A, column: usize) {
        self.reinsert_column(adapter, column);
        self.hidden_columns.remove(&column);
    }

    pub fn show_all_hidden_columns(&mut self, adapter: &mut A) {
        let columns: Vec<usize> = self.hidden_columns.keys().copied().collect();
        for column in columns {
            self.reinsert_column(adapter, column);
        }
        self.clear_hidden_columns();
    }

    pub fn clear_hidden_columns(&mut self) {
        self.hidden_columns.clear();
    }

    pub fn is_column_visible(&self, column: usize) -> bool {
        !self.hidden_columns.contains_key(&column)
    }

    fn reinsert_row(&self, adapter: &mut A, row: usize) {
        if let Some(hidden) = self.hidden_rows.get(&row) {
            adapter.insert_row(row, hidden.header.clone(), hidden.cells.clone());
        } else {
            debug!(row, "row is already visible");
        }
    }

    fn reinsert_column(&self, adapter: &mut A, column: usize) {
        if let Some(hidden) = self.hidden_columns.get(&column) {
            adapter.insert_column(column, hidden.header.clone(), hidden.cells.clone());
        } else {
            debug!(column, "column is already visible");
        }
    }
}
