//! The data boundary.
//!
//! The adapter owns the logical dataset and is its sole writer; the core
//! reads items and reshapes the dataset (sort, filter, hide/show) through
//! this narrow contract. Row and column indices are contiguous, 0-based,
//! and dense — hidden rows/columns are physically removed, not masked.

use crate::types::CellValue;

/// An item with a stable identity, usable for diffing across data swaps.
pub trait TableItem {
    fn item_id(&self) -> u64;
}

/// Content a filter can match against. Items that return `None` cannot be
/// filtered; targeting them with a filter is a configuration bug.
pub trait Filterable {
    fn filter_keyword(&self) -> Option<&str>;
}

/// Content a column sort can order by.
pub trait Orderable {
    fn order_value(&self) -> CellValue;
}

/// Read/write contract over the logical dataset.
///
/// Index accessors return `None` past the end of the dataset — "no such
/// item" is recovered locally, never an error.
pub trait TableAdapter {
    type ColumnHeader: TableItem + Orderable + Clone;
    type RowHeader: TableItem + Orderable + Clone;
    type Cell: TableItem + Filterable + Orderable + Clone;

    fn column_count(&self) -> usize;
    fn row_count(&self) -> usize;

    fn column_header(&self, column: usize) -> Option<&Self::ColumnHeader>;
    fn row_header(&self, row: usize) -> Option<&Self::RowHeader>;
    fn cell(&self, row: usize, column: usize) -> Option<&Self::Cell>;

    /// All cells of one row, in column order.
    fn row_items(&self, row: usize) -> Option<Vec<Self::Cell>>;
    /// All cells of one column, in row order.
    fn column_items(&self, column: usize) -> Option<Vec<Self::Cell>>;
    fn row_headers(&self) -> Vec<Self::RowHeader>;
    fn cell_rows(&self) -> Vec<Vec<Self::Cell>>;

    fn set_column_headers(&mut self, headers: Vec<Self::ColumnHeader>);
    fn set_row_headers(&mut self, headers: Vec<Self::RowHeader>);
    fn set_cells(&mut self, cells: Vec<Vec<Self::Cell>>);
    /// Replace a single column's header item.
    fn set_column_header(&mut self, column: usize, header: Self::ColumnHeader);

    fn insert_row(&mut self, row: usize, header: Self::RowHeader, cells: Vec<Self::Cell>);
    fn remove_row(&mut self, row: usize);
    fn insert_column(
        &mut self,
        column: usize,
        header: Self::ColumnHeader,
        cells: Vec<Self::Cell>,
    );
    fn remove_column(&mut self, column: usize);

    /// Remove `count` rows starting at `start`.
    fn remove_rows(&mut self, start: usize, count: usize) {
        for _ in 0..count {
            self.remove_row(start);
        }
    }

    /// Remove `count` columns starting at `start`.
    fn remove_columns(&mut self, start: usize, count: usize) {
        for _ in 0..count {
            self.remove_column(start);
        }
    }
}

/// Plain `Vec`-backed adapter, the default dataset implementation.
///
/// Hosts with their own data source implement [`TableAdapter`] directly.
#[derive(Debug, Default)]
pub struct VecTableAdapter<CH, RH, C> {
    column_headers: Vec<CH>,
    row_headers: Vec<RH>,
    /// Row-major cell matrix; `cells[row][column]`.
    cells: Vec<Vec<C>>,
}

impl<CH, RH, C> VecTableAdapter<CH, RH, C> {
    pub fn new() -> Self {
        Self {
            column_headers: Vec::new(),
            row_headers: Vec::new(),
            cells: Vec::new(),
        }
    }
}

impl<CH, RH, C> TableAdapter for VecTableAdapter<CH, RH, C>
where
    CH: TableItem + Orderable + Clone,
    RH: TableItem + Orderable + Clone,
    C: TableItem + Filterable + Orderable + Clone,
{
    type ColumnHeader = CH;
    type RowHeader = RH;
    type Cell = C;

    fn column_count(&self) -> usize {
        self.column_headers.len()
    }

    fn row_count(&self) -> usize {
        self.row_headers.len()
    }

    fn column_header(&self, column: usize) -> Option<&CH> {
        self.column_headers.get(column)
    }

    fn row_header(&self, row: usize) -> Option<&RH> {
        self.row_headers.get(row)
    }

    fn cell(&self, row: usize, column: usize) -> Option<&C> {
        self.cells.get(row).and_then(|r| r.get(column))
    }

    fn row_items(&self, row: usize) -> Option<Vec<C>> {
        self.cells.get(row).cloned()
    }

    fn column_items(&self, column: usize) -> Option<Vec<C>> {
        if column >= self.column_headers.len() {
            return None;
        }
        Some(
            self.cells
                .iter()
                .filter_map(|r| r.get(column).cloned())
                .collect(),
        )
    }

    fn row_headers(&self) -> Vec<RH> {
        self.row_headers.clone()
    }

    fn cell_rows(&self) -> Vec<Vec<C>> {
        self.cells.clone()
    }

    fn set_column_headers(&mut self, headers: Vec<CH>) {
        self.column_headers = headers;
    }

    fn set_row_headers(&mut self, headers: Vec<RH>) {
        self.row_headers = headers;
    }

    fn set_cells(&mut self, cells: Vec<Vec<C>>) {
        self.cells = cells;
    }

    fn set_column_header(&mut self, column: usize, header: CH) {
        if let Some(slot) = self.column_headers.get_mut(column) {
            *slot = header;
        }
    }

    fn insert_row(&mut self, row: usize, header: RH, cells: Vec<C>) {
        let row = row.min(self.row_headers.len());
        self.row_headers.insert(row, header);
        self.cells.insert(row.min(self.cells.len()), cells);
    }

    fn remove_row(&mut self, row: usize) {
        if row < self.row_headers.len() {
            self.row_headers.remove(row);
        }
        if row < self.cells.len() {
            self.cells.remove(row);
        }
    }

    fn insert_column(&mut self, column: usize, header: CH, cells: Vec<C>) {
        let column = column.min(self.column_headers.len());
        self.column_headers.insert(column, header);
        for (row, cell) in cells.into_iter().enumerate() {
            if let Some(r) = self.cells.get_mut(row) {
                r.insert(column.min(r.len()), cell);
            }
        }
    }

    fn remove_column(&mut self, column: usize) {
        if column < self.column_headers.len() {
            self.column_headers.remove(column);
        }
        for r in &mut self.cells {
            if column < r.len() {
                r.remove(column);
            }
        }
    }
}
