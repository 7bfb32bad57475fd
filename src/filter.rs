//! Table filtering.
//!
//! A filter set holds at most one whole-table item and one item per column.
//! Application narrows a preserved snapshot of the unfiltered lists, one
//! filter item at a time, and writes the surviving rows back through the
//! adapter. Clearing every item restores the original lists.

use tracing::debug;

use crate::adapter::{Filterable, TableAdapter, TableItem};
use crate::error::{Result, TableGridError};

/// What a single filter item matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// Any cell of the row.
    All,
    /// One column's cell only.
    Column(usize),
}

/// One keyword filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterItem {
    pub scope: FilterScope,
    pub keyword: String,
}

/// An editable set of filter items.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    items: Vec<FilterItem>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set, update, or (with an empty keyword) remove the whole-table item.
    pub fn set(&mut self, keyword: &str) {
        self.set_scoped(FilterScope::All, keyword);
    }

    /// Set, update, or (with an empty keyword) remove one column's item.
    pub fn set_column(&mut self, column: usize, keyword: &str) {
        self.set_scoped(FilterScope::Column(column), keyword);
    }

    pub fn items(&self) -> &[FilterItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn set_scoped(&mut self, scope: FilterScope, keyword: &str) {
        let existing = self.items.iter().position(|item| item.scope == scope);
        match (existing, keyword.is_empty()) {
            (Some(index), true) => {
                self.items.remove(index);
            }
            (Some(index), false) => {
                if let Some(item) = self.items.get_mut(index) {
                    item.keyword = keyword.to_string();
                }
            }
            (None, false) => self.items.push(FilterItem {
                scope,
                keyword: keyword.to_string(),
            }),
            (None, true) => {}
        }
    }
}

/// Preserved unfiltered dataset plus the filter application machinery.
pub struct FilterState<A: TableAdapter> {
    original_row_headers: Option<Vec<A::RowHeader>>,
    original_cells: Option<Vec<Vec<A::Cell>>>,
}

impl<A: TableAdapter> Default for FilterState<A> {
    fn default() -> Self {
        Self {
            original_row_headers: None,
            original_cells: None,
        }
    }
}

/// Outcome of one filter application, for listener dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Filter items applied; this many rows survive.
    Filtered(usize),
    /// The set was empty; originals restored.
    Cleared,
}

impl<A: TableAdapter> FilterState<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the unfiltered dataset. Called whenever the adapter's row
    /// header or cell lists are replaced wholesale.
    pub fn capture_originals(&mut self, adapter: &A) {
        self.original_row_headers = Some(adapter.row_headers());
        self.original_cells = Some(adapter.cell_rows());
    }

    /// Apply the filter set over the preserved originals and write the
    /// result through the adapter.
    pub fn apply(&mut self, adapter: &mut A, filter: &Filter) -> Result<FilterOutcome> {
        let (Some(original_rows), Some(original_cells)) =
            (&self.original_row_headers, &self.original_cells)
        else {
            return Ok(FilterOutcome::Cleared);
        };

        if filter.is_empty() {
            adapter.set_row_headers(original_rows.clone());
            adapter.set_cells(original_cells.clone());
            debug!("filter cleared, originals restored");
            return Ok(FilterOutcome::Cleared);
        }

        let mut rows = original_rows.clone();
        let mut cells = original_cells.clone();
        for item in filter.items() {
            let keep = Self::matching_rows(&cells, item)?;
            rows = filter_by_mask(rows, &keep);
            cells = filter_by_mask(cells, &keep);
        }

        let surviving = rows.len();
        debug!(surviving, "filter applied");
        adapter.set_row_headers(rows);
        adapter.set_cells(cells);
        Ok(FilterOutcome::Filtered(surviving))
    }

    fn matching_rows(cells: &[Vec<A::Cell>], item: &FilterItem) -> Result<Vec<bool>> {
        let keyword = item.keyword.to_lowercase();
        let mut keep = Vec::with_capacity(cells.len());
        for (row, row_cells) in cells.iter().enumerate() {
            let matched = match item.scope {
                FilterScope::All => {
                    let mut any = false;
                    for (column, cell) in row_cells.iter().enumerate() {
                        if cell_matches(cell, &keyword, row, column)? {
                            any = true;
                            break;
                        }
                    }
                    any
                }
                FilterScope::Column(column) => match row_cells.get(column) {
                    Some(cell) => cell_matches(cell, &keyword, row, column)?,
                    None => false,
                },
            };
            keep.push(matched);
        }
        Ok(keep)
    }
}

fn cell_matches<C: TableItem + Filterable>(
    cell: &C,
    keyword: &str,
    row: usize,
    column: usize,
) -> Result<bool> {
    let Some(cell_keyword) = cell.filter_keyword() else {
        return Err(TableGridError::FilterableRequired { row, column });
    };
    Ok(cell_keyword.to_lowercase().contains(keyword))
}

fn filter_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(keep.iter().copied())
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}
