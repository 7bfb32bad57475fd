//! Column and row-header sorting.
//!
//! Row headers and cell rows are combined into one record per row and
//! sorted once with the chosen comparator, so the two lists can never fall
//! out of lockstep. Per-column sort state is answered from recorded
//! directives.

use std::cmp::Ordering;

use tracing::debug;

use crate::adapter::{Orderable, TableAdapter};
use crate::error::{Result, TableGridError};
use crate::provider::ViewProvider;
use crate::types::{SortDirective, SortOrder};

/// One row of the table as a sortable unit: its header plus its cells.
#[derive(Debug, Clone)]
struct RowRecord<H, C> {
    header: H,
    cells: Vec<C>,
}

/// Sorts the dataset and tracks per-column sort state.
#[derive(Debug, Default)]
pub struct ColumnSorter {
    directives: Vec<SortDirective>,
    row_header_order: SortOrder,
}

impl ColumnSorter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sort state of a column; `Unsorted` when never sorted.
    pub fn sort_order(&self, column: usize) -> SortOrder {
        self.directives
            .iter()
            .find(|d| d.column == column)
            .map(|d| d.order)
            .unwrap_or(SortOrder::Unsorted)
    }

    pub fn row_header_sort_order(&self) -> SortOrder {
        self.row_header_order
    }

    pub fn is_sorting(&self) -> bool {
        !self.directives.is_empty()
    }

    pub fn clear_sort_state(&mut self) {
        self.directives.clear();
        self.row_header_order = SortOrder::Unsorted;
    }

    /// Sort all rows by the cell content of one column.
    ///
    /// The realized header view must support sort-state display; a header
    /// without the capability is a configuration bug and raises immediately.
    pub fn sort_column<A, P>(
        &mut self,
        adapter: &mut A,
        provider: &mut P,
        column: usize,
        order: SortOrder,
    ) -> Result<()>
    where
        A: TableAdapter,
        P: ViewProvider,
    {
        self.ensure_sortable(provider, column)?;
        if order == SortOrder::Unsorted {
            return Ok(());
        }

        let mut records = combined_records(adapter);
        records.sort_by(|a, b| {
            let lhs = a.cells.get(column).map(Orderable::order_value);
            let rhs = b.cells.get(column).map(Orderable::order_value);
            directed(compare_optional(lhs.as_ref(), rhs.as_ref()), order)
        });
        debug!(column, ?order, rows = records.len(), "column sorted");
        write_back(adapter, records);

        self.record_directive(column, order);
        provider.set_sort_indicator(column, order);
        Ok(())
    }

    /// Sort all rows by their row header content.
    pub fn sort_by_row_header<A, P>(
        &mut self,
        adapter: &mut A,
        _provider: &mut P,
        order: SortOrder,
    ) -> Result<()>
    where
        A: TableAdapter,
        P: ViewProvider,
    {
        if order == SortOrder::Unsorted {
            return Ok(());
        }

        let mut records = combined_records(adapter);
        records.sort_by(|a, b| {
            directed(
                a.header.order_value().compare(&b.header.order_value()),
                order,
            )
        });
        debug!(?order, rows = records.len(), "rows sorted by row header");
        write_back(adapter, records);

        self.row_header_order = order;
        Ok(())
    }

    fn record_directive(&mut self, column: usize, order: SortOrder) {
        self.directives.retain(|d| d.column != column);
        if order != SortOrder::Unsorted {
            self.directives.push(SortDirective::new(column, order));
        }
    }

    fn ensure_sortable<P: ViewProvider>(&self, provider: &P, column: usize) -> Result<()> {
        // An unrealized header cannot be checked; its indicator applies on
        // realization.
        if provider.view_bounds(crate::types::PaneId::ColumnHeader, column).is_some()
            && !provider.header_capabilities(column).sortable
        {
            return Err(TableGridError::SorterRequired { column });
        }
        Ok(())
    }
}

fn combined_records<A: TableAdapter>(adapter: &A) -> Vec<RowRecord<A::RowHeader, A::Cell>> {
    adapter
        .row_headers()
        .into_iter()
        .zip(adapter.cell_rows())
        .map(|(header, cells)| RowRecord { header, cells })
        .collect()
}

fn write_back<A: TableAdapter>(adapter: &mut A, records: Vec<RowRecord<A::RowHeader, A::Cell>>) {
    let mut headers = Vec::with_capacity(records.len());
    let mut cells = Vec::with_capacity(records.len());
    for record in records {
        headers.push(record.header);
        cells.push(record.cells);
    }
    adapter.set_row_headers(headers);
    adapter.set_cells(cells);
}

fn compare_optional(
    lhs: Option<&crate::types::CellValue>,
    rhs: Option<&crate::types::CellValue>,
) -> Ordering {
    match (lhs, rhs) {
        (Some(a), Some(b)) => a.compare(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Descending => ordering.reverse(),
        _ => ordering,
    }
}
