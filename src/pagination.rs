//! Pagination over the filtered/sorted dataset.
//!
//! The pager keeps the full (already filtered/sorted) lists and writes one
//! page window through the adapter at a time. Pages are 1-based. The page
//! set is re-derived whenever the dataset reshapes, preserving the current
//! page where possible.

use tracing::debug;

use crate::adapter::TableAdapter;

const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Windowed page over the current dataset.
pub struct Pager<A: TableAdapter> {
    items_per_page: usize,
    current_page: usize,
    all_row_headers: Vec<A::RowHeader>,
    all_cells: Vec<Vec<A::Cell>>,
}

impl<A: TableAdapter> Default for Pager<A> {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            current_page: 1,
            all_row_headers: Vec::new(),
            all_cells: Vec::new(),
        }
    }
}

impl<A: TableAdapter> Pager<A> {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
            ..Self::default()
        }
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.all_row_headers.len().div_ceil(self.items_per_page).max(1)
    }

    /// Capture the full dataset and show the current page. Called after any
    /// data change (bulk set, filter, sort).
    pub fn reload(&mut self, adapter: &mut A) {
        self.all_row_headers = adapter.row_headers();
        self.all_cells = adapter.cell_rows();
        let page = self.current_page.clamp(1, self.page_count());
        self.go_to_page(adapter, page);
    }

    /// Jump to a page, clamped to the valid range. Writes that page's rows
    /// through the adapter.
    pub fn go_to_page(&mut self, adapter: &mut A, page: usize) {
        self.current_page = page.clamp(1, self.page_count());
        let start = (self.current_page - 1) * self.items_per_page;
        let end = (start + self.items_per_page).min(self.all_row_headers.len());

        let headers: Vec<A::RowHeader> = self
            .all_row_headers
            .get(start..end)
            .map(<[A::RowHeader]>::to_vec)
            .unwrap_or_default();
        let cells: Vec<Vec<A::Cell>> = self
            .all_cells
            .get(start..end)
            .map(<[Vec<A::Cell>]>::to_vec)
            .unwrap_or_default();

        debug!(
            page = self.current_page,
            rows = headers.len(),
            "page turned"
        );
        adapter.set_row_headers(headers);
        adapter.set_cells(cells);
    }

    pub fn next_page(&mut self, adapter: &mut A) {
        self.go_to_page(adapter, self.current_page + 1);
    }

    pub fn previous_page(&mut self, adapter: &mut A) {
        self.go_to_page(adapter, self.current_page.saturating_sub(1));
    }

    pub fn set_items_per_page(&mut self, adapter: &mut A, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
        self.go_to_page(adapter, 1);
    }
}
