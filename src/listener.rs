//! Outbound notifications to the embedding application.

use crate::types::{Selection, SortOrder};

/// Callbacks fired by the coordinator on state changes. All methods default
/// to no-ops so hosts implement only what they observe.
pub trait TableListener {
    fn on_selection_changed(&mut self, _selection: Selection) {}

    fn on_column_sort_changed(&mut self, _column: usize, _order: SortOrder) {}

    fn on_row_header_sort_changed(&mut self, _order: SortOrder) {}

    /// Fired after a filter application with the number of surviving rows.
    fn on_filter_changed(&mut self, _visible_rows: usize) {}

    /// Fired when the last filter item is removed and the original dataset
    /// is restored.
    fn on_filter_cleared(&mut self) {}

    fn on_page_turned(&mut self, _page: usize, _page_count: usize) {}
}
