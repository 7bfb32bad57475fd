//! The top-level table coordinator.
//!
//! Owns the width cache, the negotiator, the scroll coordinator, the
//! selection machine, and the visibility/sort/filter/pagination handlers,
//! and wires them to the adapter and view provider seams. Every public
//! operation of the table funnels through here.

use crate::adapter::TableAdapter;
use crate::config::TableConfig;
use crate::error::Result;
use crate::filter::{Filter, FilterOutcome, FilterState};
use crate::layout::{ColumnWidthNegotiator, FitTask, WidthCache};
use crate::listener::TableListener;
use crate::pagination::Pager;
use crate::provider::ViewProvider;
use crate::scroll::{GesturePhase, ScrollCoordinator};
use crate::selection::SelectionStateMachine;
use crate::sort::ColumnSorter;
use crate::state::SavedState;
use crate::types::{Axis, PaneId, ScrollPosition, Selection, SortOrder};
use crate::visibility::VisibilityTracker;

/// Owns and wires the synchronization core to the three panes and the
/// adapter boundary.
pub struct TableCoordinator<A: TableAdapter, P: ViewProvider> {
    adapter: A,
    provider: P,
    config: TableConfig,
    width_cache: WidthCache,
    negotiator: ColumnWidthNegotiator,
    scroll: ScrollCoordinator,
    selection: SelectionStateMachine,
    visibility: VisibilityTracker<A>,
    sorter: ColumnSorter,
    filter_state: FilterState<A>,
    pager: Option<Pager<A>>,
    listener: Option<Box<dyn TableListener>>,
}

impl<A: TableAdapter, P: ViewProvider> TableCoordinator<A, P> {
    pub fn new(adapter: A, provider: P) -> Self {
        Self::with_config(adapter, provider, TableConfig::default())
    }

    pub fn with_config(adapter: A, provider: P, config: TableConfig) -> Self {
        Self {
            adapter,
            provider,
            config,
            width_cache: WidthCache::new(),
            negotiator: ColumnWidthNegotiator::new(),
            scroll: ScrollCoordinator::new(),
            selection: SelectionStateMachine::new(),
            visibility: VisibilityTracker::new(),
            sorter: ColumnSorter::new(),
            filter_state: FilterState::new(),
            pager: None,
            listener: None,
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn set_listener(&mut self, listener: Box<dyn TableListener>) {
        self.listener = Some(listener);
    }

    /// Turn on pagination with the given page size.
    pub fn enable_pagination(&mut self, items_per_page: usize) {
        let mut pager = Pager::new(items_per_page);
        pager.reload(&mut self.adapter);
        self.pager = Some(pager);
    }

    pub fn disable_pagination(&mut self) {
        self.pager = None;
    }

    pub fn current_page(&self) -> Option<usize> {
        self.pager.as_ref().map(Pager::current_page)
    }

    pub fn page_count(&self) -> Option<usize> {
        self.pager.as_ref().map(Pager::page_count)
    }

    pub fn go_to_page(&mut self, page: usize) {
        if let Some(pager) = self.pager.as_mut() {
            pager.go_to_page(&mut self.adapter, page);
            let (page, count) = (pager.current_page(), pager.page_count());
            if let Some(listener) = self.listener.as_mut() {
                listener.on_page_turned(page, count);
            }
        }
    }

    // ------------------------------------------------------------------
    // Data
    // ------------------------------------------------------------------

    /// Replace the whole dataset. Cached widths are dropped wholesale and
    /// the unfiltered snapshot is re-captured.
    pub fn set_data(
        &mut self,
        column_headers: Vec<A::ColumnHeader>,
        row_headers: Vec<A::RowHeader>,
        cells: Vec<Vec<A::Cell>>,
    ) {
        self.adapter.set_column_headers(column_headers);
        self.adapter.set_row_headers(row_headers);
        self.adapter.set_cells(cells);
        self.filter_state.capture_originals(&self.adapter);
        self.width_cache.clear();
        self.negotiator.reset();
        if let Some(pager) = self.pager.as_mut() {
            pager.reload(&mut self.adapter);
        }
    }

    pub fn set_column_headers(&mut self, headers: Vec<A::ColumnHeader>) {
        self.adapter.set_column_headers(headers);
        self.width_cache.clear();
    }

    pub fn set_row_headers(&mut self, headers: Vec<A::RowHeader>) {
        self.adapter.set_row_headers(headers);
        self.filter_state.capture_originals(&self.adapter);
    }

    pub fn set_cells(&mut self, cells: Vec<Vec<A::Cell>>) {
        self.adapter.set_cells(cells);
        self.filter_state.capture_originals(&self.adapter);
        self.width_cache.clear();
    }

    /// Replace a single column header item; only that column's cached width
    /// is dropped.
    pub fn set_column_header(&mut self, column: usize, header: A::ColumnHeader) {
        self.adapter.set_column_header(column, header);
        self.width_cache.remove_column_width(column);
    }

    // ------------------------------------------------------------------
    // Column widths
    // ------------------------------------------------------------------

    /// Cached width of a cell, measuring the live view on a miss.
    pub fn measure(&mut self, row: usize, column: usize) -> Option<i32> {
        self.negotiator
            .measure_cell(&mut self.provider, &mut self.width_cache, row, column)
    }

    /// Resolve a column's width from its header and all realized cells and
    /// apply it everywhere. Idempotent until the data changes.
    pub fn reconcile_column(&mut self, column: usize) -> Option<i32> {
        self.negotiator.reconcile(
            &mut self.provider,
            &mut self.width_cache,
            &mut self.scroll,
            column,
        )
    }

    /// Drop one column's cached width and re-resolve it from live views.
    pub fn remeasure_column(&mut self, column: usize) {
        self.width_cache.remove_column_width(column);
        self.negotiator.reconcile(
            &mut self.provider,
            &mut self.width_cache,
            &mut self.scroll,
            column,
        );
    }

    /// Override a column's width, bypassing negotiation for it.
    pub fn set_column_width(&mut self, column: usize, width: i32) {
        self.width_cache.set_column_width(column, width);
        self.width_cache
            .set_column_cells_width(column, self.adapter.row_count(), width);
        self.provider
            .set_view_width(PaneId::ColumnHeader, column, width);
        if let Some((first_row, last_row)) = self.provider.visible_range(PaneId::CellGrid) {
            for row in first_row..=last_row {
                if self.provider.view_bounds(PaneId::CellRow(row), column).is_some() {
                    self.provider.set_view_width(PaneId::CellRow(row), column, width);
                }
            }
        }
        self.negotiator
            .custom_header_layout(&mut self.provider, &self.width_cache);
    }

    pub fn column_width(&self, column: usize) -> Option<i32> {
        self.width_cache.column_width(column)
    }

    pub fn clear_cached_widths(&mut self) {
        self.width_cache.clear();
    }

    /// Queue a full fit for after the host's next layout pass.
    pub fn schedule_full_fit(&mut self) {
        self.negotiator.schedule(FitTask::AllColumns {
            scrolling_left: false,
        });
    }

    /// Drain deferred fit tasks. The host calls this once its layout pass
    /// has completed.
    pub fn run_deferred_fits(&mut self) {
        self.negotiator
            .run_deferred_fits(&mut self.provider, &mut self.width_cache);
    }

    pub fn has_pending_fits(&self) -> bool {
        self.negotiator.has_pending_fits()
    }

    // ------------------------------------------------------------------
    // Host framework callbacks
    // ------------------------------------------------------------------

    /// A cell view in `row`'s sub-pane was measured.
    pub fn notify_cell_measured(&mut self, row: usize, column: usize) {
        self.negotiator.on_cell_measured(
            &mut self.provider,
            &mut self.width_cache,
            &mut self.scroll,
            &self.config,
            row,
            column,
        );
    }

    /// A row sub-pane was measured within the cell grid.
    pub fn notify_row_measured(&mut self, row: usize) {
        self.negotiator.on_row_measured(
            &mut self.provider,
            &mut self.width_cache,
            &mut self.scroll,
            &self.config,
            row,
        );
    }

    /// A row sub-pane scrolled into view. It is aligned to the canonical
    /// horizontal position before display and its cells adopt the current
    /// selection visuals.
    pub fn notify_row_attached(&mut self, row: usize) {
        self.scroll.on_row_attached(&mut self.provider, row);
        if let Some((first, last)) = self.provider.visible_range(PaneId::CellRow(row)) {
            for column in first..=last {
                self.notify_view_bound(PaneId::CellRow(row), column);
            }
        }
    }

    /// A single view was bound (realized or rebound out of the recycle
    /// pool): it adopts the resolved width, the current selection visuals,
    /// and — for column headers — the recorded sort indicator.
    pub fn notify_view_bound(&mut self, pane: PaneId, index: usize) {
        match pane {
            PaneId::ColumnHeader => {
                if let Some(width) = self.width_cache.column_width(index) {
                    self.provider.set_view_width(pane, index, width);
                }
                let order = self.sorter.sort_order(index);
                if order != SortOrder::Unsorted {
                    self.provider.set_sort_indicator(index, order);
                }
            }
            PaneId::CellRow(row) => {
                let width = self
                    .width_cache
                    .cell_width(row, index)
                    .or_else(|| self.width_cache.column_width(index));
                if let Some(width) = width {
                    self.provider.set_view_width(pane, index, width);
                }
            }
            PaneId::RowHeader | PaneId::CellGrid => {}
        }
        self.selection
            .refresh_view(&mut self.provider, &self.config, pane, index);
    }

    /// Touch-down on a pane. Returns `true` when the event is swallowed
    /// because another pane owns the gesture.
    pub fn on_touch_down(&mut self, pane: PaneId) -> bool {
        self.scroll.on_touch_down(&mut self.provider, pane)
    }

    pub fn on_touch_move(&mut self, pane: PaneId) -> bool {
        self.scroll.on_touch_move(pane)
    }

    pub fn on_touch_up(&mut self, pane: PaneId) {
        self.scroll.on_touch_up(&mut self.provider, pane);
    }

    pub fn on_touch_cancel(&mut self, pane: PaneId) {
        self.scroll.on_touch_cancel(&mut self.provider, pane);
    }

    /// A scroll delta was delivered to a pane. Propagates it across the
    /// axis group and records the direction for the width machinery.
    pub fn on_scrolled(&mut self, pane: PaneId, delta: i32) {
        let targets = self.scroll.on_scrolled(&mut self.provider, pane, delta);
        match pane.axis() {
            Axis::Vertical => self.negotiator.note_vertical_scroll(delta),
            Axis::Horizontal => {
                if let PaneId::CellRow(row) = pane {
                    self.negotiator.note_horizontal_scroll(row, delta);
                }
                for target in targets {
                    if let PaneId::CellRow(row) = target {
                        self.negotiator.note_horizontal_scroll(row, delta);
                    }
                }
            }
        }
    }

    /// A pane's momentum settled to rest.
    pub fn on_scroll_settled(&mut self, pane: PaneId) {
        self.scroll.on_scroll_settled(&mut self.provider, pane);
        if pane.axis() == Axis::Vertical {
            self.negotiator.note_vertical_idle();
        }
    }

    pub fn gesture_phase(&self, axis: Axis) -> GesturePhase {
        self.scroll.gesture_phase(axis)
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    pub fn scroll_to_row(&mut self, row: usize) {
        self.scroll_to_row_with_offset(row, 0);
    }

    pub fn scroll_to_row_with_offset(&mut self, row: usize, offset: i32) {
        self.scroll
            .scroll_to_row(&mut self.provider, ScrollPosition::new(row, offset));
    }

    pub fn scroll_to_column(&mut self, column: usize) {
        self.scroll_to_column_with_offset(column, 0);
    }

    pub fn scroll_to_column_with_offset(&mut self, column: usize, offset: i32) {
        self.scroll
            .scroll_to_column(&mut self.provider, ScrollPosition::new(column, offset));
    }

    pub fn row_scroll_position(&self) -> ScrollPosition {
        self.scroll.row_position(&self.provider)
    }

    pub fn column_scroll_position(&self) -> ScrollPosition {
        self.scroll.column_position(&self.provider)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select_cell(&mut self, row: usize, column: usize) {
        self.selection
            .select_cell(&mut self.provider, &self.config, row, column);
        self.notify_selection_changed();
    }

    pub fn select_row(&mut self, row: usize) {
        self.selection
            .select_row(&mut self.provider, &self.config, row);
        self.notify_selection_changed();
    }

    pub fn select_column(&mut self, column: usize) {
        self.selection
            .select_column(&mut self.provider, &self.config, column);
        self.notify_selection_changed();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.provider, &self.config);
        self.notify_selection_changed();
    }

    pub fn selection(&self) -> Selection {
        self.selection.selection()
    }

    pub fn selection_machine(&self) -> &SelectionStateMachine {
        &self.selection
    }

    // ------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------

    pub fn hide_row(&mut self, row: usize) {
        self.visibility.hide_row(&mut self.adapter, row);
    }

    pub fn show_row(&mut self, row: usize) {
        self.visibility.show_row(&mut self.adapter, row);
    }

    pub fn is_row_visible(&self, row: usize) -> bool {
        self.visibility.is_row_visible(row)
    }

    pub fn show_all_hidden_rows(&mut self) {
        self.visibility.show_all_hidden_rows(&mut self.adapter);
    }

    pub fn clear_hidden_rows(&mut self) {
        self.visibility.clear_hidden_rows();
    }

    pub fn hide_column(&mut self, column: usize) {
        self.visibility.hide_column(&mut self.adapter, column);
    }

    pub fn show_column(&mut self, column: usize) {
        self.visibility.show_column(&mut self.adapter, column);
    }

    pub fn is_column_visible(&self, column: usize) -> bool {
        self.visibility.is_column_visible(column)
    }

    pub fn show_all_hidden_columns(&mut self) {
        self.visibility.show_all_hidden_columns(&mut self.adapter);
    }

    pub fn clear_hidden_columns(&mut self) {
        self.visibility.clear_hidden_columns();
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    pub fn sort_column(&mut self, column: usize, order: SortOrder) -> Result<()> {
        self.sorter
            .sort_column(&mut self.adapter, &mut self.provider, column, order)?;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_column_sort_changed(column, order);
        }
        Ok(())
    }

    pub fn sort_by_row_header(&mut self, order: SortOrder) -> Result<()> {
        self.sorter
            .sort_by_row_header(&mut self.adapter, &mut self.provider, order)?;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_row_header_sort_changed(order);
        }
        Ok(())
    }

    pub fn sort_order(&self, column: usize) -> SortOrder {
        self.sorter.sort_order(column)
    }

    pub fn row_header_sort_order(&self) -> SortOrder {
        self.sorter.row_header_sort_order()
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// Apply a filter set over the preserved unfiltered dataset. Reshaping
    /// the dataset invalidates every cached width.
    pub fn filter(&mut self, filter: &Filter) -> Result<()> {
        let outcome = self.filter_state.apply(&mut self.adapter, filter)?;
        self.width_cache.clear();
        self.negotiator.schedule(FitTask::AllColumns {
            scrolling_left: false,
        });
        if let Some(pager) = self.pager.as_mut() {
            pager.reload(&mut self.adapter);
        }
        if let Some(listener) = self.listener.as_mut() {
            match outcome {
                FilterOutcome::Filtered(rows) => listener.on_filter_changed(rows),
                FilterOutcome::Cleared => listener.on_filter_cleared(),
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persisted state
    // ------------------------------------------------------------------

    pub fn save_state(&self) -> SavedState {
        let row = self.scroll.row_position(&self.provider);
        let column = self.scroll.column_position(&self.provider);
        let selection = self.selection.selection();
        SavedState {
            row_position: row.index,
            row_offset: row.offset,
            column_position: column.index,
            column_offset: column.offset,
            selected_row: selection.row(),
            selected_column: selection.column(),
        }
    }

    /// Restore by replaying scroll-to and select operations.
    pub fn restore_state(&mut self, state: &SavedState) {
        self.scroll
            .scroll_to_column(&mut self.provider, state.column_scroll());
        self.scroll
            .scroll_to_row(&mut self.provider, state.row_scroll());
        self.selection.restore(state.selection());
    }

    fn notify_selection_changed(&mut self) {
        let selection = self.selection.selection();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_selection_changed(selection);
        }
    }
}
