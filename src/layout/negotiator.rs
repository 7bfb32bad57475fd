//! The fit/reconcile engine.
//!
//! A column's final width is the max natural width over its header and all
//! realized cells. Off-screen rows have no live views, so resolution is
//! incremental: cells adopt the resolved width as they are measured, and a
//! full fit pass runs only when a measurement disagrees with the header.
//!
//! Two execution modes exist. The immediate pass runs inside the current
//! layout pass (vertical scrolling, first population). The deferred pass is
//! queued and drained by the host after its layout pass completes, since
//! horizontal edge values are only authoritative once layout has finished.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use crate::config::TableConfig;
use crate::layout::WidthCache;
use crate::provider::{ScrollActivity, ViewProvider};
use crate::scroll::ScrollCoordinator;
use crate::types::{PaneId, ScrollPosition};

/// Sentinel for fit passes that must not touch leading edges.
const IGNORE_LEFT: i32 = -99_999;

/// Per-row fit bookkeeping, mirroring the per-sub-pane layout state.
#[derive(Debug, Clone, Copy, Default)]
struct RowFitState {
    /// A header width changed while this row measured; a vertical-scroll
    /// pass must re-fit all columns.
    need_vertical_fit: bool,
    /// A header width changed; a horizontal-scroll pass may need to re-fit
    /// the edge column.
    need_horizontal_fit: bool,
    /// Last horizontal scroll delta seen by this row's sub-pane; sign gives
    /// the scroll direction, 0 means not horizontally scrolling.
    last_dx: i32,
}

/// A fit scheduled to run once the host's layout pass completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitTask {
    AllColumns { scrolling_left: bool },
    Column { column: usize, scrolling_left: bool },
}

/// Iterates visible rows/columns to compute and propagate column widths.
#[derive(Debug, Default)]
pub struct ColumnWidthNegotiator {
    row_states: HashMap<usize, RowFitState>,
    /// Some cell edge moved; left/right values need re-deriving even where
    /// widths already agree.
    need_set_left: bool,
    /// First-population fit still owed.
    need_fit: bool,
    /// Last vertical scroll delta; sign gives the direction for
    /// direction-aware row iteration. 0 at rest.
    last_dy: i32,
    pending: VecDeque<FitTask>,
}

impl ColumnWidthNegotiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the vertical scroll direction for the next fit pass.
    pub fn note_vertical_scroll(&mut self, dy: i32) {
        self.last_dy = dy;
    }

    /// The vertical axis settled; direction is unknown again.
    pub fn note_vertical_idle(&mut self) {
        self.last_dy = 0;
    }

    /// Record the horizontal scroll direction seen by one row's sub-pane.
    pub fn note_horizontal_scroll(&mut self, row: usize, dx: i32) {
        self.row_states.entry(row).or_default().last_dx = dx;
    }

    /// Cached width of a cell, measuring the live view on a miss.
    pub fn measure_cell<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        row: usize,
        column: usize,
    ) -> Option<i32> {
        if let Some(width) = cache.cell_width(row, column) {
            return Some(width);
        }
        let width = provider.natural_width(PaneId::CellRow(row), column)?;
        cache.set_cell_width(row, column, width);
        Some(width)
    }

    /// Measurement callback for a cell view in `row`'s sub-pane.
    ///
    /// A cell whose cached width already agrees with the header adopts the
    /// resolved width without triggering any reconciliation; only a
    /// disagreement starts a localized fit.
    pub fn on_cell_measured<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        scroll: &mut ScrollCoordinator,
        config: &TableConfig,
        row: usize,
        column: usize,
    ) {
        if config.has_fixed_width {
            return;
        }

        let pane = PaneId::CellRow(row);
        let cell_cache = cache.cell_width(row, column);
        let column_cache = cache.column_width(column);

        match (cell_cache, column_cache) {
            (Some(cell_width), Some(column_width)) if cell_width == column_width => {
                // Already negotiated; just enforce the width on the view.
                let current = provider.view_bounds(pane, column).map(|b| b.width());
                if current != Some(cell_width) {
                    provider.set_view_width(pane, column, cell_width);
                }
            }
            _ => {
                if provider.view_bounds(PaneId::ColumnHeader, column).is_none() {
                    // Header not realized; the fit happens when it is.
                    return;
                }
                self.fit_both(provider, cache, row, column, cell_cache, column_cache);
            }
        }

        if self.should_fit_row_edge(provider, scroll, row, column) {
            let scrolling_left = self.row_state(row).last_dx < 0;
            debug!(row, column, scrolling_left, "fit width from horizontal edge");
            self.fit_column(provider, cache, scroll, column, scrolling_left);
            self.row_states.entry(row).or_default().need_vertical_fit = false;
        }

        self.row_states.entry(row).or_default().need_horizontal_fit = false;
    }

    /// Measurement callback for a whole row sub-pane within the cell grid.
    ///
    /// During a vertical scroll this runs the immediate full fit when a
    /// header width changed; at rest it drives the one-time first-population
    /// fit once the bottom visible row has measured.
    pub fn on_row_measured<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        scroll: &mut ScrollCoordinator,
        config: &TableConfig,
        row: usize,
    ) {
        if config.has_fixed_width {
            return;
        }

        if provider.scroll_activity(PaneId::CellGrid) != ScrollActivity::Idle {
            if self.row_state(row).need_vertical_fit {
                let scrolling_up = self.last_dy < 0;
                debug!(row, scrolling_up, "fit width for all columns (vertical)");
                self.fit_all_columns(provider, cache, scroll, scrolling_up);
                self.row_states.entry(row).or_default().need_vertical_fit = false;
            }
            return;
        }

        // Populating for the first time; horizontal scrolling is excluded.
        if self.row_state(row).last_dx != 0 {
            return;
        }
        if self.row_state(row).need_vertical_fit {
            self.need_fit = true;
            self.row_states.entry(row).or_default().need_vertical_fit = false;
        }
        if self.need_fit {
            let last_header_row = provider
                .visible_range(PaneId::RowHeader)
                .map(|(_, last)| last);
            if last_header_row == Some(row) {
                debug!(row, "fit width for first population");
                self.fit_all_deferred(provider, cache);
                self.need_fit = false;
            }
        }
    }

    /// Immediate full fit across all visible columns, used while scrolling
    /// vertically. Rows are iterated opposite to the scroll direction so the
    /// row entering the screen is fitted before already-positioned rows.
    pub fn fit_all_columns<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        scroll: &mut ScrollCoordinator,
        scrolling_up: bool,
    ) {
        let Some((first, last)) = provider.visible_range(PaneId::ColumnHeader) else {
            return;
        };
        let Some(first_bounds) = provider.view_bounds(PaneId::ColumnHeader, first) else {
            return;
        };
        let mut left = first_bounds.left;
        for column in first..=last {
            left = self.fit_size(provider, cache, scroll, column, left, scrolling_up);
        }
        self.need_set_left = false;
    }

    /// Immediate fit of a single column, used when a horizontal scroll
    /// exposes a new edge column. If an edge moved while scrolling left the
    /// full pass is deferred to after the layout pass, when edge values are
    /// authoritative.
    pub fn fit_column<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        scroll: &mut ScrollCoordinator,
        column: usize,
        scrolling_left: bool,
    ) {
        self.fit_size(provider, cache, scroll, column, IGNORE_LEFT, false);
        if self.need_set_left && scrolling_left {
            self.pending.push_back(FitTask::AllColumns {
                scrolling_left: true,
            });
        }
    }

    /// Resolve one column's width from its header and all realized cells,
    /// then apply it everywhere it disagrees and restore contiguous edges.
    ///
    /// Returns the resolved width, or `None` when neither a cached nor a
    /// realized header width exists. Calling twice with no intervening data
    /// change produces no further width or position change.
    pub fn reconcile<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        scroll: &mut ScrollCoordinator,
        column: usize,
    ) -> Option<i32> {
        let header_width = cache
            .column_width(column)
            .or_else(|| provider.natural_width(PaneId::ColumnHeader, column))?;

        let mut resolved = header_width;
        if let Some((first_row, last_row)) = provider.visible_range(PaneId::CellGrid) {
            for row in first_row..=last_row {
                let width = cache
                    .cell_width(row, column)
                    .or_else(|| provider.natural_width(PaneId::CellRow(row), column));
                if let Some(width) = width {
                    resolved = resolved.max(width);
                }
            }
        }

        let changed = cache.column_width(column) != Some(resolved);
        if changed {
            debug!(column, resolved, "column width reconciled");
            cache.set_column_width(column, resolved);
            provider.set_view_width(PaneId::ColumnHeader, column, resolved);
        }

        self.fit_size(provider, cache, scroll, column, IGNORE_LEFT, false);
        if changed {
            // Edges moved; re-derive them from the header once widths match.
            self.fit_all_deferred(provider, cache);
        }
        self.need_set_left = false;
        Some(resolved)
    }

    /// Deferred full fit: recomputes header edges from the cache, corrects
    /// sub-pane scroll positions against the column header (the canonical
    /// horizontal source of truth), and aligns every realized cell's edges
    /// with its header.
    pub fn fit_all_deferred<P: ViewProvider>(&mut self, provider: &mut P, cache: &mut WidthCache) {
        self.custom_header_layout(provider, cache);
        let Some(anchor) = self.header_anchor(provider) else {
            return;
        };
        let Some((first, last)) = provider.visible_range(PaneId::ColumnHeader) else {
            return;
        };
        for column in first..=last {
            self.fit_size_deferred(provider, cache, column, anchor);
        }
        self.need_set_left = false;
    }

    /// Deferred fit of a single column.
    pub fn fit_column_deferred<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        column: usize,
    ) {
        self.custom_header_layout(provider, cache);
        let Some(anchor) = self.header_anchor(provider) else {
            return;
        };
        self.fit_size_deferred(provider, cache, column, anchor);
        self.need_set_left = false;
    }

    /// Queue a fit task to run after the host's layout pass.
    pub fn schedule(&mut self, task: FitTask) {
        self.pending.push_back(task);
    }

    pub fn has_pending_fits(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drain the deferred-fit queue. The host calls this (through the
    /// coordinator) once its current layout pass has completed.
    pub fn run_deferred_fits<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
    ) {
        while let Some(task) = self.pending.pop_front() {
            match task {
                FitTask::AllColumns { .. } => self.fit_all_deferred(provider, cache),
                FitTask::Column { column, .. } => {
                    self.fit_column_deferred(provider, cache, column);
                }
            }
        }
    }

    /// Re-layout visible column headers edge to edge from cached widths,
    /// without waiting for a host layout request.
    pub fn custom_header_layout<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &WidthCache,
    ) {
        let Some((first, last)) = provider.visible_range(PaneId::ColumnHeader) else {
            return;
        };
        let Some(first_bounds) = provider.view_bounds(PaneId::ColumnHeader, first) else {
            return;
        };
        let mut left = first_bounds.left;
        for column in first..=last {
            // Unresolved columns keep their live width so neighbors still
            // land edge to edge.
            let width = cache.column_width(column).or_else(|| {
                provider
                    .view_bounds(PaneId::ColumnHeader, column)
                    .map(|b| b.width())
            });
            let Some(width) = width else {
                continue;
            };
            let right = left + width;
            provider.layout_view_edges(PaneId::ColumnHeader, column, left, right);
            // +1 keeps the separator between neighboring columns.
            left = right + 1;
        }
    }

    /// Forget all per-row fit state, e.g. after a wholesale data swap.
    pub fn reset(&mut self) {
        self.row_states.clear();
        self.need_set_left = false;
        self.need_fit = false;
        self.last_dy = 0;
        self.pending.clear();
    }

    fn row_state(&self, row: usize) -> RowFitState {
        self.row_states.get(&row).copied().unwrap_or_default()
    }

    /// First fit of a (row, column) position: compare the cell's natural
    /// width with the header's, take the max, and push it into both views
    /// and both cache maps.
    fn fit_both<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        row: usize,
        column: usize,
        cell_cache: Option<i32>,
        column_cache: Option<i32>,
    ) {
        let pane = PaneId::CellRow(row);
        let mut cell_width = cell_cache
            .or_else(|| provider.natural_width(pane, column))
            .unwrap_or(0);
        let mut header_width = column_cache
            .or_else(|| provider.natural_width(PaneId::ColumnHeader, column))
            .unwrap_or(0);

        if cell_width != 0 {
            if header_width > cell_width {
                cell_width = header_width;
            } else if cell_width > header_width {
                header_width = cell_width;
            }

            let current = provider
                .view_bounds(PaneId::ColumnHeader, column)
                .map(|b| b.width());
            if current != Some(header_width) {
                provider.set_view_width(PaneId::ColumnHeader, column, header_width);
                let state = self.row_states.entry(row).or_default();
                state.need_vertical_fit = true;
                state.need_horizontal_fit = true;
            }
            cache.set_column_width(column, header_width);
        }

        provider.set_view_width(pane, column, cell_width);
        cache.set_cell_width(row, column, cell_width);
    }

    /// Fit one column across all realized rows. `left` is the column's
    /// leading edge, or [`IGNORE_LEFT`] when edges must not be touched.
    /// Returns the trailing edge, which becomes the next column's `left`.
    fn fit_size<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        scroll: &mut ScrollCoordinator,
        column: usize,
        left: i32,
        scrolling_up: bool,
    ) -> i32 {
        let Some(column_width) = cache.column_width(column) else {
            warn!(column, "no resolved width for column, skipping fit");
            return left;
        };
        let Some(header_bounds) = provider.view_bounds(PaneId::ColumnHeader, column) else {
            warn!(column, "column header not realized, skipping fit");
            return left;
        };
        let mut right = header_bounds.left + column_width + 1;

        let Some((first_row, last_row)) = provider.visible_range(PaneId::CellGrid) else {
            return right;
        };
        if scrolling_up {
            for row in (first_row..=last_row).rev() {
                right = self.fit_one(provider, cache, scroll, column, row, left, right, column_width);
            }
        } else {
            for row in first_row..=last_row {
                right = self.fit_one(provider, cache, scroll, column, row, left, right, column_width);
            }
        }
        right
    }

    /// Fit a single realized cell to the resolved column width, shifting its
    /// leading edge to stay contiguous with the neighboring column.
    #[allow(clippy::too_many_arguments)]
    fn fit_one<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        scroll: &mut ScrollCoordinator,
        column: usize,
        row: usize,
        left: i32,
        mut right: i32,
        column_width: i32,
    ) -> i32 {
        let pane = PaneId::CellRow(row);
        let Some(bounds) = provider.view_bounds(pane, column) else {
            // Not realized; it fits naturally on realization.
            return right;
        };

        let cell_cache = cache.cell_width(row, column);
        if cell_cache == Some(column_width) && !self.need_set_left {
            return right;
        }

        if cell_cache != Some(column_width) {
            provider.set_view_width(pane, column, column_width);
            cache.set_cell_width(row, column, column_width);
        }

        if left != IGNORE_LEFT && bounds.left != left {
            let shift = (bounds.left - left).abs();
            // A moved first-visible cell mid-scroll would otherwise snap;
            // fold the shift into the recorded scroll offset.
            let position = scroll.horizontal_position();
            let first_visible = provider.visible_range(pane).map(|(first, _)| first);
            if position.offset > 0
                && first_visible == Some(column)
                && provider.scroll_activity(PaneId::CellGrid) != ScrollActivity::Idle
            {
                let corrected = ScrollPosition::new(position.index, position.offset + shift);
                scroll.set_horizontal_offset(corrected.offset);
                provider.scroll_to(pane, corrected);
            }
        }

        let edge_stale =
            left != IGNORE_LEFT && (bounds.left != left || bounds.width() != column_width);
        if edge_stale {
            provider.layout_view_edges(pane, column, left, left + column_width);
            // +1 keeps the separator between neighboring columns.
            right = left + column_width + 1;
            self.need_set_left = true;
        } else if bounds.width() != column_width {
            self.need_set_left = true;
        }

        right
    }

    /// Scroll offset, first item, and first item edge of the column header
    /// pane — the canonical horizontal position sub-panes are corrected to.
    fn header_anchor<P: ViewProvider>(&self, provider: &P) -> Option<HeaderAnchor> {
        let (first, _) = provider.visible_range(PaneId::ColumnHeader)?;
        let bounds = provider.view_bounds(PaneId::ColumnHeader, first)?;
        Some(HeaderAnchor {
            scrolled: provider.scrolled_offset(PaneId::ColumnHeader),
            first_item: first,
            first_left: bounds.left,
        })
    }

    /// Deferred fit of one column: sub-panes out of step with the column
    /// header are corrected to it (never the reverse), then every realized
    /// cell adopts the header's exact edges.
    fn fit_size_deferred<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        cache: &mut WidthCache,
        column: usize,
        anchor: HeaderAnchor,
    ) {
        let column_width = cache.column_width(column);
        let Some(header_bounds) = provider.view_bounds(PaneId::ColumnHeader, column) else {
            return;
        };
        let Some((first_row, last_row)) = provider.visible_range(PaneId::CellGrid) else {
            return;
        };

        for row in first_row..=last_row {
            let pane = PaneId::CellRow(row);
            if provider.scrolled_offset(pane) != anchor.scrolled {
                provider.scroll_to(
                    pane,
                    ScrollPosition::new(anchor.first_item, anchor.first_left),
                );
            }

            let Some(bounds) = provider.view_bounds(pane, column) else {
                continue;
            };
            if let Some(column_width) = column_width {
                let cell_cache = cache.cell_width(row, column);
                if cell_cache == Some(column_width) && !self.need_set_left {
                    continue;
                }
                if cell_cache != Some(column_width) {
                    provider.set_view_width(pane, column, column_width);
                    cache.set_cell_width(row, column, column_width);
                }
            }
            // Header edges are authoritative after the layout pass.
            if bounds.left != header_bounds.left || bounds.right != header_bounds.right {
                provider.layout_view_edges(pane, column, header_bounds.left, header_bounds.right);
                self.need_set_left = true;
            }
        }
    }

    /// Whether this cell measurement should trigger a single-column fit:
    /// the row's sub-pane owns the horizontal gesture, the grid itself is at
    /// rest, the measuring row is the bottom visible one, and the measured
    /// cell is the edge column in the scroll direction.
    fn should_fit_row_edge<P: ViewProvider>(
        &self,
        provider: &P,
        scroll: &ScrollCoordinator,
        row: usize,
        column: usize,
    ) -> bool {
        let state = self.row_state(row);
        if !state.need_horizontal_fit {
            return false;
        }
        if scroll.is_scrolled_by_other(PaneId::CellRow(row)) {
            return false;
        }
        if !self.grid_ready_for_fit(provider, scroll, row) {
            return false;
        }
        let Some((first, last)) = provider.visible_range(PaneId::CellRow(row)) else {
            return false;
        };
        if state.last_dx > 0 {
            column == last
        } else if state.last_dx < 0 {
            column == first
        } else {
            false
        }
    }

    /// The grid is ready for a horizontal fit when it is vertically at rest
    /// and the measuring row is the bottom visible row (or next to it while
    /// the bottom one is still being scrolled by propagation).
    fn grid_ready_for_fit<P: ViewProvider>(
        &self,
        provider: &P,
        scroll: &ScrollCoordinator,
        row: usize,
    ) -> bool {
        if provider.scroll_activity(PaneId::CellGrid) != ScrollActivity::Idle {
            return false;
        }
        let Some((_, last_row)) = provider.visible_range(PaneId::CellGrid) else {
            return false;
        };
        if row == last_row {
            return true;
        }
        row + 1 == last_row && scroll.is_scrolled_by_other(PaneId::CellRow(last_row))
    }
}

/// Canonical horizontal position of the column header pane.
#[derive(Debug, Clone, Copy)]
struct HeaderAnchor {
    scrolled: i32,
    first_item: usize,
    first_left: i32,
}
