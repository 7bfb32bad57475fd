//! Scroll coordination across the three panes.
//!
//! Each axis elects at most one gesture-owning pane; every scroll delta
//! delivered to the owner is re-applied to the other panes in that axis's
//! group and never back to the originator. The owner's listener stays
//! attached through momentum and is detached once the pane settles, at
//! which point the (first visible, pixel offset) position is recorded so
//! panes attached later start at the same visual position.

use tracing::debug;

use crate::provider::{ScrollActivity, ViewProvider};
use crate::types::{Axis, PaneId, ScrollPosition};

/// Per-axis gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Finger down, no movement yet.
    Touched(PaneId),
    /// Finger down and moving.
    Dragging(PaneId),
    /// Finger released with movement; momentum not yet decayed.
    Settling(PaneId),
}

impl GesturePhase {
    /// The pane currently owning the touch, if a finger is down.
    fn touch_owner(self) -> Option<PaneId> {
        match self {
            GesturePhase::Touched(pane) | GesturePhase::Dragging(pane) => Some(pane),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct AxisState {
    phase: GesturePhase,
    /// Pane whose scroll listener is attached; the only pane whose deltas
    /// propagate.
    listening: Option<PaneId>,
    last_touched: Option<PaneId>,
    moved: bool,
    /// Scrolled offset at touch-down, to tell a tap from a drag on release.
    down_offset: i32,
    /// Last recorded canonical position for this axis.
    position: ScrollPosition,
    /// Re-entrancy guard around delta propagation.
    propagating: bool,
}

impl AxisState {
    fn record_position<P: ViewProvider>(&mut self, provider: &P, pane: PaneId) {
        let index = match provider.first_completely_visible(pane) {
            Some(index) => index,
            None => {
                let Some((first, last)) = provider.visible_range(pane) else {
                    return;
                };
                // Two partially visible items: anchor on the second, which
                // is the one a fresh pane will align its leading edge to.
                if first == last {
                    first
                } else {
                    first + 1
                }
            }
        };
        let offset = provider
            .view_bounds(pane, index)
            .map(|bounds| match pane.axis() {
                Axis::Horizontal => bounds.left,
                Axis::Vertical => bounds.top,
            })
            .unwrap_or(0);
        self.position = ScrollPosition::new(index, offset);
    }
}

/// Keeps the three panes moving as one visual unit.
#[derive(Debug, Default)]
pub struct ScrollCoordinator {
    vertical: AxisState,
    horizontal: AxisState,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }

    /// Touch-down on `pane`. Returns `true` when the event must be swallowed
    /// because another pane of the same axis currently owns the gesture.
    pub fn on_touch_down<P: ViewProvider>(&mut self, provider: &mut P, pane: PaneId) -> bool {
        let state = self.axis_mut(pane.axis());
        if let Some(owner) = state.phase.touch_owner() {
            if owner != pane {
                return true;
            }
        }

        if provider.scroll_activity(pane) == ScrollActivity::Idle {
            if let Some(last) = state.last_touched {
                // The previously touched pane may still hold the listener if
                // the user switched panes before it settled.
                if last != pane && state.listening == Some(last) {
                    state.listening = None;
                    provider.stop_scroll(last);
                    debug!(?last, "scroll listener removed from last touched pane");
                }
            }
            state.down_offset = provider.scrolled_offset(pane);
            state.listening = Some(pane);
            state.moved = false;
            debug!(?pane, "scroll listener attached");
        }
        state.phase = GesturePhase::Touched(pane);
        false
    }

    /// Touch-move on `pane`. Returns `true` when swallowed (another owner).
    pub fn on_touch_move(&mut self, pane: PaneId) -> bool {
        let state = self.axis_mut(pane.axis());
        if let Some(owner) = state.phase.touch_owner() {
            if owner != pane {
                return true;
            }
        }
        // Release fires before momentum delivery; remember that the finger
        // actually moved so the release keeps the listener attached.
        state.moved = true;
        state.phase = GesturePhase::Dragging(pane);
        false
    }

    /// Touch release on `pane`.
    pub fn on_touch_up<P: ViewProvider>(&mut self, provider: &mut P, pane: PaneId) {
        let state = self.axis_mut(pane.axis());
        let offset = provider.scrolled_offset(pane);
        if state.down_offset == offset
            && !state.moved
            && provider.scroll_activity(pane) == ScrollActivity::Idle
        {
            // A tap: nothing to propagate, detach immediately.
            if state.listening == Some(pane) {
                state.listening = None;
                debug!(?pane, "scroll listener removed on tap release");
            }
            state.phase = GesturePhase::Idle;
        } else {
            state.phase = GesturePhase::Settling(pane);
        }
        state.last_touched = Some(pane);
    }

    /// System-initiated gesture cancellation, e.g. the outer vertical pane
    /// claimed the gesture. Records the position and detaches immediately so
    /// state is never left inconsistent.
    pub fn on_touch_cancel<P: ViewProvider>(&mut self, provider: &mut P, pane: PaneId) {
        let state = self.axis_mut(pane.axis());
        state.record_position(provider, pane);
        if state.listening == Some(pane) {
            state.listening = None;
            debug!(?pane, "scroll listener removed on cancel");
        }
        state.moved = false;
        state.last_touched = Some(pane);
        state.phase = GesturePhase::Idle;
    }

    /// A scroll delta was delivered to `pane`. If `pane` holds the axis
    /// listener the delta is re-applied to every other pane in the group;
    /// deltas from propagation targets (or re-entrant deliveries) are
    /// dropped here, which is what breaks the feedback loop.
    ///
    /// Returns the panes the delta was propagated to.
    pub fn on_scrolled<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        pane: PaneId,
        delta: i32,
    ) -> Vec<PaneId> {
        let axis = pane.axis();
        if self.axis(axis).propagating || self.axis(axis).listening != Some(pane) {
            return Vec::new();
        }

        self.axis_mut(axis).propagating = true;
        let targets = self.propagation_targets(provider, pane);
        for &target in &targets {
            provider.scroll_by(target, delta);
        }
        self.axis_mut(axis).propagating = false;
        targets
    }

    /// The pane's momentum decayed to rest. Records the canonical position
    /// and detaches the listener.
    pub fn on_scroll_settled<P: ViewProvider>(&mut self, provider: &mut P, pane: PaneId) {
        let axis = pane.axis();
        let state = self.axis_mut(axis);
        if state.listening == Some(pane) {
            state.record_position(provider, pane);
            state.listening = None;
            state.moved = false;
            debug!(?pane, "scroll listener removed on settle");
        }
        if state.phase == GesturePhase::Settling(pane) || state.phase.touch_owner() == Some(pane) {
            state.phase = GesturePhase::Idle;
        }

        // A horizontal gesture starts with a vertical touch-down, which may
        // have left a vertical listener attached; detach it now.
        if axis == Axis::Horizontal {
            let keep_grid = self.horizontal.last_touched == Some(PaneId::ColumnHeader);
            self.detach_vertical_leftover(provider, !keep_grid);
        }
    }

    /// A cell row scrolled into view: align its fresh sub-pane with the last
    /// recorded canonical horizontal position before it is displayed.
    pub fn on_row_attached<P: ViewProvider>(&mut self, provider: &mut P, row: usize) {
        provider.scroll_to(PaneId::CellRow(row), self.horizontal.position);
    }

    /// Programmatic horizontal scroll. The column header moves first; it is
    /// the canonical pane the width-fitting machinery compares against.
    pub fn scroll_to_column<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        position: ScrollPosition,
    ) {
        self.horizontal.position = position;
        provider.scroll_to(PaneId::ColumnHeader, position);
        if let Some((first, last)) = provider.visible_range(PaneId::CellGrid) {
            for row in first..=last {
                provider.scroll_to(PaneId::CellRow(row), position);
            }
        }
    }

    /// Programmatic vertical scroll of both vertical panes.
    pub fn scroll_to_row<P: ViewProvider>(&mut self, provider: &mut P, position: ScrollPosition) {
        self.vertical.position = position;
        provider.scroll_to(PaneId::RowHeader, position);
        provider.scroll_to(PaneId::CellGrid, position);
    }

    /// Current column scroll position, read from the column header pane.
    pub fn column_position<P: ViewProvider>(&self, provider: &P) -> ScrollPosition {
        self.read_position(provider, PaneId::ColumnHeader, self.horizontal.position)
    }

    /// Current row scroll position, read from the row header pane.
    pub fn row_position<P: ViewProvider>(&self, provider: &P) -> ScrollPosition {
        self.read_position(provider, PaneId::RowHeader, self.vertical.position)
    }

    /// The recorded canonical horizontal position.
    pub fn horizontal_position(&self) -> ScrollPosition {
        self.horizontal.position
    }

    /// Fold a width-fit edge shift into the recorded horizontal offset.
    pub fn set_horizontal_offset(&mut self, offset: i32) {
        self.horizontal.position.offset = offset;
    }

    pub fn gesture_phase(&self, axis: Axis) -> GesturePhase {
        self.axis(axis).phase
    }

    /// Pane currently holding the axis listener.
    pub fn listening(&self, axis: Axis) -> Option<PaneId> {
        self.axis(axis).listening
    }

    /// Whether scrolls reaching `pane` originate from propagation rather
    /// than from `pane` itself owning the gesture.
    pub fn is_scrolled_by_other(&self, pane: PaneId) -> bool {
        self.axis(pane.axis()).listening != Some(pane)
    }

    fn propagation_targets<P: ViewProvider>(&self, provider: &P, origin: PaneId) -> Vec<PaneId> {
        let mut targets = Vec::new();
        match origin.axis() {
            Axis::Vertical => {
                for pane in [PaneId::RowHeader, PaneId::CellGrid] {
                    if pane != origin {
                        targets.push(pane);
                    }
                }
            }
            Axis::Horizontal => {
                if origin != PaneId::ColumnHeader {
                    targets.push(PaneId::ColumnHeader);
                }
                if let Some((first, last)) = provider.visible_range(PaneId::CellGrid) {
                    for row in first..=last {
                        let pane = PaneId::CellRow(row);
                        if pane != origin {
                            targets.push(pane);
                        }
                    }
                }
            }
        }
        targets
    }

    fn read_position<P: ViewProvider>(
        &self,
        provider: &P,
        pane: PaneId,
        fallback: ScrollPosition,
    ) -> ScrollPosition {
        let Some((first, _)) = provider.visible_range(pane) else {
            return fallback;
        };
        let offset = provider
            .view_bounds(pane, first)
            .map(|bounds| match pane.axis() {
                Axis::Horizontal => bounds.left,
                Axis::Vertical => bounds.top,
            })
            .unwrap_or(0);
        ScrollPosition::new(first, offset)
    }

    /// Detach the vertical listener left over from the touch-down of a
    /// horizontal gesture, stopping the affected panes.
    fn detach_vertical_leftover<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        include_cell_grid: bool,
    ) {
        let state = &mut self.vertical;
        match state.last_touched {
            Some(PaneId::CellGrid) => {
                if state.listening == Some(PaneId::CellGrid) {
                    state.listening = None;
                }
                provider.stop_scroll(PaneId::CellGrid);
            }
            _ => {
                if state.listening == Some(PaneId::RowHeader) {
                    state.listening = None;
                }
                provider.stop_scroll(PaneId::RowHeader);
                if include_cell_grid {
                    if state.listening == Some(PaneId::CellGrid) {
                        state.listening = None;
                    }
                    provider.stop_scroll(PaneId::CellGrid);
                }
            }
        }
    }
}
