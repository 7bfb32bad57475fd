//! The windowed view boundary.
//!
//! The host's view-recycling framework implements [`ViewProvider`]; the core
//! drives realized views through it and never assumes an off-screen index
//! has a live view. Every per-view method takes a [`PaneId`] plus the item
//! index within that pane and returns `None`/no-ops when the view is not
//! currently realized.

use crate::types::{Color, HighlightState, PaneId, ScrollPosition, SortOrder, ViewBounds};

/// Momentum state of one pane, as reported by the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollActivity {
    #[default]
    Idle,
    /// The user's finger is driving the pane.
    Dragging,
    /// Released with velocity; momentum has not decayed yet.
    Settling,
}

/// Capability set a realized header view supports. The core queries
/// capabilities instead of downcasting view types.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    pub sortable: bool,
    pub filterable: bool,
    pub selectable: bool,
}

/// Windowed view pool operations consumed by the core.
pub trait ViewProvider {
    /// Inclusive (first, last) realized index range of a pane, or `None`
    /// when the pane has no realized views.
    fn visible_range(&self, pane: PaneId) -> Option<(usize, usize)>;

    /// First index whose view is entirely inside the pane's bounds.
    fn first_completely_visible(&self, pane: PaneId) -> Option<usize>;

    /// Current pixel bounds of a realized view.
    fn view_bounds(&self, pane: PaneId, index: usize) -> Option<ViewBounds>;

    /// Natural (wrap-content) width of a realized view, measured by the
    /// host framework.
    fn natural_width(&mut self, pane: PaneId, index: usize) -> Option<i32>;

    /// Force a realized view's width; the host re-measures it exactly.
    fn set_view_width(&mut self, pane: PaneId, index: usize, width: i32);

    /// Re-layout a realized view's horizontal edges within the current
    /// layout pass.
    fn layout_view_edges(&mut self, pane: PaneId, index: usize, left: i32, right: i32);

    /// Scroll a pane by a pixel delta along its axis.
    fn scroll_by(&mut self, pane: PaneId, delta: i32);

    /// Jump a pane to an (index, offset) position without animation.
    fn scroll_to(&mut self, pane: PaneId, position: ScrollPosition);

    /// Total pixels the pane has scrolled along its axis.
    fn scrolled_offset(&self, pane: PaneId) -> i32;

    fn scroll_activity(&self, pane: PaneId) -> ScrollActivity;

    /// Cancel any in-flight momentum.
    fn stop_scroll(&mut self, pane: PaneId);

    /// Push a highlight state into a realized view. `color` is `None` when
    /// color changes are suppressed; the state itself is always recorded.
    fn apply_highlight(
        &mut self,
        pane: PaneId,
        index: usize,
        state: HighlightState,
        color: Option<Color>,
    );

    /// Capability set of a realized column header view. Defaults apply when
    /// the view is not realized.
    fn header_capabilities(&self, column: usize) -> Capabilities;

    /// Update the sort indicator of a realized column header view.
    fn set_sort_indicator(&mut self, column: usize, order: SortOrder);
}
