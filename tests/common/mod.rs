//! Common test doubles for the adapter and view provider seams.
//!
//! `MockProvider` keeps a small physical model per pane (realized index
//! range, view bounds, natural widths, scroll bookkeeping) and records every
//! command the core issues, so tests can assert on exactly what reached the
//! view layer.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use std::collections::HashMap;

use tablegrid::adapter::{Filterable, Orderable, TableItem, VecTableAdapter};
use tablegrid::provider::{Capabilities, ScrollActivity, ViewProvider};
use tablegrid::types::{
    CellValue, Color, HighlightState, PaneId, ScrollPosition, SortOrder, ViewBounds,
};

// ============================================================================
// Adapter doubles
// ============================================================================

/// Header item (row or column) with a text label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: u64,
    pub label: String,
}

impl Header {
    pub fn new(id: u64, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
        }
    }
}

impl TableItem for Header {
    fn item_id(&self) -> u64 {
        self.id
    }
}

impl Orderable for Header {
    fn order_value(&self) -> CellValue {
        CellValue::Text(self.label.clone())
    }
}

/// Cell item carrying a keyword and an orderable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub id: u64,
    pub keyword: Option<String>,
    pub value: CellValue,
}

impl Cell {
    pub fn text(id: u64, text: &str) -> Self {
        Self {
            id,
            keyword: Some(text.to_string()),
            value: CellValue::Text(text.to_string()),
        }
    }

    pub fn number(id: u64, value: i64) -> Self {
        Self {
            id,
            keyword: Some(value.to_string()),
            value: CellValue::Int(value),
        }
    }

    /// A cell that cannot be filtered.
    pub fn unfilterable(id: u64) -> Self {
        Self {
            id,
            keyword: None,
            value: CellValue::None,
        }
    }
}

impl TableItem for Cell {
    fn item_id(&self) -> u64 {
        self.id
    }
}

impl Filterable for Cell {
    fn filter_keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }
}

impl Orderable for Cell {
    fn order_value(&self) -> CellValue {
        self.value.clone()
    }
}

pub type TestAdapter = VecTableAdapter<Header, Header, Cell>;

/// Build an adapter with `columns` x `rows` cells labeled "r<row>c<col>".
pub fn test_adapter(columns: usize, rows: usize) -> TestAdapter {
    use tablegrid::adapter::TableAdapter;

    let mut adapter = TestAdapter::new();
    adapter.set_column_headers(
        (0..columns)
            .map(|c| Header::new(1_000 + c as u64, &format!("col{c}")))
            .collect(),
    );
    adapter.set_row_headers(
        (0..rows)
            .map(|r| Header::new(2_000 + r as u64, &format!("row{r}")))
            .collect(),
    );
    adapter.set_cells(
        (0..rows)
            .map(|r| {
                (0..columns)
                    .map(|c| Cell::text((r * columns + c) as u64, &format!("r{r}c{c}")))
                    .collect()
            })
            .collect(),
    );
    adapter
}

// ============================================================================
// View provider double
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MockView {
    pub bounds: ViewBounds,
    pub natural_width: i32,
}

#[derive(Debug, Clone, Default)]
pub struct MockPane {
    pub visible: Option<(usize, usize)>,
    pub first_completely_visible: Option<usize>,
    pub views: HashMap<usize, MockView>,
    pub scrolled: i32,
    pub position: ScrollPosition,
    pub activity: ScrollActivity,
}

#[derive(Debug, Default)]
pub struct MockProvider {
    panes: HashMap<PaneId, MockPane>,
    pub unsortable_columns: Vec<usize>,
    pub scroll_by_calls: Vec<(PaneId, i32)>,
    pub scroll_to_calls: Vec<(PaneId, ScrollPosition)>,
    pub stop_scroll_calls: Vec<PaneId>,
    pub set_width_calls: Vec<(PaneId, usize, i32)>,
    pub layout_edges_calls: Vec<(PaneId, usize, i32, i32)>,
    pub highlight_calls: Vec<(PaneId, usize, HighlightState, Option<Color>)>,
    pub sort_indicators: HashMap<usize, SortOrder>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a provider with a fully realized window: `rows` row sub-panes
    /// and `columns` headers, every view `width` px wide and laid out edge
    /// to edge with a 1px separator.
    pub fn with_grid(rows: usize, columns: usize, width: i32) -> Self {
        let mut provider = Self::new();
        if columns > 0 {
            provider.realize_horizontal_pane(PaneId::ColumnHeader, columns, width);
        }
        if rows > 0 {
            let mut row_header = MockPane {
                visible: Some((0, rows - 1)),
                first_completely_visible: Some(0),
                ..MockPane::default()
            };
            let mut grid = MockPane {
                visible: Some((0, rows - 1)),
                first_completely_visible: Some(0),
                ..MockPane::default()
            };
            for row in 0..rows {
                let bounds = ViewBounds {
                    left: 0,
                    top: row as i32 * 21,
                    right: 40,
                    bottom: row as i32 * 21 + 20,
                };
                row_header.views.insert(
                    row,
                    MockView {
                        bounds,
                        natural_width: 40,
                    },
                );
                grid.views.insert(
                    row,
                    MockView {
                        bounds,
                        natural_width: width,
                    },
                );
            }
            provider.panes.insert(PaneId::RowHeader, row_header);
            provider.panes.insert(PaneId::CellGrid, grid);
            for row in 0..rows {
                provider.realize_horizontal_pane(PaneId::CellRow(row), columns, width);
            }
        }
        provider
    }

    fn realize_horizontal_pane(&mut self, pane: PaneId, columns: usize, width: i32) {
        let mut mock = MockPane {
            visible: Some((0, columns - 1)),
            first_completely_visible: Some(0),
            ..MockPane::default()
        };
        let mut left = 0;
        for column in 0..columns {
            mock.views.insert(
                column,
                MockView {
                    bounds: ViewBounds {
                        left,
                        top: 0,
                        right: left + width,
                        bottom: 20,
                    },
                    natural_width: width,
                },
            );
            left += width + 1;
        }
        self.panes.insert(pane, mock);
    }

    pub fn pane(&self, pane: PaneId) -> &MockPane {
        self.panes.get(&pane).expect("pane not configured")
    }

    pub fn pane_mut(&mut self, pane: PaneId) -> &mut MockPane {
        self.panes.entry(pane).or_default()
    }

    pub fn set_natural_width(&mut self, pane: PaneId, index: usize, width: i32) {
        if let Some(view) = self.pane_mut(pane).views.get_mut(&index) {
            view.natural_width = width;
        }
    }

    pub fn set_activity(&mut self, pane: PaneId, activity: ScrollActivity) {
        self.pane_mut(pane).activity = activity;
    }

    pub fn view_width(&self, pane: PaneId, index: usize) -> Option<i32> {
        self.panes
            .get(&pane)
            .and_then(|p| p.views.get(&index))
            .map(|v| v.bounds.width())
    }

    pub fn last_highlight(&self, pane: PaneId, index: usize) -> Option<HighlightState> {
        self.highlight_calls
            .iter()
            .rev()
            .find(|(p, i, _, _)| *p == pane && *i == index)
            .map(|(_, _, state, _)| *state)
    }

    pub fn scroll_by_count(&self, pane: PaneId) -> usize {
        self.scroll_by_calls.iter().filter(|(p, _)| *p == pane).count()
    }
}

impl ViewProvider for MockProvider {
    fn visible_range(&self, pane: PaneId) -> Option<(usize, usize)> {
        self.panes.get(&pane).and_then(|p| p.visible)
    }

    fn first_completely_visible(&self, pane: PaneId) -> Option<usize> {
        self.panes.get(&pane).and_then(|p| p.first_completely_visible)
    }

    fn view_bounds(&self, pane: PaneId, index: usize) -> Option<ViewBounds> {
        self.panes
            .get(&pane)
            .and_then(|p| p.views.get(&index))
            .map(|v| v.bounds)
    }

    fn natural_width(&mut self, pane: PaneId, index: usize) -> Option<i32> {
        self.panes
            .get(&pane)
            .and_then(|p| p.views.get(&index))
            .map(|v| v.natural_width)
    }

    fn set_view_width(&mut self, pane: PaneId, index: usize, width: i32) {
        self.set_width_calls.push((pane, index, width));
        if let Some(view) = self.pane_mut(pane).views.get_mut(&index) {
            view.bounds.right = view.bounds.left + width;
        }
    }

    fn layout_view_edges(&mut self, pane: PaneId, index: usize, left: i32, right: i32) {
        self.layout_edges_calls.push((pane, index, left, right));
        if let Some(view) = self.pane_mut(pane).views.get_mut(&index) {
            view.bounds.left = left;
            view.bounds.right = right;
        }
    }

    fn scroll_by(&mut self, pane: PaneId, delta: i32) {
        self.scroll_by_calls.push((pane, delta));
        self.pane_mut(pane).scrolled += delta;
    }

    fn scroll_to(&mut self, pane: PaneId, position: ScrollPosition) {
        self.scroll_to_calls.push((pane, position));
        let mock = self.pane_mut(pane);
        mock.position = position;
        // A deterministic stand-in for "total scrolled pixels" so panes
        // jumped to the same position compare equal.
        mock.scrolled = position.index as i32 * 1_000 + position.offset;
    }

    fn scrolled_offset(&self, pane: PaneId) -> i32 {
        self.panes.get(&pane).map(|p| p.scrolled).unwrap_or(0)
    }

    fn scroll_activity(&self, pane: PaneId) -> ScrollActivity {
        self.panes
            .get(&pane)
            .map(|p| p.activity)
            .unwrap_or(ScrollActivity::Idle)
    }

    fn stop_scroll(&mut self, pane: PaneId) {
        self.stop_scroll_calls.push(pane);
        self.pane_mut(pane).activity = ScrollActivity::Idle;
    }

    fn apply_highlight(
        &mut self,
        pane: PaneId,
        index: usize,
        state: HighlightState,
        color: Option<Color>,
    ) {
        self.highlight_calls.push((pane, index, state, color));
    }

    fn header_capabilities(&self, column: usize) -> Capabilities {
        Capabilities {
            sortable: !self.unsortable_columns.contains(&column),
            filterable: true,
            selectable: true,
        }
    }

    fn set_sort_indicator(&mut self, column: usize, order: SortOrder) {
        self.sort_indicators.insert(column, order);
    }
}
