//! Selection tracking and highlight propagation.
//!
//! Exactly one logical selection (row, column, cell, or none) drives three
//! visual effects: direct highlight on the selected element(s), shadow
//! highlight on the orthogonal headers, and restoration of the previous
//! visuals when the selection moves or clears. Both the restore and apply
//! sub-steps are idempotent and skip views that are not currently realized;
//! the recorded state makes the correct visuals apply when such a view is
//! realized later.

use crate::config::TableConfig;
use crate::provider::ViewProvider;
use crate::types::{Color, HighlightState, PaneId, Selection};

/// Tracks the single selected row, column, or cell and recolors affected
/// views live as panes are recycled.
#[derive(Debug, Default)]
pub struct SelectionStateMachine {
    selection: Selection,
}

impl SelectionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Restore the selection slot without touching any view, e.g. when
    /// replaying persisted state before panes exist.
    pub fn restore(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn select_cell<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        config: &TableConfig,
        row: usize,
        column: usize,
    ) {
        self.clear_current_visuals(provider, config);
        self.selection = Selection::Cell { row, column };
        self.apply_current_visuals(provider, config);
    }

    pub fn select_row<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        config: &TableConfig,
        row: usize,
    ) {
        self.clear_current_visuals(provider, config);
        self.selection = Selection::Row(row);
        self.apply_current_visuals(provider, config);
    }

    pub fn select_column<P: ViewProvider>(
        &mut self,
        provider: &mut P,
        config: &TableConfig,
        column: usize,
    ) {
        self.clear_current_visuals(provider, config);
        self.selection = Selection::Column(column);
        self.apply_current_visuals(provider, config);
    }

    pub fn clear<P: ViewProvider>(&mut self, provider: &mut P, config: &TableConfig) {
        self.clear_current_visuals(provider, config);
        self.selection = Selection::None;
    }

    /// True for the selected cell itself, and for every cell of a selected
    /// row or column.
    pub fn is_cell_selected(&self, row: usize, column: usize) -> bool {
        self.selection == Selection::Cell { row, column }
            || self.is_row_selected(row)
            || self.is_column_selected(column)
    }

    /// True only when the entire column is the selection target.
    pub fn is_column_selected(&self, column: usize) -> bool {
        self.selection == Selection::Column(column)
    }

    /// A column header is shadowed while a row is selected, or while a cell
    /// in that column is selected.
    pub fn is_column_shadowed(&self, column: usize) -> bool {
        match self.selection {
            Selection::Row(_) => true,
            Selection::Cell { column: c, .. } => c == column,
            _ => false,
        }
    }

    /// True only when the entire row is the selection target.
    pub fn is_row_selected(&self, row: usize) -> bool {
        self.selection == Selection::Row(row)
    }

    /// A row header is shadowed while a column is selected, or while a cell
    /// in that row is selected.
    pub fn is_row_shadowed(&self, row: usize) -> bool {
        match self.selection {
            Selection::Column(_) => true,
            Selection::Cell { row: r, .. } => r == row,
            _ => false,
        }
    }

    pub fn cell_state(&self, row: usize, column: usize) -> HighlightState {
        if self.is_cell_selected(row, column) {
            HighlightState::Selected
        } else {
            HighlightState::Unselected
        }
    }

    pub fn column_state(&self, column: usize) -> HighlightState {
        if self.is_column_shadowed(column) {
            HighlightState::Shadowed
        } else if self.is_column_selected(column) {
            HighlightState::Selected
        } else {
            HighlightState::Unselected
        }
    }

    pub fn row_state(&self, row: usize) -> HighlightState {
        if self.is_row_shadowed(row) {
            HighlightState::Shadowed
        } else if self.is_row_selected(row) {
            HighlightState::Selected
        } else {
            HighlightState::Unselected
        }
    }

    /// Highlight a freshly bound view according to the current selection.
    /// Called as views are realized or rebound out of the recycle pool.
    pub fn refresh_view<P: ViewProvider>(
        &self,
        provider: &mut P,
        config: &TableConfig,
        pane: PaneId,
        index: usize,
    ) {
        let state = match pane {
            PaneId::RowHeader => self.row_state(index),
            PaneId::ColumnHeader => self.column_state(index),
            PaneId::CellRow(row) => self.cell_state(row, index),
            PaneId::CellGrid => return,
        };
        self.apply(provider, config, pane, index, state);
    }

    /// Remove the visuals of the current selection. Safe to call when the
    /// affected views have been recycled.
    fn clear_current_visuals<P: ViewProvider>(&self, provider: &mut P, config: &TableConfig) {
        match self.selection {
            Selection::None => {}
            Selection::Row(row) => {
                self.apply(provider, config, PaneId::RowHeader, row, HighlightState::Unselected);
                self.paint_row_cells(provider, config, row, HighlightState::Unselected);
                self.paint_pane(provider, config, PaneId::ColumnHeader, HighlightState::Unselected);
            }
            Selection::Column(column) => {
                self.apply(
                    provider,
                    config,
                    PaneId::ColumnHeader,
                    column,
                    HighlightState::Unselected,
                );
                self.paint_column_cells(provider, config, column, HighlightState::Unselected);
                self.paint_pane(provider, config, PaneId::RowHeader, HighlightState::Unselected);
            }
            Selection::Cell { row, column } => {
                self.apply(
                    provider,
                    config,
                    PaneId::CellRow(row),
                    column,
                    HighlightState::Unselected,
                );
                self.apply(provider, config, PaneId::RowHeader, row, HighlightState::Unselected);
                self.apply(
                    provider,
                    config,
                    PaneId::ColumnHeader,
                    column,
                    HighlightState::Unselected,
                );
            }
        }
    }

    fn apply_current_visuals<P: ViewProvider>(&self, provider: &mut P, config: &TableConfig) {
        match self.selection {
            Selection::None => {}
            Selection::Row(row) => {
                self.apply(provider, config, PaneId::RowHeader, row, HighlightState::Selected);
                self.paint_row_cells(provider, config, row, HighlightState::Selected);
                if config.shadow_enabled {
                    self.paint_pane(
                        provider,
                        config,
                        PaneId::ColumnHeader,
                        HighlightState::Shadowed,
                    );
                }
            }
            Selection::Column(column) => {
                self.apply(
                    provider,
                    config,
                    PaneId::ColumnHeader,
                    column,
                    HighlightState::Selected,
                );
                self.paint_column_cells(provider, config, column, HighlightState::Selected);
                if config.shadow_enabled {
                    self.paint_pane(provider, config, PaneId::RowHeader, HighlightState::Shadowed);
                }
            }
            Selection::Cell { row, column } => {
                self.apply(
                    provider,
                    config,
                    PaneId::CellRow(row),
                    column,
                    HighlightState::Selected,
                );
                if config.shadow_enabled {
                    self.apply(provider, config, PaneId::RowHeader, row, HighlightState::Shadowed);
                    self.apply(
                        provider,
                        config,
                        PaneId::ColumnHeader,
                        column,
                        HighlightState::Shadowed,
                    );
                }
            }
        }
    }

    /// Push one highlight into one view. The state is always recorded; the
    /// color is withheld when color changes are suppressed.
    fn apply<P: ViewProvider>(
        &self,
        provider: &mut P,
        config: &TableConfig,
        pane: PaneId,
        index: usize,
        state: HighlightState,
    ) {
        let color = if config.ignore_selection_colors {
            None
        } else {
            Some(self.color_for(config, state))
        };
        provider.apply_highlight(pane, index, state, color);
    }

    fn color_for(&self, config: &TableConfig, state: HighlightState) -> Color {
        match state {
            HighlightState::Selected => config.selected_color,
            HighlightState::Shadowed => config.shadow_color,
            HighlightState::Unselected => config.unselected_color,
        }
    }

    /// Recolor every realized view of one pane.
    fn paint_pane<P: ViewProvider>(
        &self,
        provider: &mut P,
        config: &TableConfig,
        pane: PaneId,
        state: HighlightState,
    ) {
        let Some((first, last)) = provider.visible_range(pane) else {
            return;
        };
        for index in first..=last {
            self.apply(provider, config, pane, index, state);
        }
    }

    /// Recolor every realized cell of one row.
    fn paint_row_cells<P: ViewProvider>(
        &self,
        provider: &mut P,
        config: &TableConfig,
        row: usize,
        state: HighlightState,
    ) {
        self.paint_pane(provider, config, PaneId::CellRow(row), state);
    }

    /// Recolor the realized cells of one column across all realized rows.
    fn paint_column_cells<P: ViewProvider>(
        &self,
        provider: &mut P,
        config: &TableConfig,
        column: usize,
        state: HighlightState,
    ) {
        let Some((first_row, last_row)) = provider.visible_range(PaneId::CellGrid) else {
            return;
        };
        for row in first_row..=last_row {
            if provider.view_bounds(PaneId::CellRow(row), column).is_some() {
                self.apply(provider, config, PaneId::CellRow(row), column, state);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_mutually_exclusive() {
        let mut machine = SelectionStateMachine::new();

        machine.restore(Selection::Row(3));
        assert!(machine.is_row_selected(3));
        assert!(machine.selection().column().is_none());

        machine.restore(Selection::Column(2));
        assert!(machine.is_column_selected(2));
        assert!(!machine.is_row_selected(3));
        assert!(machine.selection().row().is_none());
    }

    #[test]
    fn test_cell_selection_shadows_its_headers_only() {
        let mut machine = SelectionStateMachine::new();
        machine.restore(Selection::Cell { row: 5, column: 2 });

        assert!(machine.is_row_shadowed(5));
        assert!(machine.is_column_shadowed(2));
        assert!(!machine.is_row_shadowed(4));
        assert!(!machine.is_column_shadowed(1));
        // Shadowed, never selected.
        assert!(!machine.is_row_selected(5));
        assert!(!machine.is_column_selected(2));
        assert_eq!(machine.row_state(5), HighlightState::Shadowed);
        assert_eq!(machine.column_state(2), HighlightState::Shadowed);
    }

    #[test]
    fn test_row_selection_shadows_all_columns() {
        let mut machine = SelectionStateMachine::new();
        machine.restore(Selection::Row(1));

        for column in 0..10 {
            assert!(machine.is_column_shadowed(column));
        }
        assert_eq!(machine.row_state(1), HighlightState::Selected);
        assert!(machine.is_cell_selected(1, 7));
        assert!(!machine.is_cell_selected(0, 7));
    }

    #[test]
    fn test_column_selection_shadows_all_rows() {
        let mut machine = SelectionStateMachine::new();
        machine.restore(Selection::Column(4));

        for row in 0..10 {
            assert!(machine.is_row_shadowed(row));
        }
        assert_eq!(machine.column_state(4), HighlightState::Selected);
        assert!(machine.is_cell_selected(9, 4));
        assert!(!machine.is_cell_selected(9, 3));
    }

    #[test]
    fn test_unselected_queries() {
        let machine = SelectionStateMachine::new();
        assert_eq!(machine.selection(), Selection::None);
        assert!(!machine.is_cell_selected(0, 0));
        assert!(!machine.is_row_shadowed(0));
        assert!(!machine.is_column_shadowed(0));
        assert_eq!(machine.cell_state(0, 0), HighlightState::Unselected);
    }
}
