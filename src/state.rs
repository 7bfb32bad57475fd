//! Persisted table state.
//!
//! Scroll position and selection survive a host lifecycle event (e.g. a
//! configuration change) as six integers, order-independent, restored by
//! replaying scroll-to and select operations.

use serde::{Deserialize, Serialize};

use crate::types::{ScrollPosition, Selection};

/// Snapshot of scroll + selection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub row_position: usize,
    pub row_offset: i32,
    pub column_position: usize,
    pub column_offset: i32,
    pub selected_row: Option<usize>,
    pub selected_column: Option<usize>,
}

impl SavedState {
    pub fn row_scroll(&self) -> ScrollPosition {
        ScrollPosition::new(self.row_position, self.row_offset)
    }

    pub fn column_scroll(&self) -> ScrollPosition {
        ScrollPosition::new(self.column_position, self.column_offset)
    }

    /// The selection to replay, reconstructed from the two indices.
    pub fn selection(&self) -> Selection {
        match (self.selected_row, self.selected_column) {
            (Some(row), Some(column)) => Selection::Cell { row, column },
            (Some(row), None) => Selection::Row(row),
            (None, Some(column)) => Selection::Column(column),
            (None, None) => Selection::None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let state = SavedState {
            row_position: 12,
            row_offset: -30,
            column_position: 4,
            column_offset: 15,
            selected_row: Some(5),
            selected_column: None,
        };

        let json = state.to_json().unwrap();
        let restored = SavedState::from_json(&json).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.selection(), Selection::Row(5));
    }

    #[test]
    fn test_selection_reconstruction() {
        let mut state = SavedState::default();
        assert_eq!(state.selection(), Selection::None);

        state.selected_row = Some(2);
        state.selected_column = Some(3);
        assert_eq!(state.selection(), Selection::Cell { row: 2, column: 3 });

        state.selected_row = None;
        assert_eq!(state.selection(), Selection::Column(3));
    }
}
