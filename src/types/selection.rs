/// The single logical selection slot of the table.
///
/// At most one of row, column, or cell is selected at a time; selecting one
/// kind clears the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Row(usize),
    Column(usize),
    Cell {
        row: usize,
        column: usize,
    },
}

impl Selection {
    /// The selected row, if a row or cell is selected.
    pub fn row(&self) -> Option<usize> {
        match *self {
            Selection::Row(row) | Selection::Cell { row, .. } => Some(row),
            _ => None,
        }
    }

    /// The selected column, if a column or cell is selected.
    pub fn column(&self) -> Option<usize> {
        match *self {
            Selection::Column(column) | Selection::Cell { column, .. } => Some(column),
            _ => None,
        }
    }
}

/// Visual highlight state pushed into a realized view.
///
/// Headers are `Selected` only when the entire row/column is the selection
/// target; a single selected cell puts its row and column headers in
/// `Shadowed` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    Selected,
    #[default]
    Unselected,
    Shadowed,
}
