use serde::{Deserialize, Serialize};

/// Sort state of a column (or of the row header column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

/// A recorded (column, direction) pair answering "what is this column's
/// current sort state".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDirective {
    pub column: usize,
    pub order: SortOrder,
}

impl SortDirective {
    pub fn new(column: usize, order: SortOrder) -> Self {
        Self { column, order }
    }
}
