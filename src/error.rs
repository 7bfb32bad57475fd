//! Structured error types for tablegrid.
//!
//! Only configuration bugs surface as errors. A view that is not currently
//! realized, or an index past the end of the dataset, is an expected
//! condition handled with skip/`Option` semantics throughout the crate.

/// All errors that can occur in tablegrid operations.
#[derive(Debug, thiserror::Error)]
pub enum TableGridError {
    /// Sorting was requested for a column whose realized header view does
    /// not support sort-state display.
    #[error("column {column} header view does not support sort-state display")]
    SorterRequired { column: usize },

    /// A filter targeted a cell that exposes no filterable keyword.
    #[error("cell at row {row}, column {column} has no filterable keyword")]
    FilterableRequired { row: usize, column: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableGridError>;
