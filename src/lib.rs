//! tablegrid - synchronized multi-pane table core
//!
//! The scrolling, layout, and selection engine underneath a
//! spreadsheet-style table widget: row headers, column headers, and a cell
//! matrix rendered as three independently scrollable panes that always
//! appear as one seamless table.
//!
//! - Column widths negotiated against every realized cell in the column
//! - Scroll deltas propagated across panes without feedback loops
//! - Selection and shadow highlighting that survives view recycling
//! - Row/column show/hide with verbatim restoration, sorting, filtering,
//!   pagination, and persisted scroll/selection state
//!
//! Rendering, gesture recognition, and content binding stay in the host:
//! the view-recycling framework is reached through [`provider::ViewProvider`]
//! and the dataset through [`adapter::TableAdapter`].
//!
//! # Usage
//!
//! ```ignore
//! let mut table = TableCoordinator::new(adapter, provider);
//! table.scroll_to_column(7);
//! table.select_cell(5, 2);
//! ```

pub mod adapter;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod layout;
pub mod listener;
pub mod pagination;
pub mod provider;
pub mod scroll;
pub mod selection;
pub mod sort;
pub mod state;
pub mod types;
pub mod visibility;

pub use coordinator::TableCoordinator;

pub use config::TableConfig;
pub use error::{Result, TableGridError};
pub use types::*;
