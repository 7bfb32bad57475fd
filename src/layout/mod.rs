//! Column-width negotiation.
//!
//! Resolves every column's authoritative width from its header and all
//! currently realized cells, and keeps realized views resized and
//! edge-contiguous as rows scroll in and out of the window.

mod negotiator;
mod width_cache;

pub use negotiator::{ColumnWidthNegotiator, FitTask};
pub use width_cache::WidthCache;
