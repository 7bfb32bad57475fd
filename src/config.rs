//! Process-wide table configuration, injected at construction.

use serde::{Deserialize, Serialize};

use crate::types::Color;

/// Configuration for the table core. Owned by the coordinator; no ambient
/// globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Background for directly selected views.
    pub selected_color: Color,
    /// Background for unselected views.
    pub unselected_color: Color,
    /// Background for shadowed headers (orthogonal to the selection).
    pub shadow_color: Color,
    /// When false, selecting a row/cell does not shadow the orthogonal
    /// headers.
    pub shadow_enabled: bool,
    /// When true, selection state is still tracked but no color changes are
    /// pushed into views.
    pub ignore_selection_colors: bool,
    /// When true, columns keep their given widths and the width negotiation
    /// machinery is bypassed entirely.
    pub has_fixed_width: bool,
    /// Width of the row header pane in pixels.
    pub row_header_width: i32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            selected_color: Color(0xFFCF_D8E8),
            unselected_color: Color(0xFFFF_FFFF),
            shadow_color: Color(0xFFF3_F3F3),
            shadow_enabled: true,
            ignore_selection_colors: false,
            has_fixed_width: false,
            row_header_width: 40,
        }
    }
}
