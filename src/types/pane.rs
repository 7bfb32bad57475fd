use serde::{Deserialize, Serialize};

/// One independently scrollable view hierarchy of the table.
///
/// The cell grid is a 2D composition: `CellGrid` is the vertically scrolling
/// outer pane, and each realized row owns a horizontally scrolling
/// `CellRow` sub-pane populated with that row's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
    /// The vertically scrolling row header pane.
    RowHeader,
    /// The horizontally scrolling column header pane.
    ColumnHeader,
    /// The vertically scrolling outer pane of the cell matrix.
    CellGrid,
    /// The horizontal sub-pane holding one realized row's cells.
    CellRow(usize),
}

impl PaneId {
    /// The scroll axis this pane participates in.
    pub fn axis(self) -> Axis {
        match self {
            PaneId::RowHeader | PaneId::CellGrid => Axis::Vertical,
            PaneId::ColumnHeader | PaneId::CellRow(_) => Axis::Horizontal,
        }
    }
}

/// A scroll axis. Vertical groups {RowHeader, CellGrid}; horizontal groups
/// {ColumnHeader, every realized CellRow sub-pane}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// A scroll position: first visible item index plus the pixel offset of its
/// leading edge. Recorded when a gesture settles and replayed into panes
/// attached afterwards so they start at the same visual position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub index: usize,
    pub offset: i32,
}

impl ScrollPosition {
    pub fn new(index: usize, offset: i32) -> Self {
        Self { index, offset }
    }
}

/// Pixel bounds of a realized view within its pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ViewBounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Packed 0xAARRGGBB color pushed into views on highlight changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);
