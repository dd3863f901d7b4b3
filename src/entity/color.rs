//! Display tags for cells
//!
//! Colors carry no behavior; renderers map them to pixels.

use serde::{Deserialize, Serialize};

/// Semantic display color of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CellColor {
    /// Empty or dead location
    #[default]
    White,
    Orange,
    Blue,
    Purple,
    Green,
    Yellow,
    Black,
}

impl CellColor {
    /// Fungi display tag for a young cell with a single neighbor
    pub const YOUNG: CellColor = CellColor::Blue;
    /// Fungi display tag for a mature cell with two neighbors
    pub const MATURE: CellColor = CellColor::Green;
    /// Fungi display tag for a cell about to die
    pub const TERMINAL: CellColor = CellColor::Black;

    /// 8-bit RGB triple
    pub const fn rgb(&self) -> (u8, u8, u8) {
        match self {
            CellColor::White => (255, 255, 255),
            CellColor::Orange => (255, 165, 0),
            CellColor::Blue => (0, 0, 255),
            CellColor::Purple => (128, 0, 128),
            CellColor::Green => (0, 128, 0),
            CellColor::Yellow => (255, 255, 0),
            CellColor::Black => (0, 0, 0),
        }
    }
}

/// Background color for empty locations
pub const EMPTY_COLOR: CellColor = CellColor::White;
