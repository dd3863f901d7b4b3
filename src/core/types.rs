//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid coordinate of a single field location
///
/// Coordinates are signed so that neighbor arithmetic can step off the
/// edge of the field; such locations are simply out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Chebyshev (king-move) distance between two locations
    pub fn chebyshev_distance(&self, other: &Location) -> i32 {
        (self.row - other.row).abs().max((self.col - other.col).abs())
    }

    /// Location shifted by the given row/column offsets
    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Handle to a cell stored in the field's cell registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u32);

impl CellId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Generation counter (simulation time unit)
pub type Generation = u64;
