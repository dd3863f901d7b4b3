//! Spatial data structures

pub mod grid;

pub use grid::{Grid, MOORE_OFFSETS};
