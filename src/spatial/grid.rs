//! Bounded 2D grid addressed by `Location`

use crate::core::types::Location;

/// Row/column offsets of the 8-cell Moore neighborhood
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Generic bounded 2D grid, row-major
///
/// No wraparound: locations outside `depth x width` are out of bounds.
#[derive(Debug, Clone)]
pub struct Grid<T: Clone + Default> {
    pub depth: usize,
    pub width: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(depth: usize, width: usize) -> Self {
        Self {
            depth,
            width,
            data: vec![T::default(); depth * width],
        }
    }

    #[inline]
    pub fn in_bounds(&self, location: Location) -> bool {
        location.row >= 0
            && location.col >= 0
            && (location.row as usize) < self.depth
            && (location.col as usize) < self.width
    }

    #[inline]
    fn index(&self, location: Location) -> Option<usize> {
        if self.in_bounds(location) {
            Some(location.row as usize * self.width + location.col as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, location: Location) -> Option<&T> {
        self.index(location).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, location: Location) -> Option<&mut T> {
        match self.index(location) {
            Some(i) => Some(&mut self.data[i]),
            None => None,
        }
    }

    /// Store a value; out-of-bounds writes are ignored and return false
    #[inline]
    pub fn set(&mut self, location: Location, value: T) -> bool {
        match self.index(location) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// Reset every slot to `T::default()`
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|slot| *slot = T::default());
    }

    /// In-bounds Moore neighbors of `location`, clipped at the edges
    pub fn neighbors(&self, location: Location) -> impl Iterator<Item = Location> + '_ {
        MOORE_OFFSETS
            .iter()
            .map(move |&(dr, dc)| location.offset(dr, dc))
            .filter(move |loc| self.in_bounds(*loc))
    }

    /// All locations in row-major order
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        let width = self.width as i32;
        (0..self.depth as i32).flat_map(move |row| (0..width).map(move |col| Location::new(row, col)))
    }
}
