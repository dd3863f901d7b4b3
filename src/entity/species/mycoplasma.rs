//! Mycoplasma - classic Conway rules
//!
//! One of the simplest forms of life: a live cell survives with two or
//! three live neighbors, a dead cell is born with exactly three.

use crate::entity::cell::{Cell, SpeciesTraits};
use crate::entity::color::CellColor;

pub const TRAITS: SpeciesTraits = SpeciesTraits {
    max_age: 188_888.0,
    diseasable: true,
    parasitizable: false,
    parasite_host: false,
    mutualistic: true,
    mutualism_host: true,
    selection_color: CellColor::Orange,
    mixed_color: CellColor::Orange,
};

pub fn decide(cell: &mut Cell, living_neighbours: usize) {
    let next = if cell.is_alive() {
        matches!(living_neighbours, 2 | 3)
    } else {
        living_neighbours == 3
    };
    cell.set_next_state(next);
}
