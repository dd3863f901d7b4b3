//! MyEvolvingCellChangeBehaviors - survival rule changes with age

use crate::entity::cell::{Cell, SpeciesTraits};
use crate::entity::color::CellColor;

pub const TRAITS: SpeciesTraits = SpeciesTraits {
    max_age: 200_000_000.0,
    diseasable: false,
    parasitizable: true,
    parasite_host: false,
    mutualistic: false,
    mutualism_host: false,
    selection_color: CellColor::Green,
    mixed_color: CellColor::Blue,
};

const JUVENILE_MAX_AGE: f64 = 10.0;
const ADULT_AGE: f64 = 50.0;

/// Neighbor counts that must all hold for a mid-age cell to survive.
///
/// No count equals both, so mid-age cells always die.
const MID_AGE_REQUIRED_COUNTS: [usize; 2] = [2, 0];

pub fn decide(cell: &mut Cell, living_neighbours: usize) {
    let age = cell.age();
    let next = if age <= JUVENILE_MAX_AGE {
        living_neighbours < 2
    } else if age < ADULT_AGE {
        MID_AGE_REQUIRED_COUNTS
            .iter()
            .all(|&required| required == living_neighbours)
    } else {
        living_neighbours == 1
    };
    cell.set_next_state(next);
}
