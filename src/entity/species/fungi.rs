//! MyFungiChangeColor - fungi whose color tracks their life stage

use crate::entity::cell::{Cell, SpeciesTraits};
use crate::entity::color::CellColor;

pub const TRAITS: SpeciesTraits = SpeciesTraits {
    max_age: 200_000.0,
    diseasable: true,
    parasitizable: true,
    parasite_host: true,
    mutualistic: false,
    mutualism_host: false,
    selection_color: CellColor::Blue,
    mixed_color: CellColor::Purple,
};

/// Younger than this with a single neighbor, the fungus survives
const YOUNG_AGE: f64 = 20.0;
/// Younger than this with two neighbors, the fungus survives
const MATURE_AGE: f64 = 100.0;

pub fn decide(cell: &mut Cell, living_neighbours: usize) {
    let age = cell.age();
    match living_neighbours {
        1 if age < YOUNG_AGE => {
            cell.set_color(CellColor::YOUNG);
            cell.set_next_state(true);
        }
        2 if age < MATURE_AGE => {
            cell.set_color(CellColor::MATURE);
            cell.set_next_state(true);
        }
        _ => {
            cell.set_color(CellColor::TERMINAL);
            cell.set_next_state(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Location;
    use crate::entity::cell::Species;

    fn fungus(age: f64) -> Cell {
        let mut cell = Cell::of(Species::MyFungiChangeColor, Location::new(0, 0));
        cell.set_age(age);
        cell
    }

    #[test]
    fn test_young_single_neighbour_survives() {
        let mut cell = fungus(5.0);
        decide(&mut cell, 1);
        assert!(cell.next_alive());
        assert_eq!(cell.color(), CellColor::YOUNG);
    }

    #[test]
    fn test_old_single_neighbour_dies() {
        let mut cell = fungus(20.0);
        decide(&mut cell, 1);
        assert!(!cell.next_alive());
        assert_eq!(cell.color(), CellColor::TERMINAL);
    }

    #[test]
    fn test_two_neighbours_mature() {
        let mut cell = fungus(99.0);
        decide(&mut cell, 2);
        assert!(cell.next_alive());
        assert_eq!(cell.color(), CellColor::MATURE);

        let mut old = fungus(100.0);
        decide(&mut old, 2);
        assert!(!old.next_alive());
        assert_eq!(old.color(), CellColor::TERMINAL);
    }

    #[test]
    fn test_other_counts_die() {
        for count in [0, 3, 4, 8] {
            let mut cell = fungus(0.0);
            decide(&mut cell, count);
            assert!(!cell.next_alive(), "{} neighbours", count);
        }
    }
}
