//! NonDeterministicCells - a probabilistic alive/dead latch
//!
//! The latch only moves while the cell is alive:
//! - fewer than 2 or more than 3 neighbors: may flip to Dead
//! - exactly 2 neighbors: may be reconfirmed Alive
//! - exactly 3 neighbors: unchanged
//!
//! The next state always mirrors the latch.

use rand::Rng;

use crate::core::config::NonDeterministicConfig;
use crate::entity::cell::{Cell, CellKind, Latch, SpeciesTraits};
use crate::entity::color::CellColor;

pub const TRAITS: SpeciesTraits = SpeciesTraits {
    max_age: 1_999_999.0,
    diseasable: false,
    parasitizable: false,
    parasite_host: false,
    mutualistic: true,
    mutualism_host: false,
    selection_color: CellColor::Yellow,
    mixed_color: CellColor::Yellow,
};

pub fn decide<R: Rng + ?Sized>(
    cell: &mut Cell,
    living_neighbours: usize,
    config: &NonDeterministicConfig,
    rng: &mut R,
) {
    let CellKind::NonDeterministic { mut latch } = cell.kind else {
        return;
    };

    if cell.is_alive() {
        if !(2..=3).contains(&living_neighbours) {
            let roll: f64 = rng.gen();
            if roll < config.death_probability {
                latch = Latch::Dead;
            }
        } else if living_neighbours == 2 {
            let roll: f64 = rng.gen();
            if roll < config.survival_probability {
                latch = Latch::Alive;
            }
        }
    }

    cell.kind = CellKind::NonDeterministic { latch };
    cell.set_next_state(latch == Latch::Alive);
}
