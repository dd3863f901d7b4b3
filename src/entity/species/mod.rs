//! Species rule tables
//!
//! Each species module carries its constant traits and a `decide` rule
//! that sets the cell's next state from its live neighbor count.

pub mod evolving;
pub mod fungi;
pub mod mycoplasma;
pub mod nondeterministic;

use rand::Rng;

use crate::core::config::NonDeterministicConfig;
use crate::entity::cell::{Cell, CellKind};

/// Apply the healthy-cell rule of `cell`'s species
pub fn decide<R: Rng + ?Sized>(
    cell: &mut Cell,
    living_neighbours: usize,
    nondeterministic_config: &NonDeterministicConfig,
    rng: &mut R,
) {
    match cell.kind {
        CellKind::Mycoplasma => mycoplasma::decide(cell, living_neighbours),
        CellKind::FungiChangeColor => fungi::decide(cell, living_neighbours),
        CellKind::EvolvingBehaviors => evolving::decide(cell, living_neighbours),
        CellKind::NonDeterministic { .. } => {
            nondeterministic::decide(cell, living_neighbours, nondeterministic_config, rng)
        }
    }
}
