pub mod cell;
pub mod color;
pub mod disease;
pub mod recovery;
pub mod species;
pub mod symbiosis;

pub use cell::{Cell, CellKind, Latch, Species, SpeciesTraits};
pub use color::CellColor;
pub use disease::{spread_disease, Disease};
pub use symbiosis::{Mutualism, Parasitism, Symbiosis};
