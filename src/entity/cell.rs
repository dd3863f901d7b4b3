//! Cell state shared by every species
//!
//! A cell is double-buffered: `alive` is the state neighbors observe during
//! a generation, `next_alive` is the decision that becomes visible when the
//! simulator commits the generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::SimError;
use crate::core::types::Location;
use crate::entity::color::CellColor;
use crate::entity::disease::Disease;
use crate::entity::species::{evolving, fungi, mycoplasma, nondeterministic};

/// Species enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Mycoplasma,
    MyFungiChangeColor,
    MyEvolvingCellChangeBehaviors,
    NonDeterministicCells,
}

impl Species {
    pub const ALL: [Species; 4] = [
        Species::Mycoplasma,
        Species::MyFungiChangeColor,
        Species::MyEvolvingCellChangeBehaviors,
        Species::NonDeterministicCells,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Species::Mycoplasma => "Mycoplasma",
            Species::MyFungiChangeColor => "MyFungiChangeColor",
            Species::MyEvolvingCellChangeBehaviors => "MyEvolvingCellChangeBehaviors",
            Species::NonDeterministicCells => "NonDeterministicCells",
        }
    }

    /// Constant rule-table parameters for this species
    pub fn traits(&self) -> &'static SpeciesTraits {
        match self {
            Species::Mycoplasma => &mycoplasma::TRAITS,
            Species::MyFungiChangeColor => &fungi::TRAITS,
            Species::MyEvolvingCellChangeBehaviors => &evolving::TRAITS,
            Species::NonDeterministicCells => &nondeterministic::TRAITS,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|species| species.name() == s)
            .ok_or_else(|| SimError::UnknownSpecies(s.to_string()))
    }
}

/// Per-species constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesTraits {
    pub max_age: f64,
    pub diseasable: bool,
    pub parasitizable: bool,
    pub parasite_host: bool,
    pub mutualistic: bool,
    pub mutualism_host: bool,
    /// Display color when a single species fills the field
    pub selection_color: CellColor,
    /// Display color in a mixed population
    pub mixed_color: CellColor,
}

/// Persistent alive/dead latch of a non-deterministic cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Latch {
    Alive,
    Dead,
}

/// Species variant together with any species-private state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Mycoplasma,
    FungiChangeColor,
    EvolvingBehaviors,
    NonDeterministic { latch: Latch },
}

impl CellKind {
    pub fn for_species(species: Species) -> Self {
        match species {
            Species::Mycoplasma => CellKind::Mycoplasma,
            Species::MyFungiChangeColor => CellKind::FungiChangeColor,
            Species::MyEvolvingCellChangeBehaviors => CellKind::EvolvingBehaviors,
            Species::NonDeterministicCells => CellKind::NonDeterministic {
                latch: Latch::Alive,
            },
        }
    }

    pub fn species(&self) -> Species {
        match self {
            CellKind::Mycoplasma => Species::Mycoplasma,
            CellKind::FungiChangeColor => Species::MyFungiChangeColor,
            CellKind::EvolvingBehaviors => Species::MyEvolvingCellChangeBehaviors,
            CellKind::NonDeterministic { .. } => Species::NonDeterministicCells,
        }
    }
}

/// One grid-resident organism
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    alive: bool,
    next_alive: bool,
    age: f64,
    disease: Disease,
    location: Location,
    color: CellColor,
}

impl Cell {
    /// New living cell of `species`, age 0, not diseased
    pub fn new(species: Species, location: Location, color: CellColor) -> Self {
        Self {
            kind: CellKind::for_species(species),
            alive: true,
            next_alive: false,
            age: 0.0,
            disease: Disease::new(),
            location,
            color,
        }
    }

    /// New cell using the species' single-selection color
    pub fn of(species: Species, location: Location) -> Self {
        Self::new(species, location, species.traits().selection_color)
    }

    /// New dead placeholder; a non-deterministic latch starts Dead too
    pub fn dormant(species: Species, location: Location, color: CellColor) -> Self {
        let mut cell = Self::new(species, location, color);
        cell.alive = false;
        if let CellKind::NonDeterministic { .. } = cell.kind {
            cell.kind = CellKind::NonDeterministic { latch: Latch::Dead };
        }
        cell
    }

    pub fn species(&self) -> Species {
        self.kind.species()
    }

    pub fn traits(&self) -> &'static SpeciesTraits {
        self.species().traits()
    }

    // === Double-buffered state ===

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn set_dead(&mut self) {
        self.alive = false;
    }

    pub fn set_next_state(&mut self, value: bool) {
        self.next_alive = value;
    }

    /// Decision for the next generation; only meaningful after `act`
    pub fn next_alive(&self) -> bool {
        self.next_alive
    }

    /// Commit `next_alive` into `alive`
    pub fn update_state(&mut self) {
        self.alive = self.next_alive;
    }

    // === Age ===

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn set_age(&mut self, age: f64) {
        self.age = age;
    }

    pub fn max_age(&self) -> f64 {
        self.traits().max_age
    }

    pub fn increment_age(&mut self) {
        self.age += 1.0;
    }

    /// Kill the cell if it has outlived its species' maximum age
    pub fn check_age(&mut self) {
        if self.age > self.max_age() {
            self.set_dead();
        }
    }

    // === Disease ===

    pub fn is_diseased(&self) -> bool {
        self.disease.is_diseased()
    }

    pub fn set_diseased(&mut self, diseased: bool) {
        self.disease.set_diseased(diseased);
    }

    pub fn disease_mut(&mut self) -> &mut Disease {
        &mut self.disease
    }

    // === Capabilities ===

    pub fn is_diseasable(&self) -> bool {
        self.traits().diseasable
    }

    pub fn is_parasitizable(&self) -> bool {
        self.traits().parasitizable
    }

    pub fn is_parasite_host(&self) -> bool {
        self.traits().parasite_host
    }

    pub fn is_mutualistic(&self) -> bool {
        self.traits().mutualistic
    }

    pub fn is_mutualism_host(&self) -> bool {
        self.traits().mutualism_host
    }

    // === Placement and display ===

    pub fn location(&self) -> Location {
        self.location
    }

    pub(crate) fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn color(&self) -> CellColor {
        self.color
    }

    pub fn set_color(&mut self, color: CellColor) {
        self.color = color;
    }
}
