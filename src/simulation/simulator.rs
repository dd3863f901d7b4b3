//! Generation stepper
//!
//! One `sim_one_generation` call:
//! 1. advance the field (generation counter and temperature)
//! 2. act every tracked cell, dropping any that is dead right after its act,
//!    then act the untracked dead occupants next to surviving cells
//! 3. commit `next_alive -> alive` on the remaining tracked cells
//! 4. append and commit this generation's births
//! 5. advance the simulator's generation counter
//!
//! A cell that dies in step 2 is dropped before anyone commits, while peers
//! acting earlier in the same pass have already counted it as alive.
//!
//! Dead occupants stay on the field after they leave tracking. When a live
//! cell moves next to one, it acts again and may be born, so patterns that
//! travel across a field of placeholders keep Game of Life transitions.
//! Empty locations never produce a birth.

use ahash::AHashSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::{PopulationConfig, SimulationConfig};
use crate::core::error::{Result, SimError};
use crate::core::types::{CellId, Generation, Location};
use crate::entity::cell::{Cell, Species};
use crate::simulation::act::act;
use crate::simulation::snapshot::FieldSnapshot;
use crate::world::field::Field;
use crate::world::temperature::Temperature;

/// Outcome of one generation, for logging and status displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    pub generation: Generation,
    /// Cells tracked after the generation completed
    pub tracked: usize,
    /// Cells dropped from tracking in step 2
    pub dropped: usize,
    pub births: usize,
}

pub struct Simulator<R: Rng = ChaCha8Rng> {
    field: Field,
    cells: Vec<CellId>,
    generation: Generation,
    cell_type: Option<String>,
    rng: R,
}

impl Simulator<ChaCha8Rng> {
    /// Simulator with an entropy-seeded generator
    pub fn new(depth: usize, width: usize, config: SimulationConfig) -> Result<Self> {
        Self::with_rng(depth, width, config, ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> Simulator<R> {
    /// Simulator drawing every random decision from `rng`
    pub fn with_rng(depth: usize, width: usize, config: SimulationConfig, mut rng: R) -> Result<Self> {
        config.validate().map_err(SimError::InvalidConfig)?;
        let field = Field::new(depth, width, config, &mut rng)?;
        Ok(Self {
            field,
            cells: Vec::new(),
            generation: 0,
            cell_type: None,
            rng,
        })
    }

    pub fn sim_one_generation(&mut self) -> GenerationReport {
        self.field.increase_gen(&mut self.rng);

        let tracked = std::mem::take(&mut self.cells);
        let mut kept = Vec::with_capacity(tracked.len());
        let mut births = Vec::new();
        let mut acted = AHashSet::with_capacity(tracked.len());
        let mut dropped = 0;

        for id in tracked {
            if let Some(cell) = self.field.cell(id) {
                acted.insert(cell.location());
            }
            act(&mut self.field, id, &mut births, &mut self.rng);
            if self.field.cell(id).is_some_and(Cell::is_alive) {
                kept.push(id);
            } else {
                dropped += 1;
            }
        }

        let woken = self.wake_dormant(&kept, &mut acted, &mut births);

        for &id in &kept {
            if let Some(cell) = self.field.cell_mut(id) {
                cell.update_state();
            }
        }

        for &id in &births {
            if let Some(cell) = self.field.cell_mut(id) {
                cell.update_state();
            }
        }
        let birth_count = births.len();
        kept.extend(births);
        self.cells = kept;

        self.generation += 1;

        tracing::debug!(
            "Generation {}: {} tracked, {} dropped, {} woken, {} births, temperature {}",
            self.generation,
            self.cells.len(),
            dropped,
            woken,
            birth_count,
            self.field.temperature_label()
        );

        GenerationReport {
            generation: self.generation,
            tracked: self.cells.len(),
            dropped,
            births: birth_count,
        }
    }

    /// Act every untracked dead occupant next to a cell in `living`
    ///
    /// Each location acts at most once per generation; `acted` holds the
    /// locations already visited. Births land in `births` through `act`.
    /// Returns how many dormant cells acted.
    fn wake_dormant(
        &mut self,
        living: &[CellId],
        acted: &mut AHashSet<Location>,
        births: &mut Vec<CellId>,
    ) -> usize {
        let mut dormant = Vec::new();
        for &id in living {
            let Some(cell) = self.field.cell(id) else {
                continue;
            };
            for location in self.field.adjacent_locations(cell.location()) {
                if !acted.insert(location) {
                    continue;
                }
                if let Some(neighbour) = self.field.id_at(location) {
                    if self.field.cell(neighbour).is_some_and(|c| !c.is_alive()) {
                        dormant.push(neighbour);
                    }
                }
            }
        }

        for &id in &dormant {
            act(&mut self.field, id, births, &mut self.rng);
        }
        dormant.len()
    }

    /// Run `generations` steps back to back
    pub fn simulate(&mut self, generations: u64) {
        for _ in 0..generations {
            self.sim_one_generation();
        }
    }

    /// Forget every tracked cell and empty the field
    pub fn reset(&mut self) {
        self.cells.clear();
        self.field.reset(&mut self.rng);
        self.generation = 0;
    }

    /// Fill the field with a single species
    ///
    /// Every location receives a cell of the named species, alive with the
    /// species' initial probability and dead otherwise; all are tracked. An
    /// unrecognized name leaves the field empty.
    pub fn initialize_with_selected_cell_type(&mut self, name: &str) {
        self.reset();
        self.cell_type = Some(name.to_string());

        let species = match name.parse::<Species>() {
            Ok(species) => species,
            Err(e) => {
                tracing::warn!(
                    "{}; no cells created (default probability {})",
                    e,
                    self.field.config().population.default
                );
                return;
            }
        };

        let probability = initial_probability(&self.field.config().population, species);
        let color = species.traits().selection_color;
        let locations: Vec<Location> = self.locations().collect();
        for location in locations {
            let roll: f64 = self.rng.gen();
            let cell = if roll <= probability {
                Cell::new(species, location, color)
            } else {
                Cell::dormant(species, location, color)
            };
            let id = self.field.place(cell, location);
            self.cells.push(id);
        }

        tracing::info!(
            "Initialized {} with {} of {} cells alive",
            species,
            self.alive_count(),
            self.cells.len()
        );
    }

    /// Fill the field with a random mix of every species
    ///
    /// Each location tries the species in order with a fresh draw; the first
    /// success places a living cell and a location with no success stays
    /// empty.
    pub fn populate(&mut self) {
        self.reset();
        self.cell_type = None;

        let population = self.field.config().population.clone();
        let locations: Vec<Location> = self.locations().collect();
        for location in locations {
            for species in Species::ALL {
                let roll: f64 = self.rng.gen();
                if roll <= initial_probability(&population, species) {
                    let cell = Cell::new(species, location, species.traits().mixed_color);
                    let id = self.field.place(cell, location);
                    self.cells.push(id);
                    break;
                }
            }
        }

        tracing::info!("Populated mixed colony with {} cells", self.cells.len());
    }

    /// Place a cell directly and track it, replacing any prior occupant
    pub fn place_cell(&mut self, species: Species, location: Location, alive: bool) -> CellId {
        if let Some(previous) = self.field.id_at(location) {
            self.cells.retain(|&id| id != previous);
        }
        let color = species.traits().selection_color;
        let cell = if alive {
            Cell::new(species, location, color)
        } else {
            Cell::dormant(species, location, color)
        };
        let id = self.field.place(cell, location);
        self.cells.push(id);
        id
    }

    fn locations(&self) -> impl Iterator<Item = Location> {
        let width = self.field.width() as i32;
        (0..self.field.depth() as i32).flat_map(move |row| (0..width).map(move |col| Location::new(row, col)))
    }

    // === Accessors ===

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn temperature(&self) -> &Temperature {
        self.field.temperature()
    }

    pub fn time_string(&self) -> String {
        self.field.time_string()
    }

    pub fn diseased_alive_count(&self) -> usize {
        self.field.diseased_alive_count()
    }

    /// Species name given to the last strict selection, if any
    pub fn cell_type(&self) -> Option<&str> {
        self.cell_type.as_deref()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn tracked_cells(&self) -> &[CellId] {
        &self.cells
    }

    /// Tracked cells that are currently alive
    pub fn alive_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&id| self.field.cell(id).is_some_and(Cell::is_alive))
            .count()
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::capture(&self.field, self.generation)
    }
}

fn initial_probability(population: &PopulationConfig, species: Species) -> f64 {
    match species {
        Species::Mycoplasma => population.mycoplasma,
        Species::MyFungiChangeColor => population.fungi_change_color,
        Species::MyEvolvingCellChangeBehaviors => population.evolving_cell,
        Species::NonDeterministicCells => population.nondeterministic,
    }
}
