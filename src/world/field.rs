//! The bounded colony grid
//!
//! Field owns every cell in an arena and maps each location to at most one
//! occupant. Cells refer back to the field only through their `CellId`.

use ahash::AHashMap;
use rand::Rng;

use crate::core::calendar::Calendar;
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{CellId, Generation, Location};
use crate::entity::cell::{Cell, Species};
use crate::spatial::grid::Grid;
use crate::world::temperature::{Temperature, TemperatureCondition};

#[derive(Debug, Clone)]
pub struct Field {
    occupancy: Grid<Option<CellId>>,
    cells: Vec<Cell>,
    temperature: Temperature,
    generation: Generation,
    config: SimulationConfig,
}

impl Field {
    pub fn new<R: Rng + ?Sized>(
        depth: usize,
        width: usize,
        config: SimulationConfig,
        rng: &mut R,
    ) -> Result<Self> {
        if depth == 0 || width == 0 {
            return Err(SimError::InvalidDimensions { depth, width });
        }
        let temperature = Temperature::new(config.temperature.max_condition_length, rng);
        Ok(Self {
            occupancy: Grid::new(depth, width),
            cells: Vec::new(),
            temperature,
            generation: 0,
            config,
        })
    }

    pub fn depth(&self) -> usize {
        self.occupancy.depth
    }

    pub fn width(&self) -> usize {
        self.occupancy.width
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn in_bounds(&self, location: Location) -> bool {
        self.occupancy.in_bounds(location)
    }

    // === Occupancy ===

    /// Put `cell` at `location`, replacing any prior occupant
    ///
    /// Returns the new cell's handle. Out-of-bounds placement still
    /// registers the cell but leaves it unreachable by location.
    pub fn place(&mut self, mut cell: Cell, location: Location) -> CellId {
        let id = CellId(self.cells.len() as u32);
        cell.set_location(location);
        self.cells.push(cell);
        if !self.occupancy.set(location, Some(id)) {
            tracing::warn!("Cell placed outside the field at {}", location);
        }
        id
    }

    /// Handle of the occupant at `location`
    pub fn id_at(&self, location: Location) -> Option<CellId> {
        self.occupancy.get(location).copied().flatten()
    }

    pub fn object_at(&self, location: Location) -> Option<&Cell> {
        let id = self.id_at(location)?;
        self.cells.get(id.index())
    }

    pub fn object_at_mut(&mut self, location: Location) -> Option<&mut Cell> {
        let id = self.id_at(location)?;
        self.cells.get_mut(id.index())
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id.index())
    }

    /// Current occupants in row-major order
    pub fn occupants(&self) -> impl Iterator<Item = (CellId, &Cell)> + '_ {
        self.occupancy
            .locations()
            .filter_map(move |loc| self.id_at(loc))
            .filter_map(move |id| self.cell(id).map(|cell| (id, cell)))
    }

    // === Neighborhood queries ===

    /// In-bounds Moore neighborhood of `location`
    pub fn adjacent_locations(&self, location: Location) -> Vec<Location> {
        self.occupancy.neighbors(location).collect()
    }

    /// Neighborhood occupants whose current `alive` flag is set
    pub fn living_neighbours(&self, location: Location) -> Vec<CellId> {
        self.occupancy
            .neighbors(location)
            .filter_map(|loc| self.id_at(loc))
            .filter(|&id| self.cell(id).is_some_and(Cell::is_alive))
            .collect()
    }

    pub fn living_neighbour_count(&self, location: Location) -> usize {
        self.occupancy
            .neighbors(location)
            .filter_map(|loc| self.object_at(loc))
            .filter(|cell| cell.is_alive())
            .count()
    }

    /// Distinct locations within Chebyshev distance 1
    pub fn are_neighbours(a: Location, b: Location) -> bool {
        a != b && a.chebyshev_distance(&b) <= 1
    }

    // === Generation and temperature ===

    /// Advance the generation counter and tick the temperature
    pub fn increase_gen<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.generation += 1;
        self.temperature.update(rng);
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn temperature(&self) -> &Temperature {
        &self.temperature
    }

    pub fn set_temperature(&mut self, temperature: Temperature) {
        self.temperature = temperature;
    }

    pub fn temperature_condition(&self) -> TemperatureCondition {
        self.temperature.condition()
    }

    /// "Cold", "Hot" or "Warm"
    pub fn temperature_label(&self) -> &'static str {
        self.temperature.description()
    }

    /// Elapsed simulated time, one hour per generation
    pub fn time_string(&self) -> String {
        Calendar::at(self.generation).label()
    }

    /// Empty the grid, reset the generation and re-roll the temperature
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.occupancy.clear();
        self.cells.clear();
        self.generation = 0;
        self.temperature = Temperature::new(self.config.temperature.max_condition_length, rng);
    }

    pub fn clear<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.reset(rng);
    }

    // === Statistics ===

    pub fn diseased_alive_count(&self) -> usize {
        self.occupants()
            .filter(|(_, cell)| cell.is_alive() && cell.is_diseased())
            .count()
    }

    /// Live occupants per species
    pub fn population_counts(&self) -> AHashMap<Species, usize> {
        let mut counts = AHashMap::new();
        for (_, cell) in self.occupants().filter(|(_, cell)| cell.is_alive()) {
            *counts.entry(cell.species()).or_insert(0) += 1;
        }
        counts
    }
}
