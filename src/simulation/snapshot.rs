//! Read-only view of the field for renderers and status displays

use ahash::AHashMap;
use serde::Serialize;

use crate::core::error::Result;
use crate::core::types::{Generation, Location};
use crate::entity::cell::Species;
use crate::entity::color::{CellColor, EMPTY_COLOR};
use crate::world::field::Field;

/// What a renderer needs to draw one location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub row: i32,
    pub col: i32,
    pub alive: bool,
    pub color: CellColor,
}

/// Complete render state of one generation
#[derive(Debug, Clone, Serialize)]
pub struct FieldSnapshot {
    pub generation: Generation,
    pub temperature: String,
    pub elapsed_time: String,
    pub diseased_alive: usize,
    /// Live cells per species
    pub population: AHashMap<Species, usize>,
    pub depth: usize,
    pub width: usize,
    /// Row-major, one entry per location
    pub cells: Vec<CellView>,
}

impl FieldSnapshot {
    /// Capture `field`; `generation` is the simulator's counter
    pub fn capture(field: &Field, generation: Generation) -> Self {
        let mut cells = Vec::with_capacity(field.depth() * field.width());
        for row in 0..field.depth() as i32 {
            for col in 0..field.width() as i32 {
                let location = Location::new(row, col);
                let view = match field.object_at(location) {
                    Some(cell) if cell.is_alive() => CellView {
                        row,
                        col,
                        alive: true,
                        color: cell.color(),
                    },
                    _ => CellView {
                        row,
                        col,
                        alive: false,
                        color: EMPTY_COLOR,
                    },
                };
                cells.push(view);
            }
        }

        Self {
            generation,
            temperature: field.temperature_label().to_string(),
            elapsed_time: field.time_string(),
            diseased_alive: field.diseased_alive_count(),
            population: field.population_counts(),
            depth: field.depth(),
            width: field.width(),
            cells,
        }
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|view| view.alive).count()
    }

    pub fn view_at(&self, row: i32, col: i32) -> Option<&CellView> {
        if row < 0 || col < 0 || row as usize >= self.depth || col as usize >= self.width {
            return None;
        }
        self.cells.get(row as usize * self.width + col as usize)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::entity::cell::Cell;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn field() -> Field {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut field = Field::new(3, 4, SimulationConfig::default(), &mut rng).unwrap();
        let alive = Location::new(1, 2);
        field.place(Cell::of(Species::MyFungiChangeColor, alive), alive);
        let dead = Location::new(2, 0);
        field.place(Cell::dormant(Species::Mycoplasma, dead, CellColor::Orange), dead);
        field
    }

    #[test]
    fn test_capture_renders_dead_as_empty() {
        let snapshot = FieldSnapshot::capture(&field(), 7);
        assert_eq!(snapshot.cells.len(), 12);
        assert_eq!(snapshot.alive_count(), 1);
        assert_eq!(snapshot.generation, 7);

        let live = snapshot.view_at(1, 2).unwrap();
        assert!(live.alive);
        assert_eq!(live.color, CellColor::Blue);

        let dead = snapshot.view_at(2, 0).unwrap();
        assert!(!dead.alive);
        assert_eq!(dead.color, CellColor::White);

        assert!(snapshot.view_at(3, 0).is_none());
        assert_eq!(snapshot.population.get(&Species::MyFungiChangeColor), Some(&1));
        assert_eq!(snapshot.population.get(&Species::Mycoplasma), None);
    }

    #[test]
    fn test_json_export() {
        let json = FieldSnapshot::capture(&field(), 0).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["depth"], 3);
        assert_eq!(value["cells"].as_array().unwrap().len(), 12);
        assert_eq!(value["elapsed_time"], "Day 1, 00:00 (Night)");
    }
}
