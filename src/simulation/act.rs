//! Per-cell generation step
//!
//! Every species shares the same outer pipeline; only the healthy-cell rule
//! differs:
//!
//! 1. age check
//! 2. spontaneous infection (diseasable, healthy cells only)
//! 3. infected behavior and contagion, or the species rule
//! 4. recovery attempt
//! 5. age + 1
//!
//! Neighbor counts read the uncommitted `alive` flags of the current
//! generation.

use rand::Rng;

use crate::core::config::DiseaseConfig;
use crate::core::types::CellId;
use crate::entity::cell::Cell;
use crate::entity::disease::spread_disease;
use crate::entity::recovery::attempt_recovery;
use crate::entity::species;
use crate::world::field::Field;

/// Run one generation step for the cell `id`
///
/// A cell that starts dead, survives the age and disease checks and ends
/// with `next_alive` set is a birth: its handle is appended to `births`.
pub fn act<R: Rng + ?Sized>(field: &mut Field, id: CellId, births: &mut Vec<CellId>, rng: &mut R) {
    let disease = field.config().disease;
    let nondeterministic = field.config().nondeterministic;
    let age_factor = field.config().recovery.age_factor;
    let condition = field.temperature_condition();

    let Some(cell) = field.cell_mut(id) else {
        return;
    };
    let was_alive = cell.is_alive();
    let location = cell.location();

    let mut killed = check_age(cell);

    if cell.is_diseasable() && !cell.is_diseased() {
        cell.disease_mut()
            .infect_cell(true, disease.infection_probability, rng);
    }
    cell.set_next_state(false);
    let diseased = cell.is_diseased();

    let living_neighbours = field.living_neighbour_count(location);

    if diseased {
        if let Some(cell) = field.cell_mut(id) {
            killed |= infected_act(cell, living_neighbours, &disease);
        }
        spread_disease(field, location, disease.infection_probability, rng);
    } else if let Some(cell) = field.cell_mut(id) {
        species::decide(cell, living_neighbours, &nondeterministic, rng);
    }

    let Some(cell) = field.cell_mut(id) else {
        return;
    };
    attempt_recovery(cell, condition, age_factor);
    cell.increment_age();

    if !was_alive && !killed && cell.next_alive() {
        births.push(id);
    }
}

/// Kill the cell if it outlived its species; returns true if this call killed it
fn check_age(cell: &mut Cell) -> bool {
    let over_age = cell.age() > cell.max_age();
    cell.check_age();
    over_age
}

/// Accelerated senescence shared by every diseased cell
///
/// Returns true if the cell had no age budget left and was killed.
fn infected_act(cell: &mut Cell, living_neighbours: usize, disease: &DiseaseConfig) -> bool {
    cell.set_next_state(false);
    if cell.age() + disease.infected_age_penalty < cell.max_age() {
        cell.set_age(cell.age() + disease.infected_age_penalty);
        cell.set_next_state(living_neighbours == 3);
        false
    } else {
        cell.set_dead();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Location;
    use crate::entity::cell::Species;
    use crate::entity::color::CellColor;
    use crate::world::temperature::{Temperature, TemperatureCondition};
    use rand::rngs::mock::StepRng;

    /// Every roll fails
    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    /// Every roll succeeds
    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    fn field(condition: TemperatureCondition) -> Field {
        let mut config = SimulationConfig::default();
        config.disease.infection_probability = 0.0;
        let mut rng = always();
        let mut field = Field::new(5, 5, config, &mut rng).unwrap();
        field.set_temperature(Temperature::with_condition(condition, 3));
        field
    }

    fn place(field: &mut Field, species: Species, row: i32, col: i32) -> CellId {
        let loc = Location::new(row, col);
        field.place(Cell::of(species, loc), loc)
    }

    #[test]
    fn test_healthy_cell_follows_species_rule() {
        let mut field = field(TemperatureCondition::Cold);
        let centre = place(&mut field, Species::Mycoplasma, 2, 2);
        place(&mut field, Species::Mycoplasma, 1, 1);
        place(&mut field, Species::Mycoplasma, 1, 2);

        let mut births = Vec::new();
        act(&mut field, centre, &mut births, &mut never());

        let cell = field.cell(centre).unwrap();
        assert!(cell.next_alive());
        assert!(cell.is_alive());
        assert_eq!(cell.age(), 1.0);
        assert!(births.is_empty());
    }

    #[test]
    fn test_dead_cell_with_three_neighbours_is_born() {
        let mut field = field(TemperatureCondition::Cold);
        let loc = Location::new(2, 2);
        let dormant = field.place(Cell::dormant(Species::Mycoplasma, loc, CellColor::Orange), loc);
        place(&mut field, Species::Mycoplasma, 1, 1);
        place(&mut field, Species::Mycoplasma, 1, 2);
        place(&mut field, Species::Mycoplasma, 1, 3);

        let mut births = Vec::new();
        act(&mut field, dormant, &mut births, &mut never());
        assert_eq!(births, vec![dormant]);
        assert!(!field.cell(dormant).unwrap().is_alive());
    }

    #[test]
    fn test_over_age_cell_is_killed_and_not_born() {
        let mut field = field(TemperatureCondition::Cold);
        let loc = Location::new(2, 2);
        let old = field.place(Cell::dormant(Species::Mycoplasma, loc, CellColor::Orange), loc);
        field.cell_mut(old).unwrap().set_age(200_000.0);
        place(&mut field, Species::Mycoplasma, 1, 1);
        place(&mut field, Species::Mycoplasma, 1, 2);
        place(&mut field, Species::Mycoplasma, 1, 3);

        let mut births = Vec::new();
        act(&mut field, old, &mut births, &mut never());
        assert!(births.is_empty());
    }

    #[test]
    fn test_infected_cell_ages_fast() {
        let mut field = field(TemperatureCondition::Cold);
        let sick = place(&mut field, Species::Mycoplasma, 2, 2);
        field.cell_mut(sick).unwrap().set_diseased(true);
        for col in 1..=3 {
            place(&mut field, Species::Mycoplasma, 1, col);
        }

        let mut births = Vec::new();
        act(&mut field, sick, &mut births, &mut never());

        let cell = field.cell(sick).unwrap();
        assert_eq!(cell.age(), 101.0);
        assert!(cell.next_alive(), "exactly three neighbours keep it alive");
        assert!(cell.is_diseased());
    }

    #[test]
    fn test_infected_cell_without_budget_dies() {
        let mut field = field(TemperatureCondition::Cold);
        let sick = place(&mut field, Species::Mycoplasma, 2, 2);
        field.cell_mut(sick).unwrap().set_diseased(true);
        field.cell_mut(sick).unwrap().set_age(188_800.0);

        let mut births = Vec::new();
        act(&mut field, sick, &mut births, &mut never());
        assert!(!field.cell(sick).unwrap().is_alive());
    }

    #[test]
    fn test_infected_cell_spreads_to_neighbours() {
        let mut config = SimulationConfig::default();
        config.disease.infection_probability = 1.0;
        let mut field = Field::new(5, 5, config, &mut always()).unwrap();
        field.set_temperature(Temperature::with_condition(TemperatureCondition::Cold, 3));
        let sick = place(&mut field, Species::Mycoplasma, 2, 2);
        field.cell_mut(sick).unwrap().set_diseased(true);
        let neighbour = place(&mut field, Species::MyEvolvingCellChangeBehaviors, 2, 3);

        let mut births = Vec::new();
        act(&mut field, sick, &mut births, &mut always());
        assert!(field.cell(neighbour).unwrap().is_diseased());
    }

    #[test]
    fn test_warm_weather_recovers_mycoplasma() {
        let mut field = field(TemperatureCondition::Warm);
        let sick = place(&mut field, Species::Mycoplasma, 2, 2);
        field.cell_mut(sick).unwrap().set_diseased(true);

        let mut births = Vec::new();
        act(&mut field, sick, &mut births, &mut never());

        let cell = field.cell(sick).unwrap();
        assert!(!cell.is_diseased());
        assert!(cell.next_alive());
        // (0 + 100) * 0.8, then +1
        assert!((cell.age() - 81.0).abs() < 1e-9);
    }
}
