//! Integration tests for disease contagion and recovery
//!
//! These tests verify:
//! - Spontaneous infection rate converges on the configured probability
//! - Spread reaches every present occupant of the neighborhood
//! - Recovery requires diseasable, diseased, mutualistic and Warm together

use cell_colony::core::config::SimulationConfig;
use cell_colony::core::types::{CellId, Location};
use cell_colony::entity::cell::Species;
use cell_colony::entity::disease::{spread_disease, Disease};
use cell_colony::simulation::Simulator;
use cell_colony::world::temperature::{Temperature, TemperatureCondition};
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn quiet_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.disease.infection_probability = 0.0;
    config
}

#[test]
fn test_spontaneous_infection_rate() {
    let mut rng = ChaCha8Rng::seed_from_u64(31337);
    let trials = 20_000;
    let infected = (0..trials)
        .filter(|_| Disease::new().infect_cell(true, 0.007, &mut rng))
        .count();

    let rate = infected as f64 / trials as f64;
    // ~3.5 standard errors at n = 20,000
    assert!((rate - 0.007).abs() < 0.0021, "observed rate {}", rate);
}

#[test]
fn test_spread_reaches_every_occupant() {
    let mut sim =
        Simulator::with_rng(5, 5, quiet_config(), ChaCha8Rng::seed_from_u64(1)).unwrap();
    let centre = Location::new(2, 2);
    sim.place_cell(Species::Mycoplasma, centre, true);

    let mut neighbours: Vec<CellId> = Vec::new();
    for (i, loc) in sim.field().adjacent_locations(centre).into_iter().enumerate() {
        // Mix of alive/dead and diseasable/non-diseasable occupants
        let species = if i % 2 == 0 {
            Species::MyFungiChangeColor
        } else {
            Species::MyEvolvingCellChangeBehaviors
        };
        neighbours.push(sim.place_cell(species, loc, i % 3 != 0));
    }

    let infected = spread_disease(sim.field_mut(), centre, 1.0, &mut StepRng::new(0, 0));
    assert_eq!(infected, 8);
    for id in neighbours {
        assert!(sim.field().cell(id).unwrap().is_diseased());
    }
}

#[test]
fn test_spread_skips_empty_and_diseased() {
    let mut sim =
        Simulator::with_rng(3, 3, quiet_config(), ChaCha8Rng::seed_from_u64(1)).unwrap();
    let centre = Location::new(1, 1);
    sim.place_cell(Species::Mycoplasma, centre, true);
    let sick = sim.place_cell(Species::Mycoplasma, Location::new(0, 0), true);
    sim.field_mut().cell_mut(sick).unwrap().set_diseased(true);
    sim.place_cell(Species::Mycoplasma, Location::new(2, 2), true);

    let infected = spread_disease(sim.field_mut(), centre, 1.0, &mut StepRng::new(0, 0));
    assert_eq!(infected, 1);
    assert_eq!(sim.field().diseased_alive_count(), 2);
}

#[test]
fn test_zero_probability_never_spreads() {
    let mut sim =
        Simulator::with_rng(3, 3, quiet_config(), ChaCha8Rng::seed_from_u64(1)).unwrap();
    let centre = Location::new(1, 1);
    sim.place_cell(Species::Mycoplasma, centre, true);
    sim.place_cell(Species::Mycoplasma, Location::new(0, 1), true);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..1_000 {
        assert_eq!(spread_disease(sim.field_mut(), centre, 0.0, &mut rng), 0);
    }
}

#[test]
fn test_zero_probability_ignores_zero_rolls() {
    let mut sim =
        Simulator::with_rng(3, 3, quiet_config(), StepRng::new(0, 0)).unwrap();
    let centre = Location::new(1, 1);
    let sick = sim.place_cell(Species::Mycoplasma, centre, true);
    sim.field_mut().cell_mut(sick).unwrap().set_diseased(true);
    let healthy = sim.place_cell(Species::Mycoplasma, Location::new(0, 1), true);

    assert_eq!(spread_disease(sim.field_mut(), centre, 0.0, &mut StepRng::new(0, 0)), 0);
    sim.sim_one_generation();
    assert!(!sim.field().cell(healthy).unwrap().is_diseased());
}

/// Recovery fixture: one diseased cell in fixed weather
fn recovery_fixture(species: Species, condition: TemperatureCondition, diseased: bool) -> (Simulator, CellId) {
    let mut sim =
        Simulator::with_rng(3, 3, quiet_config(), ChaCha8Rng::seed_from_u64(2)).unwrap();
    // Three steps left, so the condition survives the tick at generation start
    sim.field_mut()
        .set_temperature(Temperature::with_condition(condition, 3));
    let id = sim.place_cell(species, Location::new(1, 1), true);
    sim.field_mut().cell_mut(id).unwrap().set_diseased(diseased);
    (sim, id)
}

#[test]
fn test_recovery_when_all_conditions_hold() {
    let (mut sim, id) = recovery_fixture(Species::Mycoplasma, TemperatureCondition::Warm, true);
    sim.sim_one_generation();

    let cell = sim.field().cell(id).unwrap();
    assert!(!cell.is_diseased());
    assert!(cell.is_alive(), "recovery forces the cell alive");
    // Infected aging to 100, recovery to 80, then one more year
    assert!((cell.age() - 81.0).abs() < 1e-9);
}

#[test]
fn test_no_recovery_unless_warm() {
    for condition in [TemperatureCondition::Cold, TemperatureCondition::Hot] {
        let (mut sim, id) = recovery_fixture(Species::Mycoplasma, condition, true);
        sim.sim_one_generation();
        let cell = sim.field().cell(id).unwrap();
        assert!(cell.is_diseased(), "{} must not allow recovery", condition);
        assert!(!cell.is_alive(), "no neighbours, no recovery: the cell dies");
    }
}

#[test]
fn test_no_recovery_without_mutualism() {
    let (mut sim, id) =
        recovery_fixture(Species::MyFungiChangeColor, TemperatureCondition::Warm, true);
    sim.sim_one_generation();
    assert!(sim.field().cell(id).unwrap().is_diseased());
}

#[test]
fn test_no_recovery_when_not_diseasable() {
    let (mut sim, id) =
        recovery_fixture(Species::NonDeterministicCells, TemperatureCondition::Warm, true);
    sim.sim_one_generation();
    assert!(sim.field().cell(id).unwrap().is_diseased());
}

#[test]
fn test_healthy_cell_is_not_rejuvenated() {
    let (mut sim, id) = recovery_fixture(Species::Mycoplasma, TemperatureCondition::Warm, false);
    sim.field_mut().cell_mut(id).unwrap().set_age(50.0);
    sim.sim_one_generation();
    let cell = sim.field().cell(id).unwrap();
    assert_eq!(cell.age(), 51.0);
    assert!(!cell.is_diseased());
}

#[test]
fn test_infected_cell_out_of_budget_is_dropped() {
    let (mut sim, id) = recovery_fixture(Species::Mycoplasma, TemperatureCondition::Cold, true);
    sim.field_mut().cell_mut(id).unwrap().set_age(188_850.0);
    let report = sim.sim_one_generation();
    assert_eq!(report.dropped, 1);
    assert!(sim.tracked_cells().is_empty());
}
