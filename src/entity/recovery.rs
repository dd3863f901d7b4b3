//! Recovery policy for diseased cells
//!
//! A cell recovers only when it is diseasable, currently diseased,
//! mutualistic, and the field is Warm. Recovery forces the cell alive for
//! the next generation, rejuvenates it and clears the disease.

use crate::entity::cell::Cell;
use crate::world::temperature::TemperatureCondition;

/// Whether every recovery condition holds for `cell`
pub fn can_recover(cell: &Cell, condition: TemperatureCondition) -> bool {
    cell.is_diseasable()
        && cell.is_diseased()
        && cell.is_mutualistic()
        && condition.allows_recovery()
}

/// Recover `cell` if it qualifies; returns true on recovery
pub fn attempt_recovery(cell: &mut Cell, condition: TemperatureCondition, age_factor: f64) -> bool {
    if !can_recover(cell, condition) {
        return false;
    }
    perform_recovery(cell, age_factor);
    tracing::debug!("Cell at {} recovered from disease", cell.location());
    true
}

fn perform_recovery(cell: &mut Cell, age_factor: f64) {
    cell.set_next_state(true);
    cell.set_age(cell.age() * age_factor);
    cell.set_diseased(false);
}
