//! Disease contagion
//!
//! A diseased cell ages quickly and can infect its neighbors. Every draw
//! compares one uniform value in [0, 1) against the infection probability.
//! A probability of zero makes no draw at all, so contagion is off even
//! under a generator that can return exactly 0.0.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Location;
use crate::world::field::Field;

/// Per-cell disease state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disease {
    diseased: bool,
}

impl Disease {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_diseased(&self) -> bool {
        self.diseased
    }

    pub fn set_diseased(&mut self, diseased: bool) {
        self.diseased = diseased;
    }

    /// Spontaneous infection check
    ///
    /// No draw is made unless `diseasable`. Returns true if this call
    /// infected the cell.
    pub fn infect_cell<R: Rng + ?Sized>(
        &mut self,
        diseasable: bool,
        probability: f64,
        rng: &mut R,
    ) -> bool {
        if !diseasable || !draw(probability, rng) {
            return false;
        }
        self.diseased = true;
        true
    }
}

fn draw<R: Rng + ?Sized>(probability: f64, rng: &mut R) -> bool {
    if probability <= 0.0 {
        return false;
    }
    let roll: f64 = rng.gen();
    roll <= probability
}

/// Spread disease from `location` to its neighbors
///
/// Every present, non-diseased occupant of the clipped Moore neighborhood
/// gets an independent draw. Occupants need not be alive or diseasable.
/// Returns the number of newly infected neighbors.
pub fn spread_disease<R: Rng + ?Sized>(
    field: &mut Field,
    location: Location,
    probability: f64,
    rng: &mut R,
) -> usize {
    let mut infected = 0;
    for neighbor_loc in field.adjacent_locations(location) {
        let Some(neighbor) = field.object_at_mut(neighbor_loc) else {
            continue;
        };
        if neighbor.is_diseased() {
            continue;
        }
        if draw(probability, rng) {
            neighbor.set_diseased(true);
            infected += 1;
            tracing::trace!("Disease spread from {} to {}", location, neighbor_loc);
        }
    }
    infected
}
