//! Symbiotic relationships between pairs of cells
//!
//! Relationships are transient commands applied by the caller against a
//! host/symbiont pair; the simulator never applies them on its own. Both
//! effects require the pair to be adjacent (Chebyshev distance 1).

use serde::{Deserialize, Serialize};

use crate::core::types::CellId;
use crate::world::field::Field;

/// A host/symbiont pair, referenced by handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbiosis {
    host: CellId,
    symbiont: CellId,
}

impl Symbiosis {
    pub fn new(host: CellId, symbiont: CellId) -> Self {
        Self { host, symbiont }
    }

    pub fn host(&self) -> CellId {
        self.host
    }

    pub fn symbiont(&self) -> CellId {
        self.symbiont
    }

    pub fn set_host(&mut self, host: CellId) {
        self.host = host;
    }

    pub fn set_symbiont(&mut self, symbiont: CellId) {
        self.symbiont = symbiont;
    }

    /// Whether both cells exist and are Moore neighbors
    pub fn is_adjacent(&self, field: &Field) -> bool {
        match (field.cell(self.host), field.cell(self.symbiont)) {
            (Some(host), Some(symbiont)) => Field::are_neighbours(host.location(), symbiont.location()),
            _ => false,
        }
    }
}

/// Both partners benefit: kept alive and rejuvenated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutualism {
    pair: Symbiosis,
}

impl Mutualism {
    pub fn new(host: CellId, symbiont: CellId) -> Self {
        Self {
            pair: Symbiosis::new(host, symbiont),
        }
    }

    pub fn pair(&self) -> &Symbiosis {
        &self.pair
    }

    pub fn pair_mut(&mut self) -> &mut Symbiosis {
        &mut self.pair
    }

    /// Host can host mutualism and the symbiont is mutualistic
    ///
    /// Informational only; `mutualistic` gates on adjacency alone.
    pub fn is_eligible(&self, field: &Field) -> bool {
        match (field.cell(self.pair.host), field.cell(self.pair.symbiont)) {
            (Some(host), Some(symbiont)) => host.is_mutualism_host() && symbiont.is_mutualistic(),
            _ => false,
        }
    }

    /// Apply the mutual benefit; returns false (and changes nothing) if the
    /// pair is not adjacent
    pub fn mutualistic(&self, field: &mut Field) -> bool {
        if !self.pair.is_adjacent(field) {
            return false;
        }
        let shift = field.config().symbiosis.age_shift;
        for id in [self.pair.host, self.pair.symbiont] {
            if let Some(cell) = field.cell_mut(id) {
                cell.set_next_state(true);
                cell.set_age((cell.age() - shift).max(0.0));
            }
        }
        true
    }
}

/// The symbiont benefits at the host's expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parasitism {
    pair: Symbiosis,
}

impl Parasitism {
    pub fn new(host: CellId, symbiont: CellId) -> Self {
        Self {
            pair: Symbiosis::new(host, symbiont),
        }
    }

    pub fn pair(&self) -> &Symbiosis {
        &self.pair
    }

    pub fn pair_mut(&mut self) -> &mut Symbiosis {
        &mut self.pair
    }

    /// Host is parasitizable and the symbiont can act as a parasite host
    ///
    /// Informational only; `parasitic` gates on adjacency alone.
    pub fn is_eligible(&self, field: &Field) -> bool {
        match (field.cell(self.pair.host), field.cell(self.pair.symbiont)) {
            (Some(host), Some(symbiont)) => host.is_parasitizable() && symbiont.is_parasite_host(),
            _ => false,
        }
    }

    /// Apply the parasitic effect; returns false (and changes nothing) if
    /// the pair is not adjacent
    ///
    /// The host is marked to die next generation and aged; a host with no
    /// age budget left is killed outright. The symbiont is kept alive and
    /// rejuvenated.
    pub fn parasitic(&self, field: &mut Field) -> bool {
        if !self.pair.is_adjacent(field) {
            return false;
        }
        let shift = field.config().symbiosis.age_shift;

        if let Some(host) = field.cell_mut(self.pair.host) {
            host.set_next_state(false);
            let age = host.age();
            let max_age = host.max_age();
            if age + shift <= max_age {
                host.set_age(age + shift);
            } else if age <= max_age {
                host.set_dead();
            }
        }

        if let Some(symbiont) = field.cell_mut(self.pair.symbiont) {
            symbiont.set_next_state(true);
            symbiont.set_age((symbiont.age() - shift).max(0.0));
        }
        true
    }
}
