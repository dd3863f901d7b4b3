//! Simulation configuration with documented constants
//!
//! Every tunable number of the colony lives here. Defaults reproduce the
//! classic rule set; a TOML file may override any subset of them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SimError};

/// Configuration for the simulation systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid: GridConfig,
    pub disease: DiseaseConfig,
    pub recovery: RecoveryConfig,
    pub symbiosis: SymbiosisConfig,
    pub temperature: TemperatureConfig,
    pub nondeterministic: NonDeterministicConfig,
    pub population: PopulationConfig,
    pub runner: RunnerConfig,
}

/// Default field size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of rows
    pub depth: usize,
    /// Number of columns
    pub width: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            depth: 80,
            width: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseConfig {
    /// Chance per draw of spontaneous infection, and of infecting each
    /// neighbor of a diseased cell
    ///
    /// Set to 0.0 to switch contagion off entirely.
    pub infection_probability: f64,

    /// Age added each generation a diseased cell survives
    ///
    /// A diseased cell whose remaining age budget is smaller than this
    /// dies outright.
    pub infected_age_penalty: f64,
}

impl Default for DiseaseConfig {
    fn default() -> Self {
        Self {
            infection_probability: 0.007,
            infected_age_penalty: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Multiplier applied to age on recovery (0.8 = 20% rejuvenation)
    pub age_factor: f64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self { age_factor: 0.8 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbiosisConfig {
    /// Age removed from a benefiting partner (and added to a parasitized host)
    pub age_shift: f64,
}

impl Default for SymbiosisConfig {
    fn default() -> Self {
        Self { age_shift: 100.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureConfig {
    /// Longest run of generations a single condition can last
    pub max_condition_length: u32,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            max_condition_length: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonDeterministicConfig {
    /// Chance a live latch flips to dead when crowded or isolated
    pub death_probability: f64,
    /// Chance a live latch is reconfirmed with exactly two neighbors
    pub survival_probability: f64,
}

impl Default for NonDeterministicConfig {
    fn default() -> Self {
        Self {
            death_probability: 0.1,
            survival_probability: 0.9,
        }
    }
}

/// Initial alive probability per species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub mycoplasma: f64,
    pub fungi_change_color: f64,
    pub evolving_cell: f64,
    pub nondeterministic: f64,
    /// Used when a species name is not recognized
    pub default: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            mycoplasma: 0.03,
            fungi_change_color: 0.28,
            evolving_cell: 0.019,
            nondeterministic: 0.25,
            default: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Pause between generations of a long run (milliseconds)
    pub delay_ms: u64,
    /// Generations in one long run
    pub long_run_generations: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            delay_ms: 500,
            long_run_generations: 5000,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate().map_err(SimError::InvalidConfig)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.grid.depth == 0 || self.grid.width == 0 {
            return Err(format!(
                "grid must be non-empty, got {}x{}",
                self.grid.depth, self.grid.width
            ));
        }

        let probabilities = [
            ("disease.infection_probability", self.disease.infection_probability),
            ("recovery.age_factor", self.recovery.age_factor),
            ("nondeterministic.death_probability", self.nondeterministic.death_probability),
            ("nondeterministic.survival_probability", self.nondeterministic.survival_probability),
            ("population.mycoplasma", self.population.mycoplasma),
            ("population.fungi_change_color", self.population.fungi_change_color),
            ("population.evolving_cell", self.population.evolving_cell),
            ("population.nondeterministic", self.population.nondeterministic),
            ("population.default", self.population.default),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} ({}) must lie in [0, 1]", name, value));
            }
        }

        if self.disease.infected_age_penalty < 0.0 || self.symbiosis.age_shift < 0.0 {
            return Err("Age shifts must be non-negative".into());
        }

        if self.temperature.max_condition_length == 0 {
            return Err("temperature.max_condition_length must be at least 1".into());
        }

        Ok(())
    }
}
