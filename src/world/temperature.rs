//! Temperature system for the colony field
//!
//! A single global condition that persists for a random number of
//! generations before being re-rolled. Only Warm weather allows diseased
//! cells to recover.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current temperature condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureCondition {
    Cold,
    Hot,
    Warm,
}

impl TemperatureCondition {
    /// Map a roll in [0, 3] to a condition: 1 is Cold, 2 is Hot, 0 and 3 are Warm
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            1 => Self::Cold,
            2 => Self::Hot,
            _ => Self::Warm,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cold => "Cold",
            Self::Hot => "Hot",
            Self::Warm => "Warm",
        }
    }

    /// Whether diseased cells may recover under this condition
    pub fn allows_recovery(&self) -> bool {
        matches!(self, Self::Warm)
    }
}

impl Default for TemperatureCondition {
    fn default() -> Self {
        Self::Warm
    }
}

impl fmt::Display for TemperatureCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Temperature state machine
///
/// `remaining_steps` is at least 1 while a condition is active; a new
/// condition is rolled only when it reaches 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Temperature {
    condition: TemperatureCondition,
    remaining_steps: u32,
    max_condition_length: u32,
}

impl Temperature {
    /// Roll an initial condition and duration
    pub fn new<R: Rng + ?Sized>(max_condition_length: u32, rng: &mut R) -> Self {
        let mut temperature = Self {
            condition: TemperatureCondition::Warm,
            remaining_steps: 1,
            max_condition_length: max_condition_length.max(1),
        };
        temperature.randomise(rng);
        temperature
    }

    /// Fixed condition, used by tests and scripted scenarios
    pub fn with_condition(condition: TemperatureCondition, remaining_steps: u32) -> Self {
        Self {
            condition,
            remaining_steps: remaining_steps.max(1),
            max_condition_length: 3,
        }
    }

    /// Count down one generation, re-rolling when the condition expires
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.remaining_steps = self.remaining_steps.saturating_sub(1);
        if self.remaining_steps == 0 {
            let old = self.condition;
            self.randomise(rng);
            tracing::debug!(
                "Temperature changed {} -> {} for {} generations",
                old,
                self.condition,
                self.remaining_steps
            );
        }
    }

    fn randomise<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.condition = TemperatureCondition::from_roll(rng.gen_range(0..4));
        self.remaining_steps = rng.gen_range(1..=self.max_condition_length);
    }

    pub fn condition(&self) -> TemperatureCondition {
        self.condition
    }

    pub fn remaining_steps(&self) -> u32 {
        self.remaining_steps
    }

    /// "Cold", "Hot" or "Warm"
    pub fn description(&self) -> &'static str {
        self.condition.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_condition_from_roll() {
        assert_eq!(TemperatureCondition::from_roll(0), TemperatureCondition::Warm);
        assert_eq!(TemperatureCondition::from_roll(1), TemperatureCondition::Cold);
        assert_eq!(TemperatureCondition::from_roll(2), TemperatureCondition::Hot);
        assert_eq!(TemperatureCondition::from_roll(3), TemperatureCondition::Warm);
    }

    #[test]
    fn test_remaining_steps_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut temperature = Temperature::new(3, &mut rng);
        for _ in 0..500 {
            assert!((1..=3).contains(&temperature.remaining_steps()));
            temperature.update(&mut rng);
        }
    }

    #[test]
    fn test_condition_held_until_expiry() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut temperature = Temperature::with_condition(TemperatureCondition::Cold, 3);

        temperature.update(&mut rng);
        assert_eq!(temperature.condition(), TemperatureCondition::Cold);
        assert_eq!(temperature.remaining_steps(), 2);

        temperature.update(&mut rng);
        assert_eq!(temperature.condition(), TemperatureCondition::Cold);
        assert_eq!(temperature.remaining_steps(), 1);

        // Third update expires the condition and re-rolls
        temperature.update(&mut rng);
        assert!((1..=3).contains(&temperature.remaining_steps()));
    }

    #[test]
    fn test_warm_is_most_common() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let trials = 20_000;
        let mut warm = 0;
        let mut cold = 0;
        let mut hot = 0;
        for _ in 0..trials {
            match Temperature::new(3, &mut rng).condition() {
                TemperatureCondition::Warm => warm += 1,
                TemperatureCondition::Cold => cold += 1,
                TemperatureCondition::Hot => hot += 1,
            }
        }
        let warm_rate = warm as f64 / trials as f64;
        let cold_rate = cold as f64 / trials as f64;
        let hot_rate = hot as f64 / trials as f64;
        assert!((warm_rate - 0.5).abs() < 0.03, "warm rate {}", warm_rate);
        assert!((cold_rate - 0.25).abs() < 0.03, "cold rate {}", cold_rate);
        assert!((hot_rate - 0.25).abs() < 0.03, "hot rate {}", hot_rate);
    }

    #[test]
    fn test_only_warm_allows_recovery() {
        assert!(TemperatureCondition::Warm.allows_recovery());
        assert!(!TemperatureCondition::Cold.allows_recovery());
        assert!(!TemperatureCondition::Hot.allows_recovery());
    }
}
