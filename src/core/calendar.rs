//! Calendar for the elapsed-time label
//!
//! Each generation advances the colony clock by one hour.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Generation;

/// Generations that make up one day
pub const GENERATIONS_PER_DAY: u64 = 24;

/// Time of day periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    Morning,    // 06:00-12:00
    Afternoon,  // 12:00-18:00
    Evening,    // 18:00-22:00
    Night,      // 22:00-06:00
}

impl TimePeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimePeriod::Morning,
            12..=17 => TimePeriod::Afternoon,
            18..=21 => TimePeriod::Evening,
            _ => TimePeriod::Night, // 22-23, 0-5
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimePeriod::Morning => "Morning",
            TimePeriod::Afternoon => "Afternoon",
            TimePeriod::Evening => "Evening",
            TimePeriod::Night => "Night",
        };
        f.write_str(label)
    }
}

/// Calendar view over a generation count
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Calendar {
    generation: Generation,
}

impl Calendar {
    pub fn at(generation: Generation) -> Self {
        Self { generation }
    }

    /// Day number, starting at day 1
    pub fn current_day(&self) -> u64 {
        self.generation / GENERATIONS_PER_DAY + 1
    }

    pub fn current_hour(&self) -> u32 {
        let in_day = self.generation % GENERATIONS_PER_DAY;
        ((in_day * 24) / GENERATIONS_PER_DAY) as u32
    }

    pub fn current_time_period(&self) -> TimePeriod {
        TimePeriod::from_hour(self.current_hour())
    }

    /// Human-readable elapsed time, e.g. `Day 2, 14:00 (Afternoon)`
    pub fn label(&self) -> String {
        format!(
            "Day {}, {:02}:00 ({})",
            self.current_day(),
            self.current_hour(),
            self.current_time_period()
        )
    }
}
