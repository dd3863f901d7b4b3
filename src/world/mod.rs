//! The colony field and its environment

pub mod field;
pub mod temperature;

pub use field::Field;
pub use temperature::{Temperature, TemperatureCondition};
