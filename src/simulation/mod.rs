//! Generation stepping and long-run driving

pub mod act;
pub mod runner;
pub mod simulator;
pub mod snapshot;

pub use runner::{LongRun, LongRunHandle, RunEnd};
pub use simulator::{GenerationReport, Simulator};
pub use snapshot::{CellView, FieldSnapshot};
