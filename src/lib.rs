//! Cell Colony - grid organisms under disease, symbiosis and weather

pub mod core;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;
