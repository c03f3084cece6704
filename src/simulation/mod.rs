pub mod collision;
pub mod engine;

pub use engine::{RunSummary, SimulationEngine};
