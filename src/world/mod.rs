pub mod grid;
pub mod region;
pub mod world;

pub use grid::Grid;
pub use region::{SensableRegion, Sighting};
pub use world::{DrawingContext, World, WorldStats};
