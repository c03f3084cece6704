//! Identities and capabilities shared by every kind of world object.

use crate::geometry::Location;
use crate::pheromone::Trail;
use slotmap::new_key_type;

new_key_type! {
    /// Stable handle for ants, whether active or resting in a nest.
    pub struct AntKey;
    /// Stable handle for nests.
    pub struct NestKey;
    /// Stable handle for food sources.
    pub struct FoodKey;
    /// Stable handle for pheromone markers.
    pub struct PheromoneKey;
}

/// Closed set of objects that can occupy a grid cell.
///
/// Pheromones carry their trail so sensing can filter on it without a lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorldObject {
    Ant(AntKey),
    Nest(NestKey),
    Food(FoodKey),
    Pheromone(PheromoneKey, Trail),
}

/// Physical extent used for overlap and bounds checks.
pub trait Collidable {
    fn collision_radius(&self) -> f32;
}

/// Strength of the stimulus an object gives off.
pub trait Sensable {
    fn intensity(&self) -> f32;
}

/// Advances purely time-driven state.
pub trait Updatable {
    fn update(&mut self, elapsed_ms: f32);
}

/// Read-only snapshot of what a sensor needs to know about an object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub location: Location,
    pub intensity: f32,
    pub collision_radius: f32,
}
