use crate::entity::{Collidable, Sensable};
use crate::geometry::Location;

/// A static, inexhaustible food source.
#[derive(Clone, Debug, PartialEq)]
pub struct Food {
    location: Location,
    collision_radius: f32,
    pheromone_intensity: f32,
}

impl Food {
    pub fn new(location: Location, collision_radius: f32, pheromone_intensity: f32) -> Self {
        Self {
            location,
            collision_radius,
            pheromone_intensity,
        }
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }
}

impl Collidable for Food {
    #[inline]
    fn collision_radius(&self) -> f32 {
        self.collision_radius
    }
}

impl Sensable for Food {
    #[inline]
    fn intensity(&self) -> f32 {
        self.pheromone_intensity
    }
}
