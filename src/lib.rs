//! # Ant Colony
//!
//! A foraging simulation: a nest spawns ants that wander a bounded plane,
//! lay decaying pheromone trails, find food and carry it home.
//!
//! This library provides the simulation engine: the spatial index, the
//! pheromone field, the ant state machine, the nest and the tick-driven
//! world that resolves what every ant asks to do.

pub mod action;
pub mod ant;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod food;
pub mod geometry;
pub mod nest;
pub mod pheromone;
pub mod simulation;
pub mod world;

pub use action::Action;
pub use ant::{Ant, AntState};
pub use cli::Args;
pub use config::{AntConfig, WorldConfig};
pub use entity::WorldObject;
pub use error::{Error, Result};
pub use simulation::SimulationEngine;
pub use world::World;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Action, Ant, AntConfig, AntState, Args, Error, Result, SimulationEngine, World, WorldConfig,
        WorldObject,
    };
}
