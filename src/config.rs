use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Physical and behavioural constants shared by every ant a nest spawns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntConfig {
    pub length: f32,
    pub width: f32,
    pub pheromone_deposit_rate_per_sec: f32,
    /// Fraction of the ant's own deposit strength kept per second
    pub pheromone_deposit_intensity_decay_factor_per_sec: f32,
    pub food_pheromone_decay_factor_per_sec: f32,
    pub nest_pheromone_decay_factor_per_sec: f32,
    /// Scales the random heading jitter, 0 disables it
    pub chaos_factor: f32,
    pub move_speed: f32,
    /// Share of last tick's heading delta carried into this one
    pub heading_delta_momentum_factor: f32,
    pub max_search_time_in_sec: f32,
    pub sensing_range: f32,
    pub sensing_attenuation_gain: f32,
    /// Turn applied when dodging other ants. Ant-ant avoidance is disabled.
    pub collision_avoidance_heading_increment: f32,
}

impl Default for AntConfig {
    fn default() -> Self {
        Self {
            length: 5.0,
            width: 2.0,
            pheromone_deposit_rate_per_sec: 2.0,
            pheromone_deposit_intensity_decay_factor_per_sec: 0.95,
            food_pheromone_decay_factor_per_sec: 0.97,
            nest_pheromone_decay_factor_per_sec: 0.95,
            chaos_factor: 0.1,
            move_speed: 20.0,
            heading_delta_momentum_factor: 0.5,
            max_search_time_in_sec: 15.0,
            sensing_range: 20.0,
            sensing_attenuation_gain: 2.0,
            collision_avoidance_heading_increment: 0.25 * std::f32::consts::PI,
        }
    }
}

impl AntConfig {
    /// Larger half-extent of the ant's body
    #[inline]
    pub fn collision_radius(&self) -> f32 {
        (0.5 * self.length).max(0.5 * self.width)
    }

    pub fn validate(&self) -> Result<()> {
        positive("ant.length", self.length)?;
        positive("ant.width", self.width)?;
        positive(
            "ant.pheromone_deposit_rate_per_sec",
            self.pheromone_deposit_rate_per_sec,
        )?;
        decay_factor(
            "ant.pheromone_deposit_intensity_decay_factor_per_sec",
            self.pheromone_deposit_intensity_decay_factor_per_sec,
        )?;
        decay_factor(
            "ant.food_pheromone_decay_factor_per_sec",
            self.food_pheromone_decay_factor_per_sec,
        )?;
        decay_factor(
            "ant.nest_pheromone_decay_factor_per_sec",
            self.nest_pheromone_decay_factor_per_sec,
        )?;
        non_negative("ant.chaos_factor", self.chaos_factor)?;
        positive("ant.move_speed", self.move_speed)?;
        non_negative(
            "ant.heading_delta_momentum_factor",
            self.heading_delta_momentum_factor,
        )?;
        positive("ant.max_search_time_in_sec", self.max_search_time_in_sec)?;
        positive("ant.sensing_range", self.sensing_range)?;
        positive("ant.sensing_attenuation_gain", self.sensing_attenuation_gain)?;
        Ok(())
    }
}

/// Flat set of named parameters a world is built from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub num_ants_to_spawn: u32,
    pub ant_spawn_period_in_sec: f32,
    pub num_food_sources: u32,
    pub food_min_distance_to_nest: f32,
    pub food_min_distance_to_world_edge: f32,
    /// Upper bound on the time a single move integrates over
    pub max_move_duration_in_sec: f32,
    pub nest_pheromone_intensity: f32,
    pub food_width: f32,
    pub food_length: f32,
    pub food_pheromone_intensity: f32,
    /// Seed for food placement, spawn headings and ant jitter
    pub seed: Option<u64>,
    pub ant: AntConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 480,
            num_ants_to_spawn: 24,
            ant_spawn_period_in_sec: 10.0,
            num_food_sources: 3,
            food_min_distance_to_nest: 125.0,
            food_min_distance_to_world_edge: 5.0,
            max_move_duration_in_sec: 1.0,
            nest_pheromone_intensity: 1.0,
            food_width: 10.0,
            food_length: 10.0,
            food_pheromone_intensity: 1.0,
            seed: None,
            ant: AntConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parse a config from TOML text. Missing keys fall back to defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let config: WorldConfig = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(invalid("width", "must be greater than zero"));
        }
        if self.height == 0 {
            return Err(invalid("height", "must be greater than zero"));
        }
        positive("ant_spawn_period_in_sec", self.ant_spawn_period_in_sec)?;
        non_negative("food_min_distance_to_nest", self.food_min_distance_to_nest)?;
        non_negative(
            "food_min_distance_to_world_edge",
            self.food_min_distance_to_world_edge,
        )?;
        let shortest_side = self.width.min(self.height) as f32;
        if 2.0 * self.food_min_distance_to_world_edge >= shortest_side {
            return Err(invalid(
                "food_min_distance_to_world_edge",
                "leaves no room for food inside the world",
            ));
        }
        positive("max_move_duration_in_sec", self.max_move_duration_in_sec)?;
        non_negative("nest_pheromone_intensity", self.nest_pheromone_intensity)?;
        positive("food_width", self.food_width)?;
        positive("food_length", self.food_length)?;
        non_negative("food_pheromone_intensity", self.food_pheromone_intensity)?;
        self.ant.validate()
    }

    /// Food collision radius: half the larger extent, shrunk by one unit
    #[inline]
    pub fn food_collision_radius(&self) -> f32 {
        (0.5 * self.food_length).max(0.5 * self.food_width) - 1.0
    }
}

#[inline]
fn invalid(name: &'static str, reason: &'static str) -> Error {
    Error::InvalidParameter { name, reason }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, "must be a positive number"))
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, "must not be negative"))
    }
}

fn decay_factor(name: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(name, "must lie in (0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 480);
        assert_eq!(config.num_ants_to_spawn, 24);
        assert_eq!(config.ant.collision_radius(), 2.5);
        assert_eq!(config.food_collision_radius(), 4.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let src = r#"
            width = 200
            seed = 7

            [ant]
            chaos_factor = 0.0
        "#;
        let config = WorldConfig::from_toml_str(src).unwrap();
        assert_eq!(config.width, 200);
        assert_eq!(config.height, 480);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.ant.chaos_factor, 0.0);
        assert_eq!(config.ant.move_speed, AntConfig::default().move_speed);
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = WorldConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = WorldConfig::from_toml_str("ant_spawn_period_in_sec = -1.0").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                name: "ant_spawn_period_in_sec",
                ..
            }
        ));

        let err = WorldConfig::from_toml_str("[ant]\nfood_pheromone_decay_factor_per_sec = 1.5")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                name: "ant.food_pheromone_decay_factor_per_sec",
                ..
            }
        ));

        let err = WorldConfig::from_toml_str("height = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "height", .. }));
    }

    #[test]
    fn test_rejects_edge_margin_larger_than_world() {
        let config = WorldConfig {
            width: 10,
            height: 10,
            food_min_distance_to_world_edge: 5.0,
            ..WorldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = WorldConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
