use crate::action::Action;
use crate::ant::{Ant, AntContext};
use crate::config::WorldConfig;
use crate::entity::{AntKey, Collidable, FoodKey, Footprint, NestKey, PheromoneKey, Sensable, WorldObject};
use crate::error::{Error, Result};
use crate::food::Food;
use crate::geometry::{euclidean_distance, Location, Orientation};
use crate::nest::Nest;
use crate::pheromone::{Pheromone, PheromoneDeposit, PheromoneField};
use crate::simulation::collision::{circles_overlap, within_bounds};
use crate::world::grid::Grid;
use slotmap::{SecondaryMap, SlotMap};
use std::f32::consts::{PI, TAU};
use tracing::{debug, trace, trace_span};

/// Rejection-sampling budget for a single food source
const MAX_FOOD_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Positional data a renderer needs for one object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawingContext {
    /// Ants carry a heading
    Orientation(Orientation),
    Location(Location),
}

/// Running counters, cumulative since construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub ants_spawned: u64,
    pub ants_released: u64,
    pub ants_returned: u64,
    pub food_collected: u64,
    pub moves_committed: u64,
    pub moves_rejected: u64,
    pub pheromones_deposited: u64,
    pub pheromones_expired: u64,
}

/// Owns every entity and the spatial index, and is the only writer to them.
///
/// Ants are processed in release order, so within one tick a later ant
/// senses positions already committed by earlier ones.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    width: f32,
    height: f32,
    grid: Grid,
    ants: SlotMap<AntKey, Ant>,
    ant_orientations: SecondaryMap<AntKey, Orientation>,
    active: Vec<AntKey>,
    nests: SlotMap<NestKey, Nest>,
    nest_orientations: SecondaryMap<NestKey, Orientation>,
    food: SlotMap<FoodKey, Food>,
    pheromones: PheromoneField,
    rng: fastrand::Rng,
    stats: WorldStats,
    tick: u64,
}

impl World {
    /// Build a world with one nest at its centre and randomly placed food.
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        let mut world = Self {
            width: config.width as f32,
            height: config.height as f32,
            grid: Grid::new(config.width, config.height),
            ants: SlotMap::with_key(),
            ant_orientations: SecondaryMap::new(),
            active: Vec::new(),
            nests: SlotMap::with_key(),
            nest_orientations: SecondaryMap::new(),
            food: SlotMap::with_key(),
            pheromones: PheromoneField::new(),
            rng,
            stats: WorldStats::default(),
            tick: 0,
            config,
        };

        let nest = Nest::new(
            world.config.num_ants_to_spawn,
            world.config.ant_spawn_period_in_sec,
            world.config.nest_pheromone_intensity,
            world.config.ant.clone(),
        );
        world.add_nest(nest, Orientation::new(0.5 * world.width, 0.5 * world.height, 0.0));

        for _ in 0..world.config.num_food_sources {
            world.spawn_food()?;
        }

        debug!(
            width = world.config.width,
            height = world.config.height,
            food = world.food.len(),
            "World created"
        );
        Ok(world)
    }

    /// Register a nest. A nest with a non-zero quota starts with one resident ant.
    fn add_nest(&mut self, mut nest: Nest, orientation: Orientation) -> NestKey {
        if nest.num_ants_to_spawn() > 0 {
            nest.spawn_ant(&mut self.ants);
            self.stats.ants_spawned += 1;
        }
        let key = self.nests.insert(nest);
        self.nest_orientations.insert(key, orientation);
        self.grid.insert(WorldObject::Nest(key), orientation.location);
        key
    }

    fn spawn_food(&mut self) -> Result<FoodKey> {
        let edge = self.config.food_min_distance_to_world_edge;
        let min_to_nest = self.config.food_min_distance_to_nest;
        for _ in 0..MAX_FOOD_PLACEMENT_ATTEMPTS {
            let candidate = Location::new(
                edge + self.rng.f32() * (self.width - 2.0 * edge),
                edge + self.rng.f32() * (self.height - 2.0 * edge),
            );
            let clear_of_nests = self
                .nest_orientations
                .values()
                .all(|nest| min_to_nest < euclidean_distance(candidate, nest.location));
            if clear_of_nests {
                return Ok(self.add_food_source(candidate));
            }
        }
        Err(Error::FoodPlacement {
            attempts: MAX_FOOD_PLACEMENT_ATTEMPTS,
        })
    }

    /// Place a food source at an exact location.
    pub fn add_food_source(&mut self, location: Location) -> FoodKey {
        let food = Food::new(
            location,
            self.config.food_collision_radius(),
            self.config.food_pheromone_intensity,
        );
        let key = self.food.insert(food);
        self.grid.insert(WorldObject::Food(key), location);
        debug!(x = location.x, y = location.y, "Food source placed");
        key
    }

    /// Advance the simulation by one frame.
    pub fn update(&mut self, elapsed_ms: f32) {
        self.tick += 1;
        let _span = trace_span!("tick", tick = self.tick).entered();

        self.prune_pheromones(elapsed_ms);
        self.update_nests(elapsed_ms);
        self.update_ants(elapsed_ms);

        trace!(
            active = self.active.len(),
            resting = self.resident_count(),
            pheromones = self.pheromones.len(),
            "Tick complete"
        );
    }

    fn prune_pheromones(&mut self, elapsed_ms: f32) {
        for (key, marker) in self.pheromones.decay(elapsed_ms) {
            self.grid
                .remove(WorldObject::Pheromone(key, marker.trail()), marker.location());
            self.stats.pheromones_expired += 1;
        }
    }

    fn update_nests(&mut self, elapsed_ms: f32) {
        let keys: Vec<NestKey> = self.nests.keys().collect();
        for key in keys {
            let Some(nest) = self.nests.get_mut(key) else {
                continue;
            };
            let spawned_before = nest.num_ants_spawned();
            let leaving = nest.update(elapsed_ms, &mut self.ants, &mut self.rng);
            self.stats.ants_spawned += u64::from(nest.num_ants_spawned() - spawned_before);

            let (Some(ant), Some(home)) = (leaving, self.nest_orientations.get(key).copied()) else {
                continue;
            };
            let heading = self.rng.f32() * TAU;
            self.release_ant(
                ant,
                Orientation {
                    location: home.location,
                    heading,
                },
            );
        }
    }

    /// Put an ant into the active world at `orientation`.
    fn release_ant(&mut self, key: AntKey, orientation: Orientation) {
        self.ant_orientations.insert(key, orientation);
        self.grid.insert(WorldObject::Ant(key), orientation.location);
        self.active.push(key);
        self.stats.ants_released += 1;
        debug!(?key, heading = orientation.heading, "Ant left nest");
    }

    fn update_ants(&mut self, elapsed_ms: f32) {
        let mut retired = Vec::new();
        for i in 0..self.active.len() {
            let key = self.active[i];
            let (Some(orientation), Some(range)) = (
                self.ant_orientations.get(key).copied(),
                self.ants.get(key).map(Ant::sensing_range),
            ) else {
                continue;
            };

            let region = self.grid.query_region(
                &orientation,
                range,
                Some(WorldObject::Ant(key)),
                |object| self.footprint(object),
            );
            let context = AntContext {
                in_nest: false,
                region: &region,
            };
            let Some(ant) = self.ants.get_mut(key) else {
                continue;
            };
            let action = ant.update(elapsed_ms, &context, &mut self.rng);

            if self.resolve(key, action, elapsed_ms) {
                retired.push(key);
            }
        }

        if !retired.is_empty() {
            self.active.retain(|key| !retired.contains(key));
        }
    }

    /// Apply a requested action. Returns true when the ant left the active world.
    fn resolve(&mut self, key: AntKey, action: Action, elapsed_ms: f32) -> bool {
        trace!(?key, action = action.name(), "Resolving action");
        match action {
            Action::None | Action::LeaveNest => false,
            Action::Move {
                heading_delta,
                speed,
            } => {
                self.move_ant(key, heading_delta, speed, elapsed_ms);
                false
            }
            Action::TurnAround => {
                if let Some(orientation) = self.ant_orientations.get_mut(key) {
                    orientation.heading = (orientation.heading + PI).rem_euclid(TAU);
                }
                false
            }
            Action::DepositPheromone(deposit) => {
                self.deposit_pheromone(key, deposit);
                false
            }
            Action::EnterNest(nest) => self.enter_nest(key, nest),
        }
    }

    fn move_ant(&mut self, key: AntKey, heading_delta: f32, speed: f32, elapsed_ms: f32) {
        let t = (elapsed_ms / 1000.0).min(self.config.max_move_duration_in_sec);
        let (Some(radius), Some(orientation)) = (
            self.ants.get(key).map(|ant| ant.collision_radius()),
            self.ant_orientations.get_mut(key),
        ) else {
            return;
        };

        orientation.heading = (orientation.heading + heading_delta).rem_euclid(TAU);
        let from = orientation.location;
        let attempted = Location::new(
            from.x + orientation.heading.sin() * speed * t,
            from.y - orientation.heading.cos() * speed * t,
        );

        if !within_bounds(attempted, radius, self.width, self.height) {
            self.stats.moves_rejected += 1;
            trace!(?key, x = attempted.x, y = attempted.y, "Move out of bounds rejected");
            return;
        }
        if self
            .food
            .values()
            .any(|food| circles_overlap(attempted, radius, food.location(), food.collision_radius()))
        {
            self.stats.moves_rejected += 1;
            trace!(?key, x = attempted.x, y = attempted.y, "Move into food rejected");
            return;
        }

        self.grid.remove(WorldObject::Ant(key), from);
        orientation.location = attempted;
        self.grid.insert(WorldObject::Ant(key), attempted);
        self.stats.moves_committed += 1;
    }

    fn deposit_pheromone(&mut self, key: AntKey, deposit: PheromoneDeposit) {
        let Some(location) = self.ant_orientations.get(key).map(|o| o.location) else {
            return;
        };
        let marker = self.pheromones.deposit(Pheromone::new(deposit, key, location));
        self.grid
            .insert(WorldObject::Pheromone(marker, deposit.trail), location);
        self.stats.pheromones_deposited += 1;
        trace!(?key, trail = deposit.trail.as_str(), intensity = deposit.intensity, "Pheromone deposited");
    }

    fn enter_nest(&mut self, key: AntKey, nest_key: NestKey) -> bool {
        let Some(nest) = self.nests.get_mut(nest_key) else {
            return false;
        };
        nest.enter_ant(key);

        if let Some(orientation) = self.ant_orientations.remove(key) {
            self.grid.remove(WorldObject::Ant(key), orientation.location);
        }
        self.stats.ants_returned += 1;
        let carrying = self.ants.get(key).is_some_and(Ant::is_carrying_food);
        if carrying {
            self.stats.food_collected += 1;
        }
        debug!(?key, carrying, "Ant entered nest");
        true
    }

    /// What sensors see of `object`, if it is still in the world.
    fn footprint(&self, object: WorldObject) -> Option<Footprint> {
        match object {
            WorldObject::Ant(key) => Some(Footprint {
                location: self.ant_orientations.get(key)?.location,
                intensity: 0.0,
                collision_radius: self.ants.get(key)?.collision_radius(),
            }),
            WorldObject::Nest(key) => Some(Footprint {
                location: self.nest_orientations.get(key)?.location,
                intensity: self.nests.get(key)?.intensity(),
                collision_radius: 0.0,
            }),
            WorldObject::Food(key) => {
                let food = self.food.get(key)?;
                Some(Footprint {
                    location: food.location(),
                    intensity: food.intensity(),
                    collision_radius: food.collision_radius(),
                })
            }
            WorldObject::Pheromone(key, _) => {
                let marker = self.pheromones.get(key)?;
                Some(Footprint {
                    location: marker.location(),
                    intensity: marker.intensity(),
                    collision_radius: 0.0,
                })
            }
        }
    }

    /// Current location of any registered object
    pub fn location_of(&self, object: WorldObject) -> Option<Location> {
        self.footprint(object).map(|f| f.location)
    }

    /// Positional data for rendering. `None` for objects no longer in the world.
    pub fn drawing_context(&self, object: WorldObject) -> Option<DrawingContext> {
        match object {
            WorldObject::Ant(key) => self
                .ant_orientations
                .get(key)
                .copied()
                .map(DrawingContext::Orientation),
            other => self.location_of(other).map(DrawingContext::Location),
        }
    }

    /// Active ants, in processing order
    pub fn ants(&self) -> impl Iterator<Item = AntKey> + '_ {
        self.active.iter().copied()
    }

    pub fn nests(&self) -> impl Iterator<Item = NestKey> + '_ {
        self.nests.keys()
    }

    pub fn food_sources(&self) -> impl Iterator<Item = FoodKey> + '_ {
        self.food.keys()
    }

    pub fn pheromones(&self) -> impl Iterator<Item = PheromoneKey> + '_ {
        self.pheromones.iter().map(|(key, _)| key)
    }

    /// Any ant, active or resting
    pub fn ant(&self, key: AntKey) -> Option<&Ant> {
        self.ants.get(key)
    }

    pub fn ant_orientation(&self, key: AntKey) -> Option<Orientation> {
        self.ant_orientations.get(key).copied()
    }

    pub fn nest(&self, key: NestKey) -> Option<&Nest> {
        self.nests.get(key)
    }

    pub fn food(&self, key: FoodKey) -> Option<&Food> {
        self.food.get(key)
    }

    pub fn pheromone(&self, key: PheromoneKey) -> Option<&Pheromone> {
        self.pheromones.get(key)
    }

    pub fn pheromone_field(&self) -> &PheromoneField {
        &self.pheromones
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Ants resting in any nest
    pub fn resident_count(&self) -> usize {
        self.nests.values().map(|n| n.residents().len()).sum()
    }

    /// Ants ever created, active or resting
    pub fn total_ants(&self) -> usize {
        self.ants.len()
    }

    pub fn stats(&self) -> WorldStats {
        self.stats
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}
