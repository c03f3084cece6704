use crate::action::Action;
use crate::config::AntConfig;
use crate::entity::{Collidable, NestKey, WorldObject};
use crate::pheromone::{PheromoneDeposit, Trail};
use crate::world::SensableRegion;
use std::f32::consts::FRAC_PI_2;

/// Largest random heading jitter, before scaling by the chaos factor
const MAX_CHAOTIC_DELTA_HEADING: f32 = FRAC_PI_2;
/// Keeps the steering ratio finite when nothing relevant is sensed
const STEERING_EPSILON: f32 = 0.001;

/// Foraging state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AntState {
    LookingForFood,
    HeadingHome,
}

impl AntState {
    /// Trail whose markers attract an ant in this state
    #[inline]
    pub const fn target_trail(self) -> Trail {
        match self {
            AntState::LookingForFood => Trail::Food,
            AntState::HeadingHome => Trail::Nest,
        }
    }

    #[inline]
    fn is_target(self, object: WorldObject) -> bool {
        match (self, object) {
            (AntState::LookingForFood, WorldObject::Food(_)) => true,
            (AntState::HeadingHome, WorldObject::Nest(_)) => true,
            (state, WorldObject::Pheromone(_, trail)) => trail == state.target_trail(),
            _ => false,
        }
    }
}

/// What the ant gets to know before deciding
#[derive(Clone, Copy, Debug)]
pub struct AntContext<'a> {
    pub in_nest: bool,
    pub region: &'a SensableRegion,
}

/// A forager. Holds only behavioural state; its position lives in the world.
#[derive(Clone, Debug)]
pub struct Ant {
    config: AntConfig,
    collision_radius: f32,
    deposit_period_ms: f32,
    state: AntState,
    carrying_food: bool,
    ms_since_deposit: f32,
    deposit_intensity: f32,
    seconds_until_turn_around: f32,
    times_turned_around: u32,
    previous_heading_delta: f32,
}

impl Ant {
    pub fn new(config: &AntConfig) -> Self {
        Self {
            collision_radius: config.collision_radius(),
            deposit_period_ms: 1000.0 / config.pheromone_deposit_rate_per_sec,
            state: AntState::LookingForFood,
            carrying_food: false,
            ms_since_deposit: 0.0,
            deposit_intensity: 1.0,
            seconds_until_turn_around: config.max_search_time_in_sec,
            times_turned_around: 0,
            previous_heading_delta: 0.0,
            config: config.clone(),
        }
    }

    #[inline]
    pub fn state(&self) -> AntState {
        self.state
    }

    #[inline]
    pub fn is_carrying_food(&self) -> bool {
        self.carrying_food
    }

    #[inline]
    pub fn deposit_intensity(&self) -> f32 {
        self.deposit_intensity
    }

    #[inline]
    pub fn seconds_until_turn_around(&self) -> f32 {
        self.seconds_until_turn_around
    }

    #[inline]
    pub fn times_turned_around(&self) -> u32 {
        self.times_turned_around
    }

    #[inline]
    pub fn previous_heading_delta(&self) -> f32 {
        self.previous_heading_delta
    }

    #[inline]
    pub fn sensing_range(&self) -> f32 {
        self.config.sensing_range
    }

    /// Decide the next action. Exactly one action is requested per tick.
    pub fn update(&mut self, elapsed_ms: f32, context: &AntContext<'_>, rng: &mut fastrand::Rng) -> Action {
        if context.in_nest {
            self.rest();
            return Action::LeaveNest;
        }

        self.deposit_intensity *= self
            .config
            .pheromone_deposit_intensity_decay_factor_per_sec
            .powf(elapsed_ms / 1000.0);

        self.ms_since_deposit += elapsed_ms;
        if self.deposit_period_ms < self.ms_since_deposit {
            self.ms_since_deposit = 0.0;
            return Action::DepositPheromone(self.produce_pheromone());
        }

        if !self.carrying_food {
            self.seconds_until_turn_around -= elapsed_ms / 1000.0;
            if self.seconds_until_turn_around < 0.0 {
                self.state = AntState::HeadingHome;
                self.times_turned_around += 1;
                self.seconds_until_turn_around = self.search_time_after(self.times_turned_around);
                return Action::TurnAround;
            }
        }

        if self.state == AntState::LookingForFood && self.food_in_reach(context.region) {
            self.pick_up_food();
            return Action::TurnAround;
        }

        if self.state == AntState::HeadingHome {
            if let Some(nest) = self.nest_in_reach(context.region) {
                return Action::EnterNest(nest);
            }
        }

        let heading_delta = self.steering(context.region, rng);
        self.previous_heading_delta = heading_delta;
        Action::Move {
            heading_delta,
            speed: self.config.move_speed,
        }
    }

    /// Countdown granted after the `n`th give-up: doubles each time
    #[inline]
    pub fn search_time_after(&self, n: u32) -> f32 {
        self.config.max_search_time_in_sec * 2f32.powi(n as i32)
    }

    /// Take a load and head home with a fresh trail.
    pub fn pick_up_food(&mut self) {
        self.carrying_food = true;
        self.deposit_intensity = 1.0;
        self.state = AntState::HeadingHome;
    }

    /// Back inside a nest: forget the last trip.
    fn rest(&mut self) {
        self.times_turned_around = 0;
        self.seconds_until_turn_around = self.config.max_search_time_in_sec;
        self.carrying_food = false;
        self.deposit_intensity = 1.0;
        self.state = AntState::LookingForFood;
    }

    fn produce_pheromone(&self) -> PheromoneDeposit {
        let (trail, decay_factor) = if self.carrying_food {
            (Trail::Food, self.config.food_pheromone_decay_factor_per_sec)
        } else {
            (Trail::Nest, self.config.nest_pheromone_decay_factor_per_sec)
        };
        PheromoneDeposit {
            trail,
            decay_factor,
            intensity: self.deposit_intensity,
        }
    }

    fn food_in_reach(&self, region: &SensableRegion) -> bool {
        region.iter().any(|s| {
            matches!(s.object, WorldObject::Food(_))
                && s.bearing.distance < self.collision_radius + s.collision_radius + 1.0
        })
    }

    fn nest_in_reach(&self, region: &SensableRegion) -> Option<NestKey> {
        region.iter().find_map(|s| match s.object {
            WorldObject::Nest(key) if s.bearing.distance < self.collision_radius => Some(key),
            _ => None,
        })
    }

    /// Weight of a stimulus at `distance`: 1 at contact, 0.5 at half range, 0 at the edge.
    fn distance_factor(&self, distance: f32) -> f32 {
        let half_range = 0.5 * self.config.sensing_range;
        let gain = self.config.sensing_attenuation_gain;
        if distance <= half_range {
            1.0 - 0.5 * (distance / half_range).powf(gain)
        } else {
            0.5 * (1.0 - (distance - half_range) / half_range).max(0.0).powf(gain)
        }
    }

    /// Heading change toward sensed targets, plus momentum and jitter.
    pub fn steering(&self, region: &SensableRegion, rng: &mut fastrand::Rng) -> f32 {
        let mut numerator = 0.0;
        let mut denominator = STEERING_EPSILON;
        for sighting in region.iter() {
            let angle = sighting.bearing.angle;
            if !sighting.bearing.is_ahead() || !self.state.is_target(sighting.object) {
                continue;
            }
            numerator += sighting.intensity
                * FRAC_PI_2
                * angle.sin()
                * angle.cos().powf(0.25)
                * self.distance_factor(sighting.bearing.distance);
            denominator += sighting.intensity;
        }

        let momentum = self.previous_heading_delta * self.config.heading_delta_momentum_factor;
        let max_chaos = self.config.chaos_factor * MAX_CHAOTIC_DELTA_HEADING;
        let chaos = if max_chaos > 0.0 {
            -max_chaos + 2.0 * max_chaos * rng.f32()
        } else {
            0.0
        };
        numerator / denominator + momentum + chaos
    }
}

impl Collidable for Ant {
    #[inline]
    fn collision_radius(&self) -> f32 {
        self.collision_radius
    }
}
