use crate::action::Action;
use crate::ant::{Ant, AntContext};
use crate::config::AntConfig;
use crate::entity::{AntKey, Sensable};
use crate::world::SensableRegion;
use slotmap::SlotMap;
use tracing::debug;

/// Spawns ants on a timer and shelters the ones that come home.
#[derive(Clone, Debug)]
pub struct Nest {
    num_ants_to_spawn: u32,
    spawn_period_in_sec: f32,
    pheromone_intensity: f32,
    ant_config: AntConfig,
    ms_since_last_spawn: f32,
    num_ants_spawned: u32,
    residents: Vec<AntKey>,
}

impl Nest {
    pub fn new(
        num_ants_to_spawn: u32,
        spawn_period_in_sec: f32,
        pheromone_intensity: f32,
        ant_config: AntConfig,
    ) -> Self {
        Self {
            num_ants_to_spawn,
            spawn_period_in_sec,
            pheromone_intensity,
            ant_config,
            ms_since_last_spawn: 0.0,
            num_ants_spawned: 0,
            residents: Vec::new(),
        }
    }

    /// Ants spawned over the nest's lifetime
    #[inline]
    pub fn num_ants_spawned(&self) -> u32 {
        self.num_ants_spawned
    }

    #[inline]
    pub fn num_ants_to_spawn(&self) -> u32 {
        self.num_ants_to_spawn
    }

    /// Ants currently inside, in arrival order
    #[inline]
    pub fn residents(&self) -> &[AntKey] {
        &self.residents
    }

    /// Create a resident ant in `ants` and restart the spawn timer.
    pub fn spawn_ant(&mut self, ants: &mut SlotMap<AntKey, Ant>) -> AntKey {
        let key = ants.insert(Ant::new(&self.ant_config));
        self.residents.push(key);
        self.ms_since_last_spawn = 0.0;
        self.num_ants_spawned += 1;
        debug!(spawned = self.num_ants_spawned, cap = self.num_ants_to_spawn, "Nest spawned ant");
        key
    }

    /// Advance the spawn timer and let residents decide whether to leave.
    ///
    /// At most one ant is spawned and at most one ant leaves per call.
    /// The ant that leaves is handed back to the caller.
    pub fn update(
        &mut self,
        elapsed_ms: f32,
        ants: &mut SlotMap<AntKey, Ant>,
        rng: &mut fastrand::Rng,
    ) -> Option<AntKey> {
        self.ms_since_last_spawn += elapsed_ms;
        if self.num_ants_spawned < self.num_ants_to_spawn
            && self.spawn_period_in_sec < self.ms_since_last_spawn / 1000.0
        {
            self.spawn_ant(ants);
        }

        let inside = SensableRegion::new();
        let context = AntContext {
            in_nest: true,
            region: &inside,
        };
        let mut leaving = None;
        for (i, &key) in self.residents.iter().enumerate() {
            let Some(ant) = ants.get_mut(key) else {
                continue;
            };
            if ant.update(elapsed_ms, &context, rng) == Action::LeaveNest {
                leaving = Some(i);
                break;
            }
        }
        leaving.map(|i| self.residents.remove(i))
    }

    /// Take in an ant coming home.
    pub fn enter_ant(&mut self, ant: AntKey) {
        if !self.residents.contains(&ant) {
            self.residents.push(ant);
        }
    }
}

impl Sensable for Nest {
    #[inline]
    fn intensity(&self) -> f32 {
        self.pheromone_intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ant::AntState;

    fn nest(cap: u32, period: f32) -> Nest {
        Nest::new(cap, period, 1.0, AntConfig::default())
    }

    #[test]
    fn test_spawn_adds_resident() {
        let mut ants = SlotMap::with_key();
        let mut nest = nest(3, 1.0);

        let key = nest.spawn_ant(&mut ants);
        assert_eq!(nest.residents(), &[key]);
        assert_eq!(nest.num_ants_spawned(), 1);
        assert!(ants.contains_key(key));
    }

    #[test]
    fn test_resident_leaves_on_update() {
        let mut ants = SlotMap::with_key();
        let mut rng = fastrand::Rng::with_seed(3);
        let mut nest = nest(1, 1.0);
        let key = nest.spawn_ant(&mut ants);

        assert_eq!(nest.update(10.0, &mut ants, &mut rng), Some(key));
        assert!(nest.residents().is_empty());
        assert_eq!(nest.update(10.0, &mut ants, &mut rng), None);
    }

    #[test]
    fn test_only_one_ant_leaves_per_tick() {
        let mut ants = SlotMap::with_key();
        let mut rng = fastrand::Rng::with_seed(3);
        let mut nest = nest(3, 100.0);
        let first = nest.spawn_ant(&mut ants);
        let second = nest.spawn_ant(&mut ants);
        let third = nest.spawn_ant(&mut ants);

        assert_eq!(nest.update(10.0, &mut ants, &mut rng), Some(first));
        assert_eq!(nest.residents(), &[second, third]);
        assert_eq!(nest.update(10.0, &mut ants, &mut rng), Some(second));
        assert_eq!(nest.update(10.0, &mut ants, &mut rng), Some(third));
    }

    #[test]
    fn test_spawns_at_most_one_per_tick_and_respects_cap() {
        let mut ants = SlotMap::with_key();
        let mut rng = fastrand::Rng::with_seed(3);
        let mut nest = nest(2, 1.0);

        // Five spawn periods in one tick still spawn a single ant.
        let left = nest.update(5000.0, &mut ants, &mut rng);
        assert!(left.is_some());
        assert_eq!(nest.num_ants_spawned(), 1);

        // Exactly one period elapsed is not enough: the check is strict.
        nest.update(1000.0, &mut ants, &mut rng);
        assert_eq!(nest.num_ants_spawned(), 1);
        nest.update(1.0, &mut ants, &mut rng);
        assert_eq!(nest.num_ants_spawned(), 2);

        for _ in 0..10 {
            nest.update(5000.0, &mut ants, &mut rng);
        }
        assert_eq!(nest.num_ants_spawned(), 2);
        assert_eq!(ants.len(), 2);
    }

    #[test]
    fn test_returning_ant_is_reset_before_leaving() {
        let mut ants: SlotMap<AntKey, Ant> = SlotMap::with_key();
        let mut rng = fastrand::Rng::with_seed(3);
        let mut nest = nest(0, 1.0);
        let key = ants.insert(Ant::new(&AntConfig::default()));

        nest.enter_ant(key);
        nest.enter_ant(key);
        assert_eq!(nest.residents(), &[key]);

        assert_eq!(nest.update(10.0, &mut ants, &mut rng), Some(key));
        let ant = &ants[key];
        assert_eq!(ant.state(), AntState::LookingForFood);
        assert!(!ant.is_carrying_food());
    }
}
