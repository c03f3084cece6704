use crate::entity::{AntKey, PheromoneKey, Sensable, Updatable};
use crate::geometry::Location;
use slotmap::SlotMap;

/// Markers weaker than this are pruned from the world.
pub const PHEROMONE_FLOOR: f32 = 0.01;

/// What a trail leads back to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trail {
    /// Laid by ants still searching; leads toward the nest
    Nest,
    /// Laid by ants carrying food; leads toward food
    Food,
}

impl Trail {
    pub const fn as_str(self) -> &'static str {
        match self {
            Trail::Nest => "nest",
            Trail::Food => "food",
        }
    }
}

/// A deposit an ant asks the world to place at its current location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PheromoneDeposit {
    pub trail: Trail,
    pub decay_factor: f32,
    pub intensity: f32,
}

/// A decaying point marker.
#[derive(Clone, Debug)]
pub struct Pheromone {
    trail: Trail,
    producer: AntKey,
    decay_factor: f32,
    intensity: f32,
    location: Location,
}

impl Pheromone {
    pub fn new(deposit: PheromoneDeposit, producer: AntKey, location: Location) -> Self {
        Self {
            trail: deposit.trail,
            producer,
            decay_factor: deposit.decay_factor,
            intensity: deposit.intensity,
            location,
        }
    }

    #[inline]
    pub fn trail(&self) -> Trail {
        self.trail
    }

    #[inline]
    pub fn producer(&self) -> AntKey {
        self.producer
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.intensity < PHEROMONE_FLOOR
    }
}

impl Sensable for Pheromone {
    #[inline]
    fn intensity(&self) -> f32 {
        self.intensity
    }
}

impl Updatable for Pheromone {
    /// `decay_factor` is the fraction retained per second.
    fn update(&mut self, elapsed_ms: f32) {
        self.intensity *= self.decay_factor.powf(elapsed_ms / 1000.0);
    }
}

/// Every live marker, regardless of trail.
#[derive(Debug, Default)]
pub struct PheromoneField {
    markers: SlotMap<PheromoneKey, Pheromone>,
}

impl PheromoneField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deposit(&mut self, pheromone: Pheromone) -> PheromoneKey {
        self.markers.insert(pheromone)
    }

    /// Decay all markers, then drop the ones below the floor.
    ///
    /// Returns what was dropped so the caller can unregister it elsewhere.
    pub fn decay(&mut self, elapsed_ms: f32) -> Vec<(PheromoneKey, Pheromone)> {
        let mut expired = Vec::new();
        for (key, marker) in self.markers.iter_mut() {
            marker.update(elapsed_ms);
            if marker.is_expired() {
                expired.push(key);
            }
        }

        expired
            .into_iter()
            .filter_map(|key| self.markers.remove(key).map(|p| (key, p)))
            .collect()
    }

    #[inline]
    pub fn get(&self, key: PheromoneKey) -> Option<&Pheromone> {
        self.markers.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PheromoneKey, &Pheromone)> {
        self.markers.iter()
    }

    pub fn count(&self, trail: Trail) -> usize {
        self.markers.values().filter(|p| p.trail == trail).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
