use crate::entity::WorldObject;
use crate::geometry::RadialLocation;

/// One object seen by a sensing query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sighting {
    pub object: WorldObject,
    pub bearing: RadialLocation,
    pub intensity: f32,
    pub collision_radius: f32,
}

/// Objects near an observer, with bearing relative to its heading.
///
/// Built fresh for every query and dropped once the decision is made.
#[derive(Clone, Debug, Default)]
pub struct SensableRegion {
    sightings: Vec<Sighting>,
}

impl SensableRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, sighting: Sighting) {
        self.sightings.push(sighting);
    }

    pub fn get(&self, object: WorldObject) -> Option<&Sighting> {
        self.sightings.iter().find(|s| s.object == object)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sighting> {
        self.sightings.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sightings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sightings.is_empty()
    }
}

impl FromIterator<Sighting> for SensableRegion {
    fn from_iter<I: IntoIterator<Item = Sighting>>(iter: I) -> Self {
        Self {
            sightings: iter.into_iter().collect(),
        }
    }
}
