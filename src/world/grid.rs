use crate::entity::{Footprint, WorldObject};
use crate::geometry::{euclidean_distance, heading_of_line, wrap_angle, Location, Orientation, RadialLocation};
use crate::world::region::{SensableRegion, Sighting};

/// Spatial index: one cell per world unit, each holding the objects inside it.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<WorldObject>>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1) as usize;
        let height = height.max(1) as usize;
        Self {
            width,
            height,
            cells: vec![Vec::new(); width * height],
        }
    }

    /// Cell holding `location`: truncated coordinates, clamped into the grid
    #[inline]
    fn cell_index(&self, location: Location) -> usize {
        let x = (location.x as usize).min(self.width - 1);
        let y = (location.y as usize).min(self.height - 1);
        y * self.width + x
    }

    /// Register `object` at `location`. Registering twice is a no-op.
    pub fn insert(&mut self, object: WorldObject, location: Location) {
        let idx = self.cell_index(location);
        let cell = &mut self.cells[idx];
        if !cell.contains(&object) {
            cell.push(object);
        }
    }

    /// Unregister `object` from the cell at `location`, if it is there.
    pub fn remove(&mut self, object: WorldObject, location: Location) -> bool {
        let idx = self.cell_index(location);
        let cell = &mut self.cells[idx];
        match cell.iter().position(|o| *o == object) {
            Some(pos) => {
                cell.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, object: WorldObject, location: Location) -> bool {
        self.cells[self.cell_index(location)].contains(&object)
    }

    /// Objects in the cell at integer coordinates
    pub fn cell(&self, x: usize, y: usize) -> &[WorldObject] {
        if x >= self.width || y >= self.height {
            return &[];
        }
        &self.cells[y * self.width + x]
    }

    /// Total number of registrations across all cells
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    /// Everything strictly within `radius` of `origin`, except `exclude`.
    ///
    /// Bearings are relative to `origin.heading` and wrapped into (-π, π].
    /// `resolve` supplies each candidate's footprint; objects it cannot
    /// resolve are skipped.
    pub fn query_region<F>(
        &self,
        origin: &Orientation,
        radius: f32,
        exclude: Option<WorldObject>,
        resolve: F,
    ) -> SensableRegion
    where
        F: Fn(WorldObject) -> Option<Footprint>,
    {
        let here = origin.location;
        let x1 = (here.x - radius).max(0.0) as usize;
        let x2 = ((here.x + radius).ceil().max(0.0) as usize).min(self.width);
        let y1 = (here.y - radius).max(0.0) as usize;
        let y2 = ((here.y + radius).ceil().max(0.0) as usize).min(self.height);

        let mut region = SensableRegion::new();
        for y in y1..y2 {
            let row = &self.cells[y * self.width..(y + 1) * self.width];
            for cell in &row[x1.min(x2)..x2] {
                for &object in cell {
                    if Some(object) == exclude {
                        continue;
                    }
                    let Some(footprint) = resolve(object) else {
                        continue;
                    };
                    let distance = euclidean_distance(here, footprint.location);
                    if distance >= radius {
                        continue;
                    }
                    let angle = wrap_angle(heading_of_line(here, footprint.location) - origin.heading);
                    region.add(Sighting {
                        object,
                        bearing: RadialLocation { angle, distance },
                        intensity: footprint.intensity,
                        collision_radius: footprint.collision_radius,
                    });
                }
            }
        }
        region
    }
}
