use crate::geometry::{euclidean_distance, Location};

/// True when a body of `radius` at `location` fits inside the world.
///
/// The allowed rectangle is `[radius, width - radius] × [radius, height - radius]`, edges included.
#[inline]
pub fn within_bounds(location: Location, radius: f32, width: f32, height: f32) -> bool {
    location.x >= radius
        && location.x <= width - radius
        && location.y >= radius
        && location.y <= height - radius
}

/// True when two bounding circles overlap. Touching circles do not.
#[inline]
pub fn circles_overlap(a: Location, radius_a: f32, b: Location, radius_b: f32) -> bool {
    euclidean_distance(a, b) < radius_a + radius_b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_bounds_edges() {
        assert!(within_bounds(Location::new(2.5, 2.5), 2.5, 100.0, 50.0));
        assert!(within_bounds(Location::new(97.5, 47.5), 2.5, 100.0, 50.0));
        assert!(!within_bounds(Location::new(2.4, 10.0), 2.5, 100.0, 50.0));
        assert!(!within_bounds(Location::new(10.0, 47.6), 2.5, 100.0, 50.0));
        assert!(!within_bounds(Location::new(-1.0, 10.0), 2.5, 100.0, 50.0));
    }

    #[test]
    fn test_circles_overlap() {
        let a = Location::new(0.0, 0.0);
        assert!(circles_overlap(a, 1.0, Location::new(1.5, 0.0), 1.0));
        assert!(!circles_overlap(a, 1.0, Location::new(2.0, 0.0), 1.0));
        assert!(!circles_overlap(a, 1.0, Location::new(3.0, 3.0), 1.0));
    }
}
