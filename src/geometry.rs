use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// A point on the world plane. y grows downward, as on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Location {
    pub x: f32,
    pub y: f32,
}

impl Location {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A location plus a heading in radians (0 = toward the top of the screen).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub location: Location,
    pub heading: f32,
}

impl Orientation {
    #[inline]
    pub const fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            location: Location::new(x, y),
            heading,
        }
    }
}

/// Bearing relative to an observer's heading, and distance from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialLocation {
    pub angle: f32,
    pub distance: f32,
}

impl RadialLocation {
    /// True when the object lies in the observer's forward half-plane
    #[inline]
    pub fn is_ahead(&self) -> bool {
        self.angle.cos() > 0.0
    }
}

#[inline]
pub fn euclidean_distance(a: Location, b: Location) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Absolute heading of the line from `start` to `end`, in [0, 2π).
///
/// Heading 0 points toward decreasing y, π/2 toward +x, π toward +y.
/// Coincident points yield 0.
pub fn heading_of_line(start: Location, end: Location) -> f32 {
    if start.x < end.x {
        FRAC_PI_2 - ((start.y - end.y) / (end.x - start.x)).atan()
    } else if start.x == end.x {
        if start.y < end.y {
            PI
        } else {
            0.0
        }
    } else {
        3.0 * FRAC_PI_2 - ((start.y - end.y) / (end.x - start.x)).atan()
    }
}

/// Fold an angle into (-π, π]. NaN collapses to 0.
pub fn wrap_angle(mut angle: f32) -> f32 {
    if angle.is_nan() {
        return 0.0;
    }
    angle %= TAU;
    if angle <= -PI {
        angle += TAU;
    } else if angle > PI {
        angle -= TAU;
    }
    angle
}
