use serde::{Deserialize, Serialize};

/// A location on the target surface, in surface coordinates.
///
/// Positive `x` is to the right, positive `y` is down, matching the
/// coordinate space touch hardware reports in.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn x(&self) -> f64 {
        self.x
    }

    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Translates by the given deltas.
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Translates by moving a distance along an angle. A zero angle points
    /// straight to the right, positive angles rotate clockwise.
    pub fn offset_at_angle(&self, distance: f64, radians: f64) -> Point {
        self.offset(distance * radians.cos(), distance * radians.sin())
    }

    /// Splits a distance symmetrically around this point along an angle,
    /// producing the two contact locations of a two-finger gesture.
    pub fn two_way_offset(&self, distance: f64, radians: f64) -> [Point; 2] {
        [
            self.offset_at_angle(distance / 2.0, radians),
            self.offset_at_angle(distance / 2.0, std::f64::consts::PI + radians),
        ]
    }

    /// Rotates this point around an anchor by the given angle, preserving
    /// the distance to the anchor.
    pub fn pivot(&self, anchor: Point, radians: f64) -> Point {
        let (sin, cos) = radians.sin_cos();
        let dx = self.x - anchor.x();
        let dy = self.y - anchor.y();
        Point::new(anchor.x() + dx * cos - dy * sin, anchor.y() + dx * sin + dy * cos)
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x() - self.x).hypot(other.y() - self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
