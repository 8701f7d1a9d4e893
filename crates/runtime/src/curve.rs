use std::f64::consts::FRAC_PI_2;
use tactile_core::types::Point;

/// Eased interpolation between two values over a normalized time fraction.
///
/// The curve `sin(sin(t·π/2)·t·π/2)` accelerates out of the start and
/// settles into the end, which tracks human finger motion much closer than
/// linear interpolation. The same curve is applied to positions, pressure,
/// altitude and azimuth so every animated attribute moves in lockstep.
///
/// `ease(a, b, 0) == a` and `ease(a, b, 1) == b` hold exactly.
pub fn ease(from: f64, to: f64, time_fraction: f64) -> f64 {
    from + (to - from) * ((time_fraction * FRAC_PI_2).sin() * time_fraction * FRAC_PI_2).sin()
}

/// [`ease`] applied independently per axis.
pub fn ease_point(from: Point, to: Point, time_fraction: f64) -> Point {
    Point::new(ease(from.x(), to.x(), time_fraction), ease(from.y(), to.y(), time_fraction))
}
