use crate::types::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub const fn x(&self) -> f64 {
        self.x
    }

    pub const fn y(&self) -> f64 {
        self.y
    }

    pub const fn width(&self) -> f64 {
        self.width
    }

    pub const fn height(&self) -> f64 {
        self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x() >= self.x
            && point.x() <= self.right()
            && point.y() >= self.y
            && point.y() <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x() <= self.right()
            && self.y <= other.bottom()
            && other.y() <= self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn center_is_midpoint() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.center(), Point::new(60.0, 40.0));
    }

    #[rstest]
    #[case(Point::new(10.0, 20.0), true)]
    #[case(Point::new(110.0, 60.0), true)]
    #[case(Point::new(111.0, 20.0), false)]
    #[case(Point::new(10.0, 19.0), false)]
    fn contains_includes_edges(#[case] point: Point, #[case] expected: bool) {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.contains(point), expected);
    }

    #[rstest]
    fn disjoint_rects_do_not_intersect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!rect.intersects(&Rect::new(20.0, 20.0, 10.0, 10.0)));
    }
}
