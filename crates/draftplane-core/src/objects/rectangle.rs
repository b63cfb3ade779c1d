//! Axis-aligned rectangle primitive.

use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle spanned by two opposite corners.
///
/// Corners are normalized at creation so `corner1` is the minimum corner and
/// `corner2` the maximum, regardless of click order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    /// Minimum corner.
    pub corner1: Point,
    /// Maximum corner.
    pub corner2: Point,
    /// Derived width (absolute x extent).
    pub width: f64,
    /// Derived height (absolute y extent).
    pub height: f64,
    /// Derived area.
    pub area: f64,
    /// Derived perimeter.
    pub perimeter: f64,
}

impl Rectangle {
    /// Create a rectangle from two opposite corners in either order.
    pub fn new(c1: Point, c2: Point) -> Self {
        let m = geometry::rectangle_measurements(c1, c2);
        Self {
            corner1: Point::new(c1.x.min(c2.x), c1.y.min(c2.y)),
            corner2: Point::new(c1.x.max(c2.x), c1.y.max(c2.y)),
            width: m.width,
            height: m.height,
            area: m.area,
            perimeter: m.perimeter,
        }
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(
            (self.corner1.x + self.corner2.x) / 2.0,
            (self.corner1.y + self.corner2.y) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurements_are_derived() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), Point::new(4.0, 3.0));
        assert!((rect.width - 4.0).abs() < f64::EPSILON);
        assert!((rect.height - 3.0).abs() < f64::EPSILON);
        assert!((rect.area - 12.0).abs() < f64::EPSILON);
        assert!((rect.perimeter - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_corners_normalized() {
        let rect = Rectangle::new(Point::new(4.0, 3.0), Point::new(0.0, 0.0));
        assert_eq!(rect.corner1, Point::new(0.0, 0.0));
        assert_eq!(rect.corner2, Point::new(4.0, 3.0));
        assert!((rect.area - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_rectangle_allowed() {
        let rect = Rectangle::new(Point::new(2.0, 0.0), Point::new(2.0, 5.0));
        assert_eq!(rect.area, 0.0);
        assert!((rect.height - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_center() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        assert_eq!(rect.center(), Point::new(2.0, 1.0));
    }
}
