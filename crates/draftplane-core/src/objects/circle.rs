//! Circle primitive.

use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A circle on the drafting plane, defined by center and radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius (>= 0).
    pub radius: f64,
    /// Derived circumference.
    pub circumference: f64,
    /// Derived area.
    pub area: f64,
}

impl Circle {
    /// Create a circle, computing circumference and area.
    pub fn new(center: Point, radius: f64) -> Self {
        let m = geometry::circle_measurements(radius);
        Self {
            center,
            radius,
            circumference: m.circumference,
            area: m.area,
        }
    }

    /// Create a circle whose radius is the distance from `center` to `edge`.
    pub fn from_center_and_edge(center: Point, edge: Point) -> Self {
        Self::new(center, geometry::distance(center, edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurements_are_derived() {
        let circle = Circle::new(Point::new(0.0, 0.0), 5.0);
        assert!((circle.circumference - 31.416).abs() < 1e-3);
        assert!((circle.area - 78.540).abs() < 1e-3);
    }

    #[test]
    fn test_from_center_and_edge() {
        let circle = Circle::from_center_and_edge(Point::new(1.0, 1.0), Point::new(4.0, 5.0));
        assert!((circle.radius - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_radius_allowed() {
        let circle = Circle::new(Point::new(0.0, 0.0), 0.0);
        assert_eq!(circle.circumference, 0.0);
        assert_eq!(circle.area, 0.0);
    }
}
