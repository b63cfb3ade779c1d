//! Line segment primitive.

use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A straight segment between two plan coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSegment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Derived length.
    pub length: f64,
}

impl LineSegment {
    /// Create a line segment, computing its length.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            length: geometry::distance(start, end),
        }
    }

    /// Midpoint of the segment.
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_derived() {
        let line = LineSegment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((line.length - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_length_allowed() {
        let line = LineSegment::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert_eq!(line.length, 0.0);
    }

    #[test]
    fn test_midpoint() {
        let line = LineSegment::new(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        let mid = line.midpoint();
        assert!((mid.x - 2.0).abs() < f64::EPSILON);
        assert!((mid.y - 1.0).abs() < f64::EPSILON);
    }
}
