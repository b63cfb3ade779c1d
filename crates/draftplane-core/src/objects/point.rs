//! Point marker primitive.

use crate::geometry::POINT_ELEVATION;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A single marked position on the drafting plane.
///
/// The elevation is a fixed display offset (the marker floats slightly above
/// the ground plane); it is not user-chosen and takes part in no measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointMark {
    /// Planar position.
    pub position: Point,
    /// Display elevation above the ground plane.
    pub elevation: f64,
}

impl PointMark {
    /// Create a point marker at the given plan coordinate.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            elevation: POINT_ELEVATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_is_fixed() {
        let mark = PointMark::new(Point::new(2.0, -1.0));
        assert!((mark.elevation - POINT_ELEVATION).abs() < f64::EPSILON);
        assert!((mark.position.x - 2.0).abs() < f64::EPSILON);
    }
}
