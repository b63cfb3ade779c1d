//! Polygon primitive.

use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A closed polygon on the drafting plane.
///
/// Vertices are kept in drawing order; the closing edge from the last vertex
/// back to the first is implicit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    /// Ordered vertices (insertion order is significant).
    pub points: Vec<Point>,
    /// Derived area (winding-independent).
    pub area: f64,
    /// Derived perimeter, including the closing edge.
    pub perimeter: f64,
}

impl Polygon {
    /// Create a polygon from its vertices, computing area and perimeter.
    pub fn new(points: Vec<Point>) -> Self {
        let area = geometry::polygon_area(&points);
        let perimeter = geometry::polygon_perimeter(&points);
        Self {
            points,
            area,
            perimeter,
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }
}
