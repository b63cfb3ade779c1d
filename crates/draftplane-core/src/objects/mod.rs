//! Drafting primitives and their canonical records.
//!
//! Every placed primitive is a [`DraftObject`]: an id, a kind-specific
//! geometry payload with its derived measurements, the owning layer, and a
//! visibility flag. Payloads are immutable after creation; measurements are
//! computed once by the constructors in the per-kind modules.

mod circle;
mod line;
mod point;
mod polygon;
mod rectangle;

pub use circle::Circle;
pub use line::LineSegment;
pub use point::PointMark;
pub use polygon::Polygon;
pub use rectangle::Rectangle;

use serde::{Deserialize, Serialize};

/// Unique identifier for draft objects.
///
/// Assigned from a monotonically increasing counter owned by the engine;
/// ids are never reused within a session.
pub type ObjectId = u64;

/// The closed set of primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Point,
    Line,
    Polygon,
    Circle,
    Rectangle,
}

/// Kind-specific geometry payload of a primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DraftGeometry {
    Point(PointMark),
    Line(LineSegment),
    Polygon(Polygon),
    Circle(Circle),
    Rectangle(Rectangle),
}

impl DraftGeometry {
    /// Which of the five kinds this payload is.
    pub fn kind(&self) -> ObjectKind {
        match self {
            DraftGeometry::Point(_) => ObjectKind::Point,
            DraftGeometry::Line(_) => ObjectKind::Line,
            DraftGeometry::Polygon(_) => ObjectKind::Polygon,
            DraftGeometry::Circle(_) => ObjectKind::Circle,
            DraftGeometry::Rectangle(_) => ObjectKind::Rectangle,
        }
    }

    /// Length-like contribution to the running totals.
    ///
    /// Line length, polygon perimeter, circle circumference, rectangle
    /// perimeter; points contribute nothing.
    pub fn length_contribution(&self) -> f64 {
        match self {
            DraftGeometry::Point(_) => 0.0,
            DraftGeometry::Line(l) => l.length,
            DraftGeometry::Polygon(p) => p.perimeter,
            DraftGeometry::Circle(c) => c.circumference,
            DraftGeometry::Rectangle(r) => r.perimeter,
        }
    }

    /// Area-like contribution to the running totals.
    pub fn area_contribution(&self) -> f64 {
        match self {
            DraftGeometry::Point(_) | DraftGeometry::Line(_) => 0.0,
            DraftGeometry::Polygon(p) => p.area,
            DraftGeometry::Circle(c) => c.area,
            DraftGeometry::Rectangle(r) => r.area,
        }
    }

    /// Whether the payload carries zero measurement for its kind.
    ///
    /// Degenerate primitives are accepted, not rejected; the engine logs
    /// a warning when one is created.
    pub fn is_degenerate(&self) -> bool {
        match self {
            DraftGeometry::Point(_) => false,
            DraftGeometry::Line(l) => l.length == 0.0,
            DraftGeometry::Polygon(p) => p.area == 0.0,
            DraftGeometry::Circle(c) => c.radius == 0.0,
            DraftGeometry::Rectangle(r) => r.area == 0.0,
        }
    }
}

/// A placed primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftObject {
    /// Unique, non-reused id.
    pub id: ObjectId,
    /// Kind-specific geometry with derived measurements.
    pub geometry: DraftGeometry,
    /// Index of the owning layer at creation time.
    pub layer: usize,
    /// Effective display flag; mirrors the owning layer's visibility.
    pub visible: bool,
}

impl DraftObject {
    /// Create a record for a freshly completed primitive.
    pub fn new(id: ObjectId, geometry: DraftGeometry, layer: usize, visible: bool) -> Self {
        Self {
            id,
            geometry,
            layer,
            visible,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.geometry.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_contributions_per_kind() {
        let line = DraftGeometry::Line(LineSegment::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0)));
        assert!((line.length_contribution() - 5.0).abs() < 1e-9);
        assert_eq!(line.area_contribution(), 0.0);

        let rect =
            DraftGeometry::Rectangle(Rectangle::new(Point::new(0.0, 0.0), Point::new(4.0, 3.0)));
        assert!((rect.length_contribution() - 14.0).abs() < 1e-9);
        assert!((rect.area_contribution() - 12.0).abs() < 1e-9);

        let point = DraftGeometry::Point(PointMark::new(Point::new(1.0, 2.0)));
        assert_eq!(point.length_contribution(), 0.0);
        assert_eq!(point.area_contribution(), 0.0);
    }

    #[test]
    fn test_degenerate_detection() {
        let line = DraftGeometry::Line(LineSegment::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0)));
        assert!(line.is_degenerate());

        let circle = DraftGeometry::Circle(Circle::new(Point::new(0.0, 0.0), 0.0));
        assert!(circle.is_degenerate());

        let ok = DraftGeometry::Circle(Circle::new(Point::new(0.0, 0.0), 2.0));
        assert!(!ok.is_degenerate());
    }
}
