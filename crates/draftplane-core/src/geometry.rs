//! Planar measurement math for the drafting plane.
//!
//! All functions work on `kurbo::Point` interpreted as a coordinate on the
//! ground plane (x = plan east, y = plan north). Elevation never enters a
//! formula; it exists only as a display constant.

use kurbo::Point;

/// Default grid spacing in drawing units.
pub const GRID_SIZE: f64 = 1.0;

/// Default distance within which a click counts as "on" an existing vertex.
pub const SNAP_TOLERANCE: f64 = 0.5;

/// Display elevation of a point marker above the ground plane.
pub const POINT_ELEVATION: f64 = 0.3;

/// Euclidean distance between two plan coordinates.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Snap a point to the nearest grid intersection.
///
/// Each axis rounds independently to the nearest multiple of `grid_size`.
/// A non-positive `grid_size` means snapping is disabled and the point is
/// returned unchanged.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    if grid_size <= 0.0 {
        return point;
    }
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Area of a closed polygon via the shoelace formula.
///
/// The vertex sequence is treated as a closed ring (implicit edge from the
/// last vertex back to the first). Returns the absolute value of the signed
/// area, so winding order does not matter. Fewer than 3 vertices yield 0.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area.abs() / 2.0
}

/// Perimeter of a closed polygon, including the closing edge.
///
/// Fewer than 2 vertices yield 0.
pub fn polygon_perimeter(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut perimeter = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        perimeter += distance(points[i], points[j]);
    }
    perimeter
}

/// Derived measurements of a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleMeasurements {
    pub circumference: f64,
    pub area: f64,
}

/// Circumference and area for a circle of the given radius.
///
/// A zero radius is a valid degenerate circle and yields zero measurements.
pub fn circle_measurements(radius: f64) -> CircleMeasurements {
    CircleMeasurements {
        circumference: 2.0 * std::f64::consts::PI * radius,
        area: std::f64::consts::PI * radius * radius,
    }
}

/// Derived measurements of an axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleMeasurements {
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub perimeter: f64,
}

/// Width, height, area, and perimeter for the axis-aligned rectangle spanned
/// by two opposite corners (in either order).
///
/// Degenerate rectangles (zero width or height) are valid and yield zero area.
pub fn rectangle_measurements(corner1: Point, corner2: Point) -> RectangleMeasurements {
    let width = (corner2.x - corner1.x).abs();
    let height = (corner2.y - corner1.y).abs();
    RectangleMeasurements {
        width,
        height,
        area: width * height,
        perimeter: 2.0 * (width + height),
    }
}
