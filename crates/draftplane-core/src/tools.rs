//! Tool state machine: interprets resolved ground-plane clicks as primitives.
//!
//! The controller owns only the in-progress click sequence. Completed
//! geometry is handed back to the caller; ids, layer filing, totals, and
//! history are the engine's responsibility.

use crate::geometry;
use crate::objects::{Circle, DraftGeometry, LineSegment, PointMark, Polygon, Rectangle};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available drafting tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Point,
    Line,
    Polygon,
    Circle,
    Rectangle,
}

/// State of the active tool.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// No click sequence in progress.
    #[default]
    Idle,
    /// A multi-click sequence is in progress.
    Accumulating {
        /// Clicks collected so far, in order.
        points: Vec<Point>,
    },
}

/// Non-committing render hint for the in-progress sequence.
///
/// Recomputed wholesale on every pointer move and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPreview {
    /// Line or first-to-cursor segment.
    Segment { start: Point, end: Point },
    /// Open polygon outline: accumulated vertices plus the cursor.
    Polyline { points: Vec<Point> },
    /// Circle from the committed center to the cursor.
    Circle { center: Point, radius: f64 },
    /// Rectangle from the committed corner to the cursor.
    Rect { corner1: Point, corner2: Point },
}

/// Interprets (tool, resolved click) pairs into completed geometry.
#[derive(Debug, Clone, Default)]
pub struct ToolController {
    /// Currently selected tool.
    current_tool: ToolKind,
    /// In-progress click sequence, if any.
    state: ToolState,
}

impl ToolController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    /// Switch tools. Any in-progress sequence is discarded: this is a hard
    /// cancel, never a commit.
    pub fn select_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Discard the in-progress sequence without emitting anything.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Whether a multi-click sequence is in progress.
    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, ToolState::Accumulating { .. })
    }

    /// The clicks collected so far (empty when idle).
    pub fn accumulated_points(&self) -> &[Point] {
        match &self.state {
            ToolState::Idle => &[],
            ToolState::Accumulating { points } => points,
        }
    }

    /// Feed one resolved click to the active tool.
    ///
    /// Returns completed geometry when the click finishes a primitive;
    /// otherwise the click is absorbed into the accumulation state.
    /// `snap_tolerance` governs only polygon closure.
    pub fn on_click(&mut self, point: Point, snap_tolerance: f64) -> Option<DraftGeometry> {
        match self.current_tool {
            ToolKind::Point => Some(DraftGeometry::Point(PointMark::new(point))),
            ToolKind::Line => self
                .take_two_click(point)
                .map(|first| DraftGeometry::Line(LineSegment::new(first, point))),
            ToolKind::Circle => self
                .take_two_click(point)
                .map(|center| DraftGeometry::Circle(Circle::from_center_and_edge(center, point))),
            ToolKind::Rectangle => self
                .take_two_click(point)
                .map(|corner1| DraftGeometry::Rectangle(Rectangle::new(corner1, point))),
            ToolKind::Polygon => self.on_polygon_click(point, snap_tolerance),
        }
    }

    /// Two-click tools: the first click starts accumulation and returns
    /// `None`; the second returns the stored first point and resets.
    fn take_two_click(&mut self, point: Point) -> Option<Point> {
        match std::mem::take(&mut self.state) {
            ToolState::Idle => {
                self.state = ToolState::Accumulating {
                    points: vec![point],
                };
                None
            }
            ToolState::Accumulating { points } => {
                // Invariant: two-click tools accumulate exactly one point.
                points.first().copied()
            }
        }
    }

    fn on_polygon_click(&mut self, point: Point, snap_tolerance: f64) -> Option<DraftGeometry> {
        match &mut self.state {
            ToolState::Idle => {
                self.state = ToolState::Accumulating {
                    points: vec![point],
                };
                None
            }
            ToolState::Accumulating { points } => {
                // Closure compares against the first vertex only, never the
                // nearest edge. The closing click itself is discarded.
                let closes = points.len() >= 2
                    && geometry::distance(point, points[0]) < snap_tolerance;
                if closes {
                    let vertices = std::mem::take(points);
                    self.state = ToolState::Idle;
                    if vertices.len() >= 3 {
                        Some(DraftGeometry::Polygon(Polygon::new(vertices)))
                    } else {
                        // Closing onto a 2-vertex outline ends the sequence
                        // without a primitive.
                        None
                    }
                } else {
                    points.push(point);
                    None
                }
            }
        }
    }

    /// Preview geometry for the current sequence and a hypothetical next
    /// click at `cursor`. Pure: committed state is never touched.
    pub fn preview(&self, cursor: Point) -> Option<ToolPreview> {
        let points = match &self.state {
            ToolState::Idle => return None,
            ToolState::Accumulating { points } => points,
        };
        let first = *points.first()?;
        match self.current_tool {
            ToolKind::Point => None,
            ToolKind::Line => Some(ToolPreview::Segment {
                start: first,
                end: cursor,
            }),
            ToolKind::Circle => Some(ToolPreview::Circle {
                center: first,
                radius: geometry::distance(first, cursor),
            }),
            ToolKind::Rectangle => Some(ToolPreview::Rect {
                corner1: first,
                corner2: cursor,
            }),
            ToolKind::Polygon => {
                let mut outline = points.clone();
                outline.push(cursor);
                Some(ToolPreview::Polyline { points: outline })
            }
        }
    }
}
