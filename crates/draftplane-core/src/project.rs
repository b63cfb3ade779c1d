//! Project document: the flat persisted snapshot of drafting state.
//!
//! Objects are stored with their defining fields only; derived measurements
//! are recomputed on load through the same construction path used for live
//! drawing, never trusted from the file.

use crate::engine::{DraftingEngine, EngineSettings};
use crate::layers::Layer;
use crate::objects::{
    Circle, DraftGeometry, LineSegment, ObjectId, PointMark, Polygon, Rectangle,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Version string written into every saved document.
pub const FORMAT_VERSION: &str = "2.0.0";

/// Project document errors.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Malformed project document: {0}")]
    Malformed(String),
    #[error("Object {id} references layer {layer}, but the document has {layer_count} layers")]
    InvalidLayerRef {
        id: ObjectId,
        layer: usize,
        layer_count: usize,
    },
    #[error("Duplicate object id {0} in project document")]
    DuplicateId(ObjectId),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Persisted geometry: defining fields per kind, tagged by kind name.
///
/// The `Unknown` variant absorbs kind tags written by newer builds; such
/// entries are skipped on load instead of failing the whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoredGeometry {
    Point { position: Point },
    Line { start: Point, end: Point },
    Polygon { points: Vec<Point> },
    Circle { center: Point, radius: f64 },
    Rectangle { corner1: Point, corner2: Point },
    #[serde(other)]
    Unknown,
}

impl StoredGeometry {
    fn from_geometry(geometry: &DraftGeometry) -> Self {
        match geometry {
            DraftGeometry::Point(p) => StoredGeometry::Point {
                position: p.position,
            },
            DraftGeometry::Line(l) => StoredGeometry::Line {
                start: l.start,
                end: l.end,
            },
            DraftGeometry::Polygon(p) => StoredGeometry::Polygon {
                points: p.points.clone(),
            },
            DraftGeometry::Circle(c) => StoredGeometry::Circle {
                center: c.center,
                radius: c.radius,
            },
            DraftGeometry::Rectangle(r) => StoredGeometry::Rectangle {
                corner1: r.corner1,
                corner2: r.corner2,
            },
        }
    }

    /// Rebuild live geometry, recomputing every derived measurement.
    ///
    /// Returns `None` for [`StoredGeometry::Unknown`].
    fn to_geometry(&self) -> Option<DraftGeometry> {
        match self {
            StoredGeometry::Point { position } => {
                Some(DraftGeometry::Point(PointMark::new(*position)))
            }
            StoredGeometry::Line { start, end } => {
                Some(DraftGeometry::Line(LineSegment::new(*start, *end)))
            }
            StoredGeometry::Polygon { points } => {
                Some(DraftGeometry::Polygon(Polygon::new(points.clone())))
            }
            StoredGeometry::Circle { center, radius } => {
                Some(DraftGeometry::Circle(Circle::new(*center, *radius)))
            }
            StoredGeometry::Rectangle { corner1, corner2 } => {
                Some(DraftGeometry::Rectangle(Rectangle::new(*corner1, *corner2)))
            }
            StoredGeometry::Unknown => None,
        }
    }
}

/// One persisted object entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub geometry: StoredGeometry,
    #[serde(default)]
    pub layer: usize,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// The persisted snapshot document, written and read by the shell's
/// save/load dialogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub version: String,
    pub objects: Vec<StoredObject>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub current_layer: usize,
    #[serde(default)]
    pub settings: EngineSettings,
}

impl ProjectDocument {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> ProjectResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ProjectError::Serialization(e.to_string()))
    }

    /// Parse a document from JSON.
    ///
    /// Missing required fields (`version`, `objects`) or type mismatches
    /// are malformed-document errors; an unrecognized object kind is not.
    pub fn from_json(json: &str) -> ProjectResult<Self> {
        serde_json::from_str(json).map_err(|e| ProjectError::Malformed(e.to_string()))
    }

    /// Write the document to a JSON file.
    pub fn save_file(&self, path: &Path) -> ProjectResult<()> {
        let json = self.to_json()?;
        fs::write(path, json)
            .map_err(|e| ProjectError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    /// Read a document from a JSON file.
    pub fn load_file(path: &Path) -> ProjectResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ProjectError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

impl DraftingEngine {
    /// Snapshot the live state into a persistable document.
    pub fn save_project(&self) -> ProjectDocument {
        ProjectDocument {
            version: FORMAT_VERSION.to_string(),
            objects: self
                .objects()
                .iter()
                .map(|o| StoredObject {
                    id: o.id,
                    geometry: StoredGeometry::from_geometry(&o.geometry),
                    layer: o.layer,
                    visible: o.visible,
                })
                .collect(),
            layers: self.layers().to_vec(),
            current_layer: self.current_layer_index(),
            settings: self.settings(),
        }
    }

    /// Replace the live state with the document's contents.
    ///
    /// Validation is all-or-nothing: a bad layer reference or duplicate id
    /// rejects the load with the current drafting state untouched. Entries
    /// with an unrecognized kind are skipped with a warning. Accepted
    /// objects are re-added through the live construction path, so every
    /// derived measurement is recomputed rather than read from the file.
    pub fn load_project(&mut self, doc: &ProjectDocument) -> ProjectResult<()> {
        let layer_count = doc.layers.len().max(1);
        let mut seen = HashSet::new();
        for entry in &doc.objects {
            if matches!(entry.geometry, StoredGeometry::Unknown) {
                continue;
            }
            if entry.layer >= layer_count {
                return Err(ProjectError::InvalidLayerRef {
                    id: entry.id,
                    layer: entry.layer,
                    layer_count,
                });
            }
            if !seen.insert(entry.id) {
                return Err(ProjectError::DuplicateId(entry.id));
            }
        }

        self.clear_all();

        // Layer id lists are rebuilt as objects are re-filed below.
        let mut layers = if doc.layers.is_empty() {
            vec![Layer::new("Layer 1")]
        } else {
            doc.layers.clone()
        };
        for layer in &mut layers {
            layer.objects.clear();
        }
        self.restore_layers(layers, doc.current_layer);
        self.set_settings(doc.settings);

        for entry in &doc.objects {
            match entry.geometry.to_geometry() {
                Some(geometry) => {
                    self.insert_restored(entry.id, geometry, entry.layer, entry.visible);
                }
                None => {
                    log::warn!("skipping object {}: unrecognized kind", entry.id);
                }
            }
        }
        Ok(())
    }

    /// Export the object table as CSV (type, id, layer name, anchor
    /// coordinates, measurement summary).
    pub fn export_csv(&self) -> String {
        use std::fmt::Write;

        let mut csv = String::from("Type,ID,Layer,X,Y,Z,Properties\n");
        for object in self.objects() {
            let layer_name = self
                .layers()
                .get(object.layer)
                .map(|l| l.name.as_str())
                .unwrap_or("");
            let (anchor, props) = match &object.geometry {
                DraftGeometry::Point(p) => (Some(p.position), String::new()),
                DraftGeometry::Line(l) => (Some(l.start), format!("Length: {:.3}", l.length)),
                DraftGeometry::Circle(c) => (
                    Some(c.center),
                    format!("Radius: {:.3}, Area: {:.3}", c.radius, c.area),
                ),
                DraftGeometry::Polygon(_) | DraftGeometry::Rectangle(_) => (None, String::new()),
            };
            let (x, y, z) = match anchor {
                // Anchor rows use viewport axes: X east, Y elevation, Z north.
                Some(p) => (format!("{:.3}", p.x), "0.000".to_string(), format!("{:.3}", p.y)),
                None => (String::new(), String::new(), String::new()),
            };
            let kind = match object.kind() {
                crate::objects::ObjectKind::Point => "point",
                crate::objects::ObjectKind::Line => "line",
                crate::objects::ObjectKind::Polygon => "polygon",
                crate::objects::ObjectKind::Circle => "circle",
                crate::objects::ObjectKind::Rectangle => "rectangle",
            };
            let _ = writeln!(
                csv,
                "{},{},{},{},{},{},\"{}\"",
                kind, object.id, layer_name, x, y, z, props
            );
        }
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolKind;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn sample_engine() -> DraftingEngine {
        let mut engine = DraftingEngine::new();
        engine.commit_click(p(1.0, 2.0)).unwrap(); // point tool, immediate

        engine.select_tool(ToolKind::Line);
        assert!(engine.commit_click(p(0.0, 0.0)).is_none());
        engine.commit_click(p(3.0, 4.0)).unwrap();

        let walls = engine.add_layer("Walls");
        engine.set_current_layer(walls).unwrap();
        engine.select_tool(ToolKind::Rectangle);
        assert!(engine.commit_click(p(0.0, 0.0)).is_none());
        engine.commit_click(p(4.0, 3.0)).unwrap();

        engine
    }

    #[test]
    fn test_save_load_round_trip() {
        let engine = sample_engine();
        let doc = engine.save_project();
        let json = doc.to_json().unwrap();
        let parsed = ProjectDocument::from_json(&json).unwrap();

        let mut restored = DraftingEngine::new();
        restored.load_project(&parsed).unwrap();

        assert_eq!(restored.objects().len(), engine.objects().len());
        assert_eq!(restored.totals(), engine.totals());
        assert_eq!(restored.layers().len(), 2);
        assert_eq!(restored.current_layer_index(), 1);
        assert_eq!(restored.layers()[1].name, "Walls");
        // Ids are preserved verbatim.
        let ids: Vec<_> = restored.objects().iter().map(|o| o.id).collect();
        let expected: Vec<_> = engine.objects().iter().map(|o| o.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_load_recomputes_measurements() {
        // The file stores only defining fields; derived values must come
        // from the construction path.
        let json = r#"{
            "version": "2.0",
            "objects": [
                { "id": 0, "kind": "line", "start": {"x": 0.0, "y": 0.0},
                  "end": {"x": 3.0, "y": 4.0}, "layer": 0, "visible": true }
            ]
        }"#;
        let doc = ProjectDocument::from_json(json).unwrap();

        let mut engine = DraftingEngine::new();
        engine.load_project(&doc).unwrap();
        assert!((engine.totals().length - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let json = r#"{
            "version": "3.1",
            "objects": [
                { "id": 0, "kind": "point", "position": {"x": 1.0, "y": 1.0} },
                { "id": 1, "kind": "spline", "layer": 99 }
            ]
        }"#;
        let doc = ProjectDocument::from_json(json).unwrap();

        let mut engine = DraftingEngine::new();
        engine.load_project(&doc).unwrap();
        assert_eq!(engine.objects().len(), 1);
        assert_eq!(engine.objects()[0].id, 0);
    }

    #[test]
    fn test_rejected_load_leaves_state_untouched() {
        let mut engine = sample_engine();
        let objects_before = engine.objects().len();
        let totals_before = engine.totals();

        let json = r#"{
            "version": "2.0",
            "objects": [
                { "id": 0, "kind": "point", "position": {"x": 0.0, "y": 0.0}, "layer": 5 }
            ]
        }"#;
        let doc = ProjectDocument::from_json(json).unwrap();

        let err = engine.load_project(&doc).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidLayerRef { layer: 5, .. }));
        assert_eq!(engine.objects().len(), objects_before);
        assert_eq!(engine.totals(), totals_before);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"{
            "version": "2.0",
            "objects": [
                { "id": 3, "kind": "point", "position": {"x": 0.0, "y": 0.0} },
                { "id": 3, "kind": "point", "position": {"x": 1.0, "y": 1.0} }
            ]
        }"#;
        let doc = ProjectDocument::from_json(json).unwrap();

        let mut engine = DraftingEngine::new();
        assert!(matches!(
            engine.load_project(&doc),
            Err(ProjectError::DuplicateId(3))
        ));
    }

    #[test]
    fn test_missing_required_fields_is_malformed() {
        assert!(matches!(
            ProjectDocument::from_json("{}"),
            Err(ProjectError::Malformed(_))
        ));
        assert!(matches!(
            ProjectDocument::from_json(r#"{ "version": "2.0" }"#),
            Err(ProjectError::Malformed(_))
        ));
    }

    #[test]
    fn test_ids_continue_after_load() {
        let doc = sample_engine().save_project();
        let max_id = doc.objects.iter().map(|o| o.id).max().unwrap();

        let mut engine = DraftingEngine::new();
        engine.load_project(&doc).unwrap();
        engine.select_tool(ToolKind::Point);
        let fresh = engine.commit_click(p(9.0, 9.0)).unwrap();
        assert!(fresh > max_id);
    }

    #[test]
    fn test_file_round_trip() {
        let engine = sample_engine();
        let doc = engine.save_project();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        doc.save_file(&path).unwrap();

        let loaded = ProjectDocument::load_file(&path).unwrap();
        assert_eq!(loaded.version, FORMAT_VERSION);
        assert_eq!(loaded.objects.len(), doc.objects.len());
    }

    #[test]
    fn test_csv_export_shape() {
        let engine = sample_engine();
        let csv = engine.export_csv();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("Type,ID,Layer,X,Y,Z,Properties"));
        let point_row = lines.next().unwrap();
        assert!(point_row.starts_with("point,0,Layer 1,1.000,0.000,2.000"));
        let line_row = lines.next().unwrap();
        assert!(line_row.contains("\"Length: 5.000\""));
        // Rectangle rows carry no anchor coordinates.
        let rect_row = lines.next().unwrap();
        assert!(rect_row.starts_with("rectangle,2,Walls,,,,"));
    }
}
