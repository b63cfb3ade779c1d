//! The drafting engine: single owner of all live drafting state.
//!
//! One engine instance owns the object set, the layer registry, the running
//! totals, the history stack, the tool controller, and the id counter. The
//! rendering/UI shell drives it through the inbound calls and reads derived
//! output back; it never mutates engine-owned collections directly.

use crate::geometry;
use crate::history::{History, WorldSnapshot};
use crate::layers::{Layer, LayerRegistry, LayerResult};
use crate::measure::{MeasurementAggregator, Totals};
use crate::objects::{DraftGeometry, DraftObject, ObjectId};
use crate::tools::{ToolController, ToolKind, ToolPreview};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Precision settings, persisted with the project document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// Grid spacing for snapping.
    pub grid_size: f64,
    /// Distance within which a polygon click closes onto the first vertex.
    pub snap_tolerance: f64,
    /// Whether resolved points are snapped to the grid.
    pub snap_enabled: bool,
    /// Whether the shell should draw the grid (display-only).
    pub grid_enabled: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            grid_size: geometry::GRID_SIZE,
            snap_tolerance: geometry::SNAP_TOLERANCE,
            snap_enabled: true,
            grid_enabled: true,
        }
    }
}

/// The drafting engine.
#[derive(Debug, Clone, Default)]
pub struct DraftingEngine {
    objects: Vec<DraftObject>,
    layers: LayerRegistry,
    aggregator: MeasurementAggregator,
    history: History,
    tools: ToolController,
    settings: EngineSettings,
    next_id: ObjectId,
}

impl DraftingEngine {
    /// Create an engine with default settings and the default layer.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    // --- outbound: derived state the shell may read -------------------------

    /// All live objects, in creation order.
    pub fn objects(&self) -> &[DraftObject] {
        &self.objects
    }

    /// Look up one object by id.
    pub fn object(&self, id: ObjectId) -> Option<&DraftObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn layers(&self) -> &[Layer] {
        self.layers.layers()
    }

    pub fn current_layer_index(&self) -> usize {
        self.layers.current_index()
    }

    pub fn totals(&self) -> Totals {
        self.aggregator.totals()
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.current_tool()
    }

    /// Whether a multi-click sequence is in progress.
    pub fn is_drawing(&self) -> bool {
        self.tools.is_accumulating()
    }

    /// Preview geometry for the in-progress sequence with the cursor at
    /// `cursor`. Pure render hint; committed state is never touched, so the
    /// shell may call this on every pointer move.
    pub fn preview_at(&self, cursor: Point) -> Option<ToolPreview> {
        self.tools.preview(cursor)
    }

    // --- inbound: settings and point resolution -----------------------------

    pub fn set_settings(&mut self, settings: EngineSettings) {
        self.settings = settings;
    }

    /// Apply grid snapping to a ground-plane coordinate when enabled.
    ///
    /// The shell calls this on raw unprojected pointer positions before
    /// feeding them to `commit_click` or `preview_at`.
    pub fn resolve_point(&self, point: Point) -> Point {
        if self.settings.snap_enabled {
            geometry::snap_to_grid(point, self.settings.grid_size)
        } else {
            point
        }
    }

    // --- inbound: tool stream -----------------------------------------------

    /// Switch tools, hard-cancelling any in-progress sequence.
    pub fn select_tool(&mut self, tool: ToolKind) {
        self.tools.select_tool(tool);
    }

    /// Discard the in-progress sequence (escape / right-click).
    pub fn cancel(&mut self) {
        self.tools.cancel();
    }

    /// Feed one resolved click to the active tool.
    ///
    /// When the click completes a primitive, the engine builds the record,
    /// updates the totals, files the id under the current layer, records a
    /// history snapshot, and returns the new id.
    pub fn commit_click(&mut self, point: Point) -> Option<ObjectId> {
        let geometry = self.tools.on_click(point, self.settings.snap_tolerance)?;
        let id = self.insert_object(geometry);
        self.record_snapshot();
        Some(id)
    }

    /// Build and register a completed primitive. Shared by live drawing and
    /// project load so derived measurements always come from the same path.
    fn insert_object(&mut self, geometry: DraftGeometry) -> ObjectId {
        if geometry.is_degenerate() {
            log::warn!(
                "accepting degenerate {:?} with zero measurements",
                geometry.kind()
            );
        }
        let id = self.next_id;
        self.next_id += 1;

        let object = DraftObject::new(
            id,
            geometry,
            self.layers.current_index(),
            self.layers.current().visible,
        );
        self.aggregator.apply_add(&object);
        self.layers.file_under_current(id);
        self.objects.push(object);
        id
    }

    /// Re-insert an object from a persisted document, keeping its stored id.
    pub(crate) fn insert_restored(
        &mut self,
        id: ObjectId,
        geometry: DraftGeometry,
        layer: usize,
        visible: bool,
    ) {
        let object = DraftObject::new(id, geometry, layer, visible);
        self.aggregator.apply_add(&object);
        // Registry bounds were validated by the caller.
        let _ = self.layers.file_object(layer, id);
        self.objects.push(object);
        self.next_id = self.next_id.max(id + 1);
    }

    // --- inbound: edits -----------------------------------------------------

    /// Delete objects by id, unfiling each from its owning layer.
    ///
    /// Unknown ids are ignored. Totals are resummed from the remaining set
    /// and a snapshot is recorded when anything was removed.
    pub fn delete_objects(&mut self, ids: &[ObjectId]) {
        let before = self.objects.len();
        for &id in ids {
            let Some(pos) = self.objects.iter().position(|o| o.id == id) else {
                continue;
            };
            let object = self.objects.remove(pos);
            let _ = self.layers.unfile_object(object.layer, id);
        }
        if self.objects.len() != before {
            self.aggregator.recompute(&self.objects);
            self.record_snapshot();
        }
    }

    /// Remove every object, keeping the layers themselves.
    pub fn clear_all(&mut self) {
        self.objects.clear();
        self.layers.clear_objects();
        self.aggregator.reset();
        self.record_snapshot();
    }

    // --- inbound: layers ----------------------------------------------------

    /// Append a new empty, visible layer and return its index.
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        self.layers.add_layer(name)
    }

    /// Make `index` the layer new objects are filed under.
    pub fn set_current_layer(&mut self, index: usize) -> LayerResult<()> {
        self.layers.set_current(index)
    }

    /// Flip a layer's visibility and cascade the flag to its objects.
    pub fn toggle_layer_visibility(&mut self, index: usize) -> LayerResult<bool> {
        let (visible, ids) = self.layers.toggle_visibility(index)?;
        for object in &mut self.objects {
            if ids.contains(&object.id) {
                object.visible = visible;
            }
        }
        Ok(visible)
    }

    // --- history ------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back one recorded state. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward one recorded state. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Record the present state as a history entry.
    fn record_snapshot(&mut self) {
        let snapshot = WorldSnapshot {
            objects: self.objects.clone(),
            layers: self.layers.layers().to_vec(),
            current_layer: self.layers.current_index(),
            totals: self.aggregator.totals(),
        };
        self.history.record(snapshot);
    }

    /// Replace the live state wholesale from a snapshot.
    ///
    /// Partial merges are forbidden: stale ids from the pre-restore world
    /// must not survive. Totals are resummed rather than trusted from the
    /// snapshot, and the id counter never moves backwards so undone ids are
    /// not reused.
    fn restore(&mut self, snapshot: WorldSnapshot) {
        self.objects = snapshot.objects;
        self.layers.restore(snapshot.layers, snapshot.current_layer);
        self.aggregator.recompute(&self.objects);
    }

    /// Replace the layer registry wholesale (project load).
    pub(crate) fn restore_layers(&mut self, layers: Vec<Layer>, current: usize) {
        self.layers.restore(layers, current);
    }
}
