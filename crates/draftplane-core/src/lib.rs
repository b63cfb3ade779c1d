//! DraftPlane Core Library
//!
//! The drafting engine for DraftPlane, a 2D ground-plane drafting tool shown
//! in a 3D viewport. This crate owns the tool state machine, the geometry
//! and measurement math, layer grouping, and snapshot-based undo/redo. The
//! viewport shell feeds it resolved ground-plane clicks and tool commands,
//! and reads back primitives and totals to render.

pub mod engine;
pub mod geometry;
pub mod history;
pub mod layers;
pub mod measure;
pub mod objects;
pub mod project;
pub mod tools;

pub use engine::{DraftingEngine, EngineSettings};
pub use history::{History, WorldSnapshot, MAX_HISTORY};
pub use layers::{Layer, LayerError, LayerRegistry};
pub use measure::{MeasurementAggregator, Totals};
pub use objects::{DraftGeometry, DraftObject, ObjectId, ObjectKind};
pub use project::{ProjectDocument, ProjectError, FORMAT_VERSION};
pub use tools::{ToolController, ToolKind, ToolPreview, ToolState};
