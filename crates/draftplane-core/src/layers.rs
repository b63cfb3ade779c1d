//! Layer registry: named, ordered groups of object ids.

use crate::objects::ObjectId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layer reference errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayerError {
    #[error("Layer index {0} is out of range")]
    InvalidLayer(usize),
}

/// Result type for layer operations.
pub type LayerResult<T> = Result<T, LayerError>;

/// A named, toggleable group of object ids.
///
/// Names are user-editable and need not be unique; layers are addressed by
/// index. The id list keeps insertion order for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Display name.
    pub name: String,
    /// Visibility flag; cascades to every filed object.
    pub visible: bool,
    /// Ids of the objects filed under this layer, in insertion order.
    pub objects: Vec<ObjectId>,
}

impl Layer {
    /// Create an empty, visible layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            objects: Vec::new(),
        }
    }
}

/// Ordered collection of layers plus the current-layer index.
///
/// At least one layer always exists and the current index is always valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
    current: usize,
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerRegistry {
    /// Create a registry with the single default layer.
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::new("Layer 1")],
            current: 0,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        false // at least one layer always exists
    }

    /// Index of the layer new objects are filed under.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The layer new objects are filed under.
    pub fn current(&self) -> &Layer {
        &self.layers[self.current]
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Append a new empty, visible layer and return its index.
    ///
    /// Name collisions are allowed.
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        self.layers.push(Layer::new(name));
        self.layers.len() - 1
    }

    /// Make `index` the current layer for newly created objects.
    pub fn set_current(&mut self, index: usize) -> LayerResult<()> {
        if index >= self.layers.len() {
            return Err(LayerError::InvalidLayer(index));
        }
        self.current = index;
        Ok(())
    }

    /// Flip a layer's visibility.
    ///
    /// Returns the new flag and the ids filed under the layer so the caller
    /// can cascade the change onto the objects themselves.
    pub fn toggle_visibility(&mut self, index: usize) -> LayerResult<(bool, Vec<ObjectId>)> {
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(LayerError::InvalidLayer(index))?;
        layer.visible = !layer.visible;
        Ok((layer.visible, layer.objects.clone()))
    }

    /// File an object id under a layer.
    pub fn file_object(&mut self, index: usize, id: ObjectId) -> LayerResult<()> {
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(LayerError::InvalidLayer(index))?;
        layer.objects.push(id);
        Ok(())
    }

    /// File an object id under the current layer.
    ///
    /// Cannot fail: the current index is always valid.
    pub fn file_under_current(&mut self, id: ObjectId) {
        self.layers[self.current].objects.push(id);
    }

    /// Remove an object id from a layer's list.
    ///
    /// Unfiling an id that is not a member is a no-op, not an error, so
    /// deletion stays idempotent.
    pub fn unfile_object(&mut self, index: usize, id: ObjectId) -> LayerResult<()> {
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(LayerError::InvalidLayer(index))?;
        layer.objects.retain(|&oid| oid != id);
        Ok(())
    }

    /// Empty every layer's id list, keeping the layers themselves.
    pub fn clear_objects(&mut self) {
        for layer in &mut self.layers {
            layer.objects.clear();
        }
    }

    /// Replace the whole registry (undo/redo and project load).
    ///
    /// An empty layer list or out-of-range current index falls back to the
    /// default single-layer state so the registry invariants hold.
    pub fn restore(&mut self, layers: Vec<Layer>, current: usize) {
        if layers.is_empty() {
            self.layers = vec![Layer::new("Layer 1")];
            self.current = 0;
            return;
        }
        self.current = current.min(layers.len() - 1);
        self.layers = layers;
    }
}
