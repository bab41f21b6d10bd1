//! Ordered stack of annotation layers with stable identities.

use super::layer::Layer;
use crate::tools::ToolKind;
use log::warn;

/// Container for all layers of the current image, bottom to top.
///
/// Insertion order is z-order: the earliest layer renders at the bottom,
/// the most recent on top. Ids grow monotonically from 1 and are never
/// reused until the stack is cleared for a new base image.
#[derive(Debug)]
pub struct LayerStack {
    /// All layers in draw order (first = bottom, last = top)
    layers: Vec<Layer>,
    next_id: u32,
    width: i32,
    height: i32,
}

impl LayerStack {
    /// Creates an empty stack whose layers will match the given dimensions.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            layers: Vec::new(),
            next_id: 1,
            width,
            height,
        }
    }

    /// Appends a new empty layer on top and returns its id.
    ///
    /// Returns `None` when no surface can be allocated (zero-sized stack
    /// before any base image, or an allocation failure); the stack is left
    /// unchanged in that case.
    pub fn append(&mut self, tool: ToolKind) -> Option<u32> {
        if self.width <= 0 || self.height <= 0 {
            warn!("Layer stack has no dimensions yet, ignoring append");
            return None;
        }

        let id = self.next_id;
        match Layer::new(id, tool, self.width, self.height) {
            Ok(layer) => {
                self.layers.push(layer);
                self.next_id += 1;
                Some(id)
            }
            Err(err) => {
                warn!(
                    "Could not allocate a {}x{} layer surface: {}",
                    self.width, self.height, err
                );
                None
            }
        }
    }

    /// Removes the layer with the given id, wherever it sits in the stack.
    ///
    /// Unknown ids are a no-op. The remaining layers keep their ids and
    /// relative z-order.
    pub fn remove(&mut self, id: u32) {
        self.layers.retain(|layer| layer.id() != id);
    }

    /// Drops every layer and restarts id assignment from 1.
    ///
    /// Used when a new base image is loaded.
    pub fn clear(&mut self) {
        self.layers.clear();
        self.next_id = 1;
    }

    /// Looks up a layer by id.
    pub fn get(&self, id: u32) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    /// Iterates the layers bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Number of layers currently in the stack.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack holds no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Pixel dimensions every layer surface is allocated with.
    pub fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}
