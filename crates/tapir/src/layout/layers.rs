//! Layer membership and in-layer order.

use crate::graphlib::VertexId;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;

/// A vertex slot: `(layer_index, index_in_layer)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RelativeLocation {
    pub layer_index: usize,
    pub index_in_layer: usize,
}

impl RelativeLocation {
    pub fn new(layer_index: usize, index_in_layer: usize) -> Self {
        Self {
            layer_index,
            index_in_layer,
        }
    }
}

/// Read-only access to a layering, for algorithms that must not mutate it.
pub trait LayerView {
    fn layer_count(&self) -> usize;

    /// Vertices of a layer in order; empty for an out-of-range index.
    fn layer(&self, layer_index: usize) -> &[VertexId];

    /// Height of the tallest vertex of a layer.
    fn layer_height(&self, layer_index: usize) -> f64;

    fn location(&self, v: VertexId) -> Option<RelativeLocation>;

    fn layer_index(&self, v: VertexId) -> Option<usize> {
        self.location(v).map(|l| l.layer_index)
    }

    fn index_in_layer(&self, v: VertexId) -> Option<usize> {
        self.location(v).map(|l| l.index_in_layer)
    }

    fn contains(&self, v: VertexId) -> bool {
        self.location(v).is_some()
    }
}

#[derive(Debug, Clone, Default)]
struct Layer {
    vertices: Vec<VertexId>,
    heights: Vec<f64>,
    height: f64,
}

impl Layer {
    fn refresh_height(&mut self) {
        self.height = self.heights.iter().copied().fold(0.0, f64::max);
    }
}

/// Ordered layers of ordered vertices, with a reverse index kept in sync on every mutation.
#[derive(Debug, Clone, Default)]
pub struct LayoutVertexLayers {
    layers: Vec<Layer>,
    locations: HashMap<VertexId, RelativeLocation>,
}

impl LayoutVertexLayers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn clear(&mut self) {
        self.layers.clear();
        self.locations.clear();
    }

    /// Puts `v` at `location`, shifting the rest of the layer right.
    ///
    /// Missing layers are created; an index past the end of the layer appends. A vertex that
    /// already has a slot is moved.
    pub fn add_vertex(
        &mut self,
        v: VertexId,
        location: RelativeLocation,
        height: f64,
    ) -> RelativeLocation {
        if self.locations.contains_key(&v) {
            self.remove_vertex(v);
        }
        while self.layers.len() <= location.layer_index {
            self.layers.push(Layer::default());
        }

        let layer_index = location.layer_index;
        let layer = &mut self.layers[layer_index];
        let index = location.index_in_layer.min(layer.vertices.len());
        layer.vertices.insert(index, v);
        layer.heights.insert(index, height);
        layer.height = layer.height.max(height);

        for (i, &w) in layer.vertices.iter().enumerate().skip(index) {
            self.locations.insert(w, RelativeLocation::new(layer_index, i));
        }
        RelativeLocation::new(layer_index, index)
    }

    /// Frees the slot of `v`, closing the gap. Trailing empty layers are dropped.
    pub fn remove_vertex(&mut self, v: VertexId) -> Option<RelativeLocation> {
        let location = self.locations.remove(&v)?;
        let layer = &mut self.layers[location.layer_index];
        layer.vertices.remove(location.index_in_layer);
        layer.heights.remove(location.index_in_layer);
        layer.refresh_height();

        for (i, &w) in layer
            .vertices
            .iter()
            .enumerate()
            .skip(location.index_in_layer)
        {
            self.locations
                .insert(w, RelativeLocation::new(location.layer_index, i));
        }

        while self.layers.last().is_some_and(|l| l.vertices.is_empty()) {
            self.layers.pop();
        }
        Some(location)
    }

    /// Every layer as a vertex list, top layer first.
    pub fn to_vecs(&self) -> Vec<Vec<VertexId>> {
        self.layers.iter().map(|l| l.vertices.clone()).collect()
    }
}

impl LayerView for LayoutVertexLayers {
    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn layer(&self, layer_index: usize) -> &[VertexId] {
        self.layers
            .get(layer_index)
            .map(|l| l.vertices.as_slice())
            .unwrap_or(&[])
    }

    fn layer_height(&self, layer_index: usize) -> f64 {
        self.layers.get(layer_index).map(|l| l.height).unwrap_or(0.0)
    }

    fn location(&self, v: VertexId) -> Option<RelativeLocation> {
        self.locations.get(&v).copied()
    }
}
