//! Absolute coordinates from a relative layout.
//!
//! Rows are stacked top-down, each as tall as its tallest vertex. Columns are assigned
//! bottom-up: leaves are packed left to right, a parent is centered over its primary children,
//! and when that would overlap its left neighbour the parent is pushed right together with
//! everything below and to the right of it.

use crate::error::{Error, Result};
use crate::geometry::{Point, point};
use crate::graphlib::VertexId;
use crate::layout::graph::LayoutGraph;
use crate::layout::layers::LayerView;
use crate::layout::relative::RelativeLocationCalculator;
use rustc_hash::FxHashMap as HashMap;
use std::collections::BTreeMap;

/// Vertex centers, keyed by vertex.
pub type VertexCenters = BTreeMap<VertexId, Point>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsolutePositionCalculator {
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
    /// Top-left corner of the bounding box of the result.
    pub origin: Point,
}

impl AbsolutePositionCalculator {
    pub fn new(horizontal_gap: f64, vertical_gap: f64, origin: Point) -> Self {
        Self {
            horizontal_gap,
            vertical_gap,
            origin,
        }
    }

    /// Centers of every placed vertex. The first leaf of a layer starts at `origin.x` and the
    /// result is then translated so the leftmost edge sits at `origin.x`; only that constant
    /// offset separates it from packing leaves after `max(previous_right, 0) + gap`.
    pub fn calculate<L: LayerView>(
        &self,
        graph: &LayoutGraph,
        layers: &L,
    ) -> Result<VertexCenters> {
        let layer_count = layers.layer_count();
        if layer_count == 0 {
            return Ok(VertexCenters::new());
        }

        let locator = RelativeLocationCalculator::new(graph, layers);
        let mut primary_children: HashMap<VertexId, Vec<VertexId>> = HashMap::default();
        let mut parent_index: HashMap<VertexId, usize> = HashMap::default();
        for layer_index in 0..layer_count {
            for &v in layers.layer(layer_index) {
                if let Some((p, location)) = locator.primary_parent(v)? {
                    primary_children.entry(p).or_default().push(v);
                    parent_index.insert(v, location.index_in_layer);
                }
            }
        }

        let mut layer_y: Vec<f64> = Vec::with_capacity(layer_count);
        let mut top = self.origin.y;
        for layer_index in 0..layer_count {
            let height = layers.layer_height(layer_index);
            layer_y.push(top + height / 2.0);
            top += height + self.vertical_gap;
        }

        let mut xs: HashMap<VertexId, f64> = HashMap::default();
        let mut layer_right: Vec<Option<f64>> = vec![None; layer_count];
        for layer_index in (0..layer_count).rev() {
            for (index, &v) in layers.layer(layer_index).iter().enumerate() {
                let half_width = graph.vertex(v)?.width() / 2.0;
                let previous_right = layer_right[layer_index];
                let children = primary_children.get(&v).map(Vec::as_slice).unwrap_or(&[]);

                let x = if children.is_empty() {
                    match previous_right {
                        Some(right) => right + self.horizontal_gap + half_width,
                        None => self.origin.x + half_width,
                    }
                } else {
                    let mut sum = 0.0;
                    for c in children {
                        sum += xs.get(c).copied().ok_or(Error::UnplacedVertex { vertex: *c })?;
                    }
                    let centered = sum / children.len() as f64;
                    let left = centered - half_width;
                    match previous_right {
                        Some(right) if right + self.horizontal_gap > left => {
                            let shift = right + self.horizontal_gap - left;
                            self.shift_below(
                                layers,
                                &parent_index,
                                layer_index,
                                index,
                                shift,
                                &mut xs,
                                &mut layer_right,
                            );
                            centered + shift
                        }
                        _ => centered,
                    }
                };

                xs.insert(v, x);
                layer_right[layer_index] = Some(x + half_width);
            }
        }

        let mut min_left = f64::INFINITY;
        for (&v, &x) in &xs {
            min_left = min_left.min(x - graph.vertex(v)?.width() / 2.0);
        }
        let dx = if min_left.is_finite() {
            self.origin.x - min_left
        } else {
            0.0
        };

        let mut centers = VertexCenters::new();
        for (layer_index, &y) in layer_y.iter().enumerate() {
            for &v in layers.layer(layer_index) {
                let x = xs.get(&v).copied().ok_or(Error::UnplacedVertex { vertex: v })?;
                centers.insert(v, point(x + dx, y));
            }
        }
        Ok(centers)
    }

    /// Moves the subtree hanging from slot `index` of `layer_index`, and every vertex right of
    /// it in the deeper layers, by `shift`.
    #[allow(clippy::too_many_arguments)]
    fn shift_below<L: LayerView>(
        &self,
        layers: &L,
        parent_index: &HashMap<VertexId, usize>,
        layer_index: usize,
        index: usize,
        shift: f64,
        xs: &mut HashMap<VertexId, f64>,
        layer_right: &mut [Option<f64>],
    ) {
        let mut start = index;
        for deeper in (layer_index + 1)..layers.layer_count() {
            let layer = layers.layer(deeper);
            let Some(first) = layer
                .iter()
                .position(|w| parent_index.get(w).is_some_and(|&p| p >= start))
            else {
                return;
            };
            for w in &layer[first..] {
                if let Some(x) = xs.get_mut(w) {
                    *x += shift;
                }
            }
            if let Some(right) = layer_right[deeper].as_mut() {
                *right += shift;
            }
            start = first;
        }
    }
}
