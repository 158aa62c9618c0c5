//! Slot computation for a single vertex.

use crate::error::{Error, Result};
use crate::graphlib::VertexId;
use crate::layout::graph::LayoutGraph;
use crate::layout::layers::{LayerView, RelativeLocation};
use crate::layout::vertex::LayoutVertex;
use std::cmp::Ordering;

/// Computes where a vertex belongs, given that its parents are already placed.
///
/// Layers are kept sorted by [`RelativeLocationCalculator::compare`]:
/// 1. index of the primary parent in its layer, so siblings stay together;
/// 2. sort key, case-insensitively (a dummy borrows the name of its path's source);
/// 3. layout priority, highest first, between node vertices only; a node precedes a dummy;
/// 4. creation order for nodes, owning path for dummies, whose handles change on relayout.
#[derive(Debug, Clone, Copy)]
pub struct RelativeLocationCalculator<'a, L: LayerView> {
    graph: &'a LayoutGraph,
    layers: &'a L,
}

impl<'a, L: LayerView> RelativeLocationCalculator<'a, L> {
    pub fn new(graph: &'a LayoutGraph, layers: &'a L) -> Self {
        Self { graph, layers }
    }

    /// The placed parent with the smallest index in its layer, or `None` for a root.
    pub fn primary_parent(&self, v: VertexId) -> Result<Option<(VertexId, RelativeLocation)>> {
        let mut best: Option<(VertexId, RelativeLocation)> = None;
        for p in self.graph.parents(v) {
            let location = self
                .layers
                .location(p)
                .ok_or(Error::UnplacedVertex { vertex: p })?;
            if best.is_none_or(|(_, b)| location < b) {
                best = Some((p, location));
            }
        }
        Ok(best)
    }

    pub fn layer_index(&self, v: VertexId) -> Result<usize> {
        Ok(self
            .primary_parent(v)?
            .map(|(_, location)| location.layer_index + 1)
            .unwrap_or(0))
    }

    pub fn compare(&self, a: VertexId, b: VertexId) -> Result<Ordering> {
        if a == b {
            return Ok(Ordering::Equal);
        }

        let parent_a = self.primary_parent(a)?.map(|(_, l)| l.index_in_layer);
        let parent_b = self.primary_parent(b)?.map(|(_, l)| l.index_in_layer);
        let by_parent = parent_a.cmp(&parent_b);
        if by_parent != Ordering::Equal {
            return Ok(by_parent);
        }

        let by_key = cmp_ignore_case(self.graph.sort_key(a)?, self.graph.sort_key(b)?);
        if by_key != Ordering::Equal {
            return Ok(by_key);
        }

        let (va, vb) = (self.graph.vertex(a)?, self.graph.vertex(b)?);
        let by_kind = match (va, vb) {
            (LayoutVertex::Node(_), LayoutVertex::Node(_)) => {
                vb.priority(b)?.cmp(&va.priority(a)?)
            }
            (LayoutVertex::Node(_), LayoutVertex::Dummy(_)) => Ordering::Less,
            (LayoutVertex::Dummy(_), LayoutVertex::Node(_)) => Ordering::Greater,
            (LayoutVertex::Dummy(_), LayoutVertex::Dummy(_)) => {
                self.graph.dummy_path(a).cmp(&self.graph.dummy_path(b))
            }
        };
        if by_kind != Ordering::Equal {
            return Ok(by_kind);
        }

        Ok(a.cmp(&b))
    }

    /// Layer and insertion index of `v` among the vertices already placed.
    pub fn calculate(&self, v: VertexId) -> Result<RelativeLocation> {
        let layer_index = self.layer_index(v)?;
        let mut index_in_layer = 0usize;
        for &w in self.layers.layer(layer_index) {
            if w == v {
                continue;
            }
            if self.compare(v, w)? == Ordering::Less {
                break;
            }
            index_in_layer += 1;
        }
        Ok(RelativeLocation::new(layer_index, index_in_layer))
    }
}

/// Ordinal comparison after upper-casing both sides.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_uppercase)
        .cmp(b.chars().flat_map(char::to_uppercase))
}
