//! Incremental relative layout: layer membership and in-layer order.
//!
//! Each mutation touches only the vertices whose layer or order can change. For a connector
//! `s -> t` that is `t` and its descendants, plus the dummies of every path incident to them.
//! Those are unplaced, the affected paths are collapsed to direct edges, the graph is
//! mutated, ranks are recomputed, paths are re-expanded with dummies and everything is placed
//! again in ascending layer order so parents are final before their children.

mod location;

pub use location::{RelativeLocationCalculator, cmp_ignore_case};

use crate::error::{Error, LayoutPathError, Result};
use crate::graphlib::{VertexId, alg};
use crate::layout::graph::{LayoutGraph, PathId};
use crate::layout::layers::{LayerView, LayoutVertexLayers, RelativeLocation};
use crate::layout::path::LayoutPath;
use crate::layout::vertex::NodeVertex;
use std::collections::BTreeSet;

/// Layer assignment and in-layer order, maintained across mutations.
///
/// A rejected mutation (invalid path, cycle, unknown handle) leaves the layout untouched. An
/// error raised after the affected vertices were unplaced means the graph itself is broken;
/// the calculator must then be reset with [`RelativeLayoutCalculator::on_cleared`].
#[derive(Debug, Clone, Default)]
pub struct RelativeLayoutCalculator {
    graph: LayoutGraph,
    layers: LayoutVertexLayers,
}

impl RelativeLayoutCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &LayoutGraph {
        &self.graph
    }

    pub fn layers(&self) -> &LayoutVertexLayers {
        &self.layers
    }

    pub fn location(&self, v: VertexId) -> Option<RelativeLocation> {
        self.layers.location(v)
    }

    pub fn on_node_added(&mut self, vertex: NodeVertex) -> Result<VertexId> {
        let v = self.graph.add_node_vertex(vertex);
        self.graph.set_rank(v, 0)?;
        self.place(&[v])?;
        tracing::debug!(vertex = %v, layers = self.layers.layer_count(), "node vertex added");
        Ok(v)
    }

    /// Removes a node vertex. Its connectors must have been removed first.
    pub fn on_node_removed(&mut self, v: VertexId) -> Result<NodeVertex> {
        let vertex = self.graph.remove_node_vertex(v)?;
        self.layers.remove_vertex(v);
        tracing::debug!(vertex = %v, layers = self.layers.layer_count(), "node vertex removed");
        Ok(vertex)
    }

    /// Inserts the connector described by `path` (only its endpoints and connector are used;
    /// dummies are managed here).
    pub fn on_connector_added(&mut self, path: LayoutPath) -> Result<PathId> {
        path.validate(|v| self.graph.kind(v))?;
        let connector = path.connector().to_string();
        let (Some(source), Some(target)) = (path.source(), path.target()) else {
            return Err(LayoutPathError::Empty { connector }.into());
        };
        if self.graph.proper().reaches(target, source) {
            return Err(Error::CycleDetected { connector });
        }

        let affected = self.affected_by(target);
        let direct = LayoutPath::direct(connector.clone(), source, target);
        let id = self.relayout(&affected, move |graph| graph.add_path(direct))?;
        tracing::debug!(
            connector = %connector,
            path = %id,
            affected = affected.len(),
            layers = self.layers.layer_count(),
            "connector added"
        );
        Ok(id)
    }

    pub fn on_connector_removed(&mut self, id: PathId) -> Result<LayoutPath> {
        let path = self.graph.path(id)?;
        let Some(target) = path.target() else {
            return Err(Error::UnknownPath { path: id.index() });
        };

        let affected = self.affected_by(target);
        let removed = self.relayout(&affected, move |graph| graph.remove_path(id))?;
        tracing::debug!(
            connector = %removed.connector(),
            path = %id,
            affected = affected.len(),
            layers = self.layers.layer_count(),
            "connector removed"
        );
        Ok(removed)
    }

    pub fn on_cleared(&mut self) {
        self.layers.clear();
        self.graph.clear();
        tracing::debug!("layout cleared");
    }

    /// `v` and every node vertex below it.
    fn affected_by(&self, v: VertexId) -> Vec<VertexId> {
        let mut affected = vec![v];
        affected.extend(self.graph.node_descendants(v));
        affected
    }

    fn incident_paths(&self, vertices: &[VertexId]) -> BTreeSet<PathId> {
        vertices
            .iter()
            .flat_map(|&v| self.graph.incident_paths(v))
            .collect()
    }

    /// Unplaces `affected`, applies `mutate` and places everything again. Callers validate the
    /// mutation first: nothing here is expected to fail on a consistent graph.
    fn relayout<T>(
        &mut self,
        affected: &[VertexId],
        mutate: impl FnOnce(&mut LayoutGraph) -> Result<T>,
    ) -> Result<T> {
        for &v in affected {
            self.layers.remove_vertex(v);
        }
        for p in self.incident_paths(affected) {
            for d in self.graph.collapse_path(p)? {
                self.layers.remove_vertex(d);
            }
        }

        let out = mutate(&mut self.graph)?;

        self.assign_ranks(affected)?;
        let mut to_place: Vec<VertexId> = affected.to_vec();
        for p in self.incident_paths(affected) {
            to_place.extend(self.graph.expand_path(p)?);
        }
        self.place(&to_place)?;
        Ok(out)
    }

    /// Longest-path ranks for `vertices`; sources outside the set keep their rank.
    fn assign_ranks(&mut self, vertices: &[VertexId]) -> Result<()> {
        let Some(order) = alg::topological_order(self.graph.proper(), vertices) else {
            let connector = vertices
                .iter()
                .flat_map(|&v| self.graph.in_paths(v))
                .find_map(|p| self.graph.path(p).ok())
                .map(|p| p.connector().to_string())
                .unwrap_or_default();
            return Err(Error::CycleDetected { connector });
        };

        for v in order {
            let mut rank = 0usize;
            for p in self.graph.parents(v) {
                let parent_rank = self
                    .graph
                    .rank(p)
                    .ok_or(Error::UnplacedVertex { vertex: p })?;
                rank = rank.max(parent_rank + 1);
            }
            self.graph.set_rank(v, rank)?;
        }
        Ok(())
    }

    fn place(&mut self, vertices: &[VertexId]) -> Result<()> {
        let mut ordered: Vec<(usize, VertexId)> = vertices
            .iter()
            .map(|&v| (self.graph.rank(v).unwrap_or(0), v))
            .collect();
        ordered.sort();

        for (rank, v) in ordered {
            let location =
                RelativeLocationCalculator::new(&self.graph, &self.layers).calculate(v)?;
            debug_assert_eq!(location.layer_index, rank, "layer of {v} disagrees with its rank");
            let height = self.graph.vertex(v)?.height();
            self.layers.add_vertex(v, location, height);
            tracing::trace!(
                vertex = %v,
                layer = location.layer_index,
                index = location.index_in_layer,
                "vertex placed"
            );
        }
        Ok(())
    }
}
