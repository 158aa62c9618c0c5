//! The layered layout graph.
//!
//! Two views share one store. The proper graph (`LayeredGraph<LayoutVertex, PathId>`) holds
//! every primitive edge, each spanning one layer once paths are expanded; the path registry
//! is the coarse view, one [`LayoutPath`] per diagram connector.

use crate::error::{Error, LayoutPathError, Result};
use crate::graphlib::{EdgeId, LayeredGraph, VertexId};
use crate::layout::path::LayoutPath;
use crate::layout::vertex::{DummyVertex, LayoutVertex, NodeVertex, VertexKind};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathId(u32);

impl PathId {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct PathEntry {
    path: LayoutPath,
    edges: Vec<EdgeId>,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    proper: LayeredGraph<LayoutVertex, PathId>,
    paths: BTreeMap<PathId, PathEntry>,
    next_path: u32,
    next_dummy: u64,
}

impl LayoutGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The proper (dummy-expanded) graph.
    pub fn proper(&self) -> &LayeredGraph<LayoutVertex, PathId> {
        &self.proper
    }

    /// Drops every vertex and path. Vertex, path and dummy numbering start over.
    pub fn clear(&mut self) {
        self.proper.clear();
        self.paths.clear();
        self.next_path = 0;
        self.next_dummy = 0;
    }

    pub fn vertex(&self, v: VertexId) -> Result<&LayoutVertex> {
        self.proper
            .vertex(v)
            .ok_or(Error::UnknownVertex { vertex: v })
    }

    pub fn kind(&self, v: VertexId) -> Option<VertexKind> {
        self.proper.vertex(v).map(LayoutVertex::kind)
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.proper.has_vertex(v)
    }

    pub fn add_node_vertex(&mut self, vertex: NodeVertex) -> VertexId {
        self.proper.add_vertex(LayoutVertex::Node(vertex))
    }

    /// Removes a node vertex that no longer takes part in any path.
    pub fn remove_node_vertex(&mut self, v: VertexId) -> Result<NodeVertex> {
        match self.vertex(v)? {
            LayoutVertex::Node(_) => {}
            LayoutVertex::Dummy(_) => return Err(Error::UnknownVertex { vertex: v }),
        }
        let paths = self.incident_paths(v).len();
        if paths > 0 {
            return Err(Error::VertexStillConnected { vertex: v, paths });
        }
        match self.proper.remove_vertex(v) {
            Some(LayoutVertex::Node(n)) => Ok(n),
            _ => Err(Error::UnknownVertex { vertex: v }),
        }
    }

    pub fn rank(&self, v: VertexId) -> Option<usize> {
        self.proper.rank(v)
    }

    pub fn set_rank(&mut self, v: VertexId, rank: usize) -> Result<()> {
        if self.proper.set_rank(v, Some(rank)) {
            Ok(())
        } else {
            Err(Error::UnknownVertex { vertex: v })
        }
    }

    pub fn parents(&self, v: VertexId) -> Vec<VertexId> {
        self.proper.parents(v)
    }

    pub fn children(&self, v: VertexId) -> Vec<VertexId> {
        self.proper.children(v)
    }

    pub fn siblings(&self, v: VertexId) -> Vec<VertexId> {
        self.proper.siblings(v)
    }

    pub fn has_children(&self, v: VertexId) -> bool {
        self.proper.has_children(v)
    }

    pub fn descendants(&self, v: VertexId) -> Vec<VertexId> {
        self.proper.descendants(v)
    }

    /// Node vertices reachable from `v`, skipping the dummies in between.
    pub fn node_descendants(&self, v: VertexId) -> Vec<VertexId> {
        self.proper
            .descendants(v)
            .into_iter()
            .filter(|&d| self.kind(d) == Some(VertexKind::Node))
            .collect()
    }

    /// The name a vertex is ordered by: its own for a node vertex, the path source's for a
    /// dummy (resolved through the single in-edge of each dummy).
    pub fn sort_key(&self, v: VertexId) -> Result<&str> {
        let mut cur = v;
        loop {
            match self.vertex(cur)? {
                LayoutVertex::Node(n) => return Ok(n.name.as_str()),
                LayoutVertex::Dummy(_) => {
                    let Some(&e) = self.proper.in_edges(cur).first() else {
                        return Err(Error::DummyWithoutInEdge { vertex: cur });
                    };
                    let Some((source, _)) = self.proper.endpoints(e) else {
                        return Err(Error::DummyWithoutInEdge { vertex: cur });
                    };
                    cur = source;
                }
            }
        }
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn path(&self, id: PathId) -> Result<&LayoutPath> {
        self.paths
            .get(&id)
            .map(|entry| &entry.path)
            .ok_or(Error::UnknownPath { path: id.0 })
    }

    pub fn paths(&self) -> impl Iterator<Item = (PathId, &LayoutPath)> + '_ {
        self.paths.iter().map(|(&id, entry)| (id, &entry.path))
    }

    /// Paths ending at `v`. For a dummy this is the path it belongs to.
    pub fn in_paths(&self, v: VertexId) -> Vec<PathId> {
        self.edge_paths(self.proper.in_edges(v))
    }

    /// The path a dummy belongs to.
    pub fn dummy_path(&self, v: VertexId) -> Option<PathId> {
        self.in_paths(v).first().copied()
    }

    /// Paths starting at `v`. For a dummy this is the path it belongs to.
    pub fn out_paths(&self, v: VertexId) -> Vec<PathId> {
        self.edge_paths(self.proper.out_edges(v))
    }

    pub fn incident_paths(&self, v: VertexId) -> Vec<PathId> {
        let mut out = self.in_paths(v);
        for p in self.out_paths(v) {
            if !out.contains(&p) {
                out.push(p);
            }
        }
        out
    }

    fn edge_paths(&self, edges: &[EdgeId]) -> Vec<PathId> {
        let mut out: Vec<PathId> = Vec::new();
        for &e in edges {
            if let Some(&p) = self.proper.edge(e) {
                if !out.contains(&p) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// Validates `path` and inserts its edges.
    pub fn add_path(&mut self, path: LayoutPath) -> Result<PathId> {
        path.validate(|v| self.kind(v))?;

        let id = PathId(self.next_path);
        self.next_path += 1;
        let edges = self.insert_edges(id, &path)?;
        self.paths.insert(id, PathEntry { path, edges });
        Ok(id)
    }

    /// Removes the path, its edges and its dummies.
    pub fn remove_path(&mut self, id: PathId) -> Result<LayoutPath> {
        let entry = self
            .paths
            .remove(&id)
            .ok_or(Error::UnknownPath { path: id.0 })?;
        for &e in &entry.edges {
            self.proper.remove_edge(e);
        }
        for v in entry.path.interior() {
            self.proper.remove_vertex(v);
        }
        Ok(entry.path)
    }

    /// Replaces the chain of a path by a single edge between its endpoints.
    ///
    /// Returns the dummies that were dropped.
    pub fn collapse_path(&mut self, id: PathId) -> Result<Vec<VertexId>> {
        let path = self.remove_path(id)?;
        let (Some(source), Some(target)) = (path.source(), path.target()) else {
            return Err(LayoutPathError::Empty {
                connector: path.connector().to_string(),
            }
            .into());
        };
        let dropped = path.interior();
        let direct = LayoutPath::direct(path.connector(), source, target);
        let edges = self.insert_edges(id, &direct)?;
        self.paths.insert(
            id,
            PathEntry {
                path: direct,
                edges,
            },
        );
        Ok(dropped)
    }

    /// Rebuilds a path so that it has one dummy per layer strictly between the ranks of its
    /// endpoints. Returns the new dummies, source side first.
    pub fn expand_path(&mut self, id: PathId) -> Result<Vec<VertexId>> {
        let path = self.remove_path(id)?;
        let (Some(source), Some(target)) = (path.source(), path.target()) else {
            return Err(LayoutPathError::Empty {
                connector: path.connector().to_string(),
            }
            .into());
        };
        let source_rank = self.rank(source).unwrap_or(0);
        let target_rank = self.rank(target).unwrap_or(source_rank + 1);

        let mut chain: Vec<VertexId> = vec![source];
        for rank in (source_rank + 1)..target_rank {
            let dummy = self.proper.add_vertex(LayoutVertex::Dummy(DummyVertex {
                id: self.next_dummy,
            }));
            self.next_dummy += 1;
            self.proper.set_rank(dummy, Some(rank));
            chain.push(dummy);
        }
        chain.push(target);

        let expanded = LayoutPath::through(path.connector(), &chain);
        expanded.validate(|v| self.kind(v))?;
        let edges = self.insert_edges(id, &expanded)?;
        self.paths.insert(
            id,
            PathEntry {
                path: expanded,
                edges,
            },
        );
        Ok(chain[1..chain.len() - 1].to_vec())
    }

    fn insert_edges(&mut self, id: PathId, path: &LayoutPath) -> Result<Vec<EdgeId>> {
        let mut edges: Vec<EdgeId> = Vec::with_capacity(path.len());
        for edge in path.edges() {
            let e = self
                .proper
                .add_edge(edge.source, edge.target, id)
                .ok_or(Error::UnknownVertex {
                    vertex: if self.contains(edge.source) {
                        edge.target
                    } else {
                        edge.source
                    },
                })?;
            edges.push(e);
        }
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::size;
    use crate::layout::layers::LayoutVertexLayers;
    use crate::layout::relative::RelativeLocationCalculator;

    #[test]
    fn orphan_dummy_has_no_sort_key() {
        let mut graph = LayoutGraph::new();
        let node = graph.add_node_vertex(NodeVertex::new("a", "A", size(1.0, 1.0), 0));
        let dummy = graph
            .proper
            .add_vertex(LayoutVertex::Dummy(DummyVertex { id: 0 }));

        assert_eq!(graph.sort_key(node).unwrap(), "A");
        assert!(matches!(
            graph.sort_key(dummy),
            Err(Error::DummyWithoutInEdge { vertex }) if vertex == dummy
        ));

        let layers = LayoutVertexLayers::new();
        let locator = RelativeLocationCalculator::new(&graph, &layers);
        assert!(matches!(
            locator.compare(dummy, node),
            Err(Error::DummyWithoutInEdge { vertex }) if vertex == dummy
        ));
    }

    #[test]
    fn dummy_borrows_the_name_of_its_path_source() {
        let mut graph = LayoutGraph::new();
        let a = graph.add_node_vertex(NodeVertex::new("a", "Source", size(1.0, 1.0), 0));
        let b = graph.add_node_vertex(NodeVertex::new("b", "Target", size(1.0, 1.0), 0));
        graph.set_rank(a, 0).unwrap();
        graph.set_rank(b, 3).unwrap();
        let id = graph.add_path(LayoutPath::direct("ab", a, b)).unwrap();

        let dummies = graph.expand_path(id).unwrap();
        assert_eq!(dummies.len(), 2);
        for d in dummies {
            assert_eq!(graph.sort_key(d).unwrap(), "Source");
            assert_eq!(graph.dummy_path(d), Some(id));
        }
    }
}
