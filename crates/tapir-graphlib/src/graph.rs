//! Arena-backed directed graph with rank annotations.
//!
//! Removal leaves a hole in the arena instead of shifting entries, so handles stay valid for
//! the lifetime of the graph and queries stay O(degree).

use rustc_hash::FxBuildHasher;

mod entries;
mod handles;

use entries::{EdgeEntry, VertexEntry};
pub use handles::{EdgeId, VertexId};

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct LayeredGraph<V, E> {
    vertices: Vec<Option<VertexEntry<V>>>,
    edges: Vec<Option<EdgeEntry<E>>>,
    vertex_count: usize,
    edge_count: usize,
}

impl<V, E> Default for LayeredGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> LayeredGraph<V, E> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            vertex_count: 0,
            edge_count: 0,
        }
    }

    fn vertex_entry(&self, v: VertexId) -> Option<&VertexEntry<V>> {
        self.vertices.get(v.index()).and_then(Option::as_ref)
    }

    fn vertex_entry_mut(&mut self, v: VertexId) -> Option<&mut VertexEntry<V>> {
        self.vertices.get_mut(v.index()).and_then(Option::as_mut)
    }

    fn edge_entry(&self, e: EdgeId) -> Option<&EdgeEntry<E>> {
        self.edges.get(e.index()).and_then(Option::as_ref)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// Drops every vertex and edge. Handle numbering starts over.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.vertex_count = 0;
        self.edge_count = 0;
    }

    pub fn add_vertex(&mut self, label: V) -> VertexId {
        let id = VertexId::from_index(self.vertices.len());
        self.vertices.push(Some(VertexEntry {
            label,
            rank: None,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        }));
        self.vertex_count += 1;
        id
    }

    /// Removes `v` together with its incident edges and returns its label.
    pub fn remove_vertex(&mut self, v: VertexId) -> Option<V> {
        let entry = self.vertices.get_mut(v.index())?.take()?;
        self.vertex_count -= 1;

        for &e in entry.in_edges.iter().chain(entry.out_edges.iter()) {
            let Some(edge) = self.edges.get_mut(e.index()).and_then(Option::take) else {
                continue;
            };
            self.edge_count -= 1;
            let other = if edge.source == v {
                edge.target
            } else {
                edge.source
            };
            if let Some(other) = self.vertex_entry_mut(other) {
                other.in_edges.retain(|&x| x != e);
                other.out_edges.retain(|&x| x != e);
            }
        }

        Some(entry.label)
    }

    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.vertex_entry(v).is_some()
    }

    pub fn vertex(&self, v: VertexId) -> Option<&V> {
        self.vertex_entry(v).map(|entry| &entry.label)
    }

    pub fn vertex_mut(&mut self, v: VertexId) -> Option<&mut V> {
        self.vertex_entry_mut(v).map(|entry| &mut entry.label)
    }

    /// Vertex handles in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_some())
            .map(|(ix, _)| VertexId::from_index(ix))
    }

    pub fn rank(&self, v: VertexId) -> Option<usize> {
        self.vertex_entry(v).and_then(|entry| entry.rank)
    }

    pub fn set_rank(&mut self, v: VertexId, rank: Option<usize>) -> bool {
        match self.vertex_entry_mut(v) {
            Some(entry) => {
                entry.rank = rank;
                true
            }
            None => false,
        }
    }

    /// Adds a directed edge `source -> target`. Returns `None` when an endpoint is missing.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId, label: E) -> Option<EdgeId> {
        if !self.has_vertex(source) || !self.has_vertex(target) {
            return None;
        }
        let id = EdgeId::from_index(self.edges.len());
        self.edges.push(Some(EdgeEntry {
            source,
            target,
            label,
        }));
        self.edge_count += 1;
        if let Some(entry) = self.vertex_entry_mut(source) {
            entry.out_edges.push(id);
        }
        if let Some(entry) = self.vertex_entry_mut(target) {
            entry.in_edges.push(id);
        }
        Some(id)
    }

    pub fn remove_edge(&mut self, e: EdgeId) -> Option<E> {
        let edge = self.edges.get_mut(e.index())?.take()?;
        self.edge_count -= 1;
        if let Some(entry) = self.vertex_entry_mut(edge.source) {
            entry.out_edges.retain(|&x| x != e);
        }
        if let Some(entry) = self.vertex_entry_mut(edge.target) {
            entry.in_edges.retain(|&x| x != e);
        }
        Some(edge.label)
    }

    pub fn has_edge(&self, e: EdgeId) -> bool {
        self.edge_entry(e).is_some()
    }

    pub fn edge(&self, e: EdgeId) -> Option<&E> {
        self.edge_entry(e).map(|entry| &entry.label)
    }

    /// `(source, target)` of an edge.
    pub fn endpoints(&self, e: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edge_entry(e).map(|entry| (entry.source, entry.target))
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_some())
            .map(|(ix, _)| EdgeId::from_index(ix))
    }

    pub fn in_edges(&self, v: VertexId) -> &[EdgeId] {
        self.vertex_entry(v)
            .map(|entry| entry.in_edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn out_edges(&self, v: VertexId) -> &[EdgeId] {
        self.vertex_entry(v)
            .map(|entry| entry.out_edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        self.in_edges(v).len()
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        self.out_edges(v).len()
    }

    /// Distinct sources of the in-edges of `v`, in edge insertion order.
    pub fn parents(&self, v: VertexId) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = Vec::new();
        for &e in self.in_edges(v) {
            if let Some(entry) = self.edge_entry(e) {
                if !out.contains(&entry.source) {
                    out.push(entry.source);
                }
            }
        }
        out
    }

    /// Distinct targets of the out-edges of `v`, in edge insertion order.
    pub fn children(&self, v: VertexId) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = Vec::new();
        for &e in self.out_edges(v) {
            if let Some(entry) = self.edge_entry(e) {
                if !out.contains(&entry.target) {
                    out.push(entry.target);
                }
            }
        }
        out
    }

    pub fn has_children(&self, v: VertexId) -> bool {
        !self.out_edges(v).is_empty()
    }

    pub fn has_parents(&self, v: VertexId) -> bool {
        !self.in_edges(v).is_empty()
    }

    /// Other children of the parents of `v`.
    ///
    /// In a proper layered graph every edge spans one layer, so siblings share the layer of `v`.
    pub fn siblings(&self, v: VertexId) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = Vec::new();
        for p in self.parents(v) {
            for c in self.children(p) {
                if c != v && !out.contains(&c) {
                    out.push(c);
                }
            }
        }
        out
    }

    /// Every vertex reachable from `v` (excluding `v`), breadth first.
    pub fn descendants(&self, v: VertexId) -> Vec<VertexId> {
        let mut visited: HashSet<VertexId> = HashSet::default();
        visited.insert(v);
        let mut out: Vec<VertexId> = Vec::new();
        let mut cursor = 0usize;
        let mut frontier: Vec<VertexId> = vec![v];
        while cursor < frontier.len() {
            let u = frontier[cursor];
            cursor += 1;
            for &e in self.out_edges(u) {
                let Some(entry) = self.edge_entry(e) else {
                    continue;
                };
                if visited.insert(entry.target) {
                    out.push(entry.target);
                    frontier.push(entry.target);
                }
            }
        }
        out
    }

    /// Whether `to` is reachable from `from` following edge direction (a vertex reaches itself).
    pub fn reaches(&self, from: VertexId, to: VertexId) -> bool {
        from == to || self.descendants(from).contains(&to)
    }
}
