//! Internal storage entries for [`LayeredGraph`](super::LayeredGraph).

use super::{EdgeId, VertexId};

#[derive(Debug, Clone)]
pub(in crate::graph) struct VertexEntry<V> {
    pub(in crate::graph) label: V,
    pub(in crate::graph) rank: Option<usize>,
    pub(in crate::graph) in_edges: Vec<EdgeId>,
    pub(in crate::graph) out_edges: Vec<EdgeId>,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry<E> {
    pub(in crate::graph) source: VertexId,
    pub(in crate::graph) target: VertexId,
    pub(in crate::graph) label: E,
}
