//! Small traversal helpers over [`LayeredGraph`].

use crate::{LayeredGraph, VertexId};
use rustc_hash::FxHashMap as HashMap;
use std::collections::VecDeque;

/// Vertices without in-edges, in creation order.
pub fn roots<V, E>(g: &LayeredGraph<V, E>) -> Vec<VertexId> {
    g.vertices().filter(|&v| !g.has_parents(v)).collect()
}

/// Kahn order of `subset`, considering only edges whose both endpoints are in `subset`.
///
/// Ties are broken by handle order, so the result is deterministic. Returns `None` when the
/// induced subgraph has a cycle.
pub fn topological_order<V, E>(
    g: &LayeredGraph<V, E>,
    subset: &[VertexId],
) -> Option<Vec<VertexId>> {
    let mut members: Vec<VertexId> = subset.to_vec();
    members.sort();
    members.dedup();

    let mut indegree: HashMap<VertexId, usize> = members.iter().map(|&v| (v, 0usize)).collect();
    for &v in &members {
        for &e in g.out_edges(v) {
            let Some((_, w)) = g.endpoints(e) else {
                continue;
            };
            if let Some(d) = indegree.get_mut(&w) {
                *d += 1;
            }
        }
    }

    let mut queue: VecDeque<VertexId> = members
        .iter()
        .copied()
        .filter(|v| indegree.get(v).copied() == Some(0))
        .collect();
    let mut out: Vec<VertexId> = Vec::with_capacity(members.len());
    while let Some(v) = queue.pop_front() {
        out.push(v);
        let mut ready: Vec<VertexId> = Vec::new();
        for &e in g.out_edges(v) {
            let Some((_, w)) = g.endpoints(e) else {
                continue;
            };
            if let Some(d) = indegree.get_mut(&w) {
                *d -= 1;
                if *d == 0 {
                    ready.push(w);
                }
            }
        }
        ready.sort();
        queue.extend(ready);
    }

    (out.len() == members.len()).then_some(out)
}
