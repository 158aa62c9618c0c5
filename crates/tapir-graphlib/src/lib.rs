#![forbid(unsafe_code)]

//! Layered graph container used by `tapir`.
//!
//! The graph is a directed multigraph whose vertices and edges live in arenas addressed by
//! integer handles ([`VertexId`], [`EdgeId`]). Each vertex may carry a rank (its layer index).
//! Handles are not reused until [`LayeredGraph::clear`], so ordering handles reproduces
//! creation order.

pub mod alg;
mod graph;

pub use graph::{EdgeId, LayeredGraph, VertexId};
