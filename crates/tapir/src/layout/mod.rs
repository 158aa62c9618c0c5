//! The hierarchical layout engine.
//!
//! Layering is kept incrementally by [`RelativeLayoutCalculator`]; coordinates are derived on
//! demand by [`AbsolutePositionCalculator`]. [`IncrementalLayoutEngine`] ties both to diagram
//! identities.

pub mod absolute;
pub mod engine;
pub mod graph;
pub mod layers;
pub mod path;
pub mod relative;
pub mod vertex;

pub use absolute::{AbsolutePositionCalculator, VertexCenters};
pub use engine::IncrementalLayoutEngine;
pub use graph::{LayoutGraph, PathId};
pub use layers::{LayerView, LayoutVertexLayers, RelativeLocation};
pub use path::{LayoutEdge, LayoutPath};
pub use relative::{RelativeLayoutCalculator, RelativeLocationCalculator};
pub use vertex::{DummyVertex, LayoutVertex, NodeVertex, VertexKind};
