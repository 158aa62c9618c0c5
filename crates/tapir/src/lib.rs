#![forbid(unsafe_code)]

//! Incremental layered diagram layout.
//!
//! `tapir` lays out code-structure diagrams (types and their relationships) as layered
//! graphs. The hierarchical engine keeps its layering up to date as nodes and connectors come
//! and go, instead of recomputing the whole diagram; contained groups use a simple vertical
//! stack. See [`IncrementalLayoutEngine`] and [`DiagramLayoutCalculator`] for entry points.

pub use tapir_graphlib as graphlib;

pub mod algorithm;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod route;
pub mod routing;

pub use algorithm::{
    DefaultSelectionStrategy, DiagramLayoutCalculator, LayoutAlgorithm, LayoutAlgorithmKind,
    LayoutAlgorithmSelectionStrategy, SugiyamaLayoutAlgorithm, VerticalStackLayoutAlgorithm,
};
pub use config::{LayoutConfig, RoutingStyle};
pub use error::{Error, LayoutPathError, Result};
pub use geometry::{Point, Rect, Size, Vector};
pub use layout::IncrementalLayoutEngine;
pub use model::{
    ConnectorId, ConstantPriority, Diagram, DiagramConnector, DiagramNode, GroupLayout,
    LayoutGroup, LayoutPriorityProvider, NodeId, NodePriority,
};
pub use route::Route;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
