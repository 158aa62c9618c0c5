use crate::graphlib::VertexId;

pub type Result<T> = std::result::Result<T, Error>;

/// Broken [`LayoutPath`](crate::layout::LayoutPath) invariants.
///
/// These are programming errors: the engine builds paths itself, so hitting one means a path
/// was assembled or mutated incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutPathError {
    #[error("layout path for connector {connector} has no edges")]
    Empty { connector: String },

    #[error("layout path for connector {connector} must start at a node vertex, found {vertex}")]
    SourceNotNode { connector: String, vertex: VertexId },

    #[error("layout path for connector {connector} must end at a node vertex, found {vertex}")]
    TargetNotNode { connector: String, vertex: VertexId },

    #[error("layout path for connector {connector} has a non-dummy interior vertex {vertex}")]
    InteriorNotDummy { connector: String, vertex: VertexId },

    #[error("layout path for connector {connector} contains an edge of connector {found}")]
    MixedConnectors { connector: String, found: String },

    #[error("layout path for connector {connector} is broken between {previous_target} and {next_source}")]
    NotContiguous {
        connector: String,
        previous_target: VertexId,
        next_source: VertexId,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    LayoutPath(#[from] LayoutPathError),

    #[error("dummy vertex {vertex} has no layout priority")]
    DummyPriority { vertex: VertexId },

    #[error("dummy vertex {vertex} has no in-edge to resolve its sort key through")]
    DummyWithoutInEdge { vertex: VertexId },

    #[error("vertex {vertex} is referenced before it has been placed in a layer")]
    UnplacedVertex { vertex: VertexId },

    #[error("unknown layout vertex {vertex}")]
    UnknownVertex { vertex: VertexId },

    #[error("unknown layout path {path}")]
    UnknownPath { path: u32 },

    #[error("vertex {vertex} still has {paths} connected layout path(s)")]
    VertexStillConnected { vertex: VertexId, paths: usize },

    #[error("connector {connector} would introduce a cycle")]
    CycleDetected { connector: String },

    #[error("node {node_id} is already registered")]
    DuplicateNode { node_id: String },

    #[error("connector {connector_id} is already registered")]
    DuplicateConnector { connector_id: String },

    #[error("unknown node {node_id}")]
    UnknownNode { node_id: String },

    #[error("unknown connector {connector_id}")]
    UnknownConnector { connector_id: String },

    #[error("layout JSON error: {0}")]
    Config(#[from] serde_json::Error),
}
