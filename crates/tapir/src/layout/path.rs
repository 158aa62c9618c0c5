//! Layout paths: one diagram connector as a chain of single-layer edges.

use crate::error::LayoutPathError;
use crate::graphlib::VertexId;
use crate::layout::vertex::VertexKind;
use crate::model::ConnectorId;

/// A primitive edge of the proper graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEdge {
    pub source: VertexId,
    pub target: VertexId,
    pub connector: ConnectorId,
}

/// The vertex sequence `[node, dummy*, node]` of one connector, stored as its edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPath {
    connector: ConnectorId,
    edges: Vec<LayoutEdge>,
}

impl LayoutPath {
    /// A single edge from `source` to `target`.
    pub fn direct(connector: impl Into<ConnectorId>, source: VertexId, target: VertexId) -> Self {
        let connector = connector.into();
        Self {
            edges: vec![LayoutEdge {
                source,
                target,
                connector: connector.clone(),
            }],
            connector,
        }
    }

    /// The chain through `vertices`, in order.
    pub fn through(connector: impl Into<ConnectorId>, vertices: &[VertexId]) -> Self {
        let connector = connector.into();
        let edges = vertices
            .windows(2)
            .map(|pair| LayoutEdge {
                source: pair[0],
                target: pair[1],
                connector: connector.clone(),
            })
            .collect();
        Self { connector, edges }
    }

    pub fn from_edges(connector: impl Into<ConnectorId>, edges: Vec<LayoutEdge>) -> Self {
        Self {
            connector: connector.into(),
            edges,
        }
    }

    pub fn connector(&self) -> &str {
        &self.connector
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn source(&self) -> Option<VertexId> {
        self.edges.first().map(|e| e.source)
    }

    pub fn target(&self) -> Option<VertexId> {
        self.edges.last().map(|e| e.target)
    }

    /// `[source, dummies..., target]`.
    pub fn vertices(&self) -> Vec<VertexId> {
        let mut out: Vec<VertexId> = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            out.push(first.source);
        }
        out.extend(self.edges.iter().map(|e| e.target));
        out
    }

    /// The dummy vertices between source and target.
    pub fn interior(&self) -> Vec<VertexId> {
        self.edges.iter().skip(1).map(|e| e.source).collect()
    }

    /// Checks every structural invariant; `kind_of` resolves vertex kinds (`None` = unknown).
    pub fn validate(
        &self,
        kind_of: impl Fn(VertexId) -> Option<VertexKind>,
    ) -> Result<(), LayoutPathError> {
        let connector = || self.connector.clone();

        let (Some(first), Some(last)) = (self.edges.first(), self.edges.last()) else {
            return Err(LayoutPathError::Empty {
                connector: connector(),
            });
        };

        if let Some(edge) = self.edges.iter().find(|e| e.connector != self.connector) {
            return Err(LayoutPathError::MixedConnectors {
                connector: connector(),
                found: edge.connector.clone(),
            });
        }

        for pair in self.edges.windows(2) {
            if pair[0].target != pair[1].source {
                return Err(LayoutPathError::NotContiguous {
                    connector: connector(),
                    previous_target: pair[0].target,
                    next_source: pair[1].source,
                });
            }
        }

        if kind_of(first.source) != Some(VertexKind::Node) {
            return Err(LayoutPathError::SourceNotNode {
                connector: connector(),
                vertex: first.source,
            });
        }
        if kind_of(last.target) != Some(VertexKind::Node) {
            return Err(LayoutPathError::TargetNotNode {
                connector: connector(),
                vertex: last.target,
            });
        }
        if let Some(vertex) = self
            .interior()
            .into_iter()
            .find(|&v| kind_of(v) != Some(VertexKind::Dummy))
        {
            return Err(LayoutPathError::InteriorNotDummy {
                connector: connector(),
                vertex,
            });
        }

        Ok(())
    }
}
