//! Layout vertices: real diagram nodes and the dummies threaded through long edges.

use crate::error::{Error, Result};
use crate::geometry::{Size, size};
use crate::graphlib::VertexId;
use crate::model::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeVertex {
    pub node: NodeId,
    pub name: String,
    pub size: Size,
    pub priority: i32,
}

impl NodeVertex {
    pub fn new(
        node: impl Into<NodeId>,
        name: impl Into<String>,
        size: Size,
        priority: i32,
    ) -> Self {
        Self {
            node: node.into(),
            name: name.into(),
            size,
            priority,
        }
    }
}

/// A zero-sized stand-in letting a long edge cross an intermediate layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DummyVertex {
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    Node,
    Dummy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutVertex {
    Node(NodeVertex),
    Dummy(DummyVertex),
}

impl LayoutVertex {
    pub fn kind(&self) -> VertexKind {
        match self {
            LayoutVertex::Node(_) => VertexKind::Node,
            LayoutVertex::Dummy(_) => VertexKind::Dummy,
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self, LayoutVertex::Dummy(_))
    }

    pub fn as_node(&self) -> Option<&NodeVertex> {
        match self {
            LayoutVertex::Node(n) => Some(n),
            LayoutVertex::Dummy(_) => None,
        }
    }

    pub fn size(&self) -> Size {
        match self {
            LayoutVertex::Node(n) => n.size,
            LayoutVertex::Dummy(_) => size(0.0, 0.0),
        }
    }

    pub fn width(&self) -> f64 {
        self.size().width
    }

    pub fn height(&self) -> f64 {
        self.size().height
    }

    /// Node name, or `None` for a dummy (whose sort key lives on its path's source).
    pub fn name(&self) -> Option<&str> {
        self.as_node().map(|n| n.name.as_str())
    }

    /// Layout priority. Dummies have none; asking for one is a logic error.
    pub fn priority(&self, id: VertexId) -> Result<i32> {
        match self {
            LayoutVertex::Node(n) => Ok(n.priority),
            LayoutVertex::Dummy(_) => Err(Error::DummyPriority { vertex: id }),
        }
    }
}
