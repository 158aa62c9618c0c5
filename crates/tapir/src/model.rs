//! Inputs supplied by the diagram layer and the layouts handed back to it.

use crate::error::Result;
use crate::geometry::{Rect, Size, Vector, point, size};
use crate::route::Route;
use serde::Serialize;
use std::collections::BTreeMap;

pub type NodeId = String;
pub type ConnectorId = String;

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    pub id: NodeId,
    /// Display name; orders vertices within a layer.
    pub name: String,
    pub size: Size,
    /// When the node was added to the diagram. Secondary key for initial ordering.
    pub added_at: u64,
    pub priority: i32,
}

impl DiagramNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, size: Size) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size,
            added_at: 0,
            priority: 0,
        }
    }

    pub fn with_added_at(mut self, added_at: u64) -> Self {
        self.added_at = added_at;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramConnector {
    pub id: ConnectorId,
    pub source: NodeId,
    pub target: NodeId,
}

impl DiagramConnector {
    pub fn new(
        id: impl Into<ConnectorId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Supplies the layout priority of a node. Higher priorities sort first among equally named
/// siblings.
pub trait LayoutPriorityProvider: Send + Sync {
    fn priority(&self, node: &DiagramNode) -> i32;
}

/// Uses the priority carried by the node itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodePriority;

impl LayoutPriorityProvider for NodePriority {
    fn priority(&self, node: &DiagramNode) -> i32 {
        node.priority
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantPriority(pub i32);

impl LayoutPriorityProvider for ConstantPriority {
    fn priority(&self, _node: &DiagramNode) -> i32 {
        self.0
    }
}

impl<F> LayoutPriorityProvider for F
where
    F: Fn(&DiagramNode) -> i32 + Send + Sync,
{
    fn priority(&self, node: &DiagramNode) -> i32 {
        self(node)
    }
}

/// The nodes and connectors scoped to one container, or to the whole diagram for the root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutGroup {
    pub nodes: Vec<DiagramNode>,
    pub connectors: Vec<DiagramConnector>,
}

impl LayoutGroup {
    pub fn new(nodes: Vec<DiagramNode>, connectors: Vec<DiagramConnector>) -> Self {
        Self { nodes, connectors }
    }

    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn connector(&self, id: &str) -> Option<&DiagramConnector> {
        self.connectors.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A root group plus the child groups of container nodes, keyed by container id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    pub root: LayoutGroup,
    pub containers: BTreeMap<NodeId, LayoutGroup>,
}

impl Diagram {
    pub fn new(root: LayoutGroup) -> Self {
        Self {
            root,
            containers: BTreeMap::new(),
        }
    }

    pub fn with_container(mut self, container: impl Into<NodeId>, children: LayoutGroup) -> Self {
        self.containers.insert(container.into(), children);
        self
    }
}

/// Absolute node rectangles and connector routes of a laid out group.
///
/// Connectors whose endpoints coincide have no route and are absent from `connectors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupLayout {
    pub nodes: BTreeMap<NodeId, Rect>,
    pub connectors: BTreeMap<ConnectorId, Route>,
}

impl GroupLayout {
    pub fn node_rect(&self, id: &str) -> Option<&Rect> {
        self.nodes.get(id)
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.connectors.get(id)
    }

    /// Bounding box of every node rectangle, zero-sized ones included.
    pub fn bounds(&self) -> Option<Rect> {
        let mut rects = self.nodes.values();
        let first = rects.next()?;
        let init = (first.min_x(), first.min_y(), first.max_x(), first.max_y());
        let (x0, y0, x1, y1) = rects.fold(init, |(x0, y0, x1, y1), r| {
            (
                x0.min(r.min_x()),
                y0.min(r.min_y()),
                x1.max(r.max_x()),
                y1.max(r.max_y()),
            )
        });
        Some(Rect::new(point(x0, y0), size(x1 - x0, y1 - y0)))
    }

    pub fn translate(&mut self, by: Vector) {
        for rect in self.nodes.values_mut() {
            *rect = rect.translate(by);
        }
        for route in self.connectors.values_mut() {
            *route = route.translate(by);
        }
    }

    /// Moves every entry of `other` into `self`.
    pub fn merge(&mut self, other: GroupLayout) {
        self.nodes.extend(other.nodes);
        self.connectors.extend(other.connectors);
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
