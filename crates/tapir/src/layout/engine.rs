//! Long-lived hierarchical layout of one diagram, keyed by diagram identities.

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::geometry::{Point, rect_from_center};
use crate::graphlib::VertexId;
use crate::layout::absolute::{AbsolutePositionCalculator, VertexCenters};
use crate::layout::graph::PathId;
use crate::layout::layers::{LayerView, RelativeLocation};
use crate::layout::path::LayoutPath;
use crate::layout::relative::RelativeLayoutCalculator;
use crate::layout::vertex::NodeVertex;
use crate::model::{ConnectorId, DiagramConnector, DiagramNode, GroupLayout, NodeId};
use crate::routing::router_for;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct ConnectorEntry {
    path: PathId,
    source: NodeId,
    target: NodeId,
}

/// Translates diagram change notifications into [`RelativeLayoutCalculator`] calls and
/// produces absolute layouts on demand.
///
/// Calls must be serialized by the caller; the engine does no locking.
#[derive(Debug, Clone, Default)]
pub struct IncrementalLayoutEngine {
    config: LayoutConfig,
    relative: RelativeLayoutCalculator,
    nodes: BTreeMap<NodeId, VertexId>,
    connectors: BTreeMap<ConnectorId, ConnectorEntry>,
}

impl IncrementalLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn relative(&self) -> &RelativeLayoutCalculator {
        &self.relative
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    pub fn vertex_of(&self, node_id: &str) -> Option<VertexId> {
        self.nodes.get(node_id).copied()
    }

    pub fn path_of(&self, connector_id: &str) -> Option<PathId> {
        self.connectors.get(connector_id).map(|c| c.path)
    }

    pub fn location(&self, node_id: &str) -> Option<RelativeLocation> {
        self.relative.location(self.vertex_of(node_id)?)
    }

    pub fn add_node(&mut self, node: &DiagramNode, priority: i32) -> Result<VertexId> {
        if self.nodes.contains_key(&node.id) {
            return Err(Error::DuplicateNode {
                node_id: node.id.clone(),
            });
        }
        let v = self.relative.on_node_added(NodeVertex::new(
            node.id.clone(),
            node.name.clone(),
            node.size,
            priority,
        ))?;
        self.nodes.insert(node.id.clone(), v);
        Ok(v)
    }

    /// Removes a node together with every connector attached to it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<()> {
        let v = self.vertex_of(node_id).ok_or_else(|| Error::UnknownNode {
            node_id: node_id.to_string(),
        })?;

        let attached: Vec<ConnectorId> = self
            .connectors
            .iter()
            .filter(|(_, c)| c.source == node_id || c.target == node_id)
            .map(|(id, _)| id.clone())
            .collect();
        for connector_id in attached {
            self.remove_connector(&connector_id)?;
        }

        self.relative.on_node_removed(v)?;
        self.nodes.remove(node_id);
        Ok(())
    }

    pub fn add_connector(&mut self, connector: &DiagramConnector) -> Result<PathId> {
        if self.connectors.contains_key(&connector.id) {
            return Err(Error::DuplicateConnector {
                connector_id: connector.id.clone(),
            });
        }
        let lookup = |id: &str| {
            self.vertex_of(id).ok_or_else(|| Error::UnknownNode {
                node_id: id.to_string(),
            })
        };
        let source = lookup(&connector.source)?;
        let target = lookup(&connector.target)?;

        let path = self.relative.on_connector_added(LayoutPath::direct(
            connector.id.clone(),
            source,
            target,
        ))?;
        self.connectors.insert(
            connector.id.clone(),
            ConnectorEntry {
                path,
                source: connector.source.clone(),
                target: connector.target.clone(),
            },
        );
        Ok(path)
    }

    pub fn remove_connector(&mut self, connector_id: &str) -> Result<()> {
        let entry = self
            .connectors
            .get(connector_id)
            .ok_or_else(|| Error::UnknownConnector {
                connector_id: connector_id.to_string(),
            })?;
        self.relative.on_connector_removed(entry.path)?;
        self.connectors.remove(connector_id);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.relative.on_cleared();
        self.nodes.clear();
        self.connectors.clear();
    }

    /// Vertex centers of the current relative layout, dummies included.
    pub fn vertex_centers(&self) -> Result<VertexCenters> {
        AbsolutePositionCalculator::new(
            self.config.horizontal_gap,
            self.config.vertical_gap,
            self.config.origin,
        )
        .calculate(self.relative.graph(), self.relative.layers())
    }

    pub fn calculate_layout(&self) -> Result<GroupLayout> {
        let centers = self.vertex_centers()?;
        let graph = self.relative.graph();
        let center_of = |v: VertexId| -> Result<Point> {
            centers
                .get(&v)
                .copied()
                .ok_or(Error::UnplacedVertex { vertex: v })
        };

        let mut layout = GroupLayout::default();
        for (id, &v) in &self.nodes {
            let size = graph.vertex(v)?.size();
            layout
                .nodes
                .insert(id.clone(), rect_from_center(center_of(v)?, size));
        }

        let router = router_for(self.config.routing);
        for (id, entry) in &self.connectors {
            let (Some(source), Some(target)) =
                (layout.nodes.get(&entry.source), layout.nodes.get(&entry.target))
            else {
                continue;
            };
            let waypoints = graph
                .path(entry.path)?
                .interior()
                .into_iter()
                .map(center_of)
                .collect::<Result<Vec<Point>>>()?;
            if let Some(route) = router.route(source, target, &waypoints) {
                layout.connectors.insert(id.clone(), route);
            }
        }

        tracing::debug!(
            nodes = layout.nodes.len(),
            routes = layout.connectors.len(),
            layers = self.relative.layers().layer_count(),
            "hierarchical layout calculated"
        );
        Ok(layout)
    }
}
