//! Layout algorithms and their per-container selection.

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::geometry::{Rect, point, vector};
use crate::layout::IncrementalLayoutEngine;
use crate::layout::relative::cmp_ignore_case;
use crate::model::{
    Diagram, DiagramNode, GroupLayout, LayoutGroup, LayoutPriorityProvider, NodePriority,
};
use crate::routing::{ConnectorRouter, DirectRouter};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

pub trait LayoutAlgorithm: Send + Sync {
    fn calculate(&self, group: &LayoutGroup) -> Result<GroupLayout>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutAlgorithmKind {
    Sugiyama,
    VerticalStack,
}

/// Layered layout through a fresh [`IncrementalLayoutEngine`].
///
/// Nodes are registered in `(added_at, name)` order, then connectors in group order.
#[derive(Clone)]
pub struct SugiyamaLayoutAlgorithm {
    config: LayoutConfig,
    priorities: Arc<dyn LayoutPriorityProvider>,
}

impl fmt::Debug for SugiyamaLayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SugiyamaLayoutAlgorithm")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SugiyamaLayoutAlgorithm {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            priorities: Arc::new(NodePriority),
        }
    }

    pub fn with_priority_provider(mut self, priorities: Arc<dyn LayoutPriorityProvider>) -> Self {
        self.priorities = priorities;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
}

impl LayoutAlgorithm for SugiyamaLayoutAlgorithm {
    fn calculate(&self, group: &LayoutGroup) -> Result<GroupLayout> {
        let mut nodes: Vec<&DiagramNode> = group.nodes.iter().collect();
        nodes.sort_by(|a, b| {
            a.added_at
                .cmp(&b.added_at)
                .then_with(|| cmp_ignore_case(&a.name, &b.name))
        });

        let mut engine = IncrementalLayoutEngine::new(self.config.clone());
        for node in nodes {
            engine.add_node(node, self.priorities.priority(node))?;
        }
        for connector in &group.connectors {
            engine.add_connector(connector)?;
        }
        engine.calculate_layout()
    }
}

/// Nodes stacked top to bottom in name order, left-aligned at the origin.
#[derive(Debug, Clone)]
pub struct VerticalStackLayoutAlgorithm {
    config: LayoutConfig,
}

impl VerticalStackLayoutAlgorithm {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }
}

impl LayoutAlgorithm for VerticalStackLayoutAlgorithm {
    fn calculate(&self, group: &LayoutGroup) -> Result<GroupLayout> {
        let mut nodes: Vec<&DiagramNode> = group.nodes.iter().collect();
        nodes.sort_by(|a, b| {
            cmp_ignore_case(&a.name, &b.name)
                .then_with(|| a.added_at.cmp(&b.added_at))
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut layout = GroupLayout::default();
        let origin = self.config.origin;
        let mut y = origin.y;
        for node in nodes {
            if layout.nodes.contains_key(&node.id) {
                return Err(Error::DuplicateNode {
                    node_id: node.id.clone(),
                });
            }
            layout
                .nodes
                .insert(node.id.clone(), Rect::new(point(origin.x, y), node.size));
            y += node.size.height + self.config.stack_gap;
        }

        for connector in &group.connectors {
            if layout.connectors.contains_key(&connector.id) {
                return Err(Error::DuplicateConnector {
                    connector_id: connector.id.clone(),
                });
            }
            let rect_of = |id: &str| {
                layout.nodes.get(id).ok_or_else(|| Error::UnknownNode {
                    node_id: id.to_string(),
                })
            };
            let source = rect_of(&connector.source)?;
            let target = rect_of(&connector.target)?;
            if let Some(route) = DirectRouter.route(source, target, &[]) {
                layout.connectors.insert(connector.id.clone(), route);
            }
        }

        tracing::debug!(nodes = layout.nodes.len(), "vertical stack calculated");
        Ok(layout)
    }
}

/// Picks the algorithm that lays out the children of a container node.
pub trait LayoutAlgorithmSelectionStrategy: Send + Sync {
    fn algorithm_for(&self, container: &DiagramNode) -> LayoutAlgorithmKind;
}

/// Every container stacks its children vertically.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSelectionStrategy;

impl LayoutAlgorithmSelectionStrategy for DefaultSelectionStrategy {
    fn algorithm_for(&self, _container: &DiagramNode) -> LayoutAlgorithmKind {
        LayoutAlgorithmKind::VerticalStack
    }
}

impl<F> LayoutAlgorithmSelectionStrategy for F
where
    F: Fn(&DiagramNode) -> LayoutAlgorithmKind + Send + Sync,
{
    fn algorithm_for(&self, container: &DiagramNode) -> LayoutAlgorithmKind {
        self(container)
    }
}

/// Lays out a whole [`Diagram`]: the root group hierarchically, then each container's
/// children with the algorithm the strategy picks, placed inside the container's rectangle.
///
/// Container rectangles keep the size given by their node; fitting them around their
/// children is left to the caller.
#[derive(Debug, Clone)]
pub struct DiagramLayoutCalculator<S = DefaultSelectionStrategy> {
    config: LayoutConfig,
    strategy: S,
    sugiyama: SugiyamaLayoutAlgorithm,
    stack: VerticalStackLayoutAlgorithm,
}

impl DiagramLayoutCalculator<DefaultSelectionStrategy> {
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_strategy(config, DefaultSelectionStrategy)
    }
}

impl Default for DiagramLayoutCalculator<DefaultSelectionStrategy> {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl<S: LayoutAlgorithmSelectionStrategy> DiagramLayoutCalculator<S> {
    pub fn with_strategy(config: LayoutConfig, strategy: S) -> Self {
        Self {
            sugiyama: SugiyamaLayoutAlgorithm::new(config.clone()),
            stack: VerticalStackLayoutAlgorithm::new(config.clone()),
            config,
            strategy,
        }
    }

    pub fn with_priority_provider(mut self, priorities: Arc<dyn LayoutPriorityProvider>) -> Self {
        self.sugiyama = self.sugiyama.with_priority_provider(priorities);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn algorithm(&self, kind: LayoutAlgorithmKind) -> &dyn LayoutAlgorithm {
        match kind {
            LayoutAlgorithmKind::Sugiyama => &self.sugiyama,
            LayoutAlgorithmKind::VerticalStack => &self.stack,
        }
    }

    pub fn calculate(&self, diagram: &Diagram) -> Result<GroupLayout> {
        check_unique_ids(diagram)?;

        let mut layout = self.sugiyama.calculate(&diagram.root)?;
        self.place_containers(diagram, &diagram.root, &mut layout)?;
        tracing::debug!(
            nodes = layout.nodes.len(),
            routes = layout.connectors.len(),
            containers = diagram.containers.len(),
            "diagram layout calculated"
        );
        Ok(layout)
    }

    /// Lays out the children of every container in `group`, whose rectangles must already be
    /// in `layout`, and recurses into them. Terminates because node ids are unique across the
    /// diagram, so no group can contain its own container.
    fn place_containers(
        &self,
        diagram: &Diagram,
        group: &LayoutGroup,
        layout: &mut GroupLayout,
    ) -> Result<()> {
        let padding = self.config.container_padding;
        for node in &group.nodes {
            let Some(children) = diagram.containers.get(&node.id) else {
                continue;
            };
            if children.is_empty() {
                continue;
            }
            let rect = layout
                .node_rect(&node.id)
                .copied()
                .ok_or_else(|| Error::UnknownNode {
                    node_id: node.id.clone(),
                })?;

            let kind = self.strategy.algorithm_for(node);
            let mut nested = self.algorithm(kind).calculate(children)?;
            nested.translate(
                rect.origin.to_vector() - self.config.origin.to_vector() + vector(padding, padding),
            );
            tracing::debug!(
                container = %node.id,
                ?kind,
                nodes = nested.nodes.len(),
                "container laid out"
            );

            layout.merge(nested);
            self.place_containers(diagram, children, layout)?;
        }
        Ok(())
    }
}

fn check_unique_ids(diagram: &Diagram) -> Result<()> {
    let groups = std::iter::once(&diagram.root).chain(diagram.containers.values());
    let mut nodes: BTreeSet<&str> = BTreeSet::new();
    let mut connectors: BTreeSet<&str> = BTreeSet::new();
    for group in groups {
        for node in &group.nodes {
            if !nodes.insert(&node.id) {
                return Err(Error::DuplicateNode {
                    node_id: node.id.clone(),
                });
            }
        }
        for connector in &group.connectors {
            if !connectors.insert(&connector.id) {
                return Err(Error::DuplicateConnector {
                    connector_id: connector.id.clone(),
                });
            }
        }
    }
    Ok(())
}
