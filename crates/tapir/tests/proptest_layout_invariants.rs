//! Property-based invariants of the hierarchical layout over random acyclic diagrams:
//!
//! 1. Every primitive edge spans exactly one layer.
//! 2. Neighbours in a layer never overlap.
//! 3. Every route starts and ends on its node perimeters.
//! 4. Adding then removing a connector restores every relative location.
//! 5. Routes never repeat a point consecutively.

use proptest::prelude::*;
use std::collections::BTreeMap;
use tapir::geometry::{is_on_perimeter, point, size};
use tapir::graphlib::VertexId;
use tapir::layout::{LayerView, RelativeLocation, VertexKind};
use tapir::{
    DiagramConnector, DiagramNode, IncrementalLayoutEngine, LayoutConfig, Route, RoutingStyle,
};

const EPS: f64 = 1e-6;

#[derive(Debug, Clone)]
struct DiagramCase {
    sizes: Vec<(f64, f64)>,
    edges: Vec<(usize, usize)>,
}

// -- Helpers ---------------------------------------------------------------

fn case_strategy() -> impl Strategy<Value = DiagramCase> {
    (2usize..9)
        .prop_flat_map(|n| {
            (
                prop::collection::vec((1u16..60, 1u16..40), n),
                prop::collection::vec((0..n, 0..n), 0..(n * 2)),
            )
        })
        .prop_map(|(sizes, pairs)| {
            let mut edges: Vec<(usize, usize)> = pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect();
            edges.sort();
            edges.dedup();
            DiagramCase {
                sizes: sizes
                    .into_iter()
                    .map(|(w, h)| (f64::from(w), f64::from(h)))
                    .collect(),
                edges,
            }
        })
}

fn node_id(i: usize) -> String {
    format!("n{i}")
}

fn build(case: &DiagramCase, routing: RoutingStyle) -> IncrementalLayoutEngine {
    let config = LayoutConfig {
        routing,
        ..LayoutConfig::default()
    };
    let mut engine = IncrementalLayoutEngine::new(config);
    for (i, &(w, h)) in case.sizes.iter().enumerate() {
        let node = DiagramNode::new(node_id(i), format!("Type{}", i % 3), size(w, h))
            .with_priority((i % 2) as i32);
        engine.add_node(&node, node.priority).unwrap();
    }
    for &(a, b) in &case.edges {
        engine
            .add_connector(&DiagramConnector::new(
                format!("{a}-{b}"),
                node_id(a),
                node_id(b),
            ))
            .unwrap();
    }
    engine
}

fn snapshot(engine: &IncrementalLayoutEngine) -> BTreeMap<VertexId, RelativeLocation> {
    engine
        .relative()
        .graph()
        .proper()
        .vertices()
        .filter(|&v| engine.relative().graph().kind(v) == Some(VertexKind::Node))
        .filter_map(|v| engine.relative().location(v).map(|l| (v, l)))
        .collect()
}

fn has_consecutive_duplicates(route: &Route) -> bool {
    route.points().windows(2).any(|p| p[0] == p[1])
}

// =========================================================================
// 1. Layering
// =========================================================================

proptest! {
    #[test]
    fn edges_span_one_layer(case in case_strategy()) {
        let engine = build(&case, RoutingStyle::Direct);
        let layers = engine.relative().layers();
        for (_, path) in engine.relative().graph().paths() {
            for edge in path.edges() {
                let s = layers.layer_index(edge.source).unwrap();
                let t = layers.layer_index(edge.target).unwrap();
                prop_assert_eq!(t, s + 1, "connector {}", path.connector());
            }
        }
    }
}

// =========================================================================
// 2. No overlap
// =========================================================================

proptest! {
    #[test]
    fn layer_neighbours_do_not_overlap(case in case_strategy()) {
        let engine = build(&case, RoutingStyle::Direct);
        let centers = engine.vertex_centers().unwrap();
        let graph = engine.relative().graph();
        let layers = engine.relative().layers();
        for layer_index in 0..layers.layer_count() {
            for pair in layers.layer(layer_index).windows(2) {
                let wa = graph.vertex(pair[0]).unwrap().width();
                let wb = graph.vertex(pair[1]).unwrap().width();
                let dx = centers[&pair[1]].x - centers[&pair[0]].x;
                prop_assert!(dx + EPS >= (wa + wb) / 2.0, "layer {}: dx={}", layer_index, dx);
            }
        }

        let layout = engine.calculate_layout().unwrap();
        if let Some(bounds) = layout.bounds() {
            // A dummy may be the leftmost vertex, so nodes can start right of the origin.
            prop_assert!(bounds.origin.x >= -EPS);
            prop_assert!(bounds.origin.y.abs() < EPS);
        }
    }
}

// =========================================================================
// 3. Route attachment
// =========================================================================

proptest! {
    #[test]
    fn routes_attach_to_perimeters(case in case_strategy(), orthogonal in any::<bool>()) {
        let routing = if orthogonal { RoutingStyle::Orthogonal } else { RoutingStyle::Direct };
        let engine = build(&case, routing);
        let layout = engine.calculate_layout().unwrap();

        prop_assert_eq!(layout.connectors.len(), case.edges.len());
        for &(a, b) in &case.edges {
            let route = layout.route(&format!("{a}-{b}")).unwrap();
            let source = layout.node_rect(&node_id(a)).unwrap();
            let target = layout.node_rect(&node_id(b)).unwrap();
            prop_assert!(is_on_perimeter(source, route.first().unwrap(), EPS));
            prop_assert!(is_on_perimeter(target, route.last().unwrap(), EPS));
            prop_assert!(!has_consecutive_duplicates(route));
        }
    }
}

// =========================================================================
// 4. Add then remove
// =========================================================================

proptest! {
    #[test]
    fn add_then_remove_restores_locations(
        case in case_strategy(),
        extra in (0usize..8, 0usize..8),
    ) {
        let mut engine = build(&case, RoutingStyle::Direct);
        let n = case.sizes.len();
        let (a, b) = (extra.0 % n, extra.1 % n);
        prop_assume!(a != b);
        let (a, b) = (a.min(b), a.max(b));
        prop_assume!(!case.edges.contains(&(a, b)));

        let before = snapshot(&engine);
        engine
            .add_connector(&DiagramConnector::new("extra", node_id(a), node_id(b)))
            .unwrap();
        engine.remove_connector("extra").unwrap();
        prop_assert_eq!(snapshot(&engine), before);
    }
}

// =========================================================================
// 5. Route normalization
// =========================================================================

proptest! {
    #[test]
    fn route_collapses_runs(points in prop::collection::vec((0u8..4, 0u8..4), 0..20)) {
        let points: Vec<_> = points
            .into_iter()
            .map(|(x, y)| point(f64::from(x), f64::from(y)))
            .collect();
        let route = Route::new(points.clone());

        prop_assert!(!has_consecutive_duplicates(&route));
        let mut expected = points;
        expected.dedup();
        prop_assert_eq!(route.points(), expected.as_slice());
        prop_assert_eq!(Route::new(route.points().to_vec()), route);
    }
}
