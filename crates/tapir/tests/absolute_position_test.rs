use tapir::geometry::{Rect, is_on_perimeter, point, size};
use tapir::layout::LayerView;
use tapir::{DiagramConnector, DiagramNode, IncrementalLayoutEngine, LayoutConfig, Route};

const EPS: f64 = 1e-9;

fn engine(
    config: LayoutConfig,
    nodes: &[(&str, f64, f64)],
    edges: &[(&str, &str)],
) -> IncrementalLayoutEngine {
    let mut engine = IncrementalLayoutEngine::new(config);
    for (i, &(id, w, h)) in nodes.iter().enumerate() {
        let node = DiagramNode::new(id, id, size(w, h)).with_added_at(i as u64);
        engine.add_node(&node, 0).unwrap();
    }
    for &(s, t) in edges {
        engine
            .add_connector(&DiagramConnector::new(format!("{s}->{t}"), s, t))
            .unwrap();
    }
    engine
}

fn assert_no_overlap(engine: &IncrementalLayoutEngine) {
    let centers = engine.vertex_centers().unwrap();
    let graph = engine.relative().graph();
    let layers = engine.relative().layers();
    for layer_index in 0..layers.layer_count() {
        for pair in layers.layer(layer_index).windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let wa = graph.vertex(a).unwrap().width();
            let wb = graph.vertex(b).unwrap().width();
            let dx = centers[&b].x - centers[&a].x;
            assert!(
                dx + EPS >= (wa + wb) / 2.0,
                "{a} and {b} overlap in layer {layer_index}: dx={dx}"
            );
        }
    }
}

#[test]
fn parent_is_centered_over_single_child() {
    let engine = engine(
        LayoutConfig::default(),
        &[("A", 40.0, 20.0), ("B", 40.0, 20.0)],
        &[("A", "B")],
    );
    let layout = engine.calculate_layout().unwrap();

    assert_eq!(layout.node_rect("A"), Some(&Rect::new(point(0.0, 0.0), size(40.0, 20.0))));
    assert_eq!(layout.node_rect("B"), Some(&Rect::new(point(0.0, 60.0), size(40.0, 20.0))));
    assert_eq!(
        layout.route("A->B"),
        Some(&Route::new([point(20.0, 20.0), point(20.0, 60.0)]))
    );
}

#[test]
fn leaves_pack_left_to_right_and_parent_takes_their_mean() {
    let engine = engine(
        LayoutConfig::default(),
        &[("P", 10.0, 10.0), ("L", 30.0, 10.0), ("R", 10.0, 20.0)],
        &[("P", "L"), ("P", "R")],
    );
    let centers = engine.vertex_centers().unwrap();
    let at = |id: &str| centers[&engine.vertex_of(id).unwrap()];

    // L: [0, 30], R: [50, 60]; layer 1 is as tall as R.
    assert_eq!(at("L"), point(15.0, 60.0));
    assert_eq!(at("R"), point(55.0, 60.0));
    assert_eq!(at("P"), point(35.0, 5.0));
    assert_no_overlap(&engine);
}

#[test]
fn crowded_parent_shifts_its_subtree_right() {
    // K is wide and childless; N sits right of it, centered over M, which would overlap K.
    let engine = engine(
        LayoutConfig::default(),
        &[("N", 10.0, 10.0), ("K", 100.0, 10.0), ("M", 10.0, 10.0), ("X", 10.0, 10.0)],
        &[("X", "K"), ("X", "N"), ("N", "M")],
    );
    assert_no_overlap(&engine);

    let centers = engine.vertex_centers().unwrap();
    let at = |id: &str| centers[&engine.vertex_of(id).unwrap()];
    assert_eq!(at("N").x, at("M").x);
    assert!(at("N").x - 5.0 >= at("K").x + 50.0 + 20.0 - EPS);
    assert_eq!(at("K").x, 50.0);
    assert_eq!(at("X").x, (at("K").x + at("N").x) / 2.0);
}

#[test]
fn origin_is_the_top_left_of_the_bounds() {
    let config = LayoutConfig {
        origin: point(100.0, 50.0),
        ..LayoutConfig::default()
    };
    let engine = engine(
        config,
        &[("A", 10.0, 10.0), ("B", 80.0, 10.0), ("C", 80.0, 10.0)],
        &[("A", "B"), ("A", "C")],
    );
    let bounds = engine.calculate_layout().unwrap().bounds().unwrap();

    assert_eq!(bounds.origin, point(100.0, 50.0));
    assert_eq!(bounds.size.width, 180.0);
}

#[test]
fn long_connector_routes_through_dummy_centers() {
    let engine = engine(
        LayoutConfig::default(),
        &[("A", 10.0, 10.0), ("B", 10.0, 10.0), ("C", 10.0, 10.0), ("D", 10.0, 10.0)],
        &[("A", "B"), ("B", "C"), ("C", "D"), ("A", "D")],
    );
    assert_no_overlap(&engine);

    let layout = engine.calculate_layout().unwrap();
    let centers = engine.vertex_centers().unwrap();
    let graph = engine.relative().graph();
    let dummies = graph
        .path(engine.path_of("A->D").unwrap())
        .unwrap()
        .interior();

    let route = layout.route("A->D").unwrap();
    assert_eq!(route.len(), 4);
    assert_eq!(route.points()[1], centers[&dummies[0]]);
    assert_eq!(route.points()[2], centers[&dummies[1]]);
    assert!(is_on_perimeter(layout.node_rect("A").unwrap(), route.first().unwrap(), EPS));
    assert!(is_on_perimeter(layout.node_rect("D").unwrap(), route.last().unwrap(), EPS));
}

#[test]
fn empty_engine_lays_out_nothing() {
    let engine = IncrementalLayoutEngine::new(LayoutConfig::default());
    let layout = engine.calculate_layout().unwrap();
    assert!(layout.nodes.is_empty());
    assert!(layout.bounds().is_none());
}
