use tapir::geometry::{Point, Rect, is_on_perimeter, point, rect_from_center, size};
use tapir::routing::{ConnectorRouter, DirectRouter, OrthogonalRouter, router_for};
use tapir::{
    DiagramConnector, DiagramNode, IncrementalLayoutEngine, LayoutConfig, Route, RoutingStyle,
};

fn rect(cx: f64, cy: f64, w: f64, h: f64) -> Rect {
    rect_from_center(point(cx, cy), size(w, h))
}

fn assert_axis_aligned(route: &Route) {
    for pair in route.points().windows(2) {
        let (a, b): (Point, Point) = (pair[0], pair[1]);
        assert!(a.x == b.x || a.y == b.y, "diagonal segment {a:?} -> {b:?}");
    }
}

#[test]
fn direct_route_joins_facing_sides() {
    let source = rect(0.0, 0.0, 20.0, 10.0);
    let target = rect(0.0, 100.0, 20.0, 10.0);

    let route = DirectRouter.route(&source, &target, &[]).unwrap();
    assert_eq!(route, Route::new([point(0.0, 5.0), point(0.0, 95.0)]));
}

#[test]
fn direct_route_keeps_waypoints() {
    let source = rect(0.0, 0.0, 20.0, 10.0);
    let target = rect(0.0, 100.0, 20.0, 10.0);
    let waypoints = [point(40.0, 50.0)];

    let route = DirectRouter.route(&source, &target, &waypoints).unwrap();
    assert_eq!(route.len(), 3);
    assert_eq!(route.points()[1], point(40.0, 50.0));
    assert!(is_on_perimeter(&source, route.first().unwrap(), 1e-9));
    assert!(is_on_perimeter(&target, route.last().unwrap(), 1e-9));
}

#[test]
fn coinciding_centers_have_no_route() {
    let a = rect(5.0, 5.0, 10.0, 10.0);
    let b = rect(5.0, 5.0, 30.0, 4.0);

    assert_eq!(DirectRouter.route(&a, &b, &[]), None);
    assert_eq!(OrthogonalRouter.route(&a, &b, &[]), None);
}

#[test]
fn orthogonal_route_bends_halfway() {
    let source = rect(0.0, 0.0, 20.0, 10.0);
    let target = rect(60.0, 100.0, 20.0, 10.0);

    let route = OrthogonalRouter.route(&source, &target, &[]).unwrap();
    assert_eq!(
        route,
        Route::new([
            point(0.0, 5.0),
            point(0.0, 50.0),
            point(60.0, 50.0),
            point(60.0, 95.0),
        ])
    );
    assert_axis_aligned(&route);
}

#[test]
fn orthogonal_route_leaves_sideways_toward_a_neighbour() {
    let source = rect(0.0, 0.0, 10.0, 10.0);
    let target = rect(100.0, 10.0, 10.0, 10.0);

    let route = OrthogonalRouter.route(&source, &target, &[]).unwrap();
    assert_eq!(route.first(), Some(point(5.0, 0.0)));
    assert_eq!(route.last(), Some(point(95.0, 10.0)));
    assert_axis_aligned(&route);
}

#[test]
fn orthogonal_route_passes_through_waypoints() {
    let source = rect(0.0, 0.0, 10.0, 10.0);
    let target = rect(0.0, 200.0, 10.0, 10.0);
    let waypoints = [point(30.0, 60.0), point(30.0, 130.0)];

    let route = OrthogonalRouter.route(&source, &target, &waypoints).unwrap();
    assert!(route.points().contains(&waypoints[0]));
    assert!(route.points().contains(&waypoints[1]));
    assert!(is_on_perimeter(&source, route.first().unwrap(), 1e-9));
    assert!(is_on_perimeter(&target, route.last().unwrap(), 1e-9));
    assert_axis_aligned(&route);
}

#[test]
fn engine_uses_the_configured_style() {
    let config = LayoutConfig {
        routing: RoutingStyle::Orthogonal,
        ..LayoutConfig::default()
    };
    let mut engine = IncrementalLayoutEngine::new(config);
    for id in ["A", "B", "C"] {
        engine
            .add_node(&DiagramNode::new(id, id, size(20.0, 10.0)), 0)
            .unwrap();
    }
    engine.add_connector(&DiagramConnector::new("ab", "A", "B")).unwrap();
    engine.add_connector(&DiagramConnector::new("ac", "A", "C")).unwrap();

    let layout = engine.calculate_layout().unwrap();
    for id in ["ab", "ac"] {
        let route = layout.route(id).unwrap();
        assert_axis_aligned(route);
        assert!(is_on_perimeter(layout.node_rect("A").unwrap(), route.first().unwrap(), 1e-9));
    }
}

#[test]
fn router_for_maps_styles() {
    let source = rect(0.0, 0.0, 10.0, 10.0);
    let target = rect(50.0, 100.0, 10.0, 10.0);

    let direct = router_for(RoutingStyle::Direct).route(&source, &target, &[]).unwrap();
    assert_eq!(direct.len(), 2);
    let orthogonal = router_for(RoutingStyle::Orthogonal)
        .route(&source, &target, &[])
        .unwrap();
    assert_eq!(orthogonal.len(), 4);
}
