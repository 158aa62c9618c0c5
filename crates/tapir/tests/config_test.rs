use tapir::geometry::{point, size};
use tapir::{
    DiagramConnector, DiagramNode, Error, IncrementalLayoutEngine, LayoutConfig, RoutingStyle,
};

#[test]
fn defaults() {
    let config = LayoutConfig::default();
    assert_eq!(config.horizontal_gap, 20.0);
    assert_eq!(config.vertical_gap, 40.0);
    assert_eq!(config.stack_gap, 10.0);
    assert_eq!(config.container_padding, 10.0);
    assert_eq!(config.origin, point(0.0, 0.0));
    assert_eq!(config.routing, RoutingStyle::Direct);
}

#[test]
fn partial_json_keeps_defaults() {
    let config =
        LayoutConfig::from_json(r#"{ "vertical_gap": 80, "routing": "orthogonal" }"#).unwrap();
    assert_eq!(config.vertical_gap, 80.0);
    assert_eq!(config.routing, RoutingStyle::Orthogonal);
    assert_eq!(config.horizontal_gap, 20.0);

    let config = LayoutConfig::from_json(r#"{ "origin": [5, 7] }"#).unwrap();
    assert_eq!(config.origin, point(5.0, 7.0));
}

#[test]
fn json_round_trip() {
    let config = LayoutConfig {
        horizontal_gap: 3.5,
        routing: RoutingStyle::Orthogonal,
        ..LayoutConfig::default()
    };
    let text = config.to_json().unwrap();
    assert_eq!(LayoutConfig::from_json(&text).unwrap(), config);
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = LayoutConfig::from_json(r#"{ "routing": "curvy" }"#).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn layout_serializes_to_json() {
    let mut engine = IncrementalLayoutEngine::new(LayoutConfig::default());
    engine
        .add_node(&DiagramNode::new("a", "A", size(10.0, 10.0)), 0)
        .unwrap();
    engine
        .add_node(&DiagramNode::new("b", "B", size(10.0, 10.0)), 0)
        .unwrap();
    engine
        .add_connector(&DiagramConnector::new("ab", "a", "b"))
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&engine.calculate_layout().unwrap().to_json().unwrap()).unwrap();
    assert_eq!(json["connectors"]["ab"], serde_json::json!([[5.0, 10.0], [5.0, 50.0]]));
    assert!(json["nodes"]["a"].is_object());
}

#[test]
fn version_is_set() {
    assert!(!tapir::VERSION.is_empty());
}
