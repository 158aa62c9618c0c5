//! Connector routing.
//!
//! Routers turn a pair of node rectangles plus the waypoints of a layout path (the centers of
//! its dummy vertices, source side first) into a [`Route`] whose endpoints lie on the node
//! perimeters.

use crate::config::RoutingStyle;
use crate::geometry::{Point, Rect, point};
use crate::route::Route;

pub trait ConnectorRouter: Send + Sync {
    /// Returns `None` when no direction between the endpoints can be derived, e.g. when both
    /// rectangles share a center and there are no waypoints.
    fn route(&self, source: &Rect, target: &Rect, waypoints: &[Point]) -> Option<Route>;
}

pub fn router_for(style: RoutingStyle) -> &'static dyn ConnectorRouter {
    match style {
        RoutingStyle::Direct => &DirectRouter,
        RoutingStyle::Orthogonal => &OrthogonalRouter,
    }
}

/// Straight segments: source perimeter, waypoints, target perimeter.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRouter;

impl ConnectorRouter for DirectRouter {
    fn route(&self, source: &Rect, target: &Rect, waypoints: &[Point]) -> Option<Route> {
        let mut points: Vec<Point> = Vec::with_capacity(waypoints.len() + 2);
        points.push(source.center());
        points.extend_from_slice(waypoints);
        points.push(target.center());
        Route::new(points).attach_endpoints(source, target)
    }
}

/// Axis-aligned segments.
///
/// The route leaves the source through the middle of the side facing the first waypoint
/// (or the target), bends halfway between consecutive waypoints and enters the target through
/// the middle of the side facing the last one. Obstacles are not avoided.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrthogonalRouter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

impl OrthogonalRouter {
    fn axis(from: Point, to: Point) -> Option<Axis> {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        if dx == 0.0 && dy == 0.0 {
            None
        } else if dy >= dx {
            Some(Axis::Vertical)
        } else {
            Some(Axis::Horizontal)
        }
    }

    /// Middle of the side of `rect` facing `toward` along `axis`.
    fn side_midpoint(rect: &Rect, toward: Point, axis: Axis) -> Point {
        let c = rect.center();
        match axis {
            Axis::Vertical if toward.y >= c.y => point(c.x, rect.max_y()),
            Axis::Vertical => point(c.x, rect.min_y()),
            Axis::Horizontal if toward.x >= c.x => point(rect.max_x(), c.y),
            Axis::Horizontal => point(rect.min_x(), c.y),
        }
    }
}

impl ConnectorRouter for OrthogonalRouter {
    fn route(&self, source: &Rect, target: &Rect, waypoints: &[Point]) -> Option<Route> {
        let mut centers: Vec<Point> = Vec::with_capacity(waypoints.len() + 2);
        centers.push(source.center());
        centers.extend_from_slice(waypoints);
        centers.push(target.center());

        let n = centers.len();
        let start_axis = Self::axis(centers[0], centers[1])?;
        let end_axis = Self::axis(centers[n - 2], centers[n - 1])?;

        let mut anchors = centers.clone();
        anchors[0] = Self::side_midpoint(source, centers[1], start_axis);
        anchors[n - 1] = Self::side_midpoint(target, centers[n - 2], end_axis);

        let mut route = Route::new([anchors[0]]);
        for pair in anchors.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            match Self::axis(from, to) {
                None => {}
                Some(Axis::Vertical) => {
                    let mid = (from.y + to.y) / 2.0;
                    route.push(point(from.x, mid));
                    route.push(point(to.x, mid));
                }
                Some(Axis::Horizontal) => {
                    let mid = (from.x + to.x) / 2.0;
                    route.push(point(mid, from.y));
                    route.push(point(mid, to.y));
                }
            }
            route.push(to);
        }
        Some(route)
    }
}
