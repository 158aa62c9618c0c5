//! Connector routes.

use crate::geometry::{Point, Rect, Vector, attach_point_toward};
use serde::Serialize;

/// An ordered point sequence in which no two consecutive points are equal.
///
/// Consecutive duplicates collapse on construction and on [`Route::push`], so equality compares
/// the deduplicated sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Route {
    points: Vec<Point>,
}

impl Route {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        let mut route = Self::default();
        for p in points {
            route.push(p);
        }
        route
    }

    pub fn push(&mut self, p: Point) {
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Rewrites the first and last point onto the perimeters of `source` and `target`, aimed at
    /// the neighbouring point of the route.
    ///
    /// Returns `None` for routes shorter than two points or when an endpoint has no direction to
    /// aim at.
    pub fn attach_endpoints(&self, source: &Rect, target: &Rect) -> Option<Route> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        let first = attach_point_toward(source, self.points[1])?;
        let last = attach_point_toward(target, self.points[n - 2])?;

        let mut points = self.points.clone();
        points[0] = first;
        points[n - 1] = last;
        Some(Route::new(points))
    }

    pub fn translate(&self, by: Vector) -> Route {
        Route::new(self.points.iter().map(|p| *p + by))
    }
}

impl FromIterator<Point> for Route {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Route::new(iter)
    }
}

impl From<Vec<Point>> for Route {
    fn from(points: Vec<Point>) -> Self {
        Route::new(points)
    }
}
