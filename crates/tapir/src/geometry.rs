//! Geometry primitives.
//!
//! Layout math runs in an untyped `f64` space; rectangles are stored as top-left origin plus
//! size, like everywhere else in the crate.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

pub fn rect_from_center(center: Point, size: Size) -> Rect {
    Rect::new(
        point(center.x - size.width / 2.0, center.y - size.height / 2.0),
        size,
    )
}

/// The point of the perimeter of `rect` that lies on the ray from its center toward `toward`.
///
/// Returns `None` when `toward` coincides with the center, since no direction is defined.
/// A zero-sized rectangle attaches at its center.
pub fn attach_point_toward(rect: &Rect, toward: Point) -> Option<Point> {
    let center = rect.center();
    let dx = toward.x - center.x;
    let dy = toward.y - center.y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }

    // How far the ray overshoots each half-extent; the larger one is the side it exits through.
    let ratio = |delta: f64, half: f64| {
        if half > 0.0 {
            delta.abs() / half
        } else if delta != 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    };
    let scale = ratio(dx, rect.size.width / 2.0).max(ratio(dy, rect.size.height / 2.0));
    if !scale.is_finite() {
        return Some(center);
    }

    Some(point(center.x + dx / scale, center.y + dy / scale))
}

/// Whether `p` lies on the perimeter of `rect`, within `tolerance`.
pub fn is_on_perimeter(rect: &Rect, p: Point, tolerance: f64) -> bool {
    let within_x = p.x >= rect.min_x() - tolerance && p.x <= rect.max_x() + tolerance;
    let within_y = p.y >= rect.min_y() - tolerance && p.y <= rect.max_y() + tolerance;
    let on_vertical_side =
        (p.x - rect.min_x()).abs() <= tolerance || (p.x - rect.max_x()).abs() <= tolerance;
    let on_horizontal_side =
        (p.y - rect.min_y()).abs() <= tolerance || (p.y - rect.max_y()).abs() <= tolerance;
    (on_vertical_side && within_y) || (on_horizontal_side && within_x)
}
