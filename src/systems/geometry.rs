//! Geometry predicates - stateless overlap tests
//!
//! Used as the first-pass reject before a contact is built. Edge-touching
//! circles count as overlapping, edge-touching rectangles do not.

use crate::rigid_body::{Rectangle, Vec2};

/// Rectangle vs rectangle (strict: shared edges do not overlap)
#[inline]
pub fn check_collision_recs(a: Rectangle, b: Rectangle) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Circle vs circle
#[inline]
pub fn check_collision_circles(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    center_a.distance(center_b) <= radius_a + radius_b
}

/// Circle vs rectangle
pub fn check_collision_circle_rec(center: Vec2, radius: f32, rec: Rectangle) -> bool {
    let half = rec.half_extents();
    let rc = rec.center();
    let dx = (center.x - rc.x).abs();
    let dy = (center.y - rc.y).abs();

    if dx > half.x + radius || dy > half.y + radius {
        return false;
    }
    if dx <= half.x || dy <= half.y {
        return true;
    }

    let corner_dx = dx - half.x;
    let corner_dy = dy - half.y;
    corner_dx * corner_dx + corner_dy * corner_dy <= radius * radius
}

/// Point inside (or on) a circle
#[inline]
pub fn check_collision_point_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    check_collision_circles(point, 0.0, center, radius)
}
