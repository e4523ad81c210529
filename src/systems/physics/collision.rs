//! Narrow phase: one contact (normal + depth) per overlapping ordered pair.
//!
//! Normals point from the first body to the second in world orientation,
//! so every screen-space direction has its Y flipped before it becomes a
//! normal.

use crate::core::{PhysicsError, PhysicsResult};
use crate::geometry::{
    check_collision_circle_rec, check_collision_circles, check_collision_point_circle,
    check_collision_recs,
};
use crate::rigid_body::{ColliderShape, PhysicBody, Rectangle, Vec2};

use super::types::Contact;

/// Contact between `a` and `b`, or `None` when they do not overlap.
///
/// Fails with `DegenerateGeometry` when either collider cannot produce a
/// meaningful normal (non-positive extent or radius, non-finite position).
pub fn generate_contact(a: &PhysicBody, b: &PhysicBody) -> PhysicsResult<Option<Contact>> {
    validate(a)?;
    validate(b)?;

    let contact = match (a.collider.shape, b.collider.shape) {
        (ColliderShape::Rectangle, ColliderShape::Rectangle) => {
            rect_rect(a.collider.bounds, b.collider.bounds)
        }
        (ColliderShape::Rectangle, ColliderShape::Circle { radius }) => {
            rect_circle(a.collider.bounds, b.transform.position, radius)
        }
        (ColliderShape::Circle { radius }, ColliderShape::Rectangle) => {
            rect_circle(b.collider.bounds, a.transform.position, radius).map(Contact::reversed)
        }
        (ColliderShape::Circle { radius: ra }, ColliderShape::Circle { radius: rb }) => {
            circle_circle(a.transform.position, ra, b.transform.position, rb)
        }
    };

    Ok(contact)
}

fn validate(body: &PhysicBody) -> PhysicsResult<()> {
    if !body.transform.position.is_finite() {
        return Err(PhysicsError::degenerate("body position is not finite"));
    }
    match body.collider.shape {
        ColliderShape::Circle { radius } => {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(PhysicsError::degenerate("circle radius must be > 0"));
            }
        }
        ColliderShape::Rectangle => {
            let s = body.transform.scale;
            if !(s.is_finite() && s.x > 0.0 && s.y > 0.0) {
                return Err(PhysicsError::degenerate("rectangle extent must be > 0"));
            }
        }
    }
    Ok(())
}

/// Separating-axis test on the two box axes; the normal follows the axis
/// of least penetration.
fn rect_rect(a: Rectangle, b: Rectangle) -> Option<Contact> {
    if !check_collision_recs(a, b) {
        return None;
    }

    let direction = b.center() - a.center();

    let overlap_x = (a.width + b.width) / 2.0 - direction.x.abs();
    if overlap_x <= 0.0 {
        return None;
    }
    let overlap_y = (a.height + b.height) / 2.0 - direction.y.abs();
    if overlap_y <= 0.0 {
        return None;
    }

    if overlap_y > overlap_x {
        let normal = if direction.x < 0.0 { Vec2::new(-1.0, 0.0) } else { Vec2::new(1.0, 0.0) };
        Some(Contact::new(normal, overlap_x))
    } else {
        let normal = if direction.y < 0.0 { Vec2::new(0.0, 1.0) } else { Vec2::new(0.0, -1.0) };
        Some(Contact::new(normal, overlap_y))
    }
}

/// Rectangle first, circle second
fn rect_circle(rec: Rectangle, center: Vec2, radius: f32) -> Option<Contact> {
    if !check_collision_circle_rec(center, radius, rec) {
        return None;
    }

    let closest = Vec2::new(
        center.x.clamp(rec.x, rec.right()),
        center.y.clamp(rec.y, rec.bottom()),
    );
    let to_center = center - closest;
    let distance = to_center.length();

    if distance > 0.0 && check_collision_point_circle(closest, center, radius) {
        let normal = (to_center / distance).flip_y();
        return Some(Contact::new(normal, radius - distance));
    }

    // Center inside the box: push out through the nearest face
    let direction = center - rec.center();
    let half = rec.half_extents();
    let gap_x = half.x + radius - direction.x.abs();
    let gap_y = half.y + radius - direction.y.abs();

    if gap_x < gap_y {
        let normal = if direction.x < 0.0 { Vec2::new(-1.0, 0.0) } else { Vec2::new(1.0, 0.0) };
        Some(Contact::new(normal, gap_x))
    } else {
        let normal = if direction.y < 0.0 { Vec2::new(0.0, 1.0) } else { Vec2::new(0.0, -1.0) };
        Some(Contact::new(normal, gap_y))
    }
}

fn circle_circle(a: Vec2, ra: f32, b: Vec2, rb: f32) -> Option<Contact> {
    if !check_collision_circles(a, ra, b, rb) {
        return None;
    }

    let direction = b - a;
    let distance = direction.length();

    // Coincident centers: fixed tie-break along +X
    let normal = if distance > 0.0 {
        (direction / distance).flip_y()
    } else {
        Vec2::new(1.0, 0.0)
    };

    Some(Contact::new(normal, ra + rb - distance))
}
