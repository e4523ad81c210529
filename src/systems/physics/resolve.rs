use crate::rigid_body::{PhysicBody, Vec2};

use super::types::Contact;

/// Outcome of resolving one contact
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Bodies already moving apart; nothing changed
    Separating,
    /// Neither body can move
    Immovable,
    /// Impulse applied and positions corrected
    Resolved,
}

/// Apply the collision impulse for `contact` and nudge both bodies apart.
///
/// Two movable bodies share the impulse in proportion to their own mass and
/// both scale it by `(1 + a.bounciness)`. Against an immovable body the
/// movable one absorbs the whole impulse.
pub fn resolve_contact(
    a: &mut PhysicBody,
    b: &mut PhysicBody,
    contact: &Contact,
    error_percent: f32,
) -> Resolution {
    let normal = contact.normal;
    let relative_velocity = solver_velocity(b) - solver_velocity(a);
    let velocity_along_normal = relative_velocity.dot(normal);

    if velocity_along_normal > 0.0 {
        return Resolution::Separating;
    }

    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return Resolution::Immovable;
    }

    let e = a.rigidbody.bounciness.min(b.rigidbody.bounciness);
    let j = -(1.0 + e) * velocity_along_normal / inv_sum;
    let impulse = normal * j;

    match (a.is_movable(), b.is_movable()) {
        (true, true) => {
            let mass_a = a.rigidbody.mass.get();
            let mass_b = b.rigidbody.mass.get();
            let mass_sum = mass_a + mass_b;
            let restitution = 1.0 + a.rigidbody.bounciness;

            a.rigidbody.velocity -= impulse * (mass_a / mass_sum * restitution);
            b.rigidbody.velocity += impulse * (mass_b / mass_sum * restitution);
        }
        (true, false) => a.rigidbody.velocity -= impulse * inv_a,
        (false, true) => b.rigidbody.velocity += impulse * inv_b,
        (false, false) => return Resolution::Immovable,
    }

    correct_positions(a, b, contact, inv_a, inv_b, error_percent);
    Resolution::Resolved
}

/// Immovable bodies keep whatever velocity was set on them but act as if at rest
fn solver_velocity(body: &PhysicBody) -> Vec2 {
    if body.is_movable() {
        body.rigidbody.velocity
    } else {
        Vec2::ZERO
    }
}

/// Partial (Baumgarte-style) removal of the remaining overlap.
///
/// The normal is in world orientation, so its Y component is applied
/// inverted to screen-space positions.
pub fn correct_positions(
    a: &mut PhysicBody,
    b: &mut PhysicBody,
    contact: &Contact,
    inv_a: f32,
    inv_b: f32,
    error_percent: f32,
) {
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return;
    }

    let correction = contact.normal * (contact.depth / inv_sum * error_percent);

    if inv_a > 0.0 {
        a.translate(Vec2::new(-correction.x * inv_a, correction.y * inv_a));
    }
    if inv_b > 0.0 {
        b.translate(Vec2::new(correction.x * inv_b, -correction.y * inv_b));
    }
}
