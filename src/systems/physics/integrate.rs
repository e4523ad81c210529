use crate::rigid_body::{PhysicBody, Vec2};

/// Move `value` toward zero by `amount` without crossing it; inside the
/// `accuracy` dead zone it snaps to zero.
#[inline(always)]
pub fn decay_toward_zero(value: f32, amount: f32, accuracy: f32) -> f32 {
    if value > accuracy {
        (value - amount).max(0.0)
    } else if value < -accuracy {
        (value + amount).min(0.0)
    } else {
        0.0
    }
}

/// Advance one body by a normalized `dt`.
///
/// Immovable bodies are left untouched apart from a bounds refresh.
pub fn integrate_body(body: &mut PhysicBody, gravity: Vec2, dt: f32, accuracy: f32) {
    if body.is_movable() {
        let rb = &mut body.rigidbody;
        let friction = rb.friction * dt;

        rb.acceleration.x = decay_toward_zero(rb.acceleration.x, friction, accuracy);
        rb.acceleration.y = decay_toward_zero(rb.acceleration.y, friction, accuracy);
        rb.velocity.x = decay_toward_zero(rb.velocity.x, friction, accuracy);
        rb.velocity.y = decay_toward_zero(rb.velocity.y, friction, accuracy);

        if rb.apply_gravity {
            rb.velocity += gravity * dt;
        }
        rb.velocity += rb.acceleration * dt;

        // Screen space: world +Y is screen -Y
        body.transform.position.x += rb.velocity.x * dt;
        body.transform.position.y -= rb.velocity.y * dt;
    }

    body.refresh_bounds();
}
