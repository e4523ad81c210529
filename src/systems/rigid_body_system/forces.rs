use crate::core::PhysicsResult;
use crate::rigid_body::Vec2;

use super::system::{BodyHandle, RigidBodySystem};

impl RigidBodySystem {
    /// Instantaneous velocity change of `force / mass` on one body.
    /// Bodies with a disabled rigidbody ignore it.
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2) -> PhysicsResult<()> {
        self.get_mut(handle)?.apply_force(force);
        Ok(())
    }

    /// Radial push away from `position`.
    ///
    /// Every enabled body with an enabled rigidbody whose center lies within
    /// `radius` receives `force` along the direction from `position` to its
    /// center (Y flipped into world orientation). A body sitting exactly on
    /// `position` has no direction and is left alone.
    ///
    /// Returns how many bodies were pushed.
    pub fn apply_force_at_position(&mut self, position: Vec2, force: f32, radius: f32) -> usize {
        let mut pushed = 0;
        for body in self.bodies_mut() {
            if !body.is_movable() {
                continue;
            }

            let center = body.center();
            if position.distance(center) > radius {
                continue;
            }

            let direction = (center - position).normalize().flip_y();
            if direction == Vec2::ZERO {
                continue;
            }

            body.apply_force(direction * force);
            pushed += 1;
        }
        pushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rigid_body::{ColliderShape, PhysicBody};

    fn dynamic_body(center: Vec2, scale: Vec2) -> PhysicBody {
        let mut body = PhysicBody::new(0, center, 0.0, scale);
        body.rigidbody.enabled = true;
        body
    }

    #[test]
    fn push_points_away_in_world_orientation() {
        let mut pool = RigidBodySystem::new();
        // Rectangle centered 3px below the blast (screen space)
        let h = pool.add_body(dynamic_body(Vec2::new(0.0, 3.0), Vec2::new(2.0, 2.0))).unwrap();

        let pushed = pool.apply_force_at_position(Vec2::zero(), 5.0, 10.0);

        assert_eq!(pushed, 1);
        let v = pool.get(h).unwrap().rigidbody.velocity;
        assert!((v.x).abs() < 1e-6);
        assert!((v.y + 5.0).abs() < 1e-6);
    }

    #[test]
    fn zero_radius_pushes_nothing_even_at_center() {
        let mut pool = RigidBodySystem::new();
        let mut circle = dynamic_body(Vec2::new(4.0, 4.0), Vec2::zero());
        circle.collider.shape = ColliderShape::Circle { radius: 1.0 };
        let h = pool.add_body(circle).unwrap();
        pool.add_body(dynamic_body(Vec2::new(6.0, 4.0), Vec2::new(1.0, 1.0))).unwrap();

        let pushed = pool.apply_force_at_position(Vec2::new(4.0, 4.0), 100.0, 0.0);

        assert_eq!(pushed, 0);
        assert_eq!(pool.get(h).unwrap().rigidbody.velocity, Vec2::zero());
    }

    #[test]
    fn out_of_range_and_static_bodies_are_skipped() {
        let mut pool = RigidBodySystem::new();
        let far = pool.add_body(dynamic_body(Vec2::new(50.0, 0.0), Vec2::new(1.0, 1.0))).unwrap();
        let fixed = pool.add_body(PhysicBody::new(0, Vec2::new(1.0, 0.0), 0.0, Vec2::new(1.0, 1.0))).unwrap();

        assert_eq!(pool.apply_force_at_position(Vec2::zero(), 1.0, 5.0), 0);
        assert_eq!(pool.get(far).unwrap().rigidbody.velocity, Vec2::zero());
        assert_eq!(pool.get(fixed).unwrap().rigidbody.velocity, Vec2::zero());
    }

    #[test]
    fn apply_force_divides_by_mass_and_rejects_stale_handles() {
        let mut pool = RigidBodySystem::new();
        let mut body = dynamic_body(Vec2::zero(), Vec2::new(1.0, 1.0));
        body.rigidbody.mass = crate::rigid_body::Mass::new(4.0).unwrap();
        let h = pool.add_body(body).unwrap();

        pool.apply_force(h, Vec2::new(8.0, -4.0)).unwrap();
        assert_eq!(pool.get(h).unwrap().rigidbody.velocity, Vec2::new(2.0, -1.0));

        pool.remove_body(h).unwrap();
        assert!(pool.apply_force(h, Vec2::new(1.0, 0.0)).is_err());
    }
}
