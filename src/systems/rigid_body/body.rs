use serde::{Deserialize, Serialize};

use crate::core::{PhysicsError, PhysicsResult};

use super::vec2::{Rectangle, Vec2};

/// Position, rotation and extent of a body.
///
/// Rectangle bodies keep their top-left corner in `position`; circle bodies
/// keep their center there and leave `scale` at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    /// Radians. Carried for rendering, ignored by collision.
    pub rotation: f32,
    pub scale: Vec2,
}

/// Rectangle covered by a transform
pub fn transform_to_rectangle(transform: &Transform) -> Rectangle {
    Rectangle::new(
        transform.position.x,
        transform.position.y,
        transform.scale.x,
        transform.scale.y,
    )
}

/// Body mass, always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Mass(f32);

impl Mass {
    pub const UNIT: Mass = Mass(1.0);

    pub fn new(value: f32) -> PhysicsResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Mass(value))
        } else {
            Err(PhysicsError::DegenerateMass(value))
        }
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn inverse(self) -> f32 {
        1.0 / self.0
    }
}

impl Default for Mass {
    fn default() -> Self {
        Mass::UNIT
    }
}

impl TryFrom<f32> for Mass {
    type Error = PhysicsError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Mass::new(value)
    }
}

impl From<Mass> for f32 {
    fn from(mass: Mass) -> f32 {
        mass.0
    }
}

/// Dynamics state of a body
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rigidbody {
    /// Disabled rigidbodies are immovable obstacles: they still collide
    /// but never integrate or receive impulses.
    pub enabled: bool,
    pub mass: Mass,
    pub acceleration: Vec2,
    /// World orientation: positive `y` moves the body up the screen.
    pub velocity: Vec2,
    pub apply_gravity: bool,
    pub is_grounded: bool,
    /// Magnitude removed from velocity/acceleration components per step
    pub friction: f32,
    /// Restitution (0 = inelastic, 1 = elastic). Not clamped.
    pub bounciness: f32,
}

impl Default for Rigidbody {
    fn default() -> Self {
        Self {
            enabled: false,
            mass: Mass::UNIT,
            acceleration: Vec2::zero(),
            velocity: Vec2::zero(),
            apply_gravity: false,
            is_grounded: false,
            friction: 0.0,
            bounciness: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColliderShape {
    /// Extent comes from the transform scale
    Rectangle,
    Circle { radius: f32 },
}

/// Collision shape of a body
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub enabled: bool,
    pub shape: ColliderShape,
    /// Axis-aligned bounds, recomputed from the transform every step
    pub bounds: Rectangle,
}

impl Collider {
    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            ColliderShape::Circle { radius } => Some(radius),
            ColliderShape::Rectangle => None,
        }
    }
}

/// A simulated body: transform + rigidbody + collider
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicBody {
    /// Current dense index in the pool. Renumbered when an earlier body is
    /// destroyed, so it is not a stable identity; use a `BodyHandle`.
    pub id: u32,
    pub enabled: bool,
    pub transform: Transform,
    pub rigidbody: Rigidbody,
    pub collider: Collider,
}

impl PhysicBody {
    /// Build a body centered on `position`.
    pub fn new(id: u32, position: Vec2, rotation: f32, scale: Vec2) -> Self {
        let transform = Transform {
            position: position - scale * 0.5,
            rotation,
            scale,
        };
        let mut body = Self {
            id,
            enabled: true,
            transform,
            rigidbody: Rigidbody::default(),
            collider: Collider {
                enabled: true,
                shape: ColliderShape::Rectangle,
                bounds: Rectangle::default(),
            },
        };
        body.refresh_bounds();
        body
    }

    /// Center of the collider in screen space
    pub fn center(&self) -> Vec2 {
        match self.collider.shape {
            ColliderShape::Rectangle => self.transform.position + self.transform.scale * 0.5,
            ColliderShape::Circle { .. } => self.transform.position,
        }
    }

    /// Recompute `collider.bounds` from the transform
    pub fn refresh_bounds(&mut self) {
        self.collider.bounds = match self.collider.shape {
            ColliderShape::Rectangle => transform_to_rectangle(&self.transform),
            ColliderShape::Circle { radius } => {
                let p = self.transform.position;
                Rectangle::new(p.x - radius, p.y - radius, radius * 2.0, radius * 2.0)
            }
        };
    }

    /// Integrates and receives impulses
    #[inline]
    pub fn is_movable(&self) -> bool {
        self.enabled && self.rigidbody.enabled
    }

    /// Inverse mass seen by the solver; immovable bodies weigh infinitely much.
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        if self.is_movable() {
            self.rigidbody.mass.inverse()
        } else {
            0.0
        }
    }

    /// Instantaneous velocity change of `force / mass`.
    /// No effect while the rigidbody is disabled.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.rigidbody.enabled {
            self.rigidbody.velocity += force * self.rigidbody.mass.inverse();
        }
    }

    /// Move by a screen-space offset and keep bounds in sync
    pub fn translate(&mut self, offset: Vec2) {
        self.transform.position += offset;
        self.refresh_bounds();
    }
}
