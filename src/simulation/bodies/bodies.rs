use tracing::{debug, warn};

use crate::core::{PhysicsError, PhysicsResult};
use crate::rigid_body::{ColliderShape, Mass, PhysicBody, Vec2};
use crate::rigid_body_system::BodyHandle;

use super::PhysicsWorld;

fn ensure_running(world: &PhysicsWorld) -> PhysicsResult<()> {
    if world.is_running() {
        Ok(())
    } else {
        Err(PhysicsError::NotRunning)
    }
}

fn insert(world: &mut PhysicsWorld, body: PhysicBody) -> PhysicsResult<BodyHandle> {
    ensure_running(world)?;
    match world.bodies.add_body(body) {
        Ok(handle) => {
            debug!(%handle, count = world.bodies.body_count(), "body created");
            Ok(handle)
        }
        Err(err) => {
            warn!(capacity = world.bodies.capacity(), "body pool exhausted");
            Err(err)
        }
    }
}

pub(super) fn create_body(
    world: &mut PhysicsWorld,
    position: Vec2,
    rotation: f32,
    scale: Vec2,
) -> PhysicsResult<BodyHandle> {
    let id = world.bodies.body_count() as u32;
    insert(world, PhysicBody::new(id, position, rotation, scale))
}

pub(super) fn create_rectangle(
    world: &mut PhysicsWorld,
    center: Vec2,
    size: Vec2,
    mass: f32,
) -> PhysicsResult<BodyHandle> {
    if !(size.is_finite() && size.x > 0.0 && size.y > 0.0) {
        return Err(PhysicsError::degenerate("rectangle extent must be > 0"));
    }
    let mass = Mass::new(mass)?;

    let mut body = PhysicBody::new(0, center, 0.0, size);
    make_dynamic(&mut body, mass);
    insert(world, body)
}

pub(super) fn create_circle(
    world: &mut PhysicsWorld,
    center: Vec2,
    radius: f32,
    mass: f32,
) -> PhysicsResult<BodyHandle> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(PhysicsError::degenerate("circle radius must be > 0"));
    }
    let mass = Mass::new(mass)?;

    let mut body = PhysicBody::new(0, center, 0.0, Vec2::zero());
    body.collider.shape = ColliderShape::Circle { radius };
    body.refresh_bounds();
    make_dynamic(&mut body, mass);
    insert(world, body)
}

fn make_dynamic(body: &mut PhysicBody, mass: Mass) {
    body.rigidbody.enabled = true;
    body.rigidbody.apply_gravity = true;
    body.rigidbody.mass = mass;
}

pub(super) fn destroy_body(world: &mut PhysicsWorld, handle: BodyHandle) -> PhysicsResult<()> {
    let body = world.bodies.remove_body(handle)?;
    debug!(%handle, id = body.id, count = world.bodies.body_count(), "body destroyed");
    Ok(())
}

/// Run `edit` on one body
pub(super) fn with_body(
    world: &mut PhysicsWorld,
    handle: BodyHandle,
    edit: impl FnOnce(&mut PhysicBody),
) -> PhysicsResult<()> {
    edit(world.bodies.get_mut(handle)?);
    Ok(())
}

pub(super) fn set_mass(world: &mut PhysicsWorld, handle: BodyHandle, mass: f32) -> PhysicsResult<()> {
    let mass = Mass::new(mass)?;
    with_body(world, handle, |b| b.rigidbody.mass = mass)
}

pub(super) fn set_shape(
    world: &mut PhysicsWorld,
    handle: BodyHandle,
    shape: ColliderShape,
) -> PhysicsResult<()> {
    if let ColliderShape::Circle { radius } = shape {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::degenerate("circle radius must be > 0"));
        }
    }

    let body = world.bodies.get_mut(handle)?;
    let center = body.center();
    match (body.collider.shape, shape) {
        (ColliderShape::Rectangle, ColliderShape::Circle { .. }) => {
            body.transform.position = center;
            body.transform.scale = Vec2::zero();
        }
        // A circle becomes the square it is inscribed in
        (ColliderShape::Circle { radius }, ColliderShape::Rectangle) => {
            let side = Vec2::new(radius * 2.0, radius * 2.0);
            body.transform.scale = side;
            body.transform.position = center - side * 0.5;
        }
        _ => {}
    }
    body.collider.shape = shape;
    body.refresh_bounds();
    Ok(())
}

pub(super) fn set_position(world: &mut PhysicsWorld, handle: BodyHandle, center: Vec2) -> PhysicsResult<()> {
    with_body(world, handle, |b| {
        let offset = center - b.center();
        b.translate(offset);
    })
}
