//! RigidBody - data model of a simulated body
//!
//! A body is a transform plus a rigidbody (dynamics) and a collider (shape).
//! Positions live in screen space (Y grows downward) while velocities,
//! gravity and contact normals use world orientation (Y grows upward).

mod vec2;
mod body;

pub use vec2::{Rectangle, Vec2};
pub use body::{
    transform_to_rectangle, Collider, ColliderShape, Mass, PhysicBody, Rigidbody, Transform,
};
