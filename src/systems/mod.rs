//! Systems - body model, pool and the per-step physics passes

pub mod geometry;
pub mod physics;
pub mod rigid_body;
pub mod rigid_body_system;
