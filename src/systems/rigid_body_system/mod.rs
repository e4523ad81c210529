//! RigidBodySystem - the body pool
//!
//! A generational arena capped at `MAX_PHYSIC_BODIES`. It is the only place
//! bodies are created or destroyed; the step systems only touch numeric
//! fields of bodies that already exist.
//!
//! Bodies keep a dense `id` equal to their position in creation order.
//! Destroying a body renumbers everything after it, while `BodyHandle`s
//! stay valid (or are rejected as stale) regardless.

mod forces;
mod system;

pub use system::{BodyHandle, RigidBodySystem};
