//! Physics System - per-step dynamics of the rigid body pool
//!
//! One step runs in three phases:
//! - integrate: friction, gravity, acceleration and velocity for every
//!   movable body
//! - collision: narrow-phase contact for every ordered body pair
//! - resolve: impulse response and partial position correction
//!
//! Coordinates: positions are screen space (Y down); velocities, gravity
//! and contact normals are world oriented (Y up).

mod collision;
mod integrate;
mod resolve;
mod types;

pub use collision::generate_contact;
pub use integrate::{decay_toward_zero, integrate_body};
pub use resolve::{correct_positions, resolve_contact, Resolution};
pub use types::{Contact, PairFault};
