//! Core - constants and the error type shared by every system

pub mod constants;
pub mod error;

pub use constants::*;
pub use error::{PhysicsError, PhysicsResult};
