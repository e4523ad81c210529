//! Engine-wide tuning constants.
//!
//! Runtime-tunable copies of these live in `PhysicsSettings`; the constants
//! are the defaults and the hard limits.

/// Hard cap on concurrently live bodies.
pub const MAX_PHYSIC_BODIES: usize = 256;

/// Duration of one normalized step (dt = 1.0), in seconds.
pub const PHYSICS_TIMESTEP: f64 = 1.0 / 60.0;

/// Dead zone used by friction decay: components smaller than this snap to zero.
pub const PHYSICS_ACCURACY: f32 = 0.0001;

/// Fraction of penetration removed per contact by positional correction.
pub const PHYSICS_ERRORPERCENT: f32 = 0.2;

/// Default world gravity (world orientation, +Y is up).
pub const DEFAULT_GRAVITY_X: f32 = 0.0;
pub const DEFAULT_GRAVITY_Y: f32 = -9.81 / 60.0;
