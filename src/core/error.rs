//! Physics error types using `thiserror`.
//!
//! Every failure the engine can hit is recoverable: it is handed back to the
//! caller instead of corrupting the body pool.

use thiserror::Error;

use crate::systems::rigid_body_system::BodyHandle;

/// Result alias used across the crate
pub type PhysicsResult<T> = Result<T, PhysicsError>;

#[derive(Error, Debug)]
pub enum PhysicsError {
    /// Creating a body while the pool is full
    #[error("body pool exhausted: capacity is {capacity} bodies")]
    PoolExhausted {
        /// Configured pool capacity
        capacity: usize,
    },

    /// Handle refers to a destroyed (or never issued) slot
    #[error("stale body handle {0}")]
    StaleHandle(BodyHandle),

    /// Mass must be finite and strictly positive
    #[error("degenerate mass {0}: mass must be finite and > 0")]
    DegenerateMass(f32),

    /// Collider cannot produce a meaningful contact
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// What was wrong with the shape
        reason: &'static str,
    },

    /// Operation requires a running world
    #[error("physics world is not running")]
    NotRunning,

    /// Step delta must be finite and non-negative
    #[error("invalid timestep {0}")]
    InvalidTimestep(f32),

    /// Settings parsed but failed validation
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings JSON could not be parsed
    #[error("failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// The background loop could not be started
    #[error("failed to spawn physics thread: {0}")]
    Thread(#[from] std::io::Error),
}

impl PhysicsError {
    pub(crate) fn degenerate(reason: &'static str) -> Self {
        PhysicsError::DegenerateGeometry { reason }
    }
}
