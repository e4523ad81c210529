//! Physac Engine - 2D rigid body physics in WASM
//!
//! A fixed-timestep simulator for a bounded pool of rectangles and circles:
//! integration, narrow-phase contacts and impulse resolution.
//!
//! Architecture:
//! - core/          - Constants and errors
//! - domain/        - Settings
//! - systems/       - Body model, pool, geometry and solver
//! - simulation/    - World orchestration, background loop, JS facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

pub use systems::geometry;
pub use systems::physics;
pub use systems::rigid_body;
pub use systems::rigid_body_system;

use wasm_bindgen::prelude::*;

// Thread pool initialization for the parallel integrator in the browser
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Physac WASM engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{PhysicsError, PhysicsResult, MAX_PHYSIC_BODIES};
pub use domain::PhysicsSettings;
pub use rigid_body::{
    transform_to_rectangle, Collider, ColliderShape, Mass, PhysicBody, Rectangle, Rigidbody,
    Transform, Vec2,
};
pub use rigid_body_system::BodyHandle;
pub use simulation::{BodySnapshot, PerfStats, Physics, PhysicsWorld, SimulationState, StepReport};
#[cfg(not(target_arch = "wasm32"))]
pub use simulation::PhysicsThread;
