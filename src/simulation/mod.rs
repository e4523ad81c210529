//! PhysicsWorld - fixed-timestep rigid body simulation
//!
//! Owns the body pool and the settings, and only orchestrates: integration,
//! contacts and impulses live in `systems::physics`.
//!
//! One tick integrates every body first, then walks ordered pairs in pool
//! order. Integration may run on the rayon pool (`parallel` feature); pair
//! resolution is always sequential.

use serde::Serialize;

use crate::core::PhysicsResult;
use crate::domain::PhysicsSettings;
use crate::rigid_body::{Collider, ColliderShape, PhysicBody, Rigidbody, Vec2};
use crate::rigid_body_system::{BodyHandle, RigidBodySystem};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "bodies/bodies.rs"]
mod bodies;
#[path = "step/step.rs"]
mod step;
#[cfg(not(target_arch = "wasm32"))]
#[path = "runner/runner.rs"]
mod runner;
mod facade;

pub use facade::Physics;
pub use perf_stats::PerfStats;
#[cfg(not(target_arch = "wasm32"))]
pub use runner::PhysicsThread;
pub use step::StepReport;

use perf_timer::PerfTimer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationState {
    Stopped,
    Running,
}

/// Copy of one body, detached from the world
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub handle: BodyHandle,
    pub body: PhysicBody,
}

/// The simulation world
pub struct PhysicsWorld {
    bodies: RigidBodySystem,
    settings: PhysicsSettings,
    state: SimulationState,
    steps_count: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl PhysicsWorld {
    /// Running world with default settings and the given gravity
    pub fn init(gravity: Vec2) -> Self {
        init::create_world(PhysicsSettings::default().with_gravity(gravity))
    }

    /// Running world from validated settings
    pub fn with_settings(settings: PhysicsSettings) -> PhysicsResult<Self> {
        settings.validate()?;
        Ok(init::create_world(settings))
    }

    /// Free every body and stop. Further steps fail with `NotRunning`.
    pub fn close(&mut self) {
        init::close(self);
    }

    /// Destroy every body but keep running
    pub fn reset(&mut self) {
        init::reset(self);
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    pub fn steps_count(&self) -> u64 {
        self.steps_count
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        settings::set_gravity(self, gravity);
    }

    pub fn gravity(&self) -> Vec2 {
        self.settings.gravity
    }

    /// Seconds of wall time that count as one normalized step
    pub fn set_fixed_timestep(&mut self, secs: f64) -> PhysicsResult<()> {
        settings::set_fixed_timestep(self, secs)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::perf_stats(self)
    }

    // === BODY API ===

    /// Static rectangle centered on `position`
    pub fn create_body(&mut self, position: Vec2, rotation: f32, scale: Vec2) -> PhysicsResult<BodyHandle> {
        bodies::create_body(self, position, rotation, scale)
    }

    /// Dynamic rectangle with gravity
    pub fn create_rectangle(&mut self, center: Vec2, size: Vec2, mass: f32) -> PhysicsResult<BodyHandle> {
        bodies::create_rectangle(self, center, size, mass)
    }

    /// Dynamic circle with gravity
    pub fn create_circle(&mut self, center: Vec2, radius: f32, mass: f32) -> PhysicsResult<BodyHandle> {
        bodies::create_circle(self, center, radius, mass)
    }

    pub fn destroy_body(&mut self, handle: BodyHandle) -> PhysicsResult<()> {
        bodies::destroy_body(self, handle)
    }

    /// `velocity += force / mass` when the rigidbody is enabled
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec2) -> PhysicsResult<()> {
        self.bodies.apply_force(handle, force)
    }

    /// Radial push away from `position`; returns how many bodies were pushed
    pub fn apply_force_at_position(&mut self, position: Vec2, force: f32, radius: f32) -> usize {
        self.bodies.apply_force_at_position(position, force, radius)
    }

    pub fn body(&self, handle: BodyHandle) -> PhysicsResult<&PhysicBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> PhysicsResult<&mut PhysicBody> {
        self.bodies.get_mut(handle)
    }

    /// Body at dense index `id` (pool order)
    pub fn body_at(&self, id: usize) -> Option<&PhysicBody> {
        self.bodies.body_at(id)
    }

    pub fn handle_at(&self, id: usize) -> Option<BodyHandle> {
        self.bodies.handle_at(id)
    }

    pub fn collider(&self, handle: BodyHandle) -> PhysicsResult<Collider> {
        Ok(self.bodies.get(handle)?.collider)
    }

    pub fn rigidbody(&self, handle: BodyHandle) -> PhysicsResult<Rigidbody> {
        Ok(self.bodies.get(handle)?.rigidbody)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.body_count()
    }

    /// Handles in pool order
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.bodies.handles().collect()
    }

    pub fn set_rigidbody_enabled(&mut self, handle: BodyHandle, enabled: bool) -> PhysicsResult<()> {
        bodies::with_body(self, handle, |b| b.rigidbody.enabled = enabled)
    }

    pub fn set_collider_enabled(&mut self, handle: BodyHandle, enabled: bool) -> PhysicsResult<()> {
        bodies::with_body(self, handle, |b| b.collider.enabled = enabled)
    }

    pub fn set_body_enabled(&mut self, handle: BodyHandle, enabled: bool) -> PhysicsResult<()> {
        bodies::with_body(self, handle, |b| b.enabled = enabled)
    }

    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) -> PhysicsResult<()> {
        bodies::with_body(self, handle, |b| b.rigidbody.velocity = velocity)
    }

    pub fn set_acceleration(&mut self, handle: BodyHandle, acceleration: Vec2) -> PhysicsResult<()> {
        bodies::with_body(self, handle, |b| b.rigidbody.acceleration = acceleration)
    }

    pub fn set_mass(&mut self, handle: BodyHandle, mass: f32) -> PhysicsResult<()> {
        bodies::set_mass(self, handle, mass)
    }

    pub fn set_friction(&mut self, handle: BodyHandle, friction: f32) -> PhysicsResult<()> {
        bodies::with_body(self, handle, |b| b.rigidbody.friction = friction)
    }

    pub fn set_bounciness(&mut self, handle: BodyHandle, bounciness: f32) -> PhysicsResult<()> {
        bodies::with_body(self, handle, |b| b.rigidbody.bounciness = bounciness)
    }

    pub fn set_apply_gravity(&mut self, handle: BodyHandle, apply_gravity: bool) -> PhysicsResult<()> {
        bodies::with_body(self, handle, |b| b.rigidbody.apply_gravity = apply_gravity)
    }

    /// Swap the collider shape, keeping the body's center in place
    pub fn set_shape(&mut self, handle: BodyHandle, shape: ColliderShape) -> PhysicsResult<()> {
        bodies::set_shape(self, handle, shape)
    }

    /// Move the body so its center lands on `center`
    pub fn set_position(&mut self, handle: BodyHandle, center: Vec2) -> PhysicsResult<()> {
        bodies::set_position(self, handle, center)
    }

    /// Advance one tick. `dt` is normalized: 1.0 is one fixed timestep.
    pub fn step(&mut self, dt: f32) -> PhysicsResult<StepReport> {
        step::step(self, dt)
    }

    /// Every body in pool order
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.bodies
            .handles()
            .zip(self.bodies.iter())
            .map(|(handle, body)| BodySnapshot { handle, body: body.clone() })
            .collect()
    }

    pub fn snapshot_json(&self) -> PhysicsResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
