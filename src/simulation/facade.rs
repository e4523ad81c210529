use wasm_bindgen::prelude::*;

use crate::domain::PhysicsSettings;
use crate::rigid_body::{ColliderShape, Vec2};
use crate::rigid_body_system::BodyHandle;

use super::perf_stats::PerfStats;
use super::PhysicsWorld;

/// JS-facing physics world. Bodies are addressed by packed `u64` handles.
#[wasm_bindgen]
pub struct Physics {
    core: PhysicsWorld,
}

#[wasm_bindgen]
impl Physics {
    /// Running world with the given gravity (world orientation, +Y up)
    #[wasm_bindgen(constructor)]
    pub fn new(gravity_x: f32, gravity_y: f32) -> Self {
        Self {
            core: PhysicsWorld::init(Vec2::new(gravity_x, gravity_y)),
        }
    }

    #[wasm_bindgen(js_name = fromSettingsJson)]
    pub fn from_settings_json(json: &str) -> Result<Physics, JsError> {
        let settings = PhysicsSettings::from_json(json)?;
        Ok(Self {
            core: PhysicsWorld::with_settings(settings)?,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool { self.core.is_running() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn steps_count(&self) -> u64 { self.core.steps_count() }

    pub fn close(&mut self) {
        self.core.close();
    }

    /// Destroy all bodies and keep running
    pub fn reset(&mut self) {
        self.core.reset();
    }

    pub fn set_gravity(&mut self, x: f32, y: f32) {
        self.core.set_gravity(Vec2::new(x, y));
    }

    pub fn set_fixed_timestep(&mut self, secs: f64) -> Result<(), JsError> {
        Ok(self.core.set_fixed_timestep(secs)?)
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    // === BODY API ===

    /// Static rectangle centered on (x, y)
    pub fn create_body(&mut self, x: f32, y: f32, rotation: f32, width: f32, height: f32) -> Result<u64, JsError> {
        let handle = self
            .core
            .create_body(Vec2::new(x, y), rotation, Vec2::new(width, height))?;
        Ok(handle.to_bits())
    }

    pub fn create_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32, mass: f32) -> Result<u64, JsError> {
        let handle = self
            .core
            .create_rectangle(Vec2::new(x, y), Vec2::new(width, height), mass)?;
        Ok(handle.to_bits())
    }

    pub fn create_circle(&mut self, x: f32, y: f32, radius: f32, mass: f32) -> Result<u64, JsError> {
        let handle = self.core.create_circle(Vec2::new(x, y), radius, mass)?;
        Ok(handle.to_bits())
    }

    pub fn destroy_body(&mut self, handle: u64) -> Result<(), JsError> {
        Ok(self.core.destroy_body(BodyHandle::from_bits(handle))?)
    }

    /// Handle of the body at dense index `id`, if any
    pub fn handle_at(&self, id: u32) -> Option<u64> {
        self.core.handle_at(id as usize).map(|h| h.to_bits())
    }

    pub fn apply_force(&mut self, handle: u64, fx: f32, fy: f32) -> Result<(), JsError> {
        Ok(self.core.apply_force(BodyHandle::from_bits(handle), Vec2::new(fx, fy))?)
    }

    /// Returns how many bodies were pushed
    pub fn apply_force_at_position(&mut self, x: f32, y: f32, force: f32, radius: f32) -> u32 {
        self.core.apply_force_at_position(Vec2::new(x, y), force, radius) as u32
    }

    pub fn set_rigidbody_enabled(&mut self, handle: u64, enabled: bool) -> Result<(), JsError> {
        Ok(self.core.set_rigidbody_enabled(BodyHandle::from_bits(handle), enabled)?)
    }

    pub fn set_collider_enabled(&mut self, handle: u64, enabled: bool) -> Result<(), JsError> {
        Ok(self.core.set_collider_enabled(BodyHandle::from_bits(handle), enabled)?)
    }

    pub fn set_body_enabled(&mut self, handle: u64, enabled: bool) -> Result<(), JsError> {
        Ok(self.core.set_body_enabled(BodyHandle::from_bits(handle), enabled)?)
    }

    pub fn set_velocity(&mut self, handle: u64, vx: f32, vy: f32) -> Result<(), JsError> {
        Ok(self.core.set_velocity(BodyHandle::from_bits(handle), Vec2::new(vx, vy))?)
    }

    pub fn set_acceleration(&mut self, handle: u64, ax: f32, ay: f32) -> Result<(), JsError> {
        Ok(self.core.set_acceleration(BodyHandle::from_bits(handle), Vec2::new(ax, ay))?)
    }

    pub fn set_mass(&mut self, handle: u64, mass: f32) -> Result<(), JsError> {
        Ok(self.core.set_mass(BodyHandle::from_bits(handle), mass)?)
    }

    pub fn set_friction(&mut self, handle: u64, friction: f32) -> Result<(), JsError> {
        Ok(self.core.set_friction(BodyHandle::from_bits(handle), friction)?)
    }

    pub fn set_bounciness(&mut self, handle: u64, bounciness: f32) -> Result<(), JsError> {
        Ok(self.core.set_bounciness(BodyHandle::from_bits(handle), bounciness)?)
    }

    pub fn set_apply_gravity(&mut self, handle: u64, apply_gravity: bool) -> Result<(), JsError> {
        Ok(self.core.set_apply_gravity(BodyHandle::from_bits(handle), apply_gravity)?)
    }

    /// Turn the body into a circle of `radius`, keeping its center
    pub fn set_circle_shape(&mut self, handle: u64, radius: f32) -> Result<(), JsError> {
        Ok(self
            .core
            .set_shape(BodyHandle::from_bits(handle), ColliderShape::Circle { radius })?)
    }

    /// Turn the body into a rectangle, keeping its center
    pub fn set_rectangle_shape(&mut self, handle: u64) -> Result<(), JsError> {
        Ok(self.core.set_shape(BodyHandle::from_bits(handle), ColliderShape::Rectangle)?)
    }

    pub fn set_position(&mut self, handle: u64, x: f32, y: f32) -> Result<(), JsError> {
        Ok(self.core.set_position(BodyHandle::from_bits(handle), Vec2::new(x, y))?)
    }

    /// Center of the body as `[x, y]` in screen space
    pub fn body_center(&self, handle: u64) -> Result<Vec<f32>, JsError> {
        let center = self.core.body(BodyHandle::from_bits(handle))?.center();
        Ok(vec![center.x, center.y])
    }

    /// Velocity as `[x, y]` in world orientation
    pub fn body_velocity(&self, handle: u64) -> Result<Vec<f32>, JsError> {
        let velocity = self.core.rigidbody(BodyHandle::from_bits(handle))?.velocity;
        Ok(vec![velocity.x, velocity.y])
    }

    pub fn is_grounded(&self, handle: u64) -> Result<bool, JsError> {
        Ok(self.core.rigidbody(BodyHandle::from_bits(handle))?.is_grounded)
    }

    /// Advance one normalized tick; returns the number of resolved contacts.
    ///
    /// With the `parallel` feature the integrator runs on the rayon pool, so
    /// `initThreadPool` must have resolved before the first step.
    pub fn step(&mut self, dt: f32) -> Result<u32, JsError> {
        Ok(self.core.step(dt)?.resolved)
    }

    /// Every body as JSON, in pool order
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(self.core.snapshot_json()?)
    }
}
