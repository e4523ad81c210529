use serde::{Deserialize, Serialize};

use crate::core::{
    PhysicsError, PhysicsResult, DEFAULT_GRAVITY_X, DEFAULT_GRAVITY_Y, MAX_PHYSIC_BODIES,
    PHYSICS_ACCURACY, PHYSICS_ERRORPERCENT, PHYSICS_TIMESTEP,
};
use crate::rigid_body::Vec2;

/// Tunables for a `PhysicsWorld`. Missing JSON fields fall back to defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// World orientation (+Y up), added to velocity every normalized step
    pub gravity: Vec2,
    /// Pool capacity, at most `MAX_PHYSIC_BODIES`
    pub max_bodies: usize,
    /// Wall-clock length of one normalized step, used by the background loop
    pub fixed_timestep_secs: f64,
    /// Friction dead zone
    pub accuracy: f32,
    /// Share of penetration corrected per contact
    pub error_percent: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(DEFAULT_GRAVITY_X, DEFAULT_GRAVITY_Y),
            max_bodies: MAX_PHYSIC_BODIES,
            fixed_timestep_secs: PHYSICS_TIMESTEP,
            accuracy: PHYSICS_ACCURACY,
            error_percent: PHYSICS_ERRORPERCENT,
        }
    }
}

impl PhysicsSettings {
    pub fn from_json(json: &str) -> PhysicsResult<Self> {
        let settings: PhysicsSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> PhysicsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn validate(&self) -> PhysicsResult<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidSettings("gravity must be finite".into()));
        }
        if self.max_bodies == 0 || self.max_bodies > MAX_PHYSIC_BODIES {
            return Err(PhysicsError::InvalidSettings(format!(
                "max_bodies must be in 1..={}, got {}",
                MAX_PHYSIC_BODIES, self.max_bodies
            )));
        }
        if !(self.fixed_timestep_secs.is_finite() && self.fixed_timestep_secs > 0.0) {
            return Err(PhysicsError::InvalidSettings(format!(
                "fixed_timestep_secs must be > 0, got {}",
                self.fixed_timestep_secs
            )));
        }
        if !(self.accuracy.is_finite() && self.accuracy >= 0.0) {
            return Err(PhysicsError::InvalidSettings("accuracy must be >= 0".into()));
        }
        if !(self.error_percent.is_finite() && (0.0..=1.0).contains(&self.error_percent)) {
            return Err(PhysicsError::InvalidSettings(
                "error_percent must be within 0..=1".into(),
            ));
        }
        Ok(())
    }
}
