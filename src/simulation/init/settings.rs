use crate::core::{PhysicsError, PhysicsResult};
use crate::rigid_body::Vec2;

use super::perf_stats::PerfStats;
use super::PhysicsWorld;

pub(super) fn enable_perf_metrics(world: &mut PhysicsWorld, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn perf_stats(world: &PhysicsWorld) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_gravity(world: &mut PhysicsWorld, gravity: Vec2) {
    world.settings.gravity = gravity;
}

pub(super) fn set_fixed_timestep(world: &mut PhysicsWorld, secs: f64) -> PhysicsResult<()> {
    if !(secs.is_finite() && secs > 0.0) {
        return Err(PhysicsError::InvalidSettings(format!(
            "fixed_timestep_secs must be > 0, got {secs}"
        )));
    }
    world.settings.fixed_timestep_secs = secs;
    Ok(())
}
