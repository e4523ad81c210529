use tracing::debug;

use crate::domain::PhysicsSettings;
use crate::rigid_body_system::RigidBodySystem;

use super::perf_stats::PerfStats;
use super::{PhysicsWorld, SimulationState};

pub(super) fn create_world(settings: PhysicsSettings) -> PhysicsWorld {
    debug!(
        gravity_x = settings.gravity.x,
        gravity_y = settings.gravity.y,
        max_bodies = settings.max_bodies,
        "physics world initialized"
    );

    PhysicsWorld {
        bodies: RigidBodySystem::with_capacity(settings.max_bodies),
        settings,
        state: SimulationState::Running,
        steps_count: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}

pub(super) fn close(world: &mut PhysicsWorld) {
    let freed = world.bodies.body_count();
    world.bodies.clear();
    world.state = SimulationState::Stopped;
    debug!(freed, steps = world.steps_count, "physics world closed");
}

pub(super) fn reset(world: &mut PhysicsWorld) {
    let freed = world.bodies.body_count();
    world.bodies.clear();
    world.steps_count = 0;
    world.perf_stats.reset();
    debug!(freed, "physics world reset");
}
