use serde::Serialize;
use tracing::warn;

use crate::core::{PhysicsError, PhysicsResult};
use crate::physics::{generate_contact, integrate_body, resolve_contact, PairFault, Resolution};
use crate::rigid_body::Vec2;
use crate::rigid_body_system::RigidBodySystem;

use super::{PerfTimer, PhysicsWorld, SimulationState};

/// What happened during one tick
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StepReport {
    pub dt: f32,
    pub bodies: usize,
    pub pairs_tested: u32,
    pub contacts: u32,
    pub resolved: u32,
    /// Pairs skipped because a collider was degenerate
    pub faults: Vec<PairFault>,
}

pub(super) fn step(world: &mut PhysicsWorld, dt: f32) -> PhysicsResult<StepReport> {
    if world.state != SimulationState::Running {
        return Err(PhysicsError::NotRunning);
    }
    if !(dt.is_finite() && dt >= 0.0) {
        return Err(PhysicsError::InvalidTimestep(dt));
    }

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let mut report = StepReport {
        dt,
        bodies: world.bodies.body_count(),
        ..StepReport::default()
    };
    let settings = &world.settings;

    if perf_on {
        let t0 = PerfTimer::start();
        integrate_all(&mut world.bodies, settings.gravity, dt, settings.accuracy);
        world.perf_stats.integrate_ms = t0.elapsed_ms();
    } else {
        integrate_all(&mut world.bodies, settings.gravity, dt, settings.accuracy);
    }

    if perf_on {
        let t0 = PerfTimer::start();
        resolve_pairs(&mut world.bodies, settings.error_percent, &mut report);
        world.perf_stats.collide_ms = t0.elapsed_ms();
    } else {
        resolve_pairs(&mut world.bodies, settings.error_percent, &mut report);
    }

    world.steps_count += 1;

    if let Some(t0) = step_start {
        let stats = &mut world.perf_stats;
        stats.step_ms = t0.elapsed_ms();
        stats.bodies = report.bodies as u32;
        stats.pairs_tested = report.pairs_tested;
        stats.contacts = report.contacts;
        stats.resolved = report.resolved;
        stats.faults = report.faults.len() as u32;
    }

    Ok(report)
}

/// Clear grounding and integrate every body
fn integrate_all(bodies: &mut RigidBodySystem, gravity: Vec2, dt: f32, accuracy: f32) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        bodies.par_bodies_mut().for_each(|body| {
            body.rigidbody.is_grounded = false;
            integrate_body(body, gravity, dt, accuracy);
        });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for body in bodies.bodies_mut() {
            body.rigidbody.is_grounded = false;
            integrate_body(body, gravity, dt, accuracy);
        }
    }
}

/// Ordered pairs (i, k), i != k, in pool order
fn resolve_pairs(bodies: &mut RigidBodySystem, error_percent: f32, report: &mut StepReport) {
    let order = bodies.order().to_vec();

    for (i, &slot_a) in order.iter().enumerate() {
        for (k, &slot_b) in order.iter().enumerate() {
            if i == k {
                continue;
            }
            let Some((a, b)) = bodies.pair_mut(slot_a, slot_b) else {
                continue;
            };
            if !(a.enabled && b.enabled && a.collider.enabled && b.collider.enabled) {
                continue;
            }
            if !a.rigidbody.enabled && !b.rigidbody.enabled {
                continue;
            }

            report.pairs_tested += 1;
            match generate_contact(a, b) {
                Ok(Some(contact)) => {
                    report.contacts += 1;
                    a.rigidbody.is_grounded = contact.normal.y < 0.0;
                    if resolve_contact(a, b, &contact, error_percent) == Resolution::Resolved {
                        report.resolved += 1;
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    let (Some(first), Some(second)) = (bodies.handle_at(i), bodies.handle_at(k)) else {
                        continue;
                    };
                    warn!(%first, %second, error = %err, "skipping degenerate body pair");
                    report.faults.push(PairFault {
                        first,
                        second,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
}
