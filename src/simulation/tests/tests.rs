use super::*;
use crate::core::PhysicsError;
use approx::assert_relative_eq;

fn zero_g() -> PhysicsWorld {
    PhysicsWorld::init(Vec2::zero())
}

fn elastic_circle(world: &mut PhysicsWorld, center: Vec2, velocity: Vec2) -> BodyHandle {
    let h = world.create_circle(center, 10.0, 1.0).unwrap();
    world.set_apply_gravity(h, false).unwrap();
    world.set_bounciness(h, 1.0).unwrap();
    world.set_velocity(h, velocity).unwrap();
    h
}

#[test]
fn init_runs_and_close_stops() {
    let mut world = zero_g();
    assert!(world.is_running());
    world.create_body(Vec2::new(0.0, 0.0), 0.0, Vec2::new(4.0, 4.0)).unwrap();

    world.close();

    assert_eq!(world.state(), SimulationState::Stopped);
    assert_eq!(world.body_count(), 0);
    assert!(matches!(world.step(1.0), Err(PhysicsError::NotRunning)));
    assert!(matches!(
        world.create_body(Vec2::zero(), 0.0, Vec2::new(1.0, 1.0)),
        Err(PhysicsError::NotRunning)
    ));
}

#[test]
fn step_rejects_bad_timesteps() {
    let mut world = zero_g();
    assert!(matches!(world.step(-1.0), Err(PhysicsError::InvalidTimestep(_))));
    assert!(matches!(world.step(f32::NAN), Err(PhysicsError::InvalidTimestep(_))));
    assert!(world.step(0.0).is_ok());
    assert_eq!(world.steps_count(), 1);
}

#[test]
fn create_body_defaults() {
    let mut world = zero_g();
    let h = world
        .create_body(Vec2::new(50.0, 50.0), 0.5, Vec2::new(10.0, 20.0))
        .unwrap();

    let body = world.body(h).unwrap();
    assert_eq!(body.id, 0);
    assert_eq!(body.transform.position, Vec2::new(45.0, 40.0));
    assert_eq!(body.transform.rotation, 0.5);

    let rb = world.rigidbody(h).unwrap();
    assert!(!rb.enabled);
    assert!(!rb.apply_gravity);
    assert_eq!(rb.mass.get(), 1.0);
    assert_eq!(rb.friction, 0.0);
    assert_eq!(rb.bounciness, 0.0);

    let collider = world.collider(h).unwrap();
    assert!(collider.enabled);
    assert_eq!(collider.shape, ColliderShape::Rectangle);
}

#[test]
fn shaped_constructors_are_dynamic_and_validated() {
    let mut world = zero_g();
    let c = world.create_circle(Vec2::new(5.0, 5.0), 2.0, 3.0).unwrap();
    let rb = world.rigidbody(c).unwrap();
    assert!(rb.enabled && rb.apply_gravity);
    assert_eq!(rb.mass.get(), 3.0);
    assert_eq!(world.body(c).unwrap().center(), Vec2::new(5.0, 5.0));

    assert!(matches!(
        world.create_circle(Vec2::zero(), 0.0, 1.0),
        Err(PhysicsError::DegenerateGeometry { .. })
    ));
    assert!(matches!(
        world.create_rectangle(Vec2::zero(), Vec2::new(1.0, 1.0), 0.0),
        Err(PhysicsError::DegenerateMass(_))
    ));
    assert_eq!(world.body_count(), 1);
}

#[test]
fn pool_capacity_comes_from_settings() {
    let settings = PhysicsSettings {
        max_bodies: 2,
        ..PhysicsSettings::default()
    };
    let mut world = PhysicsWorld::with_settings(settings).unwrap();
    world.create_body(Vec2::zero(), 0.0, Vec2::new(1.0, 1.0)).unwrap();
    world.create_body(Vec2::zero(), 0.0, Vec2::new(1.0, 1.0)).unwrap();

    let err = world.create_body(Vec2::zero(), 0.0, Vec2::new(1.0, 1.0)).unwrap_err();
    assert!(matches!(err, PhysicsError::PoolExhausted { capacity: 2 }));
}

#[test]
fn destroy_keeps_ids_contiguous() {
    let mut world = zero_g();
    let handles: Vec<_> = (0..3)
        .map(|i| {
            world
                .create_body(Vec2::new(i as f32 * 10.0, 0.0), 0.0, Vec2::new(2.0, 2.0))
                .unwrap()
        })
        .collect();

    world.destroy_body(handles[1]).unwrap();

    assert_eq!(world.body_count(), 2);
    assert_eq!(world.body_at(0).unwrap().id, 0);
    assert_eq!(world.body_at(1).unwrap().id, 1);
    assert_eq!(world.body_at(1).unwrap().center(), Vec2::new(20.0, 0.0));
    assert_eq!(world.handles(), vec![handles[0], handles[2]]);

    assert!(matches!(
        world.set_velocity(handles[1], Vec2::new(1.0, 0.0)),
        Err(PhysicsError::StaleHandle(_))
    ));
    assert!(matches!(world.destroy_body(handles[1]), Err(PhysicsError::StaleHandle(_))));
}

#[test]
fn destroy_uses_the_handle_not_the_public_id() {
    let mut world = zero_g();
    let a = world.create_circle(Vec2::new(0.0, 0.0), 1.0, 1.0).unwrap();
    let b = world.create_circle(Vec2::new(50.0, 0.0), 1.0, 1.0).unwrap();

    world.body_mut(b).unwrap().id = 0;
    world.destroy_body(b).unwrap();

    assert_eq!(world.body_count(), 1);
    assert_eq!(world.handles(), vec![a]);
    assert_eq!(world.snapshot().len(), 1);

    world.body_mut(a).unwrap().id = 42;
    world.destroy_body(a).unwrap();
    assert_eq!(world.body_count(), 0);
    assert!(world.snapshot().is_empty());
}

#[test]
fn reset_clears_bodies_but_keeps_running() {
    let mut world = zero_g();
    let h = world.create_circle(Vec2::zero(), 1.0, 1.0).unwrap();
    world.step(1.0).unwrap();

    world.reset();

    assert!(world.is_running());
    assert_eq!(world.body_count(), 0);
    assert_eq!(world.steps_count(), 0);
    assert!(world.body(h).is_err());
}

#[test]
fn elastic_circles_swap_velocities() {
    let mut world = zero_g();
    let a = elastic_circle(&mut world, Vec2::new(100.0, 100.0), Vec2::new(2.0, 0.0));
    let b = elastic_circle(&mut world, Vec2::new(125.0, 100.0), Vec2::new(-2.0, 0.0));

    let mut resolved = 0;
    for _ in 0..4 {
        resolved += world.step(1.0).unwrap().resolved;
        if resolved > 0 {
            break;
        }
    }

    assert_eq!(resolved, 1);
    assert_relative_eq!(world.rigidbody(a).unwrap().velocity.x, -2.0);
    assert_relative_eq!(world.rigidbody(b).unwrap().velocity.x, 2.0);
    assert_relative_eq!(world.rigidbody(a).unwrap().velocity.y, 0.0);
}

#[test]
fn equal_mass_elastic_collisions_conserve_momentum_and_energy() {
    for step in 0..12 {
        let angle = step as f32 * std::f32::consts::TAU / 12.0;
        // Screen-space offset from a to b and the matching world normal
        let offset = Vec2::new(angle.cos(), angle.sin()) * 15.0;
        let normal = Vec2::new(angle.cos(), -angle.sin());

        let mut world = zero_g();
        let a = elastic_circle(&mut world, Vec2::new(0.0, 0.0), normal * 1.0 + Vec2::new(0.3, 0.0));
        let b = elastic_circle(&mut world, offset, normal * -2.0);

        let before_a = world.rigidbody(a).unwrap().velocity;
        let before_b = world.rigidbody(b).unwrap().velocity;

        let report = world.step(0.0).unwrap();
        assert_eq!(report.resolved, 1, "angle step {step}");

        let after_a = world.rigidbody(a).unwrap().velocity;
        let after_b = world.rigidbody(b).unwrap().velocity;

        let p_before = before_a + before_b;
        let p_after = after_a + after_b;
        assert_relative_eq!(p_before.x, p_after.x, epsilon = 1e-4);
        assert_relative_eq!(p_before.y, p_after.y, epsilon = 1e-4);

        let e_before = before_a.length_squared() + before_b.length_squared();
        let e_after = after_a.length_squared() + after_b.length_squared();
        assert_relative_eq!(e_before, e_after, epsilon = 1e-3);
    }
}

#[test]
fn ball_comes_to_rest_on_static_floor() {
    let mut world = PhysicsWorld::init(Vec2::new(0.0, -0.5));
    let floor = world
        .create_body(Vec2::new(200.0, 400.0), 0.0, Vec2::new(400.0, 20.0))
        .unwrap();
    let ball = world.create_circle(Vec2::new(200.0, 300.0), 10.0, 1.0).unwrap();
    let floor_before = world.body(floor).unwrap().clone();

    for _ in 0..300 {
        world.step(1.0).unwrap();
    }

    let rb = world.rigidbody(ball).unwrap();
    assert!(rb.is_grounded);
    assert!(rb.velocity.y.abs() < 1e-4);
    assert_eq!(rb.velocity.x, 0.0);

    // Resting on the top face (y = 390), not sunk through it
    let center = world.body(ball).unwrap().center();
    assert!(center.y > 380.0 && center.y < 390.0, "ball center at {}", center.y);
    assert_eq!(center.x, 200.0);

    assert_eq!(world.body(floor).unwrap(), &floor_before);
    assert!(!world.rigidbody(floor).unwrap().is_grounded);
}

#[test]
fn grounding_is_cleared_every_tick() {
    let mut world = PhysicsWorld::init(Vec2::new(0.0, -0.5));
    world
        .create_body(Vec2::new(0.0, 100.0), 0.0, Vec2::new(200.0, 20.0))
        .unwrap();
    let ball = world.create_circle(Vec2::new(0.0, 85.0), 10.0, 1.0).unwrap();

    world.step(1.0).unwrap();
    assert!(world.rigidbody(ball).unwrap().is_grounded);

    world.set_position(ball, Vec2::new(0.0, -500.0)).unwrap();
    world.step(1.0).unwrap();
    assert!(!world.rigidbody(ball).unwrap().is_grounded);
}

#[test]
fn disabled_rigidbody_blocks_but_never_moves() {
    let mut world = zero_g();
    let wall = world
        .create_rectangle(Vec2::new(100.0, 0.0), Vec2::new(10.0, 100.0), 1.0)
        .unwrap();
    world.set_rigidbody_enabled(wall, false).unwrap();
    world.set_velocity(wall, Vec2::new(5.0, 5.0)).unwrap();
    let wall_position = world.body(wall).unwrap().transform.position;

    let ball = world.create_circle(Vec2::new(50.0, 0.0), 10.0, 1.0).unwrap();
    world.set_apply_gravity(ball, false).unwrap();
    world.set_velocity(ball, Vec2::new(4.0, 0.0)).unwrap();

    for _ in 0..60 {
        world.step(1.0).unwrap();
        assert_eq!(world.body(wall).unwrap().transform.position, wall_position);
    }

    // Stopped at the wall's left face (x = 95)
    let ball_body = world.body(ball).unwrap();
    assert!(ball_body.center().x < 95.0);
    assert!(ball_body.rigidbody.velocity.x <= 0.0);
    assert_eq!(world.rigidbody(wall).unwrap().velocity, Vec2::new(5.0, 5.0));
}

#[test]
fn pairs_without_an_enabled_rigidbody_are_skipped() {
    let mut world = zero_g();
    world.create_body(Vec2::zero(), 0.0, Vec2::new(10.0, 10.0)).unwrap();
    world.create_body(Vec2::new(2.0, 0.0), 0.0, Vec2::new(10.0, 10.0)).unwrap();

    let report = world.step(1.0).unwrap();
    assert_eq!(report.pairs_tested, 0);
    assert_eq!(report.contacts, 0);
}

#[test]
fn disabled_colliders_do_not_collide() {
    let mut world = zero_g();
    let a = elastic_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    elastic_circle(&mut world, Vec2::new(5.0, 0.0), Vec2::new(-1.0, 0.0));
    world.set_collider_enabled(a, false).unwrap();

    let report = world.step(1.0).unwrap();
    assert_eq!(report.contacts, 0);
    assert_relative_eq!(world.rigidbody(a).unwrap().velocity.x, 1.0);
}

#[test]
fn degenerate_pairs_are_reported_and_step_continues() {
    let mut world = zero_g();
    let dot = world
        .create_body(Vec2::new(1000.0, 1000.0), 0.0, Vec2::zero())
        .unwrap();
    let a = elastic_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    let b = elastic_circle(&mut world, Vec2::new(15.0, 0.0), Vec2::new(-1.0, 0.0));

    let report = world.step(1.0).unwrap();

    // dot vs a, dot vs b, in both orders
    assert_eq!(report.faults.len(), 4);
    assert!(report.faults.iter().all(|f| f.first == dot || f.second == dot));
    assert_eq!(report.resolved, 1);
    assert_relative_eq!(world.rigidbody(a).unwrap().velocity.x, -1.0);
    assert_relative_eq!(world.rigidbody(b).unwrap().velocity.x, 1.0);

    assert_eq!(world.body_count(), 3);
    assert!(world.step(1.0).is_ok());
}

#[test]
fn radial_force_respects_radius() {
    let mut world = zero_g();
    let near = world.create_circle(Vec2::new(10.0, 0.0), 1.0, 1.0).unwrap();
    let far = world.create_circle(Vec2::new(0.0, 50.0), 1.0, 1.0).unwrap();
    let centered = world.create_circle(Vec2::new(0.0, 0.0), 1.0, 1.0).unwrap();

    assert_eq!(world.apply_force_at_position(Vec2::zero(), 5.0, 0.0), 0);
    assert_eq!(world.apply_force_at_position(Vec2::zero(), 5.0, 10.0), 1);

    assert_relative_eq!(world.rigidbody(near).unwrap().velocity.x, 5.0);
    assert_eq!(world.rigidbody(far).unwrap().velocity, Vec2::zero());
    assert_eq!(world.rigidbody(centered).unwrap().velocity, Vec2::zero());
}

#[test]
fn set_shape_keeps_center() {
    let mut world = zero_g();
    let h = world
        .create_body(Vec2::new(40.0, 40.0), 0.0, Vec2::new(10.0, 10.0))
        .unwrap();

    world.set_shape(h, ColliderShape::Circle { radius: 3.0 }).unwrap();
    let body = world.body(h).unwrap();
    assert_eq!(body.center(), Vec2::new(40.0, 40.0));
    assert_eq!(body.collider.radius(), Some(3.0));

    world.set_shape(h, ColliderShape::Rectangle).unwrap();
    let body = world.body(h).unwrap();
    assert_eq!(body.center(), Vec2::new(40.0, 40.0));
    assert_eq!(body.transform.scale, Vec2::new(6.0, 6.0));

    assert!(world.set_shape(h, ColliderShape::Circle { radius: -1.0 }).is_err());
}

#[test]
fn set_mass_is_validated() {
    let mut world = zero_g();
    let h = world.create_circle(Vec2::zero(), 1.0, 1.0).unwrap();
    world.set_mass(h, 4.0).unwrap();
    assert_eq!(world.rigidbody(h).unwrap().mass.get(), 4.0);
    assert!(matches!(world.set_mass(h, 0.0), Err(PhysicsError::DegenerateMass(_))));
    assert_eq!(world.rigidbody(h).unwrap().mass.get(), 4.0);
}

#[test]
fn disabled_body_is_frozen() {
    let mut world = PhysicsWorld::init(Vec2::new(0.0, -1.0));
    let h = world.create_circle(Vec2::new(0.0, 0.0), 1.0, 1.0).unwrap();
    world.set_body_enabled(h, false).unwrap();

    world.step(1.0).unwrap();
    assert_eq!(world.body(h).unwrap().center(), Vec2::zero());
    assert_eq!(world.rigidbody(h).unwrap().velocity, Vec2::zero());
}

#[test]
fn gravity_and_timestep_settings() {
    let mut world = zero_g();
    world.set_gravity(Vec2::new(1.0, 2.0));
    assert_eq!(world.gravity(), Vec2::new(1.0, 2.0));

    world.set_fixed_timestep(0.01).unwrap();
    assert_eq!(world.settings().fixed_timestep_secs, 0.01);
    assert!(world.set_fixed_timestep(0.0).is_err());
}

#[test]
fn perf_stats_follow_the_last_step() {
    let mut world = zero_g();
    elastic_circle(&mut world, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    elastic_circle(&mut world, Vec2::new(15.0, 0.0), Vec2::new(-1.0, 0.0));

    world.step(1.0).unwrap();
    assert_eq!(world.perf_stats().bodies(), 0);

    world.enable_perf_metrics(true);
    world.step(0.0).unwrap();
    let stats = world.perf_stats();
    assert_eq!(stats.bodies(), 2);
    assert_eq!(stats.pairs_tested(), 2);
    assert!(stats.step_ms() >= 0.0);
}

#[test]
fn snapshot_is_in_pool_order() {
    let mut world = zero_g();
    let a = world.create_circle(Vec2::new(1.0, 1.0), 1.0, 1.0).unwrap();
    let b = world.create_circle(Vec2::new(9.0, 9.0), 1.0, 1.0).unwrap();

    let snapshot = world.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].handle, a);
    assert_eq!(snapshot[1].handle, b);
    assert_eq!(snapshot[1].body.id, 1);

    let json = world.snapshot_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[1]["body"]["collider"]["shape"]["type"], "circle");
}
