use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::core::{PhysicsError, PhysicsResult};

use super::{BodySnapshot, PerfTimer, PhysicsWorld};

/// Steps a shared world on a background thread as fast as it can.
///
/// Each iteration measures the wall time since the previous one and steps
/// with `elapsed / fixed_timestep`, so simulated time tracks real time.
pub struct PhysicsThread {
    world: Arc<Mutex<PhysicsWorld>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl PhysicsThread {
    /// Move a running world onto its own thread
    pub fn spawn(world: PhysicsWorld) -> PhysicsResult<Self> {
        if !world.is_running() {
            return Err(PhysicsError::NotRunning);
        }

        let world = Arc::new(Mutex::new(world));
        let running = Arc::new(AtomicBool::new(true));

        let handle = thread::Builder::new()
            .name("physics".into())
            .spawn({
                let world = Arc::clone(&world);
                let running = Arc::clone(&running);
                move || physics_loop(world, running)
            })?;

        Ok(Self {
            world,
            running,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Shared world, for callers that want to hold the lock themselves
    pub fn world(&self) -> Arc<Mutex<PhysicsWorld>> {
        Arc::clone(&self.world)
    }

    /// Run `f` with the world locked
    pub fn with_world<R>(&self, f: impl FnOnce(&mut PhysicsWorld) -> R) -> R {
        f(&mut lock(&self.world))
    }

    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        lock(&self.world).snapshot()
    }

    /// Stop the loop, wait for it, then close the world
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("physics thread panicked");
            }
            lock(&self.world).close();
        }
    }
}

impl Drop for PhysicsThread {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// A panic while stepping leaves the world readable
fn lock(world: &Mutex<PhysicsWorld>) -> MutexGuard<'_, PhysicsWorld> {
    world.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn physics_loop(world: Arc<Mutex<PhysicsWorld>>, running: Arc<AtomicBool>) {
    debug!("physics thread started");
    let mut clock = PerfTimer::start();

    while running.load(Ordering::Acquire) {
        let elapsed_secs = clock.lap_ms() / 1000.0;
        {
            let mut world = lock(&world);
            let dt = (elapsed_secs / world.settings().fixed_timestep_secs) as f32;
            if let Err(err) = world.step(dt) {
                warn!(error = %err, "physics loop stopped");
                running.store(false, Ordering::Release);
                break;
            }
        }
        thread::yield_now();
    }

    debug!("physics thread finished");
}
