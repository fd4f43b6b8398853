//! Background stepping server and the publish lock.
//!
//! [`SimServer`] owns the world behind a [`SimHandle`] and advances it
//! on a dedicated thread. The frame is computed while holding the
//! publish lock *shared*: timing slots are atomic and back buffers
//! have their own mutexes, so renderers and summaries reading under the
//! same shared lock are never blocked by compute. Only the O(1) buffer
//! swap takes the lock exclusively, which keeps a renderer's try-read
//! success rate near 100%. Writers (growth, paint) take the exclusive
//! side, guaranteeing they observe a fully published current buffer and
//! that their writes happen-before the next frame's compute.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use kiln_world::World;

use crate::config::{ConfigError, SimConfig};
use crate::frame::{compute_frame, swap_all};

/// How long a paused worker waits on the condition variable before
/// re-checking its flags.
const PAUSE_WAIT: Duration = Duration::from_millis(5);

/// Shared state between the stepping worker and every other thread.
///
/// Clones of the `Arc<SimHandle>` are handed to readers (renderer,
/// summaries), editors, and the growth controller.
pub struct SimHandle {
    world: RwLock<World>,
    running: AtomicBool,
    paused: AtomicBool,
    dt_seconds: f64,
    sleep_ms: AtomicU64,
    frames: AtomicU64,
    pause_mutex: Mutex<()>,
    pause_cv: Condvar,
}

impl SimHandle {
    fn new(world: World, config: SimConfig) -> Self {
        Self {
            world: RwLock::new(world),
            running: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            dt_seconds: config.dt_seconds,
            sleep_ms: AtomicU64::new(config.sleep_ms),
            frames: AtomicU64::new(0),
            pause_mutex: Mutex::new(()),
            pause_cv: Condvar::new(),
        }
    }

    /// The publish lock around the world. Readers take the shared side;
    /// the swap and all structural mutation take the exclusive side.
    pub fn world(&self) -> &RwLock<World> {
        &self.world
    }

    /// Pause or resume the stepping worker. Resuming wakes a paused
    /// worker immediately.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
        if !paused {
            self.pause_cv.notify_all();
        }
    }

    /// Whether the worker is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Number of completed compute/swap frames. Monotonic.
    pub fn frames_simulated(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Simulated seconds per step.
    pub fn dt_seconds(&self) -> f64 {
        self.dt_seconds
    }

    /// Adjust the cooperative per-frame nap.
    pub fn set_sleep_ms(&self, ms: u64) {
        self.sleep_ms.store(ms, Ordering::Relaxed);
    }

    fn wait_while_paused(&self) {
        let guard = self.pause_mutex.lock().unwrap();
        // Bounded wait: stop() and set_paused(false) both notify, and
        // the timeout covers a notification racing ahead of the wait.
        let _unused = self
            .pause_cv
            .wait_timeout_while(guard, PAUSE_WAIT, |_| {
                self.is_paused() && self.running.load(Ordering::Acquire)
            })
            .unwrap();
    }

    /// One frame: compute under the shared lock, publish under the
    /// exclusive lock, then count it.
    fn step_frame(&self) {
        {
            let world = self.world.read().unwrap();
            compute_frame(&world, self.dt_seconds);
        }
        {
            let mut world = self.world.write().unwrap();
            swap_all(&mut world);
        }
        self.frames.fetch_add(1, Ordering::AcqRel);
    }

    fn run_loop(&self) {
        while self.running.load(Ordering::Acquire) {
            if self.is_paused() {
                self.wait_while_paused();
                continue;
            }

            self.step_frame();

            let nap = self.sleep_ms.load(Ordering::Relaxed);
            if nap > 0 {
                thread::sleep(Duration::from_millis(nap));
            } else {
                thread::yield_now();
            }
        }
    }
}

/// Owns the world and the stepping worker thread.
pub struct SimServer {
    handle: Arc<SimHandle>,
    worker: Option<JoinHandle<()>>,
}

impl SimServer {
    /// Build a server around `world`. The worker is not started yet.
    pub fn new(world: World, config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            handle: Arc::new(SimHandle::new(world, config)),
            worker: None,
        })
    }

    /// A clonable handle to the shared state.
    pub fn handle(&self) -> Arc<SimHandle> {
        Arc::clone(&self.handle)
    }

    /// Spawn the stepping worker if it is not already running.
    pub fn start(&mut self) {
        if self.handle.running.swap(true, Ordering::AcqRel) {
            return;
        }
        let handle = Arc::clone(&self.handle);
        let worker = thread::Builder::new()
            .name("kiln-sim".into())
            .spawn(move || handle.run_loop())
            .expect("failed to spawn sim worker");
        self.worker = Some(worker);
    }

    /// Ask the worker to exit and wake it if paused.
    pub fn stop(&self) {
        self.handle.running.store(false, Ordering::Release);
        self.handle.pause_cv.notify_all();
    }

    /// Wait for the worker to exit. Must follow [`stop`](SimServer::stop).
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    /// Drive exactly one frame from the calling thread. For headless
    /// and test use; do not mix with a running worker.
    pub fn step_once(&self) {
        self.handle.step_frame();
    }

    /// See [`SimHandle::set_paused`].
    pub fn set_paused(&self, paused: bool) {
        self.handle.set_paused(paused);
    }

    /// See [`SimHandle::is_paused`].
    pub fn is_paused(&self) -> bool {
        self.handle.is_paused()
    }

    /// See [`SimHandle::frames_simulated`].
    pub fn frames_simulated(&self) -> u64 {
        self.handle.frames_simulated()
    }
}

impl Drop for SimServer {
    fn drop(&mut self) {
        self.stop();
        self.join();
    }
}
