//! World growth: random sections in the current chunk, then the next
//! chunk along the spiral.
//!
//! [`Grower`] is the deterministic core: a seeded PRNG, the spiral
//! cursor, and one `grow_step` per call. [`GrowthController`] runs a
//! `Grower` on its own thread against a live [`SimHandle`], measuring
//! the frame budget and tripping once, permanently, when it is
//! exceeded.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{bounded, Receiver, Sender};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use kiln_core::{ChunkPos, Material, MaterialId, SECTIONS_Y};
use kiln_engine::{ConfigError, SimHandle};
use kiln_world::{Chunk, World};

use crate::config::StressConfig;
use crate::progress::ProgressBar;
use crate::report::StressReport;
use crate::spiral::SpiralCursor;

/// Section filled first in every freshly created chunk: the vertical
/// middle of the column.
const FIRST_SECTION: usize = 8;

/// Uniform ranges for randomly interned material properties.
const HEAT_CAPACITY_RANGE: std::ops::Range<f32> = 200.0..1200.0;
const CONDUCTIVITY_RANGE: std::ops::Range<f32> = 1.0..500.0;
const DEFAULT_MASS_RANGE: std::ops::Range<f32> = 500.0..4000.0;
const MOLAR_MASS_RANGE: std::ops::Range<f32> = 0.01..0.10;
const TEMPERATURE_RANGE: std::ops::Range<f32> = 0.0..6000.0;

/// Deterministic growth state: seeded PRNG, spiral cursor, and the
/// chunk currently being filled.
pub struct Grower {
    rng: ChaCha8Rng,
    spiral: SpiralCursor,
    cursor: ChunkPos,
    sections_grown: usize,
}

impl Grower {
    /// A grower seeded from the stress seed, positioned at the origin.
    pub fn new(seed: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(u64::from(seed)),
            spiral: SpiralCursor::new(),
            cursor: ChunkPos::ORIGIN,
            sections_grown: 0,
        }
    }

    /// Number of sections this grower has filled.
    pub fn sections_grown(&self) -> usize {
        self.sections_grown
    }

    /// The chunk the next section will land in (unless it is full).
    pub fn cursor(&self) -> ChunkPos {
        self.cursor
    }

    /// Fill one more section: a uniformly random not-loaded section of
    /// the current chunk with a freshly interned random material at a
    /// random temperature. When the chunk is full, move to the next
    /// chunk along the spiral and fill its first section instead.
    pub fn grow_step(&mut self, world: &mut World) {
        world.ensure(self.cursor);
        let empty = pick_empty_section(
            world.find(self.cursor).expect("cursor chunk just ensured"),
            &mut self.rng,
        );
        let sy = match empty {
            Some(sy) => sy,
            None => {
                self.cursor = self.spiral.next();
                let chunk = world.ensure(self.cursor);
                chunk.set_void_ix(MaterialId::VOID);
                FIRST_SECTION
            }
        };
        let mat = world.materials.add(self.random_material());
        let temp = self.rng.gen_range(TEMPERATURE_RANGE);
        world.fill_section(self.cursor, mat, temp, sy);
        self.sections_grown += 1;
    }

    fn random_material(&mut self) -> Material {
        Material {
            heat_capacity: self.rng.gen_range(HEAT_CAPACITY_RANGE),
            thermal_conductivity: self.rng.gen_range(CONDUCTIVITY_RANGE),
            default_mass: self.rng.gen_range(DEFAULT_MASS_RANGE),
            molar_mass: self.rng.gen_range(MOLAR_MASS_RANGE),
        }
    }
}

/// Pick a uniformly random not-loaded section, or `None` if the chunk
/// is fully loaded.
fn pick_empty_section(chunk: &Chunk, rng: &mut ChaCha8Rng) -> Option<usize> {
    let empty: SmallVec<[usize; SECTIONS_Y]> = (0..SECTIONS_Y)
        .filter(|&sy| !chunk.is_section_loaded(sy))
        .collect();
    if empty.is_empty() {
        None
    } else {
        Some(empty[rng.gen_range(0..empty.len())])
    }
}

// ── GrowthController ─────────────────────────────────────────────

/// Background thread growing the world until the frame budget trips.
///
/// On the first frame whose summed section time exceeds
/// `dt_seconds * 1000` ms, the controller prints a final progress bar
/// and the [`StressReport`], pauses the sim server, sends the report
/// over a channel, and stops growing for good. The simulation itself
/// keeps running (paused) and can be resumed by the UI.
pub struct GrowthController {
    stop: Arc<AtomicBool>,
    tripped: Arc<AtomicBool>,
    report_rx: Receiver<StressReport>,
    worker: Option<JoinHandle<()>>,
}

impl GrowthController {
    /// Validate `config` and start the grower thread against `handle`.
    pub fn spawn(handle: Arc<SimHandle>, config: StressConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let stop = Arc::new(AtomicBool::new(false));
        let tripped = Arc::new(AtomicBool::new(false));
        // Capacity 1: there is exactly one trip per run.
        let (report_tx, report_rx) = bounded(1);

        let state = GrowLoop {
            handle,
            grower: Grower::new(config.seed),
            config,
            stop: Arc::clone(&stop),
            tripped: Arc::clone(&tripped),
            report_tx,
            bar: ProgressBar::default(),
        };
        let worker = thread::Builder::new()
            .name("kiln-grow".into())
            .spawn(move || state.run())
            .expect("failed to spawn grower thread");

        Ok(Self {
            stop,
            tripped,
            report_rx,
            worker: Some(worker),
        })
    }

    /// Whether the frame budget has tripped.
    pub fn tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    /// Block until the trip report arrives. Returns `None` if the
    /// controller was stopped before tripping.
    pub fn wait_for_report(&self) -> Option<StressReport> {
        self.report_rx.recv().ok()
    }

    /// The trip report, if it has already been sent.
    pub fn try_report(&self) -> Option<StressReport> {
        self.report_rx.try_recv().ok()
    }

    /// Ask the grower thread to exit at its next tick.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Wait for the grower thread to exit. Must follow
    /// [`stop`](GrowthController::stop) unless the budget tripped.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for GrowthController {
    fn drop(&mut self) {
        self.stop();
        self.join();
    }
}

/// State owned by the grower thread.
struct GrowLoop {
    handle: Arc<SimHandle>,
    grower: Grower,
    config: StressConfig,
    stop: Arc<AtomicBool>,
    tripped: Arc<AtomicBool>,
    report_tx: Sender<StressReport>,
    bar: ProgressBar,
}

impl GrowLoop {
    fn run(mut self) {
        let budget_ms = self.config.dt_seconds * 1000.0;
        let mut out = io::stdout();
        let mut last_bar = Instant::now();

        // Growth starts from the origin chunk whether or not the
        // launcher seeded it; the VOID convention must hold either way.
        {
            let mut world = self.handle.world().write().unwrap();
            if world.materials.is_empty() {
                world.materials.add(Material::VOID);
            }
            world.ensure(ChunkPos::ORIGIN);
        }

        while !self.stop.load(Ordering::Acquire) {
            let world_ms = self.handle.world().read().unwrap().total_frame_ms();

            if last_bar.elapsed() >= self.config.bar_period {
                let _ = self.bar.draw(&mut out, world_ms, budget_ms);
                last_bar = Instant::now();
            }

            if world_ms > budget_ms {
                if !self.tripped.swap(true, Ordering::AcqRel) {
                    let _ = self.bar.draw(&mut out, world_ms, budget_ms);
                    let _ = writeln!(out);
                    let report = {
                        let world = self.handle.world().read().unwrap();
                        StressReport::gather(&world, self.config.seed, budget_ms, world_ms)
                    };
                    let _ = writeln!(out, "{report}");
                    let _ = out.flush();
                    self.handle.set_paused(true);
                    let _ = self.report_tx.send(report);
                }
                // Growth halts permanently; the sim keeps running.
                break;
            }

            {
                let mut world = self.handle.world().write().unwrap();
                self.grower.grow_step(&mut world);
            }

            thread::sleep(self.config.tick_period);
        }
    }
}
