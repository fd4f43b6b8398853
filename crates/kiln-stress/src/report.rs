//! Trip summary emitted when growth exhausts the frame budget.

use std::fmt;

use kiln_core::SECTIONS_Y;
use kiln_world::World;

/// Snapshot of the world at the moment the real-time budget tripped.
#[derive(Clone, Debug, PartialEq)]
pub struct StressReport {
    /// The seed the run was started with.
    pub seed: u32,
    /// The frame budget, in milliseconds.
    pub target_dt_ms: f64,
    /// Number of chunks in the world.
    pub chunks: usize,
    /// Number of loaded sections across all chunks.
    pub sections_loaded: usize,
    /// The frame time that tripped the budget, in milliseconds.
    pub world_ms: f64,
    /// Largest single-chunk frame time, in milliseconds.
    pub max_chunk_ms: f64,
    /// Sum of per-chunk frame times, in milliseconds.
    pub sum_chunk_ms: f64,
}

impl StressReport {
    /// Gather the per-chunk totals of the most recent frame.
    /// `world_ms` is the measurement that tripped the budget.
    pub fn gather(world: &World, seed: u32, target_dt_ms: f64, world_ms: f64) -> Self {
        let mut max_chunk_ms = 0.0f64;
        let mut sum_chunk_ms = 0.0f64;
        for chunk in world.chunks() {
            let ms = chunk.chunk_ms_last();
            max_chunk_ms = max_chunk_ms.max(ms);
            sum_chunk_ms += ms;
        }
        Self {
            seed,
            target_dt_ms,
            chunks: world.chunk_count(),
            sections_loaded: world.loaded_section_count(),
            world_ms,
            max_chunk_ms,
            sum_chunk_ms,
        }
    }
}

impl fmt::Display for StressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== STRESS RESULT ===")?;
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(f, "Target dt: {:.3} ms", self.target_dt_ms)?;
        writeln!(f, "Total chunks: {}", self.chunks)?;
        writeln!(
            f,
            "Total sections loaded: {} (max per chunk: {SECTIONS_Y})",
            self.sections_loaded
        )?;
        write!(
            f,
            "World frame time: {:.3} ms  (max chunk: {:.3} ms, sum: {:.3} ms)",
            self.world_ms, self.max_chunk_ms, self.sum_chunk_ms
        )
    }
}
