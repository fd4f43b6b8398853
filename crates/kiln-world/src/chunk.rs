//! A fixed-size 16 × 384 × 16 voxel block.
//!
//! Temperatures are double-buffered: readers and the stencil kernel read
//! the front buffer, the kernel writes the back buffer, and
//! [`Chunk::swap_buffers`] exchanges the two handles in O(1) under the
//! publish lock. The back buffer sits behind a `Mutex` so the compute
//! pass can fill it while the world is held shared; the mutex is
//! uncontended in steady state (a single stepping thread writes it).
//!
//! Per-section wall-clock timings are stored as integer microseconds in
//! atomics, writable through `&Chunk` during compute and readable by any
//! holder of the publish lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use kiln_core::{
    cell_index, section_rows, ChunkPos, MaterialId, MaterialTable, CHUNK_D, CHUNK_N, CHUNK_W,
    SECTIONS_Y, SECTION_EDGE,
};

/// A 16 × 384 × 16 block of voxel cells at one horizontal position.
pub struct Chunk {
    pos: ChunkPos,
    void_ix: MaterialId,
    mat_ix: Vec<MaterialId>,
    mass_kg: Vec<f32>,
    /// Current temperature buffer (kelvin), read by everyone.
    front: Vec<f32>,
    /// Back temperature buffer (kelvin), written by the kernel.
    back: Mutex<Vec<f32>>,
    section_loaded: [bool; SECTIONS_Y],
    chunk_us_last: AtomicU64,
    section_us_last: [AtomicU64; SECTIONS_Y],
}

impl Chunk {
    /// A chunk with all buffers zeroed and every section unloaded.
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            void_ix: MaterialId::VOID,
            mat_ix: vec![MaterialId::VOID; CHUNK_N],
            mass_kg: vec![0.0; CHUNK_N],
            front: vec![0.0; CHUNK_N],
            back: Mutex::new(vec![0.0; CHUNK_N]),
            section_loaded: [false; SECTIONS_Y],
            chunk_us_last: AtomicU64::new(0),
            section_us_last: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// This chunk's horizontal position.
    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// The material index this chunk treats as empty space.
    pub fn void_ix(&self) -> MaterialId {
        self.void_ix
    }

    /// Override the void material index.
    pub fn set_void_ix(&mut self, void_ix: MaterialId) {
        self.void_ix = void_ix;
    }

    // ── Cell access ──────────────────────────────────────────────

    /// The current temperature buffer.
    pub fn temperature(&self) -> &[f32] {
        &self.front
    }

    /// Per-cell material indices.
    pub fn material_indices(&self) -> &[MaterialId] {
        &self.mat_ix
    }

    /// Per-cell mass in kilograms.
    pub fn mass(&self) -> &[f32] {
        &self.mass_kg
    }

    /// Whether the cell at linear index `i` is empty space.
    pub fn is_void_at(&self, i: usize) -> bool {
        self.mat_ix[i] == self.void_ix
    }

    /// Lock the back buffer for writing.
    ///
    /// Held by the kernel for the duration of one section update. The
    /// single stepping thread is the only writer, so this never blocks
    /// in practice.
    pub fn back_buffer(&self) -> MutexGuard<'_, Vec<f32>> {
        self.back.lock().unwrap()
    }

    /// Exchange the front and back buffer handles. O(1), no element copy.
    pub fn swap_buffers(&mut self) {
        let back = self.back.get_mut().unwrap();
        std::mem::swap(&mut self.front, back);
    }

    /// Write `temp` into both buffers at `(x, y, z)`.
    ///
    /// Used for seeding hot cells: writing both buffers keeps the value
    /// visible across the next swap even if the kernel skips the cell.
    pub fn set_cell_temperature(&mut self, x: usize, y: usize, z: usize, temp: f32) {
        let i = cell_index(x, y, z);
        self.front[i] = temp;
        self.back.get_mut().unwrap()[i] = temp;
    }

    /// Paint one cell: `temp` into both buffers, material and its default
    /// mass, and the containing section marked loaded when `mat` is not
    /// the void index.
    ///
    /// Painting void leaves the flag untouched: one void cell cannot
    /// prove the whole section is empty, so only
    /// [`recompute_section_loaded`](Chunk::recompute_section_loaded) may
    /// clear it.
    pub fn paint_cell(
        &mut self,
        x: usize,
        y: usize,
        z: usize,
        temp: f32,
        mat: MaterialId,
        materials: &MaterialTable,
    ) {
        let i = cell_index(x, y, z);
        self.front[i] = temp;
        self.back.get_mut().unwrap()[i] = temp;
        self.mat_ix[i] = mat;
        self.mass_kg[i] = materials.by_ix(mat).default_mass;
        if mat != self.void_ix {
            self.mark_section_loaded(y / SECTION_EDGE, true);
        }
    }

    // ── Sections ─────────────────────────────────────────────────

    /// Set every cell of vertical section `sy` to `mat` at temperature
    /// `temp` (both buffers), with the material's default mass (zero for
    /// void). Marks the section loaded iff `mat` is not the void index.
    ///
    /// Out-of-range `sy` is a no-op.
    pub fn fill_section(
        &mut self,
        mat: MaterialId,
        temp: f32,
        sy: usize,
        materials: &MaterialTable,
    ) {
        if sy >= SECTIONS_Y {
            return;
        }
        let mass = if mat == self.void_ix {
            0.0
        } else {
            materials.by_ix(mat).default_mass
        };
        let back = self.back.get_mut().unwrap();
        for z in 0..CHUNK_D {
            for y in section_rows(sy) {
                for x in 0..CHUNK_W {
                    let i = cell_index(x, y, z);
                    self.mat_ix[i] = mat;
                    self.front[i] = temp;
                    back[i] = temp;
                    self.mass_kg[i] = mass;
                }
            }
        }
        self.section_loaded[sy] = mat != self.void_ix;
    }

    /// Directly override the loaded flag of section `sy`.
    ///
    /// Out-of-range `sy` is a no-op. Used by paint, which knows it just
    /// made a section non-empty.
    pub fn mark_section_loaded(&mut self, sy: usize, loaded: bool) {
        if let Some(flag) = self.section_loaded.get_mut(sy) {
            *flag = loaded;
        }
    }

    /// Whether section `sy` holds at least one non-void cell.
    /// Out-of-range `sy` reads as not loaded.
    pub fn is_section_loaded(&self, sy: usize) -> bool {
        self.section_loaded.get(sy).copied().unwrap_or(false)
    }

    /// Number of loaded sections in this chunk.
    pub fn loaded_section_count(&self) -> usize {
        self.section_loaded.iter().filter(|&&l| l).count()
    }

    /// Reestablish the loaded flags by scanning every section for a
    /// non-void cell.
    pub fn recompute_section_loaded(&mut self) {
        for sy in 0..SECTIONS_Y {
            let mut any = false;
            'scan: for z in 0..CHUNK_D {
                for y in section_rows(sy) {
                    for x in 0..CHUNK_W {
                        if self.mat_ix[cell_index(x, y, z)] != self.void_ix {
                            any = true;
                            break 'scan;
                        }
                    }
                }
            }
            self.section_loaded[sy] = any;
        }
    }

    // ── Frame timings ────────────────────────────────────────────

    /// Zero the per-frame timing slots. Called at the top of each frame.
    pub fn reset_frame_timings(&self) {
        self.chunk_us_last.store(0, Ordering::Relaxed);
        for slot in &self.section_us_last {
            slot.store(0, Ordering::Relaxed);
        }
    }

    /// Record the wall-clock cost of one section update, in microseconds.
    /// Adds into the chunk total.
    pub fn record_section_us(&self, sy: usize, us: u64) {
        self.section_us_last[sy].store(us, Ordering::Relaxed);
        self.chunk_us_last.fetch_add(us, Ordering::Relaxed);
    }

    /// Most recent whole-chunk simulation time, in milliseconds.
    pub fn chunk_ms_last(&self) -> f64 {
        self.chunk_us_last.load(Ordering::Relaxed) as f64 / 1000.0
    }

    /// Most recent simulation time of section `sy`, in milliseconds.
    pub fn section_ms_last(&self, sy: usize) -> f64 {
        self.section_us_last[sy].load(Ordering::Relaxed) as f64 / 1000.0
    }
}
