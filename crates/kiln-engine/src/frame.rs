//! Frame driver: run the kernel over every loaded section, then swap.
//!
//! [`compute_frame`] runs entirely through `&World` (timing slots are
//! atomic and back buffers sit behind their per-chunk mutexes), so the
//! stepping thread can hold the publish lock shared while it computes.
//! Only [`swap_all`] needs the lock exclusively, and it is O(1) per
//! chunk: two buffer handles exchanged, never an element copy.

use std::time::Instant;

use kiln_core::SECTIONS_Y;
use kiln_world::World;

use crate::kernel::step_section;

/// Compute the back buffer of every loaded section from the current
/// buffer, recording per-section and per-chunk wall-clock timings.
///
/// Sections only read current buffers and write disjoint back buffers,
/// so their order within the frame is immaterial.
pub fn compute_frame(world: &World, dt: f64) {
    for chunk in world.chunks() {
        chunk.reset_frame_timings();
        for sy in 0..SECTIONS_Y {
            if !chunk.is_section_loaded(sy) {
                continue;
            }
            let start = Instant::now();
            step_section(world, chunk, sy, dt);
            chunk.record_section_us(sy, start.elapsed().as_micros() as u64);
        }
    }
}

/// Swap every chunk's current and back buffers. Must run after all
/// sections of the frame have been written, under the publish lock.
pub fn swap_all(world: &mut World) {
    for chunk in world.chunks_mut() {
        chunk.swap_buffers();
    }
}

/// One full step: compute, then publish by swapping.
pub fn step(world: &mut World, dt: f64) {
    compute_frame(world, dt);
    swap_all(world);
}
