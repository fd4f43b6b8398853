//! Read-only temperature summaries over the current buffer.
//!
//! All summaries skip void cells; a chunk or slice with no material
//! yields `None`. Callers hold the publish lock while summarizing.

use kiln_core::{CHUNK_H, CHUNK_N, CHUNK_W};

use crate::chunk::Chunk;

/// Minimum and maximum temperature over the non-void cells of a chunk.
pub fn chunk_minmax(chunk: &Chunk) -> Option<(f32, f32)> {
    let temps = chunk.temperature();
    let mut bounds: Option<(f32, f32)> = None;
    for i in 0..CHUNK_N {
        if chunk.is_void_at(i) {
            continue;
        }
        let t = temps[i];
        bounds = Some(match bounds {
            Some((mn, mx)) => (mn.min(t), mx.max(t)),
            None => (t, t),
        });
    }
    bounds
}

/// Mean temperature over the non-void cells of a chunk.
pub fn chunk_avg(chunk: &Chunk) -> Option<f32> {
    let temps = chunk.temperature();
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for i in 0..CHUNK_N {
        if chunk.is_void_at(i) {
            continue;
        }
        sum += f64::from(temps[i]);
        count += 1;
    }
    (count > 0).then(|| (sum / count as f64) as f32)
}

/// Minimum and maximum temperature over the non-void cells of one Z
/// slice of a chunk.
pub fn slice_minmax(chunk: &Chunk, z: usize) -> Option<(f32, f32)> {
    let temps = chunk.temperature();
    let base = z * CHUNK_W * CHUNK_H;
    let mut bounds: Option<(f32, f32)> = None;
    for i in base..base + CHUNK_W * CHUNK_H {
        if chunk.is_void_at(i) {
            continue;
        }
        let t = temps[i];
        bounds = Some(match bounds {
            Some((mn, mx)) => (mn.min(t), mx.max(t)),
            None => (t, t),
        });
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{ChunkPos, Material, MaterialTable};

    fn chunk_with_section() -> Chunk {
        let mut table = MaterialTable::new();
        table.add(Material::VOID);
        let solid = table.add(Material {
            heat_capacity: 500.0,
            thermal_conductivity: 100.0,
            default_mass: 1000.0,
            molar_mass: 0.05,
        });
        let mut chunk = Chunk::new(ChunkPos::ORIGIN);
        chunk.fill_section(solid, 300.0, 8, &table);
        chunk
    }

    #[test]
    fn empty_chunk_has_no_summary() {
        let chunk = Chunk::new(ChunkPos::ORIGIN);
        assert!(chunk_minmax(&chunk).is_none());
        assert!(chunk_avg(&chunk).is_none());
        assert!(slice_minmax(&chunk, 0).is_none());
    }

    #[test]
    fn minmax_and_avg_ignore_void_cells() {
        let mut chunk = chunk_with_section();
        // A hot cell inside the section, and a hotter value on a void
        // cell that must not count.
        chunk.set_cell_temperature(8, 136, 8, 900.0);
        chunk.set_cell_temperature(0, 0, 0, 5000.0);

        assert_eq!(chunk_minmax(&chunk), Some((300.0, 900.0)));
        let avg = chunk_avg(&chunk).unwrap();
        assert!(avg > 300.0 && avg < 301.0, "avg={avg}");
    }

    #[test]
    fn slice_minmax_sees_only_its_layer() {
        let mut chunk = chunk_with_section();
        chunk.set_cell_temperature(8, 136, 3, 1200.0);
        assert_eq!(slice_minmax(&chunk, 3), Some((300.0, 1200.0)));
        assert_eq!(slice_minmax(&chunk, 4), Some((300.0, 300.0)));
    }
}
