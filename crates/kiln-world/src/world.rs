//! The sparse chunk map and cross-chunk neighbor sampling.

use indexmap::IndexMap;

use kiln_core::{cell_index, ChunkPos, MaterialId, MaterialTable, CHUNK_D, CHUNK_H, CHUNK_W};

use crate::chunk::Chunk;

/// A neighboring cell found by [`World::sample_neighbor`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborSample {
    /// The neighbor's current-buffer temperature, kelvin.
    pub temperature: f32,
    /// The neighbor's material index.
    pub material: MaterialId,
}

/// Sparse mapping from horizontal chunk coordinates to owned chunks,
/// plus the world-wide material table.
///
/// The map is insertion-ordered (`IndexMap`), so frame traversal and
/// stress summaries visit chunks in the deterministic order they were
/// created. Chunks are created lazily by [`ensure`](World::ensure) and
/// live until world teardown; there is no unload path.
#[derive(Default)]
pub struct World {
    pub(crate) chunks: IndexMap<ChunkPos, Chunk>,
    /// The append-only material registry shared by all chunks.
    pub materials: MaterialTable,
}

impl World {
    /// An empty world with no chunks and no materials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or lazily create the chunk at `pos`. Idempotent: a second
    /// call returns the same chunk with its contents intact.
    pub fn ensure(&mut self, pos: ChunkPos) -> &mut Chunk {
        self.chunks.entry(pos).or_insert_with(|| Chunk::new(pos))
    }

    /// Read-only lookup of the chunk at `pos`.
    pub fn find(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    /// Mutable lookup of the chunk at `pos`.
    pub fn find_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    /// Number of chunks in the world.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterate all chunks in creation order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Iterate all chunks mutably in creation order.
    pub fn chunks_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.chunks.values_mut()
    }

    /// Sample the face neighbor of cell `(x, y, z)` in `chunk` at offset
    /// `(dx, dy, dz)`, following the chunk border if the offset leaves
    /// the chunk horizontally.
    ///
    /// Returns `None` when the neighbor is outside the world: above or
    /// below the chunk column, or in a chunk that was never created.
    /// Callers treat `None` as a no-flux boundary, never as 0 K.
    pub fn sample_neighbor(
        &self,
        chunk: &Chunk,
        x: usize,
        y: usize,
        z: usize,
        dx: i32,
        dy: i32,
        dz: i32,
    ) -> Option<NeighborSample> {
        let ny = y as i32 + dy;
        if ny < 0 || ny >= CHUNK_H as i32 {
            return None;
        }

        let nx = x as i32 + dx;
        let nz = z as i32 + dz;
        let ChunkPos { mut cx, mut cz } = chunk.pos();
        let mut lx = nx;
        let mut lz = nz;

        if nx < 0 {
            cx -= 1;
            lx = CHUNK_W as i32 - 1;
        } else if nx >= CHUNK_W as i32 {
            cx += 1;
            lx = 0;
        }
        if nz < 0 {
            cz -= 1;
            lz = CHUNK_D as i32 - 1;
        } else if nz >= CHUNK_D as i32 {
            cz += 1;
            lz = 0;
        }

        let target = ChunkPos::new(cx, cz);
        let source = if target == chunk.pos() {
            chunk
        } else {
            self.find(target)?
        };

        let i = cell_index(lx as usize, ny as usize, lz as usize);
        Some(NeighborSample {
            temperature: source.temperature()[i],
            material: source.material_indices()[i],
        })
    }

    /// Fill one section of the chunk at `pos`; see
    /// [`Chunk::fill_section`]. Returns `false` if no chunk exists there.
    pub fn fill_section(&mut self, pos: ChunkPos, mat: MaterialId, temp: f32, sy: usize) -> bool {
        let Self { chunks, materials } = self;
        match chunks.get_mut(&pos) {
            Some(chunk) => {
                chunk.fill_section(mat, temp, sy, materials);
                true
            }
            None => false,
        }
    }

    /// Sum of per-chunk simulation times from the most recent frame,
    /// in milliseconds.
    pub fn total_frame_ms(&self) -> f64 {
        self.chunks().map(Chunk::chunk_ms_last).sum()
    }

    /// Total number of loaded sections across all chunks.
    pub fn loaded_section_count(&self) -> usize {
        self.chunks().map(Chunk::loaded_section_count).sum()
    }

    /// Reestablish every chunk's section-loaded flags by scanning.
    pub fn recompute_all_section_loaded(&mut self) {
        for chunk in self.chunks_mut() {
            chunk.recompute_section_loaded();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::Material;

    const SOLID: Material = Material {
        heat_capacity: 500.0,
        thermal_conductivity: 100.0,
        default_mass: 1000.0,
        molar_mass: 0.05,
    };

    fn seeded() -> (World, MaterialId) {
        let mut world = World::new();
        world.materials.add(Material::VOID);
        let solid = world.materials.add(SOLID);
        (world, solid)
    }

    #[test]
    fn ensure_is_idempotent() {
        let (mut world, solid) = seeded();
        let pos = ChunkPos::new(2, -1);
        world.ensure(pos);
        world.fill_section(pos, solid, 300.0, 8);

        // A second ensure returns the same chunk, contents intact.
        let chunk = world.ensure(pos);
        assert_eq!(chunk.pos(), pos);
        assert!(chunk.is_section_loaded(8));
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn find_misses_before_ensure() {
        let (world, _) = seeded();
        assert!(world.find(ChunkPos::ORIGIN).is_none());
    }

    #[test]
    fn sample_within_the_same_chunk() {
        let (mut world, solid) = seeded();
        world.ensure(ChunkPos::ORIGIN);
        world.fill_section(ChunkPos::ORIGIN, solid, 300.0, 8);

        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        let nb = world.sample_neighbor(chunk, 5, 130, 5, 1, 0, 0).unwrap();
        assert_eq!(nb.temperature, 300.0);
        assert_eq!(nb.material, solid);
    }

    #[test]
    fn sample_above_and_below_the_column_is_none() {
        let (mut world, _) = seeded();
        world.ensure(ChunkPos::ORIGIN);
        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        assert!(world.sample_neighbor(chunk, 0, 0, 0, 0, -1, 0).is_none());
        assert!(world
            .sample_neighbor(chunk, 0, CHUNK_H - 1, 0, 0, 1, 0)
            .is_none());
    }

    #[test]
    fn sample_across_a_chunk_border() {
        let (mut world, solid) = seeded();
        world.ensure(ChunkPos::ORIGIN);
        world.ensure(ChunkPos::new(1, 0));
        world.fill_section(ChunkPos::new(1, 0), solid, 450.0, 8);

        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        // +x from the east face of (0,0) lands on the west face of (1,0).
        let nb = world
            .sample_neighbor(chunk, CHUNK_W - 1, 130, 3, 1, 0, 0)
            .unwrap();
        assert_eq!(nb.temperature, 450.0);

        // -z from the north face of (0,0): chunk (0,-1) does not exist.
        assert!(world.sample_neighbor(chunk, 3, 130, 0, 0, 0, -1).is_none());
    }

    #[test]
    fn recompute_all_reestablishes_flags_in_every_chunk() {
        let (mut world, solid) = seeded();
        world.ensure(ChunkPos::ORIGIN);
        world.ensure(ChunkPos::new(1, 0));
        world.fill_section(ChunkPos::ORIGIN, solid, 300.0, 5);
        world.fill_section(ChunkPos::new(1, 0), solid, 300.0, 17);

        // Corrupt flags in both chunks, then reestablish them in bulk.
        world
            .find_mut(ChunkPos::ORIGIN)
            .unwrap()
            .mark_section_loaded(5, false);
        world
            .find_mut(ChunkPos::new(1, 0))
            .unwrap()
            .mark_section_loaded(9, true);
        world.recompute_all_section_loaded();

        let origin = world.find(ChunkPos::ORIGIN).unwrap();
        let east = world.find(ChunkPos::new(1, 0)).unwrap();
        for sy in 0..kiln_core::SECTIONS_Y {
            assert_eq!(origin.is_section_loaded(sy), sy == 5, "origin sy={sy}");
            assert_eq!(east.is_section_loaded(sy), sy == 17, "east sy={sy}");
        }
    }

    #[test]
    fn totals_sum_over_chunks() {
        let (mut world, solid) = seeded();
        world.ensure(ChunkPos::ORIGIN);
        world.ensure(ChunkPos::new(1, 0));
        world.fill_section(ChunkPos::ORIGIN, solid, 300.0, 8);
        world.fill_section(ChunkPos::new(1, 0), solid, 300.0, 8);
        world.fill_section(ChunkPos::new(1, 0), solid, 300.0, 9);
        assert_eq!(world.loaded_section_count(), 3);

        world.find(ChunkPos::ORIGIN).unwrap().record_section_us(8, 1000);
        world
            .find(ChunkPos::new(1, 0))
            .unwrap()
            .record_section_us(8, 2500);
        assert_eq!(world.total_frame_ms(), 3.5);
    }
}
