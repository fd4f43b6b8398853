//! Paint operations used by editors while the simulation is paused.
//!
//! Painting writes both temperature buffers: the next frame's kernel
//! reads the current buffer, and writing the back buffer as well keeps
//! the painted value from being replaced by a stale one when the swap
//! exposes cells the kernel skipped (e.g. void neighbors). Callers must
//! hold the publish lock exclusively and paint only while paused.

use kiln_core::{ChunkPos, MaterialId, CHUNK_D, CHUNK_H, CHUNK_W};

use crate::world::World;

/// Which Z layers a paint stroke touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintLayers {
    /// A single Z slice.
    Slice(usize),
    /// Every Z layer at the given `(x, y)`.
    All,
}

impl World {
    /// Paint the cell(s) at local `(x, y)` of the chunk at `pos` to
    /// `temp`, assigning `mat` and its default mass. Painting a
    /// non-void material marks the containing section loaded; painting
    /// void leaves the flag for
    /// [`recompute_section_loaded`](crate::chunk::Chunk::recompute_section_loaded).
    ///
    /// Returns `false` (painting nothing) if the chunk does not exist or
    /// the coordinates fall outside the chunk.
    pub fn paint(
        &mut self,
        pos: ChunkPos,
        x: usize,
        y: usize,
        layers: PaintLayers,
        temp: f32,
        mat: MaterialId,
    ) -> bool {
        if x >= CHUNK_W || y >= CHUNK_H {
            return false;
        }
        if let PaintLayers::Slice(z) = layers {
            if z >= CHUNK_D {
                return false;
            }
        }
        let Self { chunks, materials } = self;
        let Some(chunk) = chunks.get_mut(&pos) else {
            return false;
        };
        match layers {
            PaintLayers::Slice(z) => chunk.paint_cell(x, y, z, temp, mat, materials),
            PaintLayers::All => {
                for z in 0..CHUNK_D {
                    chunk.paint_cell(x, y, z, temp, mat, materials);
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{cell_index, Material, SECTION_EDGE};

    fn painted_world() -> (World, MaterialId) {
        let mut world = World::new();
        world.materials.add(Material::VOID);
        let solid = world.materials.add(Material {
            heat_capacity: 500.0,
            thermal_conductivity: 100.0,
            default_mass: 1000.0,
            molar_mass: 0.05,
        });
        world.ensure(ChunkPos::ORIGIN);
        (world, solid)
    }

    #[test]
    fn paint_single_slice() {
        let (mut world, solid) = painted_world();
        assert!(world.paint(
            ChunkPos::ORIGIN,
            4,
            100,
            PaintLayers::Slice(7),
            6000.0,
            solid
        ));

        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        let i = cell_index(4, 100, 7);
        assert_eq!(chunk.temperature()[i], 6000.0);
        assert_eq!(chunk.back_buffer()[i], 6000.0);
        assert_eq!(chunk.material_indices()[i], solid);
        assert!(chunk.is_section_loaded(100 / SECTION_EDGE));
        // Other layers untouched.
        assert_eq!(chunk.temperature()[cell_index(4, 100, 6)], 0.0);
    }

    #[test]
    fn paint_all_layers() {
        let (mut world, solid) = painted_world();
        assert!(world.paint(ChunkPos::ORIGIN, 8, 136, PaintLayers::All, 6000.0, solid));

        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        for z in 0..CHUNK_D {
            let i = cell_index(8, 136, z);
            assert_eq!(chunk.temperature()[i], 6000.0, "z={z}");
            assert_eq!(chunk.back_buffer()[i], 6000.0, "z={z}");
            assert_eq!(chunk.mass()[i], 1000.0, "z={z}");
        }
    }

    #[test]
    fn painting_void_does_not_mark_a_section_loaded() {
        let (mut world, _solid) = painted_world();
        assert!(world.paint(
            ChunkPos::ORIGIN,
            2,
            50,
            PaintLayers::All,
            0.0,
            MaterialId::VOID
        ));
        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        assert!(!chunk.is_section_loaded(50 / SECTION_EDGE));
    }

    #[test]
    fn paint_rejects_missing_chunk_and_bad_coords() {
        let (mut world, solid) = painted_world();
        assert!(!world.paint(ChunkPos::new(5, 5), 0, 0, PaintLayers::All, 300.0, solid));
        assert!(!world.paint(
            ChunkPos::ORIGIN,
            CHUNK_W,
            0,
            PaintLayers::All,
            300.0,
            solid
        ));
        assert!(!world.paint(
            ChunkPos::ORIGIN,
            0,
            0,
            PaintLayers::Slice(CHUNK_D),
            300.0,
            solid
        ));
    }
}
