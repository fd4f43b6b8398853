//! One-step heat update for a single 16×16×16 section.
//!
//! Explicit finite-difference conduction on a unit grid: every non-void
//! cell exchanges heat with its six face neighbors, with the interface
//! conductivity taken as the harmonic mean of the two cell materials,
//! the standard choice for layered heterogeneous media. The scheme is
//! unconditionally unstable for large `dt·k/Cth`, so results are clamped
//! to the visualization range; an insulator on either side of a face
//! zeroes that face's contribution.
//!
//! The kernel reads only front buffers (its own and its neighbors') and
//! writes only this chunk's back buffer, so sections may be stepped in
//! any order within a frame.

use kiln_core::{cell_index, section_rows, CHUNK_D, CHUNK_W, SECTIONS_Y, TEMP_MAX_K, TEMP_MIN_K};
use kiln_world::{Chunk, World};

/// Floor for a cell's thermal capacity, guarding the division when mass
/// or heat capacity is zero.
const MIN_THERMAL_CAPACITY: f32 = 1e-8;

/// The six axis-aligned face offsets.
const FACE_OFFSETS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Advance section `sy` of `chunk` by one step of `dt` seconds, reading
/// current buffers through `world` and writing this chunk's back buffer.
///
/// Out-of-range `sy` is a no-op. Void cells pass their current
/// temperature through unchanged.
pub fn step_section(world: &World, chunk: &Chunk, sy: usize, dt: f64) {
    if sy >= SECTIONS_Y {
        return;
    }
    let dt = dt as f32;
    let materials = &world.materials;
    let front = chunk.temperature();
    let mat_ix = chunk.material_indices();
    let mass = chunk.mass();
    let mut back = chunk.back_buffer();

    for z in 0..CHUNK_D {
        for y in section_rows(sy) {
            for x in 0..CHUNK_W {
                let i = cell_index(x, y, z);
                let mix = mat_ix[i];
                if mix == chunk.void_ix() {
                    back[i] = front[i];
                    continue;
                }

                let material = materials.by_ix(mix);
                let capacity = (mass[i] * material.heat_capacity).max(MIN_THERMAL_CAPACITY);
                let t_self = front[i];
                let k_self = material.thermal_conductivity;

                let mut delta = 0.0f32;
                for (dx, dy, dz) in FACE_OFFSETS {
                    // Missing neighbors are no-flux boundaries.
                    let Some(nb) = world.sample_neighbor(chunk, x, y, z, dx, dy, dz) else {
                        continue;
                    };
                    let k_nb = materials.by_ix(nb.material).thermal_conductivity;
                    if k_self <= 0.0 || k_nb <= 0.0 {
                        continue;
                    }
                    let k_eff = 2.0 * k_self * k_nb / (k_self + k_nb);
                    delta += k_eff * (nb.temperature - t_self);
                }

                let t_new = t_self + (dt / capacity) * delta;
                back[i] = t_new.clamp(TEMP_MIN_K, TEMP_MAX_K);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::{ChunkPos, Material, SECTION_EDGE};
    use kiln_world::World;

    const SOLID: Material = Material {
        heat_capacity: 500.0,
        thermal_conductivity: 100.0,
        default_mass: 1000.0,
        molar_mass: 0.05,
    };

    fn one_section_world() -> World {
        let mut world = World::new();
        world.materials.add(Material::VOID);
        let solid = world.materials.add(SOLID);
        world.ensure(ChunkPos::ORIGIN);
        world.fill_section(ChunkPos::ORIGIN, solid, 300.0, 8);
        world
    }

    #[test]
    fn void_cells_pass_through_unchanged() {
        let mut world = World::new();
        world.materials.add(Material::VOID);
        let chunk = world.ensure(ChunkPos::ORIGIN);
        // A temperature ramp on an all-void section.
        for y in section_rows(8) {
            for z in 0..CHUNK_D {
                for x in 0..CHUNK_W {
                    chunk.set_cell_temperature(x, y, z, y as f32);
                }
            }
        }
        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        step_section(&world, chunk, 8, 1.0);

        let back = chunk.back_buffer();
        for y in section_rows(8) {
            for z in 0..CHUNK_D {
                for x in 0..CHUNK_W {
                    let i = cell_index(x, y, z);
                    assert_eq!(back[i], y as f32);
                }
            }
        }
    }

    #[test]
    fn uniform_section_stays_uniform() {
        let world = one_section_world();
        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        step_section(&world, chunk, 8, 1.0);

        let back = chunk.back_buffer();
        for y in section_rows(8) {
            for z in 0..CHUNK_D {
                for x in 0..CHUNK_W {
                    assert_eq!(back[cell_index(x, y, z)], 300.0);
                }
            }
        }
    }

    #[test]
    fn out_of_range_section_is_a_no_op() {
        let world = one_section_world();
        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        step_section(&world, chunk, SECTIONS_Y, 1.0);
        assert!(chunk.back_buffer().iter().all(|&t| t == 0.0 || t == 300.0));
    }

    #[test]
    fn results_are_clamped_to_the_temperature_range() {
        let mut world = one_section_world();
        let chunk = world.find_mut(ChunkPos::ORIGIN).unwrap();
        chunk.set_cell_temperature(8, 8 * SECTION_EDGE + 8, 8, 6000.0);

        // An absurd dt overshoots in both directions; the clamp rail holds.
        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        step_section(&world, chunk, 8, 1.0e12);

        let back = chunk.back_buffer();
        for y in section_rows(8) {
            for z in 0..CHUNK_D {
                for x in 0..CHUNK_W {
                    let t = back[cell_index(x, y, z)];
                    assert!((TEMP_MIN_K..=TEMP_MAX_K).contains(&t), "t={t}");
                }
            }
        }
    }

    #[test]
    fn insulator_face_contributes_nothing() {
        let mut world = one_section_world();
        let insulator = world.materials.add(Material {
            thermal_conductivity: 0.0,
            ..SOLID
        });
        let y_mid = 8 * SECTION_EDGE + 8;
        let chunk = world.find_mut(ChunkPos::ORIGIN).unwrap();
        chunk.set_cell_temperature(8, y_mid, 8, 6000.0);
        // Replace the +x neighbor of the hot cell with an insulator.
        world.paint(
            ChunkPos::ORIGIN,
            9,
            y_mid,
            kiln_world::PaintLayers::Slice(8),
            300.0,
            insulator,
        );

        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        step_section(&world, chunk, 8, 1.0);

        let back = chunk.back_buffer();
        // The insulator neighbor stays cold; the other faces warmed.
        assert_eq!(back[cell_index(9, y_mid, 8)], 300.0);
        assert!(back[cell_index(7, y_mid, 8)] > 300.0);
        assert!(back[cell_index(8, y_mid + 1, 8)] > 300.0);
        assert!(back[cell_index(8, y_mid, 9)] > 300.0);
        // The hot cell still cooled through its five conducting faces.
        assert!(back[cell_index(8, y_mid, 8)] < 6000.0);
    }

    #[test]
    fn top_section_loses_no_heat_upward() {
        let mut world = World::new();
        world.materials.add(Material::VOID);
        let solid = world.materials.add(SOLID);
        world.ensure(ChunkPos::ORIGIN);
        world.fill_section(ChunkPos::ORIGIN, solid, 300.0, SECTIONS_Y - 1);

        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        step_section(&world, chunk, SECTIONS_Y - 1, 1.0);

        // No upper neighbor exists; a uniform section at the top of the
        // column must not lose anything through the missing face.
        let back = chunk.back_buffer();
        for y in section_rows(SECTIONS_Y - 1) {
            for z in 0..CHUNK_D {
                for x in 0..CHUNK_W {
                    assert_eq!(back[cell_index(x, y, z)], 300.0);
                }
            }
        }
    }

    #[test]
    fn absent_chunk_face_is_no_flux_not_zero_kelvin() {
        // Cells on the -x face of the only chunk border nothing. If the
        // missing chunk were read as 0 K they would cool; they must not.
        let world = one_section_world();
        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        step_section(&world, chunk, 8, 1.0);

        let back = chunk.back_buffer();
        for y in section_rows(8) {
            for z in 0..CHUNK_D {
                assert_eq!(back[cell_index(0, y, z)], 300.0);
            }
        }
    }
}
