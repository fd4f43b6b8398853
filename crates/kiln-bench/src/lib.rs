//! Deterministic reference scenes for kiln benchmarks.

#![forbid(unsafe_code)]

use kiln_core::{ChunkPos, Material, MaterialId, SECTIONS_Y, SECTION_EDGE};
use kiln_world::World;

/// The solid used by every benchmark scene.
pub const BENCH_SOLID: Material = Material {
    heat_capacity: 500.0,
    thermal_conductivity: 100.0,
    default_mass: 1000.0,
    molar_mass: 0.05,
};

/// One chunk with a single loaded section at a mild gradient.
pub fn single_section_scene() -> World {
    let mut world = World::new();
    world.materials.add(Material::VOID);
    let solid = world.materials.add(BENCH_SOLID);
    world.ensure(ChunkPos::ORIGIN);
    world.fill_section(ChunkPos::ORIGIN, solid, 300.0, 8);
    let chunk = world.find_mut(ChunkPos::ORIGIN).unwrap();
    chunk.set_cell_temperature(8, 8 * SECTION_EDGE + 8, 8, 6000.0);
    world
}

/// An `n × n` grid of chunks, each with every section loaded.
/// Deterministic temperatures derived from the chunk position.
pub fn grid_scene(n: i32) -> World {
    let mut world = World::new();
    world.materials.add(Material::VOID);
    let solid: MaterialId = world.materials.add(BENCH_SOLID);
    for cx in 0..n {
        for cz in 0..n {
            let pos = ChunkPos::new(cx, cz);
            world.ensure(pos);
            for sy in 0..SECTIONS_Y {
                let temp = 250.0 + (cx + cz + sy as i32) as f32 * 7.0;
                world.fill_section(pos, solid, temp, sy);
            }
        }
    }
    world
}
