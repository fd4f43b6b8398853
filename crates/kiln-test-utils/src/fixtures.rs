//! Reusable world fixtures.
//!
//! Standard starting states for engine and stress tests: a VOID+SOLID
//! material table, one filled section, and a pair of adjacent chunks
//! with different temperatures.

use kiln_core::{ChunkPos, Material, MaterialId};
use kiln_world::World;

/// The baseline solid used across tests: conductive, massive, plausible.
pub const SOLID: Material = Material {
    heat_capacity: 500.0,
    thermal_conductivity: 100.0,
    default_mass: 1000.0,
    molar_mass: 0.05,
};

/// An empty world whose material table holds VOID (index 0) and
/// [`SOLID`] (index 1).
pub fn material_world() -> (World, MaterialId) {
    let mut world = World::new();
    world.materials.add(Material::VOID);
    let solid = world.materials.add(SOLID);
    (world, solid)
}

/// One chunk at the origin with section 8 filled with [`SOLID`] at
/// 300 K.
pub fn solid_section_world() -> (World, MaterialId) {
    let (mut world, solid) = material_world();
    world.ensure(ChunkPos::ORIGIN);
    world.fill_section(ChunkPos::ORIGIN, solid, 300.0, 8);
    (world, solid)
}

/// Chunks at `(0, 0)` and `(1, 0)`, each with section 8 filled with
/// [`SOLID`] at the given temperatures.
pub fn two_chunk_world(t_west: f32, t_east: f32) -> (World, MaterialId) {
    let (mut world, solid) = material_world();
    world.ensure(ChunkPos::ORIGIN);
    world.ensure(ChunkPos::new(1, 0));
    world.fill_section(ChunkPos::ORIGIN, solid, t_west, 8);
    world.fill_section(ChunkPos::new(1, 0), solid, t_east, 8);
    (world, solid)
}
