//! Canonical initial world: one solid section with a hot seed cell.

use kiln_core::{ChunkPos, Material, MaterialId, CHUNK_D, CHUNK_W, SECTION_EDGE};
use kiln_world::World;

/// The baseline solid material interned at index 1 by [`seed_world`].
pub const SOLID: Material = Material {
    heat_capacity: 500.0,
    thermal_conductivity: 100.0,
    default_mass: 1000.0,
    molar_mass: 0.05,
};

/// Vertical section seeded with material, the middle of the column.
pub const SEED_SECTION: usize = 8;

/// Populate an empty world with the canonical starting state: VOID at
/// index 0 and [`SOLID`] at index 1 (skipped if materials already
/// exist), chunk `(0, 0)` with section [`SEED_SECTION`] filled with
/// solid at 300 K, and the center cell of that section set to 6000 K in
/// both buffers so diffusion is visible from the first frame.
///
/// Returns the solid's material index.
pub fn seed_world(world: &mut World) -> MaterialId {
    let solid = if world.materials.is_empty() {
        world.materials.add(Material::VOID);
        world.materials.add(SOLID)
    } else {
        MaterialId(1)
    };

    world.ensure(ChunkPos::ORIGIN);
    world.fill_section(ChunkPos::ORIGIN, solid, 300.0, SEED_SECTION);

    let chunk = world
        .find_mut(ChunkPos::ORIGIN)
        .expect("seed chunk just ensured");
    let y_mid = SEED_SECTION * SECTION_EDGE + SECTION_EDGE / 2;
    chunk.set_cell_temperature(CHUNK_W / 2, y_mid, CHUNK_D / 2, 6000.0);
    solid
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::cell_index;

    #[test]
    fn seed_world_builds_the_canonical_state() {
        let mut world = World::new();
        let solid = seed_world(&mut world);

        assert_eq!(solid, MaterialId(1));
        assert_eq!(world.materials.len(), 2);
        assert_eq!(*world.materials.by_ix(solid), SOLID);

        let chunk = world.find(ChunkPos::ORIGIN).unwrap();
        assert!(chunk.is_section_loaded(SEED_SECTION));
        let i = cell_index(8, SEED_SECTION * SECTION_EDGE + 8, 8);
        assert_eq!(chunk.temperature()[i], 6000.0);
        assert_eq!(chunk.back_buffer()[i], 6000.0);
    }

    #[test]
    fn seed_world_twice_does_not_duplicate_materials() {
        let mut world = World::new();
        seed_world(&mut world);
        let solid = seed_world(&mut world);
        assert_eq!(world.materials.len(), 2);
        assert_eq!(solid, MaterialId(1));
    }
}
