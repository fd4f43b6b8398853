//! Material properties and the append-only material registry.
//!
//! Cells reference materials through a compact 16-bit index into a
//! [`MaterialTable`]. The table never shrinks or reorders, so an index
//! obtained from [`MaterialTable::add`] stays valid for the lifetime of
//! the world.

use std::fmt;

/// Index of a material in a [`MaterialTable`].
///
/// Index 0 is reserved by convention for [`Material::VOID`] (empty space).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u16);

impl MaterialId {
    /// The conventional index of the void material.
    pub const VOID: MaterialId = MaterialId(0);
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for MaterialId {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

/// Physical properties of a material, immutable once interned.
///
/// `molar_mass` is recorded for future use; the heat kernel does not
/// read it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Specific heat capacity, J·kg⁻¹·K⁻¹. Non-negative.
    pub heat_capacity: f32,
    /// Thermal conductivity, W·m⁻¹·K⁻¹. Non-negative; zero means insulator.
    pub thermal_conductivity: f32,
    /// Mass of one unit cell of this material, kg. Non-negative.
    pub default_mass: f32,
    /// Molar mass, kg·mol⁻¹. Non-negative.
    pub molar_mass: f32,
}

impl Material {
    /// Empty space: all-zero properties. Void cells never conduct and are
    /// never updated by the kernel.
    pub const VOID: Material = Material {
        heat_capacity: 0.0,
        thermal_conductivity: 0.0,
        default_mass: 0.0,
        molar_mass: 0.0,
    };
}

/// Append-only registry of materials, keyed by insertion index.
///
/// Indices returned by [`add`](MaterialTable::add) remain valid forever:
/// there is no removal, no reordering, and no clearing.
#[derive(Clone, Debug, Default)]
pub struct MaterialTable {
    entries: Vec<Material>,
}

impl MaterialTable {
    /// An empty table. Callers that want the VOID convention must add
    /// [`Material::VOID`] first so it lands at index 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a material and return its index. O(1) amortized.
    ///
    /// # Panics
    ///
    /// Panics if the table already holds `u16::MAX + 1` materials.
    pub fn add(&mut self, material: Material) -> MaterialId {
        let ix = u16::try_from(self.entries.len()).expect("material table overflow");
        self.entries.push(material);
        MaterialId(ix)
    }

    /// Look up a material by index. Constant time.
    ///
    /// # Panics
    ///
    /// Panics if `ix` was not returned by [`add`](MaterialTable::add) on
    /// this table; material indices are trusted by contract.
    pub fn by_ix(&self, ix: MaterialId) -> &Material {
        &self.entries[ix.0 as usize]
    }

    /// Number of registered materials.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no material has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_returns_sequential_indices() {
        let mut table = MaterialTable::new();
        assert!(table.is_empty());
        let void = table.add(Material::VOID);
        let solid = table.add(Material {
            heat_capacity: 500.0,
            thermal_conductivity: 100.0,
            default_mass: 1000.0,
            molar_mass: 0.05,
        });
        assert_eq!(void, MaterialId::VOID);
        assert_eq!(solid, MaterialId(1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn by_ix_returns_the_interned_value() {
        let mut table = MaterialTable::new();
        table.add(Material::VOID);
        let m = Material {
            heat_capacity: 900.0,
            thermal_conductivity: 2.5,
            default_mass: 1800.0,
            molar_mass: 0.027,
        };
        let ix = table.add(m);
        assert_eq!(*table.by_ix(ix), m);
        // Earlier indices are unaffected by later adds.
        assert_eq!(*table.by_ix(MaterialId::VOID), Material::VOID);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn by_ix_panics_on_unknown_index() {
        let table = MaterialTable::new();
        let _ = table.by_ix(MaterialId(3));
    }
}
