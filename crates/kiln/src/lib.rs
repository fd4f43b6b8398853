//! Kiln: a sparse, chunked thermal-diffusion simulator.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all kiln sub-crates. For most users, adding `kiln` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use kiln::prelude::*;
//!
//! // The canonical starting world: one solid section with a hot seed.
//! let mut world = World::new();
//! let _solid = seed_world(&mut world);
//!
//! // Step it synchronously.
//! step(&mut world, 1.0);
//! assert!(world.total_frame_ms() >= 0.0);
//!
//! // Or hand it to a background server.
//! let mut server = SimServer::new(world, SimConfig::default()).unwrap();
//! server.start();
//! server.stop();
//! server.join();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `kiln-core` | Geometry constants, IDs, materials |
//! | [`world`] | `kiln-world` | Chunks, the sparse world, paint, summaries |
//! | [`engine`] | `kiln-engine` | Kernel, frame driver, sim server |
//! | [`stress`] | `kiln-stress` | Spiral growth controller and trip report |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Geometry constants, identifiers, and materials (`kiln-core`).
pub use kiln_core as types;

/// Chunks, the sparse world, editing, and summaries (`kiln-world`).
pub use kiln_world as world;

/// Kernel, frame driver, and background server (`kiln-engine`).
pub use kiln_engine as engine;

/// Growth/stress controller (`kiln-stress`).
pub use kiln_stress as stress;

/// Common imports for typical kiln usage.
///
/// ```rust
/// use kiln::prelude::*;
/// ```
pub mod prelude {
    pub use kiln_core::{ChunkPos, Material, MaterialId, MaterialTable};
    pub use kiln_engine::{
        compute_frame, seed_world, step, swap_all, SimConfig, SimHandle, SimServer,
    };
    pub use kiln_stress::{GrowthController, StressConfig, StressReport};
    pub use kiln_world::{Chunk, NeighborSample, PaintLayers, World};
}
