//! Core types for the kiln thermal simulator.
//!
//! Chunk geometry constants, the cell linearization, strongly-typed
//! identifiers, and the append-only material registry. Everything here is
//! plain data: no threads, no locks, no I/O.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod material;
pub mod pos;

pub use constants::{
    cell_index, section_rows, CHUNK_D, CHUNK_H, CHUNK_N, CHUNK_W, SECTIONS_Y, SECTION_EDGE,
    TEMP_MAX_K, TEMP_MIN_K,
};
pub use material::{Material, MaterialId, MaterialTable};
pub use pos::ChunkPos;
