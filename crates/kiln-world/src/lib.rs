//! Sparse chunked voxel world for the kiln thermal simulator.
//!
//! A [`World`] maps horizontal [`ChunkPos`](kiln_core::ChunkPos)
//! coordinates to owned [`Chunk`]s. Each chunk carries a material index,
//! a per-cell mass, and two equally typed temperature buffers that the
//! frame driver swaps in O(1) after every step. Chunks hold no back
//! pointer to the world; neighbor lookups across chunk borders go
//! through [`World::sample_neighbor`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chunk;
pub mod edit;
pub mod summary;
pub mod world;

pub use chunk::Chunk;
pub use edit::PaintLayers;
pub use world::{NeighborSample, World};
