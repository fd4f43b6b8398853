//! Shared fixtures for kiln tests.

#![forbid(unsafe_code)]

pub mod fixtures;

pub use fixtures::{material_world, solid_section_world, two_chunk_world, SOLID};
