//! Simulation engine for the kiln thermal world.
//!
//! The [`kernel`] advances one 16×16×16 section by a single explicit
//! finite-difference step; the [`frame`] driver runs the kernel over
//! every loaded section and swaps the temperature buffers; the
//! [`server`] owns the world and steps it on a background thread behind
//! a coarse publish lock that readers and editors share.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod frame;
pub mod kernel;
pub mod server;
pub mod setup;

pub use config::{ConfigError, SimConfig};
pub use frame::{compute_frame, step, swap_all};
pub use kernel::step_section;
pub use server::{SimHandle, SimServer};
pub use setup::seed_world;
