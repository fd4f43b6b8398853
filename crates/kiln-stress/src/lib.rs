//! Growth/stress controller for the kiln simulator.
//!
//! Loads the world one random section at a time, walking an outward
//! spiral of chunks, until a measured frame exceeds its real-time
//! budget. The trip is not an error: it is the designed signal that the
//! budget is exhausted. It pauses the simulation, prints a summary, and
//! halts growth permanently while the sim and any UI keep running.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod grower;
pub mod progress;
pub mod report;
pub mod spiral;

pub use config::StressConfig;
pub use grower::{Grower, GrowthController};
pub use progress::ProgressBar;
pub use report::StressReport;
pub use spiral::SpiralCursor;
