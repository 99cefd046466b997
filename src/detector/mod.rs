//! Primitive detector orchestrating the cell → region → primitive pipeline.
//!
//! Overview
//! - Partitions the organized grid into fixed-size cells and fits a plane to
//!   each one from summed statistics (in parallel with the `parallel` feature).
//! - Grows regions breadth-first over planar cells, seeded by the best-fitting
//!   cell first, accepting neighbours whose normal and merged residual stay
//!   within the configured thresholds.
//! - Optionally merges adjacent regions that turned out coplanar.
//! - Refines each region pixel by pixel into unowned cells, largest first.
//! - Refits every connected mask component and emits it as a bounded plane.
//!
//! Modules
//! - [`params`] – configuration consumed by every stage and the CLI.
//! - `pipeline` – the [`PrimitiveDetector`] implementation.
//! - `workspace` – ownership buffers reused across frames.

pub mod params;
mod pipeline;
mod workspace;

pub use params::{DepthDiscontinuity, DetectorParams};
pub use pipeline::PrimitiveDetector;
pub use workspace::DetectorWorkspace;
