//! Diagnostics data model returned alongside detection results.
//!
//! `DetectionReport` is the entry point: it pairs the compact
//! [`DetectionResult`](crate::DetectionResult) with a `PipelineTrace` holding
//! per-stage counters and timings. Everything serializes to camelCase JSON for
//! the command-line tool.

pub mod pipeline;
pub mod stages;
pub mod timing;

pub use pipeline::{DetectionReport, InputDescriptor, PipelineTrace};
pub use stages::{CellStage, RefinementStage, RegionRefinement, RegionStage};
pub use timing::{Stage, StageTiming, TimingBreakdown};
