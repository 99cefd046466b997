#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod camera;
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod primitives;
pub mod types;

// Stage-level building blocks. Public for tools and tests; expect churn.
pub mod angle;
pub mod cells;
pub mod mask;
pub mod regions;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{DetectorParams, DetectorWorkspace, PrimitiveDetector};
pub use crate::error::DetectorError;
pub use crate::primitives::{Plane, Primitive, Shape};
pub use crate::types::DetectionResult;

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use primitive_detector::prelude::*;
///
/// # fn main() -> Result<(), DetectorError> {
/// let (w, h) = (640usize, 480usize);
/// let depth = vec![1.5f32; w * h];
/// let k = Intrinsics::centered(525.0, w, h);
/// let grid = DepthGrid::from_depth_map(w, h, &depth, &k)?;
///
/// let mut det = PrimitiveDetector::new(DetectorParams::default())?;
/// let result = det.process(&grid)?;
/// for prim in &result.primitives {
///     println!("plane {} n={:?} inliers={}", prim.id(), prim.normal(), prim.inlier_count());
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::camera::Intrinsics;
    pub use crate::image::DepthGrid;
    pub use crate::{
        DetectionResult, DetectorError, DetectorParams, Plane, Primitive, PrimitiveDetector, Shape,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners.
    pub use crate::cells::{fit_cell, fit_cells, CellLayout};
    pub use crate::primitives::{extract_primitives, trace_outer_contour};
    pub use crate::regions::{grow_regions, merge_adjacent_regions, refine_regions};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        CellStage, InputDescriptor, RefinementStage, RegionRefinement, RegionStage, Stage,
        StageTiming, TimingBreakdown,
    };
    pub use crate::primitives::ExtractionSummary;
    pub use crate::regions::{GrowthSummary, MergeSummary};
}
