//! Detector pipeline driving primitive detection end-to-end.
//!
//! The [`PrimitiveDetector`] takes one organized depth grid at a time and runs
//! cell fitting → region growing → (optional) region merging → pixel-level
//! refinement → primitive extraction. Parameters are validated once when the
//! detector is built; afterwards only a grid whose shape disagrees with the
//! cell size is reported as an error.
//!
//! Typical usage:
//! ```no_run
//! use primitive_detector::{DetectorParams, PrimitiveDetector};
//! use primitive_detector::image::DepthGrid;
//!
//! # fn example(grid: DepthGrid) -> Result<(), primitive_detector::DetectorError> {
//! let mut detector = PrimitiveDetector::new(DetectorParams::default())?;
//! let report = detector.process_with_diagnostics(&grid)?;
//! for plane in report.result.primitives.iter().filter_map(|p| p.as_plane()) {
//!     println!("normal={:?} d={:.3}", plane.normal, plane.offset);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::DetectorParams;
use super::workspace::DetectorWorkspace;
use crate::cells::{fit_cells, CellLayout};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{
    CellStage, DetectionReport, InputDescriptor, PipelineTrace, RefinementStage, RegionStage,
    Stage, TimingBreakdown,
};
use crate::error::DetectorError;
use crate::image::DepthGrid;
use crate::primitives::extract_primitives;
use crate::regions::{grow_regions, merge_adjacent_regions, refine_regions};
use crate::types::DetectionResult;
use log::{debug, warn};
use std::time::Instant;

/// Plane detector over organized depth grids.
pub struct PrimitiveDetector {
    params: DetectorParams,
    workspace: DetectorWorkspace,
}

impl PrimitiveDetector {
    /// Create a detector, rejecting unusable parameters up front.
    pub fn new(params: DetectorParams) -> Result<Self, DetectorError> {
        params.validate()?;
        Ok(Self {
            params,
            workspace: DetectorWorkspace::new(),
        })
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Ownership buffers left by the last processed frame.
    pub fn workspace(&self) -> &DetectorWorkspace {
        &self.workspace
    }

    /// Run the detector on one grid, returning only the primitives.
    pub fn process(&mut self, grid: &DepthGrid) -> Result<DetectionResult, DetectorError> {
        self.process_with_diagnostics(grid).map(|report| report.result)
    }

    /// Run the detector and return both the result and a per-stage trace.
    pub fn process_with_diagnostics(
        &mut self,
        grid: &DepthGrid,
    ) -> Result<DetectionReport, DetectorError> {
        let params = &self.params;
        let layout = CellLayout::for_grid(grid, params).inspect_err(|err| {
            warn!("PrimitiveDetector rejected input: {err}");
        })?;
        debug!(
            "PrimitiveDetector::process start w={} h={} cells={}x{}",
            grid.w, grid.h, layout.cols, layout.rows
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        self.workspace.reset(layout.len(), grid.w * grid.h);
        let (cell_owner, pixel_owner) = self.workspace.owners_mut();

        let stage_start = Instant::now();
        let segments = fit_cells(grid, &layout, params);
        let cells_ms = timings.finish(Stage::Cells, stage_start);
        let cells = CellStage::from_segments(&segments, layout.cols, layout.rows, cells_ms);
        debug!(
            "cells planar={} non_planar={} unknown={}",
            cells.planar, cells.non_planar, cells.unknown
        );

        let stage_start = Instant::now();
        let (mut regions, growth) = grow_regions(&segments, &layout, params, cell_owner);
        timings.finish(Stage::Grow, stage_start);
        let mut merge = None;
        if params.merge_adjacent_regions {
            let merge_start = Instant::now();
            let (merged, summary) = merge_adjacent_regions(regions, &layout, params, cell_owner);
            timings.finish(Stage::Merge, merge_start);
            regions = merged;
            merge = Some(summary);
        }
        let region_stage = RegionStage {
            growth,
            merge,
            kept: regions.len(),
            region_cells: regions.iter().map(|r| r.cell_count()).collect(),
            elapsed_ms: elapsed_ms(stage_start),
        };

        let stage_start = Instant::now();
        let refined = refine_regions(grid, &layout, params, regions, cell_owner, pixel_owner);
        let refine_ms = timings.finish(Stage::Refine, stage_start);
        let refinement = RefinementStage::from_refined(&refined, refine_ms);

        let stage_start = Instant::now();
        let (primitives, labels, extraction) = extract_primitives(grid, params, &refined);
        timings.finish(Stage::Extract, stage_start);

        let latency_ms = elapsed_ms(total_start);
        timings.total_ms = latency_ms;
        debug!(
            "PrimitiveDetector::process done primitives={} latency_ms={:.3}",
            primitives.len(),
            latency_ms
        );

        Ok(DetectionReport {
            result: DetectionResult {
                primitives,
                labels,
                latency_ms,
            },
            trace: PipelineTrace {
                input: InputDescriptor {
                    width: grid.w,
                    height: grid.h,
                    valid_points: grid.valid_count(),
                    cell_width: layout.cell_w,
                    cell_height: layout.cell_h,
                    has_intrinsics: grid.intrinsics.is_some(),
                },
                timings,
                cells,
                regions: region_stage,
                refinement,
                extraction,
            },
        })
    }
}
