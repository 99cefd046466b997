use super::{CellStage, RefinementStage, RegionStage, TimingBreakdown};
use crate::primitives::{ExtractionSummary, Shape};
use crate::types::DetectionResult;
use serde::Serialize;
use std::fmt::Write as _;

/// Result produced by [`PrimitiveDetector::process_with_diagnostics`](crate::PrimitiveDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub result: DetectionResult,
    pub trace: PipelineTrace,
}

impl DetectionReport {
    /// Human-readable multi-line summary used by the command-line tool.
    pub fn summary(&self) -> String {
        let trace = &self.trace;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "input {}x{} valid={} cells={}x{} ({}x{} px)",
            trace.input.width,
            trace.input.height,
            trace.input.valid_points,
            trace.cells.cols,
            trace.cells.rows,
            trace.input.cell_width,
            trace.input.cell_height,
        );
        let _ = writeln!(
            out,
            "cells planar={} non_planar={} unknown={} discontinuous={}",
            trace.cells.planar, trace.cells.non_planar, trace.cells.unknown, trace.cells.discontinuous
        );
        let merges = trace
            .regions
            .merge
            .as_ref()
            .map(|m| m.merges.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "regions grown={} discarded={} merges={} kept={} refined_pixels={}",
            trace.regions.growth.kept,
            trace.regions.growth.discarded,
            merges,
            trace.regions.kept,
            trace.refinement.total_added(),
        );
        for prim in &self.result.primitives {
            let n = prim.normal();
            let _ = writeln!(
                out,
                "  plane {:>3}: n=[{:+.3} {:+.3} {:+.3}] d={:.3} inliers={} vertices={}",
                prim.id(),
                n[0],
                n[1],
                n[2],
                prim.offset(),
                prim.inlier_count(),
                prim.boundary().len(),
            );
        }
        let _ = write!(
            out,
            "primitives={} latency_ms={:.3}",
            self.result.primitives.len(),
            self.result.latency_ms
        );
        out
    }
}

/// End-to-end trace describing the internal execution of the detector.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub cells: CellStage,
    pub regions: RegionStage,
    pub refinement: RefinementStage,
    pub extraction: ExtractionSummary,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub valid_points: usize,
    pub cell_width: usize,
    pub cell_height: usize,
    pub has_intrinsics: bool,
}
