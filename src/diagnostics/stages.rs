//! Counters reported by the individual pipeline stages.

use crate::cells::{CellLabel, PlaneSegment};
use crate::regions::{GrowthSummary, MergeSummary, RefinedRegion};
use serde::Serialize;

/// Outcome of cell fitting and classification.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStage {
    pub cols: usize,
    pub rows: usize,
    pub planar: usize,
    pub non_planar: usize,
    pub unknown: usize,
    /// Cells holding at least one depth jump.
    pub discontinuous: usize,
    pub elapsed_ms: f64,
}

impl CellStage {
    pub fn from_segments(
        segments: &[PlaneSegment],
        cols: usize,
        rows: usize,
        elapsed_ms: f64,
    ) -> Self {
        let mut stage = Self {
            cols,
            rows,
            elapsed_ms,
            ..Default::default()
        };
        for seg in segments {
            match seg.label {
                CellLabel::Planar => stage.planar += 1,
                CellLabel::NonPlanar => stage.non_planar += 1,
                CellLabel::Unknown => stage.unknown += 1,
            }
            if seg.discontinuities > 0 {
                stage.discontinuous += 1;
            }
        }
        stage
    }

    pub fn total(&self) -> usize {
        self.planar + self.non_planar + self.unknown
    }
}

/// Outcome of region growing and the optional merge pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStage {
    pub growth: GrowthSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<MergeSummary>,
    /// Regions handed to refinement.
    pub kept: usize,
    /// Cell count of every kept region, by region id.
    pub region_cells: Vec<usize>,
    pub elapsed_ms: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRefinement {
    pub region: usize,
    pub cells: usize,
    pub added_pixels: usize,
    pub mask_pixels: usize,
}

/// Pixel-level refinement, one entry per region in processing order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementStage {
    pub regions: Vec<RegionRefinement>,
    pub elapsed_ms: f64,
}

impl RefinementStage {
    pub fn from_refined(refined: &[RefinedRegion], elapsed_ms: f64) -> Self {
        let regions = refined
            .iter()
            .map(|r| RegionRefinement {
                region: r.region.id,
                cells: r.region.cell_count(),
                added_pixels: r.added_pixels,
                mask_pixels: r.region.boundary_mask.count(),
            })
            .collect();
        Self {
            regions,
            elapsed_ms,
        }
    }

    pub fn total_added(&self) -> usize {
        self.regions.iter().map(|r| r.added_pixels).sum()
    }
}
