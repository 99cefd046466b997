//! Planar / non-planar / unknown labelling of fitted cells.

use super::stats::{PlaneFit, PlaneStats};
use crate::detector::DetectorParams;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellLabel {
    /// Enough points and a residual under the planarity threshold.
    Planar,
    /// Enough points but a poor fit or an occlusion edge inside the cell.
    NonPlanar,
    /// Too few valid points or a degenerate configuration.
    Unknown,
}

/// Label a cell from its statistics. A cell without points is always unknown.
pub fn classify_cell(
    stats: &PlaneStats,
    fit: Option<&PlaneFit>,
    discontinuities: usize,
    params: &DetectorParams,
) -> CellLabel {
    if stats.count == 0 || stats.count < params.min_points_per_cell {
        return CellLabel::Unknown;
    }
    let Some(fit) = fit else {
        return CellLabel::Unknown;
    };
    if let Some(disc) = &params.depth_discontinuity {
        if discontinuities > disc.max_count {
            return CellLabel::NonPlanar;
        }
    }
    if fit.mse <= params.planarity_mse_threshold {
        CellLabel::Planar
    } else {
        CellLabel::NonPlanar
    }
}
