//! Per-cell plane fitting.
//!
//! Each cell is summarized independently from the read-only grid, so the
//! whole stage maps cleanly onto a parallel iterator. Output slot `i` always
//! holds cell `i` in row-major order regardless of scheduling.

use super::classify::classify_cell;
use super::stats::PlaneStats;
use super::{CellLayout, PlaneSegment};
use crate::detector::DetectorParams;
use crate::image::{is_valid_point, DepthGrid, ImageView};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fit and classify every cell of `grid`.
pub fn fit_cells(
    grid: &DepthGrid,
    layout: &CellLayout,
    params: &DetectorParams,
) -> Vec<PlaneSegment> {
    #[cfg(feature = "parallel")]
    {
        (0..layout.len())
            .into_par_iter()
            .map(|index| fit_cell(grid, layout, index, params))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..layout.len())
            .map(|index| fit_cell(grid, layout, index, params))
            .collect()
    }
}

/// Fit the plane of a single cell from its valid points.
pub fn fit_cell(
    grid: &DepthGrid,
    layout: &CellLayout,
    index: usize,
    params: &DetectorParams,
) -> PlaneSegment {
    let (x0, y0) = layout.origin(index);
    let mut stats = PlaneStats::default();
    let mut discontinuities = 0usize;
    let alpha = params.depth_discontinuity.map(|d| d.alpha);

    let mut prev_row: Option<&[[f32; 3]]> = None;
    for y in y0..y0 + layout.cell_h {
        let row = grid.row_span(y, x0, layout.cell_w);
        for (i, p) in row.iter().enumerate() {
            if !is_valid_point(p) {
                continue;
            }
            stats.push(p);
            if let Some(alpha) = alpha {
                if i > 0 && is_jump(&row[i - 1], p, alpha) {
                    discontinuities += 1;
                }
                if let Some(above) = prev_row {
                    if is_jump(&above[i], p, alpha) {
                        discontinuities += 1;
                    }
                }
            }
        }
        prev_row = Some(row);
    }

    let fit = if stats.count >= params.min_points_per_cell {
        stats.fit()
    } else {
        None
    };
    let label = classify_cell(&stats, fit.as_ref(), discontinuities, params);
    PlaneSegment {
        index,
        stats,
        fit,
        discontinuities,
        label,
    }
}

#[inline]
fn is_jump(a: &[f32; 3], b: &[f32; 3], alpha: f32) -> bool {
    if !is_valid_point(a) {
        return false;
    }
    (a[2] - b[2]).abs() > alpha * a[2].min(b[2])
}
