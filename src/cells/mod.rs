//! Cell stage: regular partition of the depth grid, per-cell plane fits and
//! their classification.
//!
//! - [`CellLayout`] maps between pixels and cells and enumerates 4-neighbours
//!   in a fixed order (left, right, up, down).
//! - [`fit_cells`] fits every cell independently (in parallel with the
//!   `parallel` feature) and labels it planar, non-planar or unknown.
//! - [`PlaneStats`] carries the summed statistics used by every later stage.

pub mod classify;
pub mod fitter;
pub mod stats;

pub use classify::{classify_cell, CellLabel};
pub use fitter::{fit_cell, fit_cells};
pub use stats::{PlaneFit, PlaneStats};

use crate::detector::DetectorParams;
use crate::error::DetectorError;
use crate::image::DepthGrid;
use nalgebra::Vector3;
use serde::Serialize;

/// Geometry of the cell partition for one grid size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CellLayout {
    pub cell_w: usize,
    pub cell_h: usize,
    /// Cells per row
    pub cols: usize,
    /// Cells per column
    pub rows: usize,
}

impl CellLayout {
    /// Partition `grid` into the configured cells. The grid must be a whole
    /// number of cells in each dimension.
    pub fn for_grid(grid: &DepthGrid, params: &DetectorParams) -> Result<Self, DetectorError> {
        if grid.data.len() != grid.w * grid.h {
            return Err(DetectorError::GridShape {
                width: grid.w,
                height: grid.h,
                len: grid.data.len(),
            });
        }
        if grid.w == 0 || grid.h == 0 {
            return Err(DetectorError::GridTooSmall {
                width: grid.w,
                height: grid.h,
            });
        }
        let (cw, ch) = (params.cell_width, params.cell_height);
        if grid.w % cw != 0 || grid.h % ch != 0 {
            return Err(DetectorError::GridNotDivisible {
                width: grid.w,
                height: grid.h,
                cell_width: cw,
                cell_height: ch,
            });
        }
        Ok(Self {
            cell_w: cw,
            cell_h: ch,
            cols: grid.w / cw,
            rows: grid.h / ch,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// `(col, row)` of cell `index`.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.cols, index / self.cols)
    }

    #[inline]
    pub fn cell_of_pixel(&self, x: usize, y: usize) -> usize {
        self.index(x / self.cell_w, y / self.cell_h)
    }

    /// Top-left pixel of cell `index`.
    #[inline]
    pub fn origin(&self, index: usize) -> (usize, usize) {
        let (c, r) = self.coords(index);
        (c * self.cell_w, r * self.cell_h)
    }

    /// 4-neighbours of `index` in left, right, up, down order.
    pub fn neighbors4(&self, index: usize) -> impl Iterator<Item = usize> {
        let (c, r) = self.coords(index);
        let cols = self.cols;
        let rows = self.rows;
        [
            (c > 0).then(|| index - 1),
            (c + 1 < cols).then(|| index + 1),
            (r > 0).then(|| index - cols),
            (r + 1 < rows).then(|| index + cols),
        ]
        .into_iter()
        .flatten()
    }
}

/// Local plane fit of one cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlaneSegment {
    pub index: usize,
    pub stats: PlaneStats,
    /// Present for planar and non-planar cells; `None` for unknown cells.
    pub fit: Option<PlaneFit>,
    /// Depth jumps counted inside the cell.
    pub discontinuities: usize,
    pub label: CellLabel,
}

impl PlaneSegment {
    #[inline]
    pub fn point_count(&self) -> usize {
        self.stats.count
    }

    #[inline]
    pub fn is_planar(&self) -> bool {
        self.label == CellLabel::Planar
    }

    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.fit.map(|f| f.normal)
    }

    pub fn mse(&self) -> Option<f64> {
        self.fit.map(|f| f.mse)
    }
}
