//! Region stage: grouping planar cells into connected, plane-compatible
//! regions and refining their extent to pixel accuracy.
//!
//! - [`builder`] grows regions breadth-first from seed cells, accepting a
//!   4-neighbour only when its normal agrees with the running aggregate and
//!   the merged fit stays under the planarity threshold.
//! - [`merge`] fuses adjacent regions that turned out compatible after growth.
//! - [`refine`] extends each region pixel by pixel into cells no region owns,
//!   largest regions first.
//!
//! Ownership is tracked with flat label arrays (`0` = free, `id + 1` = region)
//! rather than links between cells and regions.

pub mod builder;
pub mod merge;
pub mod refine;

pub use builder::{grow_regions, GrowthSummary};
pub use merge::{merge_adjacent_regions, MergeSummary};
pub use refine::{refine_regions, RefinedRegion};

use crate::cells::{PlaneFit, PlaneStats};
use crate::mask::PixelMask;
use serde::Serialize;

/// Owner label written into cell/pixel ownership arrays for region `id`.
#[inline]
pub fn owner_label(id: usize) -> u32 {
    id as u32 + 1
}

/// A connected set of planar cells sharing one plane.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Region {
    pub id: usize,
    /// Member cells in acceptance order.
    pub cells: Vec<usize>,
    /// Summed statistics of all member cells.
    pub stats: PlaneStats,
    /// Plane fitted to `stats`.
    pub fit: PlaneFit,
    /// Pixel membership; empty until the refinement stage has run.
    pub boundary_mask: PixelMask,
}

impl Region {
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
