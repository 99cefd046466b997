//! Breadth-first region growing over the planar cell grid.
//!
//! Traversal order is part of the contract: seeds are taken by ascending cell
//! MSE (ties by row-major index) and neighbours are visited left, right, up,
//! down. Acceptance is tested against the aggregate at the time of the visit,
//! so membership can depend on this order while the final fit of a given
//! member set does not.

use super::{owner_label, Region};
use crate::angle::normals_agree;
use crate::cells::{CellLayout, PlaneSegment};
use crate::detector::DetectorParams;
use crate::mask::PixelMask;
use log::debug;
use serde::Serialize;
use std::collections::VecDeque;

/// Counts reported by [`grow_regions`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthSummary {
    pub seeds: usize,
    pub kept: usize,
    pub discarded: usize,
    pub discarded_cells: usize,
}

/// Partition planar cells into regions.
///
/// `cell_owner` must hold one zeroed slot per cell; on return it carries the
/// owner label of every kept region's cells. Cells of regions smaller than
/// `min_region_cells` stay unowned and are not offered to later seeds.
pub fn grow_regions(
    segments: &[PlaneSegment],
    layout: &CellLayout,
    params: &DetectorParams,
    cell_owner: &mut [u32],
) -> (Vec<Region>, GrowthSummary) {
    debug_assert_eq!(segments.len(), layout.len());
    debug_assert_eq!(cell_owner.len(), layout.len());

    let mut seeds: Vec<(usize, f64)> = segments
        .iter()
        .filter(|s| s.is_planar())
        .filter_map(|s| s.mse().map(|mse| (s.index, mse)))
        .collect();
    seeds.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let max_angle = params.normal_angle_threshold_rad();
    let mut consumed = vec![false; segments.len()];
    let mut queue = VecDeque::new();
    let mut regions = Vec::new();
    let mut summary = GrowthSummary::default();

    for &(seed, _) in &seeds {
        if consumed[seed] {
            continue;
        }
        let Some(seed_fit) = segments[seed].fit else {
            continue;
        };
        summary.seeds += 1;
        consumed[seed] = true;
        let mut stats = segments[seed].stats;
        let mut fit = seed_fit;
        let mut cells = vec![seed];
        queue.clear();
        queue.push_back(seed);

        while let Some(cell) = queue.pop_front() {
            for nb in layout.neighbors4(cell) {
                if consumed[nb] || !segments[nb].is_planar() {
                    continue;
                }
                let Some(nb_fit) = segments[nb].fit else {
                    continue;
                };
                if !normals_agree(&fit.normal, &nb_fit.normal, max_angle) {
                    continue;
                }
                let merged = stats + segments[nb].stats;
                let Some(merged_fit) = merged.fit() else {
                    continue;
                };
                if merged_fit.mse > params.planarity_mse_threshold {
                    continue;
                }
                consumed[nb] = true;
                stats = merged;
                fit = merged_fit;
                cells.push(nb);
                queue.push_back(nb);
            }
        }

        if cells.len() < params.min_region_cells {
            summary.discarded += 1;
            summary.discarded_cells += cells.len();
            continue;
        }
        let id = regions.len();
        for &c in &cells {
            cell_owner[c] = owner_label(id);
        }
        regions.push(Region {
            id,
            cells,
            stats,
            fit,
            boundary_mask: PixelMask::empty(),
        });
    }
    summary.kept = regions.len();

    debug!(
        "grow_regions seeds={} kept={} discarded={} (cells={})",
        summary.seeds, summary.kept, summary.discarded, summary.discarded_cells
    );
    (regions, summary)
}
